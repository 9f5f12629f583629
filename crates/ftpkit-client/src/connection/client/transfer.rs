//! Data-connection transfers.
//!
//! Every transfer follows the same order on the wire:
//!
//! 1. `PASV`, then connect to the announced address.
//! 2. Start the data body (read listing, read file, write file).
//! 3. Send the transfer command and wait for its preliminary reply while
//!    the body runs.
//! 4. Once the body has finished (for uploads, after shutting the data
//!    connection down), read the final reply.
//!
//! The server only sends its final reply after the data connection has been
//! drained or closed, so the body must be live before step 3.

use std::future::Future;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use super::Client;
use super::states::Authenticated;
use crate::command::Command;
use crate::connection::stream::Connector;
use crate::parser::{FileList, Grammar, HostPortTuple, parse_complete};
use crate::types::{FileEntry, HostPort};
use crate::{Error, Result};

impl<S, C> Client<S, C, Authenticated>
where
    S: AsyncRead + AsyncWrite + Unpin,
    C: Connector,
{
    /// Sends PASV and decodes the announced data address.
    pub(crate) async fn passive(&mut self) -> Result<HostPort> {
        let reply = self.execute(Command::Pasv).await?;
        let message = reply.message();
        parse_complete(HostPortTuple::new(), message.as_bytes())
            .ok_or_else(|| Error::InvalidHostPort(message.to_string()))
    }

    /// Opens a data connection through the connector.
    pub(crate) async fn open_data_connection(&mut self) -> Result<C::Stream> {
        let address = self.passive().await?;
        debug!(%address, "opening data connection");
        self.connector.connect(address.socket_addr()).await
    }

    /// Runs `body` against `command`'s control exchange.
    ///
    /// The body is polled before the command is written. A 1xx reply to the
    /// command is followed by a final reply once the body has completed; a
    /// 2xx reply already is the final one.
    pub(crate) async fn transfer<T>(
        &mut self,
        command: Command,
        body: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        let (value, opening) = tokio::try_join!(body, self.execute(command))?;

        if opening.code().is_some_and(|code| code.is_preliminary()) {
            self.read_positive_reply().await?;
        }

        Ok(value)
    }
}

/// Reads a directory listing until the server closes the data connection.
pub(crate) async fn read_listing<R>(mut data: R, buffer_size: usize) -> Result<Vec<FileEntry>>
where
    R: AsyncRead + Unpin,
{
    let mut parser = FileList::new().into_parser();
    let mut buf = BytesMut::with_capacity(buffer_size);

    loop {
        buf.clear();
        let n = data.read_buf(&mut buf).await.map_err(Error::ReadFileList)?;
        if n == 0 {
            break;
        }

        parser.input(&buf);
        if parser.failed() {
            return Err(Error::BadListing);
        }
    }

    parser.eoi();
    parser.into_output().ok_or(Error::BadListing)
}

/// Copies the data connection into `sink` until the server closes it.
pub(crate) async fn read_all<R, W>(mut data: R, sink: &mut W, buffer_size: usize) -> Result<u64>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut buf = BytesMut::with_capacity(buffer_size);
    let mut total = 0u64;

    loop {
        buf.clear();
        let n = data
            .read_buf(&mut buf)
            .await
            .map_err(Error::ReadDataConnection)?;
        if n == 0 {
            break;
        }

        sink.write_all(&buf).await.map_err(Error::LocalIo)?;
        total += n as u64;
    }

    sink.flush().await.map_err(Error::LocalIo)?;
    Ok(total)
}

/// Copies `source` into the data connection, then shuts it down so the
/// server sees end of file.
pub(crate) async fn write_all<R, W>(source: &mut R, mut data: W, buffer_size: usize) -> Result<u64>
where
    R: AsyncRead + Unpin + ?Sized,
    W: AsyncWrite + Unpin,
{
    let mut buf = BytesMut::with_capacity(buffer_size);
    let mut total = 0u64;

    loop {
        buf.clear();
        let n = source.read_buf(&mut buf).await.map_err(Error::LocalIo)?;
        if n == 0 {
            break;
        }

        data.write_all(&buf)
            .await
            .map_err(Error::WriteDataConnection)?;
        total += n as u64;
    }

    data.shutdown().await.map_err(Error::WriteDataConnection)?;
    Ok(total)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io;

    use tokio_test::io::Builder;

    use super::*;

    #[tokio::test]
    async fn test_read_listing_across_reads() {
        let data = Builder::new()
            .read(b"drwxr-xr-x 2 ftp ftp 4096 Mar 14 09:26 pu")
            .read(b"b\r\n-rw-r--r-- 1 ftp ftp 12 Jan 01 2020 readme\r\n")
            .build();

        let entries = read_listing(data, 16).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "pub");
        assert!(entries[0].is_directory());
        assert_eq!(entries[1].size, 12);
    }

    #[tokio::test]
    async fn test_read_listing_malformed() {
        let data = Builder::new().read(b"total 0\r\n").build();
        assert!(matches!(
            read_listing(data, 64).await,
            Err(Error::BadListing)
        ));
    }

    #[tokio::test]
    async fn test_read_listing_read_error() {
        let data = Builder::new()
            .read_error(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
            .build();
        assert!(matches!(
            read_listing(data, 64).await,
            Err(Error::ReadFileList(_))
        ));
    }

    #[tokio::test]
    async fn test_read_all_counts_bytes() {
        let data = Builder::new().read(b"hello ").read(b"world").build();
        let mut sink = Vec::new();

        let n = read_all(data, &mut sink, 4).await.unwrap();
        assert_eq!(n, 11);
        assert_eq!(sink, b"hello world");
    }

    #[tokio::test]
    async fn test_read_all_read_error() {
        let data = Builder::new()
            .read(b"par")
            .read_error(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
            .build();
        let mut sink = Vec::new();

        let err = read_all(data, &mut sink, 64).await.unwrap_err();
        assert!(matches!(err, Error::ReadDataConnection(_)));
        assert_eq!(sink, b"par");
    }

    #[tokio::test]
    async fn test_write_all_shuts_down() {
        let (mut data, mut server) = tokio::io::duplex(64);
        let mut source: &[u8] = b"payload";

        // Borrowed, so only the shutdown can end the peer's read.
        let n = write_all(&mut source, &mut data, 64).await.unwrap();
        assert_eq!(n, 7);

        let mut received = Vec::new();
        tokio::time::timeout(
            std::time::Duration::from_secs(5),
            server.read_to_end(&mut received),
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(received, b"payload");
    }

    #[tokio::test]
    async fn test_write_all_write_error() {
        let data = Builder::new()
            .write_error(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            .build();
        let mut source: &[u8] = b"payload";

        let err = write_all(&mut source, data, 64).await.unwrap_err();
        assert!(matches!(err, Error::WriteDataConnection(_)));
    }
}
