//! Implementation for the authenticated state.

use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::info;

use super::states::Authenticated;
use super::transfer::{read_all, read_listing, write_all};
use super::{Client, refusal};
use crate::command::{Command, TransferType};
use crate::connection::stream::Connector;
use crate::parser::{DoubleQuoted, parse_complete};
use crate::types::FileEntry;
use crate::{Error, Result};

impl<S, C> Client<S, C, Authenticated>
where
    S: AsyncRead + AsyncWrite + Unpin,
    C: Connector,
{
    /// Returns the current working directory.
    pub async fn pwd(&mut self) -> Result<String> {
        self.ensure_synchronized()?;
        let result = self.pwd_inner().await;
        self.guard(result)
    }

    async fn pwd_inner(&mut self) -> Result<String> {
        let reply = self.execute(Command::Pwd).await?;
        let message = reply.message();
        parse_complete(DoubleQuoted::new(), message.as_bytes()).ok_or_else(|| {
            Error::BadReplyMessage {
                context: "PWD",
                message: message.to_string(),
            }
        })
    }

    /// Changes the working directory.
    pub async fn cwd(&mut self, dir: &str) -> Result<()> {
        self.ensure_synchronized()?;
        let result = self.cwd_inner(dir).await;
        self.guard(result)
    }

    async fn cwd_inner(&mut self, dir: &str) -> Result<()> {
        let reply = self.send_command(Command::Cwd(dir.to_string())).await?;
        if reply.is_positive() {
            return Ok(());
        }

        let (code, message) = refusal(&reply);
        Err(Error::CwdFailed { code, message })
    }

    /// Sets the representation type for later transfers.
    pub async fn set_transfer_type(&mut self, kind: TransferType) -> Result<()> {
        self.ensure_synchronized()?;
        let result = self.execute(Command::Type(kind)).await.map(drop);
        self.guard(result)
    }

    /// Lists the current directory.
    pub async fn list(&mut self) -> Result<Vec<FileEntry>> {
        self.ensure_synchronized()?;
        let result = self.list_inner(None).await;
        self.guard(result)
    }

    /// Lists `path`.
    pub async fn list_path(&mut self, path: &str) -> Result<Vec<FileEntry>> {
        self.ensure_synchronized()?;
        let result = self.list_inner(Some(path.to_string())).await;
        self.guard(result)
    }

    async fn list_inner(&mut self, path: Option<String>) -> Result<Vec<FileEntry>> {
        let buffer_size = self.buffer_size;
        let data = self.open_data_connection().await?;

        let entries = self
            .transfer(Command::List(path), read_listing(data, buffer_size))
            .await?;

        info!(entries = entries.len(), "directory listing received");
        Ok(entries)
    }

    /// Downloads `remote` into `sink`, returning the number of bytes copied.
    pub async fn download<W>(&mut self, sink: &mut W, remote: &str) -> Result<u64>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        self.ensure_synchronized()?;
        let result = self.download_inner(sink, remote).await;
        self.guard(result)
    }

    async fn download_inner<W>(&mut self, sink: &mut W, remote: &str) -> Result<u64>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let buffer_size = self.buffer_size;
        let data = self.open_data_connection().await?;

        let bytes = self
            .transfer(
                Command::Retr(remote.to_string()),
                read_all(data, sink, buffer_size),
            )
            .await?;

        info!(remote, bytes, "download complete");
        Ok(bytes)
    }

    /// Downloads `remote` into a newly created local file.
    ///
    /// A file that cannot be created fails with `Error::OpenFile` before any
    /// command is sent.
    pub async fn download_to_path(
        &mut self,
        local: impl AsRef<Path>,
        remote: &str,
    ) -> Result<u64> {
        let local = local.as_ref();
        let mut file = File::create(local).await.map_err(|source| Error::OpenFile {
            path: local.to_path_buf(),
            source,
        })?;

        self.download(&mut file, remote).await
    }

    /// Uploads `source` as `remote`, returning the number of bytes copied.
    pub async fn upload<R>(&mut self, source: &mut R, remote: &str) -> Result<u64>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        self.ensure_synchronized()?;
        let result = self.upload_inner(source, remote).await;
        self.guard(result)
    }

    async fn upload_inner<R>(&mut self, source: &mut R, remote: &str) -> Result<u64>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        let buffer_size = self.buffer_size;
        let data = self.open_data_connection().await?;

        let bytes = self
            .transfer(
                Command::Stor(remote.to_string()),
                write_all(source, data, buffer_size),
            )
            .await?;

        info!(remote, bytes, "upload complete");
        Ok(bytes)
    }

    /// Uploads a local file as `remote`.
    ///
    /// A file that cannot be opened fails with `Error::OpenFile` before any
    /// command is sent.
    pub async fn upload_from_path(&mut self, local: impl AsRef<Path>, remote: &str) -> Result<u64> {
        let local = local.as_ref();
        let mut file = File::open(local).await.map_err(|source| Error::OpenFile {
            path: local.to_path_buf(),
            source,
        })?;

        self.upload(&mut file, remote).await
    }
}
