//! Framed I/O for the FTP control channel.
//!
//! Replies are CRLF-terminated lines (a bare LF is accepted too). A reply
//! may span several lines; [`ControlChannel::read_reply`] collects them into
//! one [`ReplySequence`].

use bytes::BytesMut;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::debug;

use crate::command::Command;
use crate::error::{Error, Result};
use crate::types::{ReplyCode, ReplySequence};

/// Default buffer size for reading.
const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Maximum line length to prevent memory exhaustion.
const MAX_LINE_LENGTH: usize = 64 * 1024;

/// Buffered command/reply channel.
pub struct ControlChannel<S> {
    reader: BufReader<S>,
    write_buffer: BytesMut,
}

impl<S> ControlChannel<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Creates a new control channel.
    pub fn new(stream: S) -> Self {
        Self {
            reader: BufReader::with_capacity(DEFAULT_BUFFER_SIZE, stream),
            write_buffer: BytesMut::with_capacity(256),
        }
    }

    /// Reads one line without its terminator.
    ///
    /// # Errors
    ///
    /// Returns `Error::Closed` if the peer closes before a full line arrives,
    /// `Error::BadReply` if the line grows past the length limit, and
    /// `Error::Io` on read failure.
    pub async fn read_line(&mut self) -> Result<String> {
        let mut line = Vec::new();

        loop {
            let buf = self.reader.fill_buf().await?;
            if buf.is_empty() {
                return Err(Error::Closed);
            }

            let newline = buf.iter().position(|&b| b == b'\n');
            let len = newline.map_or(buf.len(), |pos| pos + 1);
            line.extend_from_slice(&buf[..len]);
            self.reader.consume(len);

            if line.len() > MAX_LINE_LENGTH {
                return Err(Error::BadReply(format!(
                    "line exceeds {MAX_LINE_LENGTH} bytes"
                )));
            }

            if newline.is_some() {
                break;
            }
        }

        let text = String::from_utf8_lossy(&line);
        Ok(text.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Reads lines until a complete reply sequence has arrived.
    ///
    /// # Errors
    ///
    /// Returns an error if a line cannot be read or is not a reply line.
    pub async fn read_reply(&mut self) -> Result<ReplySequence> {
        let mut sequence = ReplySequence::new();
        while !sequence.is_end() {
            let line = self.read_line().await?;
            sequence.parse(&line)?;
        }

        debug!(
            code = sequence.code().map(ReplyCode::as_u16),
            message = %sequence.message_text(),
            "reply"
        );
        Ok(sequence)
    }

    /// Writes a command and flushes.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the write fails.
    pub async fn write_command(&mut self, command: &Command) -> Result<()> {
        debug!(command = %command, "send");

        self.write_buffer.clear();
        self.write_buffer.extend_from_slice(&command.serialize());

        let stream = self.reader.get_mut();
        stream.write_all(&self.write_buffer).await?;
        stream.flush().await?;

        Ok(())
    }
}
