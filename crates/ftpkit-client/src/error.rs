//! Error types for FTP operations.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Result type alias for FTP operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad category an [`Error`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Malformed data received from the server.
    Parse,
    /// The server refused a request, or the client is in the wrong state.
    Protocol,
    /// A data-connection transfer failed.
    Transfer,
    /// The underlying connection failed or was closed.
    Transport,
    /// A local file could not be opened, read or written.
    LocalIo,
}

/// FTP error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reply line does not start with a valid reply code.
    #[error("Malformed reply line: {0:?}")]
    BadReply(String),

    /// Reply message could not be interpreted.
    #[error("Malformed {context} reply: {message:?}")]
    BadReplyMessage {
        /// Command whose reply was malformed (e.g. `PWD`).
        context: &'static str,
        /// Offending reply text.
        message: String,
    },

    /// Directory listing contains a line that does not parse.
    #[error("Malformed directory listing")]
    BadListing,

    /// Server answered with a negative reply (4xx/5xx).
    #[error("FTP error {code}: {message}")]
    NegativeReply {
        /// Reply code (e.g., 550).
        code: u16,
        /// Error message from server.
        message: String,
    },

    /// USER or PASS was refused.
    #[error("Login failed ({code}): {message}")]
    LoginFailed {
        /// Reply code of the refusal.
        code: u16,
        /// Message from server.
        message: String,
    },

    /// CWD was refused.
    #[error("Change directory failed ({code}): {message}")]
    CwdFailed {
        /// Reply code of the refusal.
        code: u16,
        /// Message from server.
        message: String,
    },

    /// PASV reply does not carry a usable host/port tuple.
    #[error("Invalid passive host/port: {0:?}")]
    InvalidHostPort(String),

    /// Operation attempted on a client that cannot accept it.
    #[error("Invalid state for operation: {0}")]
    InvalidState(String),

    /// Reading a directory listing from the data connection failed.
    #[error("Directory listing read failed: {0}")]
    ReadFileList(#[source] io::Error),

    /// Reading from the data connection failed.
    #[error("Data connection read failed: {0}")]
    ReadDataConnection(#[source] io::Error),

    /// Writing to the data connection failed.
    #[error("Data connection write failed: {0}")]
    WriteDataConnection(#[source] io::Error),

    /// I/O error on the control channel.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Peer closed the control channel.
    #[error("Connection closed by peer")]
    Closed,

    /// Host name resolved to no usable address.
    #[error("No address found for {0}")]
    Resolve(String),

    /// Connecting did not finish in time.
    #[error("Connection timed out after {0:?}")]
    Timeout(Duration),

    /// Writing to a local sink or reading from a local source failed.
    #[error("Local I/O error: {0}")]
    LocalIo(#[source] io::Error),

    /// Local file could not be opened.
    #[error("Cannot open {}: {source}", path.display())]
    OpenFile {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Creates a negative-reply error from a reply code and message.
    #[must_use]
    pub fn negative_reply(code: u16, message: impl Into<String>) -> Self {
        Self::NegativeReply {
            code,
            message: message.into(),
        }
    }

    /// Returns the category this error belongs to.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::BadReply(_) | Self::BadReplyMessage { .. } | Self::BadListing => {
                ErrorCategory::Parse
            }
            Self::NegativeReply { .. }
            | Self::LoginFailed { .. }
            | Self::CwdFailed { .. }
            | Self::InvalidHostPort(_)
            | Self::InvalidState(_) => ErrorCategory::Protocol,
            Self::ReadFileList(_)
            | Self::ReadDataConnection(_)
            | Self::WriteDataConnection(_) => ErrorCategory::Transfer,
            Self::Io(_) | Self::Closed | Self::Resolve(_) | Self::Timeout(_) => {
                ErrorCategory::Transport
            }
            Self::LocalIo(_) | Self::OpenFile { .. } => ErrorCategory::LocalIo,
        }
    }

    /// Returns the reply code carried by a server refusal, if any.
    #[must_use]
    pub const fn reply_code(&self) -> Option<u16> {
        match self {
            Self::NegativeReply { code, .. }
            | Self::LoginFailed { code, .. }
            | Self::CwdFailed { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns the native OS error code of a transport failure, if any.
    #[must_use]
    pub fn os_error(&self) -> Option<i32> {
        match self {
            Self::Io(e)
            | Self::ReadFileList(e)
            | Self::ReadDataConnection(e)
            | Self::WriteDataConnection(e) => e.raw_os_error(),
            _ => None,
        }
    }

    /// Returns true if this is a permanent refusal (5xx).
    #[must_use]
    pub const fn is_permanent(&self) -> bool {
        matches!(self.reply_code(), Some(code) if code >= 500 && code < 600)
    }

    /// Returns true if this is a transient refusal (4xx).
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self.reply_code(), Some(code) if code >= 400 && code < 500)
    }
}
