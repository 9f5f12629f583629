//! Type-state FTP client connection.
//!
//! The connection states are:
//!
//! - `Connected`: after the welcome banner
//! - `Authenticated`: after a successful USER/PASS exchange
//!
//! Each state only exposes methods that are valid for that state. After any
//! failed operation the control channel may hold unread reply lines, so the
//! client refuses further commands with `Error::InvalidState`.

#![allow(clippy::missing_errors_doc)]

mod authenticated;
mod connected;
mod states;
mod transfer;

use std::marker::PhantomData;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tracing::warn;

pub use self::states::{Authenticated, Connected};
use super::config::{Config, DEFAULT_BUFFER_SIZE};
use super::control::ControlChannel;
use super::stream::{Connector, TcpConnector, connect_to, resolve};
use crate::command::Command;
use crate::types::{ReplyCode, ReplySequence};
use crate::{Error, Result};

/// FTP client connection with type-state.
///
/// `S` is the control stream, `C` opens data connections, and `State`
/// tracks the login state at compile time.
pub struct Client<S, C, State> {
    pub(crate) control: ControlChannel<S>,
    pub(crate) connector: C,
    pub(crate) buffer_size: usize,
    pub(crate) desynchronized: bool,
    _state: PhantomData<State>,
}

// Manual Debug implementation since ControlChannel doesn't implement Debug
impl<S, C, State> std::fmt::Debug for Client<S, C, State> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("buffer_size", &self.buffer_size)
            .field("desynchronized", &self.desynchronized)
            .finish_non_exhaustive()
    }
}

impl Client<TcpStream, TcpConnector, Authenticated> {
    /// Resolves, connects, reads the welcome banner and logs in.
    pub async fn connect(config: &Config) -> Result<Self> {
        let candidates = resolve(&config.host, config.port, config.family).await?;
        let stream = connect_to(&candidates, config.connect_timeout).await?;

        Client::from_stream(stream, TcpConnector::new(config.connect_timeout))
            .await?
            .with_buffer_size(config.buffer_size)
            .login(&config.user, &config.password)
            .await
    }
}

/// Shared implementation for all states.
impl<S, C, State> Client<S, C, State>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    fn new(control: ControlChannel<S>, connector: C) -> Self {
        Self {
            control,
            connector,
            buffer_size: DEFAULT_BUFFER_SIZE,
            desynchronized: false,
            _state: PhantomData,
        }
    }

    fn into_state<Next>(self) -> Client<S, C, Next> {
        Client {
            control: self.control,
            connector: self.connector,
            buffer_size: self.buffer_size,
            desynchronized: self.desynchronized,
            _state: PhantomData,
        }
    }

    /// Sets the data-connection read buffer size. Zero is raised to one.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(1);
        self
    }

    /// Returns true once a failed operation has left the control channel in
    /// an unknown position.
    #[must_use]
    pub const fn is_desynchronized(&self) -> bool {
        self.desynchronized
    }

    /// Sends a NOOP command.
    pub async fn noop(&mut self) -> Result<()> {
        self.ensure_synchronized()?;
        let result = self.execute(Command::Noop).await.map(drop);
        self.guard(result)
    }

    /// Sends QUIT and closes the session.
    pub async fn quit(mut self) -> Result<()> {
        self.ensure_synchronized()?;
        self.execute(Command::Quit).await?;
        Ok(())
    }

    pub(crate) fn ensure_synchronized(&self) -> Result<()> {
        if self.desynchronized {
            return Err(Error::InvalidState(
                "control channel desynchronized by an earlier failure".to_string(),
            ));
        }
        Ok(())
    }

    /// Marks the client desynchronized if `result` is an error.
    pub(crate) fn guard<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(error) = &result
            && !self.desynchronized
        {
            warn!(%error, "control channel desynchronized");
            self.desynchronized = true;
        }
        result
    }

    /// Writes a command and reads its reply, whatever the code.
    pub(crate) async fn send_command(&mut self, command: Command) -> Result<ReplySequence> {
        self.control.write_command(&command).await?;
        self.control.read_reply().await
    }

    /// Writes a command and requires a positive reply.
    pub(crate) async fn execute(&mut self, command: Command) -> Result<ReplySequence> {
        let reply = self.send_command(command).await?;
        check_positive(reply)
    }

    /// Reads one more reply and requires it to be positive.
    pub(crate) async fn read_positive_reply(&mut self) -> Result<ReplySequence> {
        let reply = self.control.read_reply().await?;
        check_positive(reply)
    }
}

/// Returns the code and joined message of a reply.
pub(crate) fn refusal(reply: &ReplySequence) -> (u16, String) {
    (
        reply.code().map_or(0, ReplyCode::as_u16),
        reply.message_text(),
    )
}

fn check_positive(reply: ReplySequence) -> Result<ReplySequence> {
    if reply.is_positive() {
        Ok(reply)
    } else {
        let (code, message) = refusal(&reply);
        Err(Error::negative_reply(code, message))
    }
}
