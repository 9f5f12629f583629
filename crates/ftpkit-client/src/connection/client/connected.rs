//! Implementation for the connected state.

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info};

use super::states::{Authenticated, Connected};
use super::{Client, refusal};
use crate::command::Command;
use crate::connection::control::ControlChannel;
use crate::types::ReplySequence;
use crate::{Error, Result};

impl<S, C> Client<S, C, Connected>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Creates a new client from a connected control stream.
    ///
    /// Reads the welcome banner; any reply code is accepted. Data
    /// connections are opened through `connector`.
    pub async fn from_stream(stream: S, connector: C) -> Result<Self> {
        let mut control = ControlChannel::new(stream);

        let welcome = control.read_reply().await?;
        debug!(code = ?welcome.code(), "welcome banner received");

        Ok(Self::new(control, connector))
    }

    /// Logs in with USER and PASS.
    ///
    /// PASS is skipped if the server accepts the user name alone. Consumes
    /// self and returns an authenticated client on success.
    pub async fn login(
        mut self,
        user: &str,
        password: &str,
    ) -> Result<Client<S, C, Authenticated>> {
        let reply = self.send_command(Command::User(user.to_string())).await?;
        check_login(&reply)?;

        if !reply.code().is_some_and(|code| code.is_completion()) {
            let reply = self.send_command(Command::Pass(password.to_string())).await?;
            check_login(&reply)?;
        }

        info!(user, "logged in");
        Ok(self.into_state())
    }
}

fn check_login(reply: &ReplySequence) -> Result<()> {
    if reply.is_positive() {
        return Ok(());
    }

    let (code, message) = refusal(reply);
    Err(Error::LoginFailed { code, message })
}
