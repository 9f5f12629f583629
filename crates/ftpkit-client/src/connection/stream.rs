//! TCP transport: name resolution, control connect and data connections.

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tracing::debug;

use super::config::{AddressFamily, DEFAULT_CONNECT_TIMEOUT};
use crate::error::{Error, Result};

/// Opens data connections to the addresses announced by `PASV`.
pub trait Connector {
    /// Connected byte stream.
    type Stream: AsyncRead + AsyncWrite + Unpin + Send;

    /// Connects to `addr`.
    fn connect(&self, addr: SocketAddr) -> impl Future<Output = Result<Self::Stream>> + Send;
}

/// Plain TCP connector with a connect timeout.
#[derive(Debug, Clone, Copy)]
pub struct TcpConnector {
    timeout: Duration,
}

impl TcpConnector {
    /// Creates a connector that gives up after `timeout`.
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for TcpConnector {
    fn default() -> Self {
        Self::new(DEFAULT_CONNECT_TIMEOUT)
    }
}

impl Connector for TcpConnector {
    type Stream = TcpStream;

    fn connect(&self, addr: SocketAddr) -> impl Future<Output = Result<TcpStream>> + Send {
        connect_one(addr, self.timeout)
    }
}

/// Resolves `host` to the candidate addresses of `family`, in resolver order.
///
/// # Errors
///
/// Returns `Error::Io` if the lookup fails and `Error::Resolve` if it yields
/// no address of the requested family.
pub async fn resolve(host: &str, port: u16, family: AddressFamily) -> Result<Vec<SocketAddr>> {
    let candidates: Vec<SocketAddr> = tokio::net::lookup_host((host, port))
        .await?
        .filter(|addr| family.matches(addr))
        .collect();

    if candidates.is_empty() {
        return Err(Error::Resolve(format!("{host}:{port}")));
    }

    debug!(host, port, count = candidates.len(), "resolved");
    Ok(candidates)
}

/// Connects to the first candidate that accepts.
///
/// # Errors
///
/// Returns the error of the last attempt if every candidate fails, or
/// `Error::Resolve` if there are no candidates.
pub async fn connect_to(candidates: &[SocketAddr], timeout: Duration) -> Result<TcpStream> {
    let mut last_error = None;

    for &addr in candidates {
        match connect_one(addr, timeout).await {
            Ok(stream) => {
                debug!(%addr, "connected");
                return Ok(stream);
            }
            Err(error) => {
                debug!(%addr, %error, "connect failed");
                last_error = Some(error);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| Error::Resolve("no candidate addresses".to_string())))
}

async fn connect_one(addr: SocketAddr, timeout: Duration) -> Result<TcpStream> {
    match tokio::time::timeout(timeout, TcpStream::connect(addr)).await {
        Ok(stream) => Ok(stream?),
        Err(_) => Err(Error::Timeout(timeout)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tokio::net::TcpListener;

    use super::*;

    #[tokio::test]
    async fn resolve_localhost_v4() {
        let candidates = resolve("127.0.0.1", 21, AddressFamily::V4).await.unwrap();
        assert_eq!(candidates, vec!["127.0.0.1:21".parse::<SocketAddr>().unwrap()]);
    }

    #[tokio::test]
    async fn resolve_filters_family() {
        let result = resolve("127.0.0.1", 21, AddressFamily::V6).await;
        assert!(matches!(result, Err(Error::Resolve(_))));
    }

    #[tokio::test]
    async fn connect_to_skips_refused_candidates() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let good = listener.local_addr().unwrap();

        // Bind then drop to get a port nobody listens on.
        let closed = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let bad = closed.local_addr().unwrap();
        drop(closed);

        let stream = connect_to(&[bad, good], Duration::from_secs(5)).await.unwrap();
        assert_eq!(stream.peer_addr().unwrap(), good);
    }

    #[tokio::test]
    async fn connect_to_without_candidates() {
        let result = connect_to(&[], Duration::from_secs(1)).await;
        assert!(matches!(result, Err(Error::Resolve(_))));
    }

    #[tokio::test]
    async fn tcp_connector_connects() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let stream = TcpConnector::default().connect(addr).await.unwrap();
        assert_eq!(stream.peer_addr().unwrap(), addr);
    }
}
