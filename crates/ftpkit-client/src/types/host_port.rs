//! Passive-mode data address.

use std::fmt;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

/// Data-connection address announced in a `227` reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostPort(SocketAddrV4);

impl HostPort {
    /// Builds the address from the six octets `h1,h2,h3,h4,p1,p2`.
    #[must_use]
    pub fn from_octets(octets: [u8; 6]) -> Self {
        let [h1, h2, h3, h4, p1, p2] = octets;
        let port = (u16::from(p1) << 8) | u16::from(p2);
        Self(SocketAddrV4::new(Ipv4Addr::new(h1, h2, h3, h4), port))
    }

    /// Returns the host in dotted-quad form.
    #[must_use]
    pub fn host(&self) -> String {
        self.0.ip().to_string()
    }

    /// Returns the port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.0.port()
    }

    /// Returns the socket address to connect to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::V4(self.0)
    }
}

impl fmt::Display for HostPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_from_high_and_low_octets() {
        let address = HostPort::from_octets([192, 168, 0, 10, 195, 80]);
        assert_eq!(address.host(), "192.168.0.10");
        assert_eq!(address.port(), 195 * 256 + 80);
        assert_eq!(address.to_string(), "192.168.0.10:50000");
    }
}
