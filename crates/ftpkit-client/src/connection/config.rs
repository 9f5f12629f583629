//! Connection configuration types.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

/// Default FTP control port.
pub const DEFAULT_PORT: u16 = 21;

/// User name and password used when none are given.
pub const ANONYMOUS: &str = "anonymous";

/// Default size of the data-connection read buffer.
pub const DEFAULT_BUFFER_SIZE: usize = 65535;

/// Default time allowed for establishing a TCP connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Address family used to pick among resolved addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressFamily {
    /// IPv4 only.
    #[default]
    V4,
    /// IPv6 only.
    V6,
}

impl AddressFamily {
    /// Returns true if `addr` belongs to this family.
    #[must_use]
    pub const fn matches(self, addr: &SocketAddr) -> bool {
        match self {
            Self::V4 => addr.is_ipv4(),
            Self::V6 => addr.is_ipv6(),
        }
    }
}

/// FTP connection configuration.
#[derive(Clone)]
pub struct Config {
    /// Server hostname.
    pub host: String,
    /// Server control port.
    pub port: u16,
    /// Login user name.
    pub user: String,
    /// Login password.
    pub password: String,
    /// Address family of the control connection.
    pub family: AddressFamily,
    /// Data-connection read buffer size in bytes.
    pub buffer_size: usize,
    /// Time allowed for each TCP connect.
    pub connect_timeout: Duration,
}

impl Config {
    /// Creates an anonymous-login configuration for port 21.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        ConfigBuilder::new(host).build()
    }

    /// Creates a configuration builder.
    #[must_use]
    pub fn builder(host: impl Into<String>) -> ConfigBuilder {
        ConfigBuilder::new(host)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"****")
            .field("family", &self.family)
            .field("buffer_size", &self.buffer_size)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

/// Builder for connection configuration.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder with the given hostname.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            config: Config {
                host: host.into(),
                port: DEFAULT_PORT,
                user: ANONYMOUS.to_string(),
                password: ANONYMOUS.to_string(),
                family: AddressFamily::V4,
                buffer_size: DEFAULT_BUFFER_SIZE,
                connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            },
        }
    }

    /// Sets the port.
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Sets the login user name.
    #[must_use]
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.config.user = user.into();
        self
    }

    /// Sets the login password.
    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.config.password = password.into();
        self
    }

    /// Sets the address family.
    #[must_use]
    pub const fn family(mut self, family: AddressFamily) -> Self {
        self.config.family = family;
        self
    }

    /// Sets the data-connection buffer size. Zero is raised to one.
    #[must_use]
    pub const fn buffer_size(mut self, size: usize) -> Self {
        self.config.buffer_size = if size == 0 { 1 } else { size };
        self
    }

    /// Sets the connection timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> Config {
        self.config
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::new("ftp.example.com");
        assert_eq!(config.host, "ftp.example.com");
        assert_eq!(config.port, 21);
        assert_eq!(config.user, "anonymous");
        assert_eq!(config.password, "anonymous");
        assert_eq!(config.family, AddressFamily::V4);
        assert_eq!(config.buffer_size, 65535);
        assert_eq!(config.connect_timeout, Duration::from_secs(30));
    }

    #[test]
    fn builder_overrides() {
        let config = Config::builder("localhost")
            .port(2121)
            .user("alice")
            .password("secret")
            .family(AddressFamily::V6)
            .buffer_size(0)
            .connect_timeout(Duration::from_secs(5))
            .build();

        assert_eq!(config.port, 2121);
        assert_eq!(config.user, "alice");
        assert_eq!(config.password, "secret");
        assert_eq!(config.family, AddressFamily::V6);
        assert_eq!(config.buffer_size, 1);
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
    }

    #[test]
    fn debug_hides_password() {
        let config = Config::builder("localhost").password("hunter2").build();
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("****"));
    }

    #[test]
    fn family_filter() {
        let v4: SocketAddr = "127.0.0.1:21".parse().unwrap();
        let v6: SocketAddr = "[::1]:21".parse().unwrap();
        assert!(AddressFamily::V4.matches(&v4));
        assert!(!AddressFamily::V4.matches(&v6));
        assert!(AddressFamily::V6.matches(&v6));
    }
}
