//! FTP connection management with type-state pattern.

mod client;
mod config;
mod control;
mod stream;

pub use client::{Authenticated, Client, Connected};
pub use config::{
    ANONYMOUS, AddressFamily, Config, ConfigBuilder, DEFAULT_BUFFER_SIZE, DEFAULT_CONNECT_TIMEOUT,
    DEFAULT_PORT,
};
pub use control::ControlChannel;
pub use stream::{Connector, TcpConnector, connect_to, resolve};
