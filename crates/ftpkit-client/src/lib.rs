//! # ftpkit-client
//!
//! An async FTP client library built around incremental parsers.
//!
//! ## Features
//!
//! - **Incremental parsing**: reply lines, `PASV` tuples, quoted paths and
//!   `ls -l` listings are parsed from input split at arbitrary points
//! - **Type-state connection management**: directory and transfer commands
//!   are only available after login
//! - **Ordered data transfers**: the data connection is drained while the
//!   control channel waits, and the final reply is read last
//! - **Passive mode**: `PASV` data connections over IPv4
//!
//! ## Quick Start
//!
//! ```ignore
//! use ftpkit_client::{Client, Config};
//!
//! #[tokio::main]
//! async fn main() -> ftpkit_client::Result<()> {
//!     let config = Config::builder("ftp.example.com")
//!         .user("alice")
//!         .password("secret")
//!         .build();
//!
//!     // Connect, read the welcome banner and log in
//!     let mut client = Client::connect(&config).await?;
//!
//!     println!("cwd: {}", client.pwd().await?);
//!     client.cwd("/pub").await?;
//!
//!     for entry in client.list().await? {
//!         println!("{} {:>10} {}", entry.permissions, entry.size, entry.name);
//!     }
//!
//!     let bytes = client.download_to_path("README", "README").await?;
//!     println!("downloaded {bytes} bytes");
//!
//!     client.quit().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Connection States
//!
//! ```text
//! ┌──────────────┐
//! │  Connected   │ ─── login() ───→ Authenticated
//! └──────────────┘                  (pwd, cwd, list, download, upload)
//! ```
//!
//! ## Modules
//!
//! - [`command`]: FTP command builders
//! - [`connection`]: Connection management and type-state client
//! - [`parser`]: Incremental parsers
//! - [`types`]: Core FTP types (replies, directory entries, addresses)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod command;
pub mod connection;
mod error;
pub mod parser;
pub mod types;

pub use command::{Command, TransferType};
pub use connection::{
    AddressFamily, Authenticated, Client, Config, ConfigBuilder, Connected, Connector,
    TcpConnector,
};
pub use error::{Error, ErrorCategory, Result};
pub use types::{
    FileEntry, FileType, HostPort, Permissions, Reply, ReplyCode, ReplySequence, ReplyType,
};
