//! Core FTP types.

mod file;
mod host_port;
mod reply;

pub use file::{Access, Class, FileEntry, FileType, Permissions};
pub use host_port::HostPort;
pub use reply::{Reply, ReplyCode, ReplySequence, ReplyType};
