//! FTP command builder.

use std::fmt;

/// Representation type set with `TYPE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferType {
    /// `TYPE A`: text with line-ending translation.
    Ascii,
    /// `TYPE I`: bytes as stored.
    #[default]
    Image,
}

impl TransferType {
    /// Returns the protocol code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascii => "A",
            Self::Image => "I",
        }
    }
}

/// FTP command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// USER - Send user name
    User(String),
    /// PASS - Send password
    Pass(String),
    /// PWD - Print working directory
    Pwd,
    /// CWD - Change working directory
    Cwd(String),
    /// PASV - Request a passive data connection
    Pasv,
    /// TYPE - Set representation type
    Type(TransferType),
    /// LIST - List a directory, the current one if no path is given
    List(Option<String>),
    /// RETR - Download a file
    Retr(String),
    /// STOR - Upload a file
    Stor(String),
    /// NOOP - No operation
    Noop,
    /// QUIT - Close connection
    Quit,
}

impl Command {
    /// Returns the command verb.
    #[must_use]
    pub const fn verb(&self) -> &'static str {
        match self {
            Self::User(_) => "USER",
            Self::Pass(_) => "PASS",
            Self::Pwd => "PWD",
            Self::Cwd(_) => "CWD",
            Self::Pasv => "PASV",
            Self::Type(_) => "TYPE",
            Self::List(_) => "LIST",
            Self::Retr(_) => "RETR",
            Self::Stor(_) => "STOR",
            Self::Noop => "NOOP",
            Self::Quit => "QUIT",
        }
    }

    fn argument(&self) -> Option<&str> {
        match self {
            Self::User(arg) | Self::Pass(arg) | Self::Cwd(arg) | Self::Retr(arg) | Self::Stor(arg) => {
                Some(arg)
            }
            Self::List(path) => path.as_deref(),
            Self::Type(kind) => Some(kind.as_str()),
            Self::Pwd | Self::Pasv | Self::Noop | Self::Quit => None,
        }
    }

    /// Serializes the command to bytes: `VERB[ SP ARG]` and CRLF.
    #[must_use]
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::new();

        buf.extend_from_slice(self.verb().as_bytes());
        if let Some(arg) = self.argument() {
            buf.push(b' ');
            buf.extend_from_slice(arg.as_bytes());
        }

        buf.extend_from_slice(b"\r\n");
        buf
    }
}

/// Renders the command for logs, with the password masked.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass(_) => write!(f, "PASS ****"),
            _ => match self.argument() {
                Some(arg) => write!(f, "{} {arg}", self.verb()),
                None => f.write_str(self.verb()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_without_argument() {
        assert_eq!(Command::Pwd.serialize(), b"PWD\r\n");
        assert_eq!(Command::Pasv.serialize(), b"PASV\r\n");
        assert_eq!(Command::Noop.serialize(), b"NOOP\r\n");
        assert_eq!(Command::Quit.serialize(), b"QUIT\r\n");
    }

    #[test]
    fn test_login_commands() {
        assert_eq!(
            Command::User("anonymous".to_string()).serialize(),
            b"USER anonymous\r\n"
        );
        assert_eq!(
            Command::Pass("secret".to_string()).serialize(),
            b"PASS secret\r\n"
        );
    }

    #[test]
    fn test_path_commands() {
        assert_eq!(Command::Cwd("/pub".to_string()).serialize(), b"CWD /pub\r\n");
        assert_eq!(
            Command::Retr("my file.txt".to_string()).serialize(),
            b"RETR my file.txt\r\n"
        );
        assert_eq!(
            Command::Stor("upload.bin".to_string()).serialize(),
            b"STOR upload.bin\r\n"
        );
    }

    #[test]
    fn test_list_command() {
        assert_eq!(Command::List(None).serialize(), b"LIST\r\n");
        assert_eq!(
            Command::List(Some("/pub".to_string())).serialize(),
            b"LIST /pub\r\n"
        );
    }

    #[test]
    fn test_type_command() {
        assert_eq!(Command::Type(TransferType::Ascii).serialize(), b"TYPE A\r\n");
        assert_eq!(Command::Type(TransferType::Image).serialize(), b"TYPE I\r\n");
    }

    #[test]
    fn test_display_redacts_password() {
        assert_eq!(Command::Pass("secret".to_string()).to_string(), "PASS ****");
        assert_eq!(Command::User("bob".to_string()).to_string(), "USER bob");
        assert_eq!(Command::Pwd.to_string(), "PWD");
    }
}
