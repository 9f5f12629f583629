//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level arguments.
#[derive(Debug, Parser)]
#[command(name = "ftpkit", version, about = "Command-line FTP client")]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[arg(long, value_name = "FILE", global = true, help = "Settings file to read")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Connection flags; each one overrides the settings file.
#[derive(Debug, Default, Args)]
pub struct ConnectionArgs {
    #[arg(short = 'H', long, global = true, help = "Server host name")]
    pub host: Option<String>,

    #[arg(short, long, global = true, help = "Server control port")]
    pub port: Option<u16>,

    #[arg(short, long, global = true, help = "Login user name")]
    pub user: Option<String>,

    #[arg(long, global = true, help = "Login password")]
    pub password: Option<String>,
}

/// Operation to run after login.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the working directory after login.
    Pwd,
    /// List a directory.
    Ls {
        /// Directory to list instead of the current one.
        #[arg(long)]
        path: Option<String>,
    },
    /// Download a file.
    Get {
        /// Remote path.
        remote: String,
        /// Local path; defaults to the remote file name.
        local: Option<PathBuf>,
    },
    /// Upload a file.
    Put {
        /// Local path.
        local: PathBuf,
        /// Remote path; defaults to the local file name.
        remote: Option<String>,
    },
}
