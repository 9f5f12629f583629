//! `ftpkit` - command-line FTP client.
//!
//! Connects, logs in, runs one operation and quits.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod cli;
mod settings;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use ftpkit_client::{Authenticated, Client, Connector, FileEntry, TransferType};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ftpkit=info,ftpkit_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let settings_path = cli.settings.clone().unwrap_or_else(settings::default_path);
    let config = settings::load(&settings_path)
        .await?
        .into_config(&cli.connection)?;

    info!(host = %config.host, port = config.port, "connecting");
    let mut client = Client::connect(&config)
        .await
        .with_context(|| format!("connecting to {}:{}", config.host, config.port))?;

    run(&mut client, cli.command).await?;

    client.quit().await.context("closing session")?;
    Ok(())
}

async fn run<S, C>(client: &mut Client<S, C, Authenticated>, command: Command) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
    C: Connector,
{
    match command {
        Command::Pwd => {
            println!("{}", client.pwd().await?);
        }
        Command::Ls { path } => {
            let entries = match path {
                Some(path) => client.list_path(&path).await?,
                None => client.list().await?,
            };
            for entry in &entries {
                println!("{}", format_entry(entry));
            }
        }
        Command::Get { remote, local } => {
            let local = local.unwrap_or_else(|| PathBuf::from(remote_file_name(&remote)));
            client.set_transfer_type(TransferType::Image).await?;
            let bytes = client
                .download_to_path(&local, &remote)
                .await
                .with_context(|| format!("downloading {remote}"))?;
            info!("{remote} -> {} ({bytes} bytes)", local.display());
        }
        Command::Put { local, remote } => {
            let remote = match remote {
                Some(remote) => remote,
                None => local_file_name(&local)?,
            };
            client.set_transfer_type(TransferType::Image).await?;
            let bytes = client
                .upload_from_path(&local, &remote)
                .await
                .with_context(|| format!("uploading {}", local.display()))?;
            info!("{} -> {remote} ({bytes} bytes)", local.display());
        }
    }

    Ok(())
}

/// Renders an entry the way `ls -l` does.
fn format_entry(entry: &FileEntry) -> String {
    let mut line = format!(
        "{}{} {:>3} {:<8} {:<8} {:>10} {} {}",
        entry.file_type.indicator(),
        entry.permissions,
        entry.links,
        entry.owner,
        entry.group,
        entry.size,
        entry.modified.format("%b %d %Y %H:%M"),
        entry.name,
    );
    if let Some(target) = &entry.link_target {
        line.push_str(" -> ");
        line.push_str(target);
    }
    line
}

/// Last path segment of a remote path.
fn remote_file_name(remote: &str) -> &str {
    remote
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(remote)
}

fn local_file_name(local: &Path) -> Result<String> {
    local
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("{} has no file name", local.display()))
}
