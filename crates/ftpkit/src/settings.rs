//! Optional connection settings read from a JSON file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use ftpkit_client::{AddressFamily, Config};
use serde::Deserialize;

use crate::cli::ConnectionArgs;

/// Contents of `settings.json`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Server host name.
    pub host: Option<String>,
    /// Server control port.
    pub port: Option<u16>,
    /// Login user name.
    pub user: Option<String>,
    /// Login password.
    pub password: Option<String>,
    /// Resolve the host to IPv6 addresses instead of IPv4.
    pub ipv6: bool,
    /// Data-connection buffer size in bytes.
    pub buffer_size: Option<usize>,
    /// TCP connect timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
}

/// Returns `<config dir>/ftpkit/settings.json`.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ftpkit")
        .join("settings.json")
}

/// Loads settings from `path`; a missing file yields the defaults.
pub async fn load(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;

    let settings = serde_json::from_str(&contents)
        .with_context(|| format!("parsing {}", path.display()))?;

    tracing::debug!("Settings loaded from {:?}", path);
    Ok(settings)
}

impl Settings {
    /// Builds the client configuration, with command-line flags taking
    /// precedence over file values.
    pub fn into_config(self, args: &ConnectionArgs) -> Result<Config> {
        let Some(host) = args.host.clone().or(self.host) else {
            bail!("no host given: pass --host or set \"host\" in the settings file");
        };

        let mut builder = Config::builder(host);
        if let Some(port) = args.port.or(self.port) {
            builder = builder.port(port);
        }
        if let Some(user) = args.user.clone().or(self.user) {
            builder = builder.user(user);
        }
        if let Some(password) = args.password.clone().or(self.password) {
            builder = builder.password(password);
        }
        if self.ipv6 {
            builder = builder.family(AddressFamily::V6);
        }
        if let Some(size) = self.buffer_size {
            builder = builder.buffer_size(size);
        }
        if let Some(secs) = self.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }

        Ok(builder.build())
    }
}
