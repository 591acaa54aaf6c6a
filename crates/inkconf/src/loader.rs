//! Config file discovery, loading, and environment variable overlay.

use crate::{ConfigError, InkConfig};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

/// Discover config files in standard locations.
///
/// Returns paths in load order (system, user, local).
/// Only returns files that exist.
pub fn discover_config_files() -> Vec<PathBuf> {
    discover_config_files_with_override(None)
}

/// Discover config files, optionally with a CLI override path.
///
/// If `cli_path` is provided and exists, it replaces the local override.
/// Returns paths in load order (system, user, local/cli).
pub fn discover_config_files_with_override(cli_path: Option<&Path>) -> Vec<PathBuf> {
    let mut files = Vec::new();

    // System config
    let system = PathBuf::from("/etc/inkwell/config.toml");
    if system.exists() {
        files.push(system);
    }

    // User config (XDG_CONFIG_HOME or ~/.config)
    if let Some(config_dir) = directories::BaseDirs::new().map(|d| d.config_dir().to_path_buf()) {
        let user = config_dir.join("inkwell/config.toml");
        if user.exists() {
            files.push(user);
        }
    }

    // CLI override takes precedence over local
    if let Some(path) = cli_path {
        if path.exists() {
            files.push(path.to_path_buf());
            return files;
        }
    }

    // Local override (current directory)
    let local = PathBuf::from("inkwell.toml");
    if local.exists() {
        files.push(local);
    }

    files
}

/// A partial config as read from one file. Every field is optional so
/// later files only override what they mention.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Overlay {
    bind: BindOverlay,
    toolchain: ToolchainOverlay,
    paths: PathsOverlay,
    telemetry: TelemetryOverlay,
    client: ClientOverlay,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BindOverlay {
    http_port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ToolchainOverlay {
    program: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PathsOverlay {
    staging_dir: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TelemetryOverlay {
    log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ClientOverlay {
    relay_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

impl Overlay {
    pub(crate) fn apply(self, config: &mut InkConfig) {
        if let Some(v) = self.bind.http_port {
            config.bind.http_port = v;
        }
        if let Some(v) = self.toolchain.program {
            config.toolchain.program = expand_path(&v);
        }
        if let Some(v) = self.toolchain.timeout_secs {
            config.toolchain.timeout_secs = v;
        }
        if let Some(v) = self.paths.staging_dir {
            config.paths.staging_dir = expand_path(&v);
        }
        if let Some(v) = self.telemetry.log_level {
            config.telemetry.log_level = v;
        }
        if let Some(v) = self.client.relay_url {
            config.client.relay_url = v;
        }
        if let Some(v) = self.client.request_timeout_secs {
            config.client.request_timeout_secs = v;
        }
    }
}

/// Load a partial config from a TOML file.
pub(crate) fn load_overlay(path: &Path) -> Result<Overlay, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Overlay `INKWELL_*` environment variables onto a loaded config.
pub(crate) fn apply_env(config: &mut InkConfig) -> Result<(), ConfigError> {
    if let Ok(v) = env::var("INKWELL_HTTP_PORT") {
        config.bind.http_port = v.parse().map_err(|_| ConfigError::Invalid {
            key: "INKWELL_HTTP_PORT".to_string(),
            message: format!("not a port number: {v}"),
        })?;
    }
    if let Ok(v) = env::var("INKWELL_TOOLCHAIN") {
        config.toolchain.program = expand_path(&v);
    }
    if let Ok(v) = env::var("INKWELL_TIMEOUT_SECS") {
        config.toolchain.timeout_secs = v.parse().map_err(|_| ConfigError::Invalid {
            key: "INKWELL_TIMEOUT_SECS".to_string(),
            message: format!("not a number of seconds: {v}"),
        })?;
    }
    if let Ok(v) = env::var("INKWELL_STAGING_DIR") {
        config.paths.staging_dir = expand_path(&v);
    }
    if let Ok(v) = env::var("INKWELL_LOG_LEVEL") {
        config.telemetry.log_level = v;
    }
    if let Ok(v) = env::var("INKWELL_RELAY_URL") {
        config.client.relay_url = v;
    }
    Ok(())
}

/// Expand a leading `~/` to the home directory.
fn expand_path(value: &str) -> PathBuf {
    if let Some(rest) = value.strip_prefix("~/") {
        if let Some(dirs) = directories::BaseDirs::new() {
            return dirs.home_dir().join(rest);
        }
    }
    PathBuf::from(value)
}
