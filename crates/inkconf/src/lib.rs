//! Minimal configuration loading for the inkwell playground relay.
//!
//! Both binaries (the relay and the quill CLI) read the same config so
//! a deployment can keep one file. CLI flags override config values,
//! which override defaults.
//!
//! # Config File Locations
//!
//! Files are loaded in order (later wins):
//! 1. `/etc/inkwell/config.toml` (system)
//! 2. `~/.config/inkwell/config.toml` (user)
//! 3. `./inkwell.toml` (local override)
//! 4. Environment variables (`INKWELL_*`)
//!
//! # Example Config
//!
//! ```toml
//! [bind]
//! http_port = 8090
//!
//! [toolchain]
//! program = "idris"
//! timeout_secs = 30
//!
//! [paths]
//! staging_dir = "/tmp/inkrelay"
//!
//! [telemetry]
//! log_level = "info"
//!
//! [client]
//! relay_url = "http://127.0.0.1:8090/run"
//! request_timeout_secs = 6
//! ```

pub mod loader;

pub use loader::{discover_config_files, discover_config_files_with_override};

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("invalid value for {key}: {message}")]
    Invalid { key: String, message: String },
}

/// HTTP bind settings for the relay.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BindConfig {
    pub http_port: u16,
}

impl Default for BindConfig {
    fn default() -> Self {
        Self { http_port: 8090 }
    }
}

/// The compiler toolchain the relay shells out to.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolchainConfig {
    /// Executable name or path. Resolved through PATH if bare.
    pub program: PathBuf,
    /// Wall-clock bound for one invocation; exceeding it kills the
    /// subprocess.
    pub timeout_secs: u64,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("idris"),
            timeout_secs: 30,
        }
    }
}

/// Filesystem paths used by the relay.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Root under which per-request workspaces are created.
    pub staging_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            staging_dir: std::env::temp_dir().join("inkrelay"),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TelemetryConfig {
    /// Default tracing filter; `RUST_LOG` still wins when set.
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Settings for the quill client.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    pub relay_url: String,
    /// Race-based request timeout; the losing request is abandoned,
    /// never retried.
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            relay_url: "http://127.0.0.1:8090/run".to_string(),
            request_timeout_secs: 6,
        }
    }
}

/// Complete inkwell configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InkConfig {
    pub bind: BindConfig,
    pub toolchain: ToolchainConfig,
    pub paths: PathsConfig,
    pub telemetry: TelemetryConfig,
    pub client: ClientConfig,
}

impl InkConfig {
    /// Load config from the standard locations plus environment
    /// overrides.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_override(None)
    }

    /// Load config, letting a CLI-supplied path replace the local
    /// override file.
    pub fn load_with_override(
        cli_path: Option<&std::path::Path>,
    ) -> Result<Self, ConfigError> {
        let mut config = InkConfig::default();
        for path in discover_config_files_with_override(cli_path) {
            let overlay = loader::load_overlay(&path)?;
            overlay.apply(&mut config);
        }
        loader::apply_env(&mut config)?;
        Ok(config)
    }
}
