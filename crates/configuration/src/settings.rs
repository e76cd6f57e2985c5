use crate::error::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section is optional in `config.toml`; missing sections fall back to
/// their `Default` implementation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the HTTP server listens and how much it accepts.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// The interface to bind to.
    pub host: String,
    /// The TCP port to bind to.
    pub port: u16,
    /// Maximum request body size in megabytes (uploads included).
    pub body_limit_mb: usize,
}

/// Command-line overrides for `ServerConfig`. Anything left unset keeps the
/// value from the file or environment.
#[cfg(feature = "clap")]
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ServerOverrides {
    /// The interface to bind to.
    #[arg(long)]
    pub host: Option<String>,
    /// The TCP port to bind to.
    #[arg(long)]
    pub port: Option<u16>,
}

#[cfg(feature = "clap")]
impl ServerOverrides {
    pub fn apply(&self, server: &mut ServerConfig) {
        if let Some(host) = &self.host {
            server.host = host.clone();
        }
        if let Some(port) = self.port {
            server.port = port;
        }
    }
}

/// Location of the strategy store on disk.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub file_name: String,
}

/// Log verbosity and optional file output.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive such as "info" or "web_server=debug,info".
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

// --- Default Implementations ---
// These allow a deployment to run with no config.toml at all.

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            body_limit_mb: 50,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            file_name: "strategies.json".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "quantflow.log".to_string(),
        }
    }
}

impl ServerConfig {
    /// The `host:port` string to bind the listener to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The body limit in bytes, or `None` if it does not fit in a `usize`.
    pub fn checked_body_limit_bytes(&self) -> Option<usize> {
        self.body_limit_mb.checked_mul(1024 * 1024)
    }

    /// The body limit in bytes. Saturates; `Settings::validate` rejects
    /// values that would overflow.
    pub fn body_limit_bytes(&self) -> usize {
        self.checked_body_limit_bytes().unwrap_or(usize::MAX)
    }
}

impl StorageConfig {
    /// Full path of the JSON file holding the strategy collection.
    pub fn file_path(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }
}

impl Settings {
    /// Checks the values that deserialization alone cannot reject.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be greater than 0".to_string(),
            ));
        }
        if self.server.body_limit_mb == 0 {
            return Err(ConfigError::ValidationError(
                "server.body_limit_mb must be greater than 0".to_string(),
            ));
        }
        if self.server.checked_body_limit_bytes().is_none() {
            return Err(ConfigError::ValidationError(format!(
                "server.body_limit_mb is too large: {}",
                self.server.body_limit_mb
            )));
        }
        if self.storage.file_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "storage.file_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
