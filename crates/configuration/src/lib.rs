use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{LoggingConfig, ServerConfig, Settings, StorageConfig};
#[cfg(feature = "clap")]
pub use settings::ServerOverrides;

/// Prefix for environment overrides, e.g. `QUANTFLOW__SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "QUANTFLOW";

/// Loads the application configuration.
///
/// Reads the TOML file at `path` if it exists, then layers environment
/// variables on top, deserializes everything into our strongly-typed
/// `Settings` struct and validates it.
pub fn load_config(path: &Path) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        // A missing file is fine; every section has defaults.
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;

    Ok(settings)
}
