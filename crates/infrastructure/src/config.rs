//! Settings loading.
//!
//! Sources are layered with the `config` crate, later layers winning:
//! built-in defaults, an optional file, then `HARNESS_*` environment
//! variables. Command-line flags are applied on top by the binary.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, Map};
use harness_domain::Settings;
use thiserror::Error;
use tracing::debug;

/// Prefix for environment overrides (`HARNESS_BASE_URL`, ...).
pub const ENV_PREFIX: &str = "HARNESS";

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_NAME: &str = "harness";

/// Errors that can occur while loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested file does not exist.
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    /// A source could not be read or did not match the settings shape.
    #[error("invalid configuration: {0}")]
    Invalid(#[from] config::ConfigError),
}

/// Result type alias for settings loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Loads settings from defaults, the optional file and the environment.
///
/// With `path` set the file must exist; its format follows the extension
/// (`.toml`, `.yaml`, `.json`). Without it, `harness.*` in the working
/// directory is used when present.
///
/// # Errors
///
/// Returns an error if the file is missing or any source is malformed.
pub fn load_settings(path: Option<&Path>) -> ConfigResult<Settings> {
    load_with_env(path, None)
}

fn load_with_env(
    path: Option<&Path>,
    env: Option<Map<String, String>>,
) -> ConfigResult<Settings> {
    let mut builder = Config::builder().add_source(Config::try_from(&Settings::default())?);

    builder = match path {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            debug!(path = %path.display(), "loading config file");
            builder.add_source(File::from(path))
        }
        None => builder.add_source(File::with_name(DEFAULT_CONFIG_NAME).required(false)),
    };

    let settings: Settings = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .source(env),
        )
        .build()?
        .try_deserialize()?;

    debug!(base_url = %settings.base_url, timeout_ms = settings.timeout_ms, "settings loaded");
    Ok(settings)
}
