//! Client configuration.
//!
//! Layered, lowest precedence first:
//! 1. built-in defaults
//! 2. `<config dir>/unifind/config.toml`, then `./unifind.toml` (both optional),
//!    or a single file passed explicitly (required)
//! 3. `UNIFIND_*` environment variables, `__` separating nested keys,
//!    e.g. `UNIFIND_EXPIRY__MODE=local_exp`

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use unifind_domain::ExpiryPolicy;
use url::Url;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "UNIFIND";

/// Largest accepted expiry leeway, one day.
pub const MAX_LEEWAY_SECS: i64 = 86_400;

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or did not match the schema.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// The API base address is not an absolute http(s) URL.
    #[error("invalid api_base_url '{0}'")]
    InvalidBaseUrl(String),

    /// A zero timeout would fail every request.
    #[error("timeout_secs must be greater than zero")]
    InvalidTimeout,

    /// The expiry leeway is negative or longer than a day.
    #[error("expiry.leeway_secs must be between 0 and {MAX_LEEWAY_SECS}, got {0}")]
    InvalidLeeway(i64),
}

/// Settings for talking to the Unifind API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base address every API path is resolved against
    pub api_base_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    /// User-Agent header
    pub user_agent: String,
    /// Token storage file; the platform config dir when unset
    pub storage_path: Option<PathBuf>,
    /// Whether the client checks token expiry itself
    pub expiry: ExpiryPolicy,
    /// Page the CLI pretends to be on
    pub current_page: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
            user_agent: format!("unifind/{}", env!("CARGO_PKG_VERSION")),
            storage_path: None,
            expiry: ExpiryPolicy::default(),
            current_page: "/".to_string(),
        }
    }
}

impl ClientConfig {
    /// Loads and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source is unreadable or a value is invalid.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(
            explicit,
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
    }

    fn load_with_env(explicit: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        match explicit {
            Some(path) => builder = builder.add_source(File::from(path).required(true)),
            None => {
                if let Some(dir) = dirs::config_dir() {
                    builder = builder
                        .add_source(File::from(dir.join("unifind").join("config.toml")).required(false));
                }
                builder = builder.add_source(File::with_name("unifind").required(false));
            }
        }

        let loaded: Self = builder.add_source(env).build()?.try_deserialize()?;
        loaded.validate()?;
        tracing::debug!(config = ?loaded, "configuration loaded");
        Ok(loaded)
    }

    /// Checks values that deserialize fine but cannot work.
    ///
    /// # Errors
    ///
    /// Returns the first offending value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.api_base_url)
            .map_err(|_| ConfigError::InvalidBaseUrl(self.api_base_url.clone()))?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl(self.api_base_url.clone()));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        if let ExpiryPolicy::LocalExp { leeway_secs } = self.expiry
            && !(0..=MAX_LEEWAY_SECS).contains(&leeway_secs)
        {
            return Err(ConfigError::InvalidLeeway(leeway_secs));
        }
        Ok(())
    }

    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
