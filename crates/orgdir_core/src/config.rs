//! Explicit runtime settings for the directory service.
//!
//! # Responsibility
//! - Hold the values the service layer needs at startup.
//! - Read them from environment variables or a caller-supplied lookup.
//!
//! # Invariants
//! - Settings are plain values passed to whoever needs them; there is no
//!   process-wide cached instance.
//! - `validate()` must pass before settings are used for logging bootstrap.

use crate::logging::normalize_level;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:///./app.db";
pub const DEFAULT_API_KEY: &str = "secret-api-key";
pub const DEFAULT_API_PREFIX: &str = "/api";
pub const DEFAULT_PROJECT_NAME: &str = "Organization Directory";

pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_API_KEY: &str = "API_KEY";
pub const ENV_API_PREFIX: &str = "API_PREFIX";
pub const ENV_PROJECT_NAME: &str = "PROJECT_NAME";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "LOG_DIR";

/// Invalid settings values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required value is blank.
    Empty(&'static str),
    /// `api_prefix` does not start with `/`.
    InvalidApiPrefix(String),
    /// `log_level` is not a known level.
    InvalidLogLevel(String),
    /// `log_dir` is not absolute.
    RelativeLogDir(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty(field) => write!(f, "setting `{field}` must not be empty"),
            Self::InvalidApiPrefix(prefix) => {
                write!(f, "api_prefix must start with `/`, got `{prefix}`")
            }
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
            Self::RelativeLogDir(path) => {
                write!(f, "log_dir must be an absolute path, got `{}`", path.display())
            }
        }
    }
}

impl Error for ConfigError {}

/// Service settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Connection string for the external storage backend.
    pub database_url: String,
    /// Shared secret expected from API clients.
    pub api_key: String,
    /// Route prefix for the HTTP layer.
    pub api_prefix: String,
    pub project_name: String,
    pub log_level: String,
    /// File logging is enabled only when set.
    pub log_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            log_level: crate::logging::default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl Settings {
    /// Reads settings from process environment variables, then validates.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from `lookup`, falling back to defaults for unset or
    /// blank keys, then validates.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();
        let settings = Self {
            database_url: read(ENV_DATABASE_URL).unwrap_or(defaults.database_url),
            api_key: read(ENV_API_KEY).unwrap_or(defaults.api_key),
            api_prefix: read(ENV_API_PREFIX).unwrap_or(defaults.api_prefix),
            project_name: read(ENV_PROJECT_NAME).unwrap_or(defaults.project_name),
            log_level: read(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
            log_dir: read(ENV_LOG_DIR).map(PathBuf::from),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Checks field-level constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::Empty("database_url"));
        }
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::Empty("api_key"));
        }
        if !self.api_prefix.starts_with('/') {
            return Err(ConfigError::InvalidApiPrefix(self.api_prefix.clone()));
        }
        normalize_level(&self.log_level).map_err(ConfigError::InvalidLogLevel)?;
        if let Some(log_dir) = &self.log_dir {
            if !log_dir.is_absolute() {
                return Err(ConfigError::RelativeLogDir(log_dir.clone()));
            }
        }
        Ok(())
    }
}
