//! Updater configuration.
//!
//! Holds the settings this crate reads from the host's configuration
//! storage, currently just the optional GitHub access token used for
//! private repositories. The token is entered by an administrator through
//! the host's own settings surface; this crate only reads it.
//!
//! The configuration lives in a TOML file:
//!
//! ```toml
//! github_token = "ghp_..."
//! ```
//!
//! # File location
//!
//! - Default: `~/.extup/config.toml`
//! - Override: set the `EXTUP_CONFIG_PATH` environment variable
//!
//! A missing file yields the default (empty) configuration; only an
//! unreadable or unparseable file is an error.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::core::error::{ExtupError, Result};

/// Environment variable overriding the configuration file location.
pub const CONFIG_PATH_ENV: &str = "EXTUP_CONFIG_PATH";

/// Settings read once at composition time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdaterConfig {
    /// GitHub access token for private release feeds.
    #[serde(default)]
    pub github_token: Option<String>,
}

impl UpdaterConfig {
    /// Default configuration file location under the user's home directory.
    ///
    /// Returns `None` when the home directory cannot be determined.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".extup").join("config.toml"))
    }

    /// Loads the configuration from [`CONFIG_PATH_ENV`] or the default
    /// location, falling back to defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns [`ExtupError::ConfigRead`] or [`ExtupError::ConfigParse`]
    /// when a present file cannot be read or parsed.
    pub async fn load() -> Result<Self> {
        let path = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => PathBuf::from(path),
            Err(_) => match Self::default_path() {
                Some(path) => path,
                None => {
                    debug!("no home directory, using default updater configuration");
                    return Ok(Self::default());
                }
            },
        };
        Self::load_from(&path).await
    }

    /// Loads the configuration from an explicit path, falling back to
    /// defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    pub async fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "updater configuration absent, using defaults");
            return Ok(Self::default());
        }

        let raw = tokio::fs::read_to_string(path).await.map_err(|source| {
            ExtupError::ConfigRead { path: path.to_path_buf(), source }
        })?;
        let config: Self = toml::from_str(&raw).map_err(|source| {
            ExtupError::ConfigParse { path: path.to_path_buf(), source }
        })?;
        debug!(path = %path.display(), has_token = config.github_token.is_some(), "loaded updater configuration");
        Ok(config)
    }

    /// The configured access token, if any. Empty strings count as unset.
    pub fn github_token(&self) -> Option<&str> {
        self.github_token.as_deref().filter(|token| !token.is_empty())
    }
}
