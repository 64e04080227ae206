//! Settings configuration via `prefstore.toml`
//!
//! On first open of a data directory a default `prefstore.toml` is created
//! next to the settings file. To change settings, edit the file and restart.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use prefstore_core::{Error, Result};
use prefstore_storage::{Durability, FileStore};

/// Config file name placed in the data directory.
pub const CONFIG_FILE_NAME: &str = "prefstore.toml";

/// Configuration loaded from `prefstore.toml`.
///
/// # Example
///
/// ```toml
/// durability = "standard"
/// file_name = "prefs.json"
/// app_version = 1
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefsConfig {
    /// Durability mode: `"standard"` or `"always"`.
    #[serde(default = "default_durability_str")]
    pub durability: String,
    /// Settings file name inside the data directory.
    #[serde(default = "default_file_name")]
    pub file_name: String,
    /// Application version reported to the version tracker.
    #[serde(default = "default_app_version")]
    pub app_version: i32,
}

fn default_durability_str() -> String {
    "standard".to_string()
}

fn default_file_name() -> String {
    "prefs.json".to_string()
}

fn default_app_version() -> i32 {
    1
}

impl Default for PrefsConfig {
    fn default() -> Self {
        Self {
            durability: default_durability_str(),
            file_name: default_file_name(),
            app_version: default_app_version(),
        }
    }
}

impl PrefsConfig {
    /// Parse the durability string into a [`Durability`].
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `"standard"` or `"always"`.
    pub fn durability_mode(&self) -> Result<Durability> {
        match self.durability.as_str() {
            "standard" => Ok(Durability::Standard),
            "always" => Ok(Durability::Always),
            other => Err(Error::invalid_argument(format!(
                "Invalid durability mode '{}' in {}. Expected \"standard\" or \"always\".",
                other, CONFIG_FILE_NAME
            ))),
        }
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# prefstore configuration
#
# Durability mode: "standard" (default) or "always"
#   "standard" = write a temp file and rename it over the settings file
#   "always"   = additionally fsync the file and its directory on every apply
durability = "standard"

# Settings file name inside the data directory
file_name = "prefs.json"

# Application version reported by check_update()
app_version = 1
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if it holds
    /// an invalid durability mode or a negative version.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::storage(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: PrefsConfig = toml::from_str(&content).map_err(|e| {
            Error::invalid_argument(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field eagerly.
    pub fn validate(&self) -> Result<()> {
        self.durability_mode()?;
        if self.file_name.trim().is_empty() || self.file_name == CONFIG_FILE_NAME {
            return Err(Error::invalid_argument(format!(
                "Invalid file_name '{}' in {}",
                self.file_name, CONFIG_FILE_NAME
            )));
        }
        if self.app_version < 0 {
            return Err(Error::invalid_argument(format!(
                "app_version must be non-negative in {}, got {}",
                CONFIG_FILE_NAME, self.app_version
            )));
        }
        Ok(())
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                Error::storage(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            info!(path = %path.display(), "Wrote default config");
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Encode(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            Error::storage(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Load `prefstore.toml` from `dir`, creating the directory and a default
    /// config if needed.
    pub fn load_or_init(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(CONFIG_FILE_NAME);
        Self::write_default_if_missing(&path)?;
        Self::from_file(&path)
    }

    /// Open the settings file this config describes inside `dir`.
    pub fn open_file_store(&self, dir: &Path) -> Result<FileStore> {
        FileStore::open(dir.join(&self.file_name), self.durability_mode()?)
    }
}
