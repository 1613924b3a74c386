//! Server configuration: optional TOML file, then command-line overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::AppError;

pub const DEFAULT_LISTEN: &str = "127.0.0.1:5000";
const DB_FILE: &str = "cafes.db";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind.
    pub listen: String,
    /// SQLite database file.
    pub db_path: PathBuf,
    /// Key the form tokens are derived from. Generated per process when unset.
    pub secret_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: DEFAULT_LISTEN.to_string(),
            db_path: default_db_path(),
            secret_key: None,
        }
    }
}

/// `<data dir>/cafe-wifi/cafes.db`, or `./cafes.db` without a data dir.
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .map(|base| base.join("cafe-wifi").join(DB_FILE))
        .unwrap_or_else(|| PathBuf::from(DB_FILE))
}

impl ServerConfig {
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, AppError> {
        toml::from_str(text).map_err(|e| AppError::Config(e.to_string()))
    }

    /// The configured secret, or a fresh random one.
    pub fn resolve_secret(&self) -> String {
        match &self.secret_key {
            Some(key) if !key.trim().is_empty() => key.clone(),
            _ => {
                log::warn!("secret_key not set; form tokens will not survive a restart");
                uuid::Uuid::new_v4().simple().to_string()
            }
        }
    }
}
