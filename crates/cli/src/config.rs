//! Console configuration utilities

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Local console configuration: where the two services live
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Fraud-detection API base URL
    pub api_url: String,
    /// Core-banking/auth API base URL
    pub auth_url: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_owned(),
            auth_url: "http://localhost:8001".to_owned(),
        }
    }
}

impl ConsoleConfig {
    pub fn path(data_dir: &Path) -> PathBuf {
        data_dir.join("console.json")
    }

    /// Load the config file if present, else defaults.
    /// `SENTINEL_API_URL` / `SENTINEL_AUTH_URL` override either way.
    pub fn load_or_default(data_dir: &Path) -> Result<Self> {
        let path = Self::path(data_dir);
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var("SENTINEL_API_URL") {
            config.api_url = url;
        }
        if let Ok(url) = std::env::var("SENTINEL_AUTH_URL") {
            config.auth_url = url;
        }
        Ok(config)
    }

    /// Save the configuration to the data directory
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(data_dir)?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(Self::path(data_dir), content)?;
        Ok(())
    }
}
