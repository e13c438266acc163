// Runtime configuration from the environment (and an optional .env file)

use crate::directory::TeamDirectory;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub const DEFAULT_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_PUBLIC_URL: &str = "http://localhost:3000/";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Table to load instead of the bundled one (DOODLE_DATA)
    pub data_path: Option<PathBuf>,
    /// Server bind address (DOODLE_ADDR)
    pub bind_addr: String,
    /// Base URL used for share links (DOODLE_PUBLIC_URL)
    pub public_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_path: None,
            bind_addr: DEFAULT_ADDR.to_string(),
            public_url: DEFAULT_PUBLIC_URL.to_string(),
        }
    }
}

impl Config {
    /// Load `.env` if present, then read the environment
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        Config {
            data_path: get("DOODLE_DATA").map(PathBuf::from),
            bind_addr: get("DOODLE_ADDR").unwrap_or(defaults.bind_addr),
            public_url: get("DOODLE_PUBLIC_URL").unwrap_or(defaults.public_url),
        }
    }

    /// Replace the data path when one is given explicitly
    pub fn with_data_path(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.data_path = path;
        }
        self
    }

    /// Load the configured table, or the bundled one
    pub fn load_directory(&self) -> Result<TeamDirectory> {
        match &self.data_path {
            Some(path) => TeamDirectory::from_path(path)
                .with_context(|| format!("Failed to load team table {}", path.display())),
            None => TeamDirectory::bundled().context("Bundled team table is invalid"),
        }
    }
}
