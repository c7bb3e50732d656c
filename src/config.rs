use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_RPC_URL: &str = "https://api.steemit.com";
pub const DEFAULT_REFRESH_SECS: u64 = 3;
const MAX_RECENT_SEARCHES: usize = 10;

/// Environment variable overriding `rpc_url` for one session
pub const RPC_ENV_VAR: &str = "STEEMBLOCKS_RPC";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    #[serde(default)]
    pub recent_searches: Vec<String>,
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
}

fn default_rpc_url() -> String {
    DEFAULT_RPC_URL.to_string()
}

fn default_refresh_secs() -> u64 {
    DEFAULT_REFRESH_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            recent_searches: Vec::new(),
            refresh_secs: default_refresh_secs(),
        }
    }
}

impl Config {
    /// Returns the config directory path (~/.config/steemblocks on Linux)
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("steemblocks"))
            .context("Could not determine config directory")
    }

    fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load config from disk, or return default if not found.
    /// `STEEMBLOCKS_RPC` wins over the stored node URL.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config from {path:?}"))?;
            Self::from_toml(&contents)?
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var(RPC_ENV_VAR) {
            if !url.trim().is_empty() {
                config.rpc_url = url.trim().to_string();
            }
        }

        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse config file")
    }

    /// Save config to disk
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory {dir:?}"))?;

        let path = Self::config_path()?;
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write config to {path:?}"))?;

        Ok(())
    }

    /// Move a search to the front of the history without saving
    pub fn push_recent_search(&mut self, query: String) {
        self.recent_searches.retain(|s| s != &query);
        self.recent_searches.insert(0, query);
        self.recent_searches.truncate(MAX_RECENT_SEARCHES);
    }

    /// Add a search to recent history (keeps last 10)
    pub fn add_recent_search(&mut self, query: String) -> Result<()> {
        self.push_recent_search(query);
        self.save()
    }

    pub fn remove_recent_search(&mut self, index: usize) -> Result<()> {
        if index < self.recent_searches.len() {
            self.recent_searches.remove(index);
        }
        self.save()
    }
}
