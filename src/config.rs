//! Optional TOML configuration
//!
//! ```toml
//! log_level = "info"
//! tier = "plus"
//! deck = "profiles.json"
//! [budgets]
//! free = 0
//! plus = 2
//! sapphire = 2
//! [server]
//! addr = "127.0.0.1:3000"
//! ```
//!
//! Missing keys fall back to defaults; CLI flags override the file.

use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::core::TierBudgets;
use crate::error::ConfigError;
use crate::types::SubscriptionTier;
use crate::DEFAULT_ADDR;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { addr: DEFAULT_ADDR.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fallback tracing filter when RUST_LOG is unset
    pub log_level: String,
    /// Tier the CLI session starts on
    pub tier: SubscriptionTier,
    /// Deck file; the built-in sample when unset
    pub deck: Option<PathBuf>,
    pub budgets: TierBudgets,
    pub server: ServerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            tier: SubscriptionTier::Free,
            deck: None,
            budgets: TierBudgets::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Load `path` if given, otherwise defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Layer command-line flags over the file; a flag that was given wins
    pub fn with_overrides(
        mut self,
        tier: Option<SubscriptionTier>,
        deck: Option<PathBuf>,
        addr: Option<String>,
    ) -> Self {
        if let Some(tier) = tier {
            self.tier = tier;
        }
        if deck.is_some() {
            self.deck = deck;
        }
        if let Some(addr) = addr {
            self.server.addr = addr;
        }
        self
    }
}
