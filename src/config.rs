//! Runtime settings for the demo.
//!
//! Loaded from a TOML file when one is given or found at the default
//! location; every field falls back to a built-in default.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(String),
    #[error("Failed to parse config: {0}")]
    Parse(String),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopConfig {
    #[serde(default)]
    pub shop: ShopSettings,
    #[serde(default)]
    pub bot: BotSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopSettings {
    /// Mailbox capacity of every actor.
    #[serde(default = "default_mailbox_size")]
    pub mailbox_size: usize,
    /// How long a product card shows the "added" confirmation.
    #[serde(default = "default_added_indicator_ms")]
    pub added_indicator_ms: u64,
    /// Shown under the cart total; display only.
    #[serde(default = "default_free_delivery_threshold")]
    pub free_delivery_threshold: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotSettings {
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u64,
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// External product fixture; the embedded one is used when unset.
    #[serde(default)]
    pub fixture_path: Option<PathBuf>,
}

fn default_mailbox_size() -> usize { 32 }
fn default_added_indicator_ms() -> u64 { 2_000 }
fn default_free_delivery_threshold() -> u64 { 3_000 }
fn default_step_delay_ms() -> u64 { 2_000 }
fn default_reply_delay_ms() -> u64 { 1_000 }

impl Default for ShopSettings {
    fn default() -> Self {
        Self {
            mailbox_size: default_mailbox_size(),
            added_indicator_ms: default_added_indicator_ms(),
            free_delivery_threshold: default_free_delivery_threshold(),
        }
    }
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            step_delay_ms: default_step_delay_ms(),
            reply_delay_ms: default_reply_delay_ms(),
        }
    }
}

impl ShopSettings {
    pub fn added_indicator(&self) -> Duration {
        Duration::from_millis(self.added_indicator_ms)
    }
}

impl BotSettings {
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

impl ShopConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Actor mailboxes are bounded channels and need room for one message.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.shop.mailbox_size == 0 {
            return Err(ConfigError::Invalid("shop.mailbox_size must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Load from the default config location or return defaults
    pub fn load_or_default() -> Self {
        let path = "config/shop.toml";
        match Self::from_file(path) {
            Ok(config) => {
                tracing::info!("Loaded configuration from {}", path);
                config
            }
            Err(e) => {
                tracing::info!(reason = %e, "Using default configuration");
                Self::default()
            }
        }
    }
}
