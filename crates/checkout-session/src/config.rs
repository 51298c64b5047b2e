//! # Session Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CHECKOUT_MAX_ITEMS=25                                              │
//! │     CHECKOUT_JOURNAL_CAPACITY=128                                      │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     max_items = 100, journal_capacity = 64                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # checkout.toml
//! max_items = 25
//! journal_capacity = 128
//! ```

use std::path::Path;

use checkout_core::MAX_CART_ITEMS;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{SessionError, SessionResult};

/// Environment variable overriding [`SessionConfig::max_items`].
pub const ENV_MAX_ITEMS: &str = "CHECKOUT_MAX_ITEMS";

/// Environment variable overriding [`SessionConfig::journal_capacity`].
pub const ENV_JOURNAL_CAPACITY: &str = "CHECKOUT_JOURNAL_CAPACITY";

/// Settings applied to every session created from this config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Maximum items per cart (1..=100).
    #[serde(default = "default_max_items")]
    pub max_items: usize,

    /// Number of journal entries kept per session; older entries are dropped.
    #[serde(default = "default_journal_capacity")]
    pub journal_capacity: usize,
}

fn default_max_items() -> usize {
    MAX_CART_ITEMS
}

fn default_journal_capacity() -> usize {
    64
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            max_items: default_max_items(),
            journal_capacity: default_journal_capacity(),
        }
    }
}

impl SessionConfig {
    /// Parses a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(contents: &str) -> SessionResult<Self> {
        let config: SessionConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> SessionResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file, if `path` is given and exists
    /// 3. Environment variables
    pub fn load(path: Option<&Path>) -> SessionResult<Self> {
        let mut config = Self::default();

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading checkout config from file");
                let contents = std::fs::read_to_string(path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            warn!("Failed to load checkout config: {}. Using defaults.", e);
            Self::default()
        })
    }

    pub fn validate(&self) -> SessionResult<()> {
        if self.max_items == 0 || self.max_items > MAX_CART_ITEMS {
            return Err(SessionError::InvalidConfig(format!(
                "max_items must be between 1 and {}, got {}",
                MAX_CART_ITEMS, self.max_items
            )));
        }

        if self.journal_capacity == 0 {
            return Err(SessionError::InvalidConfig(
                "journal_capacity must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies overrides looked up by variable name.
    ///
    /// Values that do not parse are ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_MAX_ITEMS) {
            match raw.trim().parse::<usize>() {
                Ok(max_items) => {
                    debug!(max_items, "Overriding max_items from environment");
                    self.max_items = max_items;
                }
                Err(_) => warn!(value = %raw, "Ignoring invalid {}", ENV_MAX_ITEMS),
            }
        }

        if let Some(raw) = lookup(ENV_JOURNAL_CAPACITY) {
            match raw.trim().parse::<usize>() {
                Ok(capacity) => {
                    debug!(capacity, "Overriding journal_capacity from environment");
                    self.journal_capacity = capacity;
                }
                Err(_) => warn!(value = %raw, "Ignoring invalid {}", ENV_JOURNAL_CAPACITY),
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
