//! YAML configuration loading for the hearth hub
//!
//! The hub configuration names the state universe (categories and their
//! subcategories), the sticky category, the initial state, and the timing of
//! the animation scheduler.
//!
//! # Example
//!
//! ```yaml
//! states:
//!   auto: [wakeup, daytime, bedtime, sleep]
//!   manual: [on, low, off, sleep, read]
//! sticky_category: manual
//! initial_state: "auto:daytime"
//! tick_interval_ms: 500
//! fade_ms: 1500
//! ```

use std::path::Path;
use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use hearth_core::{NestedState, StateRegistry};

/// Error type for configuration loading and validation
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("initial state {0:?} is not in the configured states")]
    InvalidInitialState(String),

    #[error("sticky category {0:?} is not a configured category")]
    UnknownStickyCategory(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

fn default_tick_interval_ms() -> u64 {
    500
}

fn default_fade_ms() -> u64 {
    1500
}

/// Hub configuration deserialized from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubConfig {
    /// Category -> subcategories, the universe of valid states
    pub states: IndexMap<String, Vec<String>>,

    /// The category that guarded transitions cannot leave
    pub sticky_category: String,

    /// State the machine starts in, as `"category:subcategory"`
    pub initial_state: String,

    /// Animation scheduler evaluation interval
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Duration of smooth preset fades
    #[serde(default = "default_fade_ms")]
    pub fade_ms: u64,
}

impl HubConfig {
    /// Load and validate a configuration file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading hub config");
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse and validate a configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> ConfigResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ConfigResult<()> {
        let registry = self.registry();
        if !registry.contains_category(&self.sticky_category) {
            return Err(ConfigError::UnknownStickyCategory(
                self.sticky_category.clone(),
            ));
        }
        let initial: NestedState = self
            .initial_state
            .parse()
            .map_err(|_| ConfigError::InvalidInitialState(self.initial_state.clone()))?;
        if !registry.contains(&initial) {
            return Err(ConfigError::InvalidInitialState(self.initial_state.clone()));
        }
        Ok(())
    }

    /// Build the state registry described by this configuration
    pub fn registry(&self) -> StateRegistry {
        StateRegistry::from_categories(
            self.states
                .iter()
                .map(|(category, subs)| (category.clone(), subs.iter().cloned())),
        )
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }
}
