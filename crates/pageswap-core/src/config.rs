//! Runtime configuration

use std::path::Path;

use pageswap_dom::Markers;
use pageswap_fetch::FetchConfig;
use pageswap_navigation::TransitionTiming;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Markup contract between the pages and the engine
    pub markers: Markers,
    /// Exit and enter transition durations
    pub timing: TransitionTiming,
    /// HTTP client settings
    pub fetch: FetchConfig,
    /// Filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Config {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_json(&raw)?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject markers the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        let m = &self.markers;
        let required = [
            ("markers.container_selector", &m.container_selector),
            ("markers.nav_list_class", &m.nav_list_class),
            ("markers.internal_attribute", &m.internal_attribute),
            ("markers.opt_out_attribute", &m.opt_out_attribute),
            ("markers.active_class", &m.active_class),
            ("markers.exit_class", &m.exit_class),
            ("markers.enter_class", &m.enter_class),
            ("markers.busy_indicator_class", &m.busy_indicator_class),
        ];

        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(CoreError::Config(format!("{field} must not be empty")));
        }
        if self.fetch.user_agent.trim().is_empty() {
            return Err(CoreError::Config("fetch.user_agent must not be empty".into()));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            markers: Markers::default(),
            timing: TransitionTiming::default(),
            fetch: FetchConfig::default(),
            log_filter: "info".to_string(),
        }
    }
}
