//! Board configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use crate::error::{ConfigError, Result};

use super::charger::ChargerConfig;
use super::input::InputConfig;
use super::rail::RailConfig;

fn truncated_name(name: &str) -> String<32> {
    let mut truncated = String::new();
    for c in name.chars() {
        if truncated.push(c).is_err() {
            break;
        }
    }
    truncated
}

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardConfig {
    /// Named supervised power rails.
    #[serde(default)]
    pub rails: FnvIndexMap<String<32>, RailConfig, 8>,

    /// Named debounced digital inputs.
    #[serde(default)]
    pub inputs: FnvIndexMap<String<32>, InputConfig, 16>,

    /// Named battery-charger setpoint sets.
    #[serde(default)]
    pub chargers: FnvIndexMap<String<32>, ChargerConfig, 4>,
}

impl BoardConfig {
    /// Get a rail configuration by name.
    pub fn rail(&self, name: &str) -> Option<&RailConfig> {
        self.rails
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Get an input configuration by name.
    pub fn input(&self, name: &str) -> Option<&InputConfig> {
        self.inputs
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Get a charger configuration by name.
    pub fn charger(&self, name: &str) -> Option<&ChargerConfig> {
        self.chargers
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Get a rail configuration by name, failing if it is missing.
    pub fn require_rail(&self, name: &str) -> Result<&RailConfig> {
        self.rail(name)
            .ok_or_else(|| ConfigError::RailNotFound(truncated_name(name)).into())
    }

    /// Get an input configuration by name, failing if it is missing.
    pub fn require_input(&self, name: &str) -> Result<&InputConfig> {
        self.input(name)
            .ok_or_else(|| ConfigError::InputNotFound(truncated_name(name)).into())
    }

    /// Get a charger configuration by name, failing if it is missing.
    pub fn require_charger(&self, name: &str) -> Result<&ChargerConfig> {
        self.charger(name)
            .ok_or_else(|| ConfigError::ChargerNotFound(truncated_name(name)).into())
    }

    /// List all rail names.
    pub fn rail_names(&self) -> impl Iterator<Item = &str> {
        self.rails.keys().map(|s| s.as_str())
    }

    /// List all input names.
    pub fn input_names(&self) -> impl Iterator<Item = &str> {
        self.inputs.keys().map(|s| s.as_str())
    }

    /// List all charger names.
    pub fn charger_names(&self) -> impl Iterator<Item = &str> {
        self.chargers.keys().map(|s| s.as_str())
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rails: FnvIndexMap::new(),
            inputs: FnvIndexMap::new(),
            chargers: FnvIndexMap::new(),
        }
    }
}
