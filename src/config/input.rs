//! Debounced digital input configuration from TOML.

use serde::Deserialize;

use super::units::Micros;

/// Debounce configuration for a digital input.
///
/// The raw level must hold for the configured stable time before the
/// filtered output follows it; the two directions are independent so a
/// press can be recognized faster than a release (or vice versa).
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Time the raw input must stay high before the output goes high.
    #[serde(rename = "stable_high_us")]
    pub stable_high: Micros,

    /// Time the raw input must stay low before the output goes low.
    #[serde(rename = "stable_low_us")]
    pub stable_low: Micros,

    /// Invert the raw level before filtering (active-low inputs).
    #[serde(default)]
    pub inverted: bool,
}

impl InputConfig {
    /// Check that both stable times are nonzero.
    pub fn is_valid(&self) -> bool {
        self.stable_high.0 > 0 && self.stable_low.0 > 0
    }
}
