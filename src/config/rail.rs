//! Power-rail supervision configuration from TOML.

use heapless::String;
use serde::Deserialize;

use super::units::{Micros, Millivolts, Ohms};

/// Complete power-rail configuration from TOML.
///
/// A rail is observed through a resistive divider into an ADC channel and
/// judged good/bad with a two-level hysteresis plus a glitch filter.
#[derive(Debug, Clone, Deserialize)]
pub struct RailConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Divider top resistor (rail to ADC node), in ohms.
    #[serde(rename = "r_top_ohm")]
    pub r_top: Ohms,

    /// Divider bottom resistor (ADC node to ground), in ohms.
    #[serde(rename = "r_bottom_ohm")]
    pub r_bottom: Ohms,

    /// Rail voltage above which the rail is asserted good.
    #[serde(rename = "on_threshold_mv")]
    pub on_threshold: Millivolts,

    /// Rail voltage below which the rail is deasserted.
    #[serde(rename = "off_threshold_mv")]
    pub off_threshold: Millivolts,

    /// Time the hysteresis output must hold before the filtered state flips.
    #[serde(default = "default_glitch_filter", rename = "glitch_filter_us")]
    pub glitch_filter: Micros,
}

fn default_glitch_filter() -> Micros {
    Micros::from_millis(1)
}

impl RailConfig {
    /// Total divider resistance in ohms.
    #[inline]
    pub fn divider_total(&self) -> u32 {
        self.r_top.0.saturating_add(self.r_bottom.0)
    }

    /// Convert an ADC-node reading to the rail voltage in millivolts.
    ///
    /// vin = vadc * (r_top + r_bottom) / r_bottom, integer math.
    pub fn unscale_mv(&self, adc_mv: u16) -> Millivolts {
        let num = adc_mv as u64 * self.divider_total() as u64;
        let mv = num / self.r_bottom.0 as u64;
        Millivolts(u32::try_from(mv).unwrap_or(u32::MAX))
    }

    /// Check if thresholds form a valid hysteresis window (on > off).
    pub fn thresholds_valid(&self) -> bool {
        self.on_threshold > self.off_threshold
    }
}
