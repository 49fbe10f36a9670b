//! Power-rail supervision.
//!
//! Single-pass pipeline per sample: divider un-scaling, two-level
//! hysteresis, then a glitch filter on the comparator output.

use crate::adc::AdcChannel;
use crate::config::units::Millivolts;
use crate::config::RailConfig;
use crate::error::{DeviceError, Error};

use super::debounce::GlitchFilter;
use super::hysteresis::Hysteresis;

/// Supervised state of a power rail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RailState {
    /// Rail voltage is within the good window (filtered).
    Good,
    /// Rail voltage is out of the window (filtered).
    Bad,
}

impl RailState {
    #[inline]
    fn from_bool(good: bool) -> Self {
        if good {
            RailState::Good
        } else {
            RailState::Bad
        }
    }
}

/// Voltage supervisor for one power rail.
///
/// The rail is observed through a resistive divider into an ADC channel.
/// Each sample un-scales the ADC millivolt reading to the rail voltage,
/// runs it through the hysteresis window, and debounces the result so
/// supply glitches shorter than the filter time never change the reported
/// state.
#[derive(Debug, Clone)]
pub struct RailMonitor {
    scale_num: u32,
    scale_den: u32,
    hysteresis: Hysteresis,
    filter: GlitchFilter,
    last_rail_mv: Millivolts,
}

impl RailMonitor {
    /// Build a monitor from a rail configuration.
    ///
    /// The configuration is assumed validated (`validate_config`); the
    /// divider denominator is still guarded against zero.
    pub fn from_config(config: &RailConfig) -> Self {
        let glitch_us = config.glitch_filter.0;
        Self {
            scale_num: config.divider_total(),
            scale_den: config.r_bottom.0.max(1),
            hysteresis: Hysteresis::new(config.on_threshold.0, config.off_threshold.0),
            filter: GlitchFilter::new(glitch_us, glitch_us, false),
            last_rail_mv: Millivolts(0),
        }
    }

    /// Feed one ADC-node sample (millivolts at the divider tap) at `now_us`.
    pub fn sample(&mut self, now_us: u64, adc_mv: u16) -> RailState {
        // saturate so an extreme divider ratio reads as over-voltage
        // instead of wrapping toward zero
        let scaled = adc_mv as u64 * self.scale_num as u64 / self.scale_den as u64;
        let rail_mv = u32::try_from(scaled).unwrap_or(u32::MAX);
        self.last_rail_mv = Millivolts(rail_mv);

        let raw_good = self.hysteresis.update(rail_mv);
        RailState::from_bool(self.filter.update(now_us, raw_good))
    }

    /// Read the ADC channel and feed the sample.
    pub fn poll<A: AdcChannel>(
        &mut self,
        adc: &mut A,
        now_us: u64,
    ) -> Result<RailState, Error> {
        let adc_mv = adc.read_mv().map_err(|_| DeviceError::AdcError)?;
        Ok(self.sample(now_us, adc_mv))
    }

    /// Last un-scaled rail voltage.
    #[inline]
    pub fn rail_mv(&self) -> Millivolts {
        self.last_rail_mv
    }

    /// Current filtered state without feeding a sample.
    #[inline]
    pub fn state(&self) -> RailState {
        RailState::from_bool(self.filter.output())
    }
}
