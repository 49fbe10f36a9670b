//! Time-based boolean glitch filter.

use crate::config::InputConfig;

use super::timer::SwTimer;

/// Debounce filter with independent stable-high and stable-low times.
///
/// The filtered output flips only after the raw input has held the new
/// level continuously for the configured time. A glitch shorter than the
/// stable time resets the pending timer and never propagates.
#[derive(Debug, Clone, Copy)]
pub struct GlitchFilter {
    stable_high_us: u64,
    stable_low_us: u64,
    inverted: bool,
    output: bool,
    pending: SwTimer,
}

impl GlitchFilter {
    /// Create a filter with the given stable times and initial output.
    pub fn new(stable_high_us: u64, stable_low_us: u64, initial: bool) -> Self {
        Self {
            stable_high_us,
            stable_low_us,
            inverted: false,
            output: initial,
            pending: SwTimer::new(),
        }
    }

    /// Create a filter from an input configuration. Initial output is low.
    pub fn from_config(config: &InputConfig) -> Self {
        Self {
            stable_high_us: config.stable_high.0,
            stable_low_us: config.stable_low.0,
            inverted: config.inverted,
            output: false,
            pending: SwTimer::new(),
        }
    }

    /// Current filtered output.
    #[inline]
    pub fn output(&self) -> bool {
        self.output
    }

    /// Feed a raw sample at `now_us` and return the filtered output.
    pub fn update(&mut self, now_us: u64, raw: bool) -> bool {
        let level = raw != self.inverted;

        if level == self.output {
            // Back at the settled level: discard any pending transition.
            self.pending.stop();
            return self.output;
        }

        if !self.pending.is_running() {
            self.pending.start(now_us);
        }

        let stable_us = if level {
            self.stable_high_us
        } else {
            self.stable_low_us
        };

        if self.pending.has_elapsed(now_us, stable_us) {
            self.output = level;
            self.pending.stop();
        }

        self.output
    }

    /// Force the output to a level and clear any pending transition.
    pub fn reset(&mut self, level: bool) {
        self.output = level;
        self.pending.stop();
    }
}
