//! Two-level hysteresis comparator.

/// Comparator with separate assert and deassert thresholds.
///
/// Output asserts when the input rises to `on` or above and deasserts when
/// it falls below `off`; between the thresholds the previous state holds.
/// Requires `on > off`.
#[derive(Debug, Clone, Copy)]
pub struct Hysteresis {
    on: u32,
    off: u32,
    state: bool,
}

impl Hysteresis {
    /// Create a comparator, initially deasserted.
    ///
    /// Callers validate `on > off` (the config layer enforces it); a
    /// degenerate window still behaves deterministically.
    pub fn new(on: u32, off: u32) -> Self {
        Self {
            on,
            off,
            state: false,
        }
    }

    /// Current output.
    #[inline]
    pub fn output(&self) -> bool {
        self.state
    }

    /// Feed an input value and return the output.
    pub fn update(&mut self, value: u32) -> bool {
        if value >= self.on {
            self.state = true;
        } else if value < self.off {
            self.state = false;
        }
        self.state
    }

    /// Assert threshold.
    #[inline]
    pub fn on_threshold(&self) -> u32 {
        self.on
    }

    /// Deassert threshold.
    #[inline]
    pub fn off_threshold(&self) -> u32 {
        self.off
    }
}
