//! Caller-clocked software timer.

/// Software timer over caller-supplied microsecond timestamps.
///
/// The timer stores the instant it was started; the caller passes the
/// current time to every query. Timestamps must come from a single
/// monotonic source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwTimer {
    started_at: Option<u64>,
}

impl SwTimer {
    /// Create a stopped timer.
    pub const fn new() -> Self {
        Self { started_at: None }
    }

    /// Start (or restart) the timer at `now_us`.
    pub fn start(&mut self, now_us: u64) {
        self.started_at = Some(now_us);
    }

    /// Restart the timer at `now_us` and return the elapsed time of the
    /// previous run (zero if it was stopped).
    pub fn restart(&mut self, now_us: u64) -> u64 {
        let elapsed = self.elapsed_us(now_us);
        self.started_at = Some(now_us);
        elapsed
    }

    /// Stop the timer. A stopped timer reports zero elapsed and never fires.
    pub fn stop(&mut self) {
        self.started_at = None;
    }

    /// Check if the timer is running.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Elapsed time in microseconds since start, zero if stopped.
    pub fn elapsed_us(&self, now_us: u64) -> u64 {
        match self.started_at {
            Some(start) => now_us.saturating_sub(start),
            None => 0,
        }
    }

    /// Check if `period_us` has elapsed since start.
    ///
    /// Always false while stopped.
    pub fn has_elapsed(&self, now_us: u64, period_us: u64) -> bool {
        self.is_running() && self.elapsed_us(now_us) >= period_us
    }
}
