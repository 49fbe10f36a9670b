//! TI TPA3255 class-D amplifier supervisor.
//!
//! Reference: Texas Instruments TPA3255 datasheet (SLASE81).
//!
//! The TPA3255 has no digital bus; it exposes an active-low RESET input
//! and two open-drain status outputs, FAULT (latched shutdown) and
//! CLIP_OTW (clipping or over-temperature warning). The supervisor
//! drives the reset sequence and automatically recovers from latched
//! faults: on FAULT it holds the amplifier in reset for a configured
//! time, releases it and waits for the output stage to settle, then
//! resumes monitoring. A fault that persists restarts the hold period, so
//! a hard short cycles indefinitely at the hold cadence instead of
//! free-running.

use core::marker::PhantomData;

use embedded_hal::digital::{InputPin, OutputPin};

use crate::driver::state::{DriverState, Ready, StateName, Uninit};
use crate::error::{DeviceError, Error};
use crate::monitor::SwTimer;

/// Default reset hold time after a fault, in microseconds.
pub const DEFAULT_RESET_HOLD_US: u64 = 100_000;
/// Default settle time after releasing reset, in microseconds.
pub const DEFAULT_RESTART_SETTLE_US: u64 = 20_000;

/// Supervisor recovery state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AmpState {
    /// Amplifier out of reset, no fault pending.
    Running,
    /// FAULT observed; amplifier held in reset.
    ResetHold,
    /// Reset released; waiting for the output stage to settle before
    /// trusting the FAULT line again.
    Restarting,
}

/// TPA3255 supervisor with lifecycle type-states.
///
/// `RESET` is the active-low reset output, `FAULT` and `CLIP` the
/// active-low status inputs. All three share one pin error type `P`.
pub struct Tpa3255<RESET, FAULT, CLIP, STATE = Uninit> {
    reset_n: RESET,
    fault_n: FAULT,
    clip_otw_n: CLIP,
    state: AmpState,
    timer: SwTimer,
    reset_hold_us: u64,
    restart_settle_us: u64,
    recovery_count: u32,
    _state: PhantomData<STATE>,
}

impl<RESET, FAULT, CLIP, P> Tpa3255<RESET, FAULT, CLIP, Uninit>
where
    RESET: OutputPin<Error = P>,
    FAULT: InputPin<Error = P>,
    CLIP: InputPin<Error = P>,
{
    /// Create a new supervisor with default recovery timing.
    pub fn new(reset_n: RESET, fault_n: FAULT, clip_otw_n: CLIP) -> Self {
        Self {
            reset_n,
            fault_n,
            clip_otw_n,
            state: AmpState::Running,
            timer: SwTimer::new(),
            reset_hold_us: DEFAULT_RESET_HOLD_US,
            restart_settle_us: DEFAULT_RESTART_SETTLE_US,
            recovery_count: 0,
            _state: PhantomData,
        }
    }

    /// Override the recovery timing. Hold is how long reset is asserted
    /// after a fault; settle is how long the FAULT line is ignored after
    /// reset release.
    #[must_use]
    pub fn with_timing(mut self, reset_hold_us: u64, restart_settle_us: u64) -> Self {
        self.reset_hold_us = reset_hold_us;
        self.restart_settle_us = restart_settle_us;
        self
    }

    /// Release the amplifier from reset and start supervising.
    pub fn init(mut self) -> Result<Tpa3255<RESET, FAULT, CLIP, Ready>, (Self, Error)> {
        match self.reset_n.set_high() {
            Ok(()) => Ok(Tpa3255 {
                reset_n: self.reset_n,
                fault_n: self.fault_n,
                clip_otw_n: self.clip_otw_n,
                state: AmpState::Running,
                timer: SwTimer::new(),
                reset_hold_us: self.reset_hold_us,
                restart_settle_us: self.restart_settle_us,
                recovery_count: 0,
                _state: PhantomData,
            }),
            Err(_) => Err((self, Error::Device(DeviceError::PinError))),
        }
    }
}

impl<RESET, FAULT, CLIP, P> Tpa3255<RESET, FAULT, CLIP, Ready>
where
    RESET: OutputPin<Error = P>,
    FAULT: InputPin<Error = P>,
    CLIP: InputPin<Error = P>,
{
    /// Advance the recovery state machine. Call periodically with a
    /// monotonic microsecond timestamp.
    pub fn handle(&mut self, now_us: u64) -> Result<AmpState, Error> {
        match self.state {
            AmpState::Running => {
                if self.fault_asserted()? {
                    self.reset_n
                        .set_low()
                        .map_err(|_| Error::Device(DeviceError::PinError))?;
                    self.timer.start(now_us);
                    self.state = AmpState::ResetHold;
                }
            }
            AmpState::ResetHold => {
                if self.timer.has_elapsed(now_us, self.reset_hold_us) {
                    self.reset_n
                        .set_high()
                        .map_err(|_| Error::Device(DeviceError::PinError))?;
                    self.timer.start(now_us);
                    self.state = AmpState::Restarting;
                }
            }
            AmpState::Restarting => {
                if self.timer.has_elapsed(now_us, self.restart_settle_us) {
                    if self.fault_asserted()? {
                        // fault persists, go back to holding reset
                        self.reset_n
                            .set_low()
                            .map_err(|_| Error::Device(DeviceError::PinError))?;
                        self.timer.start(now_us);
                        self.state = AmpState::ResetHold;
                    } else {
                        self.timer.stop();
                        self.recovery_count = self.recovery_count.saturating_add(1);
                        self.state = AmpState::Running;
                    }
                }
            }
        }
        Ok(self.state)
    }

    /// Current recovery state.
    #[inline]
    pub fn state(&self) -> AmpState {
        self.state
    }

    /// Number of completed fault recoveries since `init`.
    #[inline]
    pub fn recovery_count(&self) -> u32 {
        self.recovery_count
    }

    /// Check the CLIP_OTW warning line (active low).
    pub fn is_clipping(&mut self) -> Result<bool, Error> {
        self.clip_otw_n
            .is_low()
            .map_err(|_| Error::Device(DeviceError::PinError))
    }

    fn fault_asserted(&mut self) -> Result<bool, Error> {
        self.fault_n
            .is_low()
            .map_err(|_| Error::Device(DeviceError::PinError))
    }

    /// Hold the amplifier in reset and return to `Uninit`.
    pub fn deinit(mut self) -> Result<Tpa3255<RESET, FAULT, CLIP, Uninit>, (Self, Error)> {
        match self.reset_n.set_low() {
            Ok(()) => Ok(Tpa3255 {
                reset_n: self.reset_n,
                fault_n: self.fault_n,
                clip_otw_n: self.clip_otw_n,
                state: AmpState::Running,
                timer: SwTimer::new(),
                reset_hold_us: self.reset_hold_us,
                restart_settle_us: self.restart_settle_us,
                recovery_count: self.recovery_count,
                _state: PhantomData,
            }),
            Err(_) => Err((self, Error::Device(DeviceError::PinError))),
        }
    }
}

impl<RESET, FAULT, CLIP, STATE> Tpa3255<RESET, FAULT, CLIP, STATE>
where
    STATE: DriverState + StateName,
{
    /// Get the lifecycle state name for display/debugging.
    pub fn state_name(&self) -> &'static str {
        STATE::name()
    }

    /// Consume the supervisor and return the pins.
    pub fn release(self) -> (RESET, FAULT, CLIP) {
        (self.reset_n, self.fault_n, self.clip_otw_n)
    }
}
