//! NXP PCA9632 4-channel I2C PWM LED driver.
//!
//! Reference: NXP PCA9632 datasheet.
//!
//! Each channel has an 8-bit individual PWM duty register; a group PWM /
//! group frequency pair overlays blinking on channels placed in the group
//! mode. The LEDOUT register selects per channel between hard off, hard
//! on, individual PWM and group control.

use core::marker::PhantomData;

use embedded_hal::i2c::I2c;

use crate::bus::I2cRegio;
use crate::driver::state::{DriverState, Ready, StateName, Uninit};
use crate::error::{DeviceError, Error};

/// Default 7-bit I2C device address.
pub const I2C_ADDRESS: u8 = 0x62;

/// MODE1: sleep, sub-address and all-call control.
pub const REG_MODE1: u8 = 0x00;
/// MODE2: output driver configuration, group dim/blink select.
pub const REG_MODE2: u8 = 0x01;
/// PWM0: individual duty for channel 0 (PWM1-3 follow at 0x03-0x05).
pub const REG_PWM0: u8 = 0x02;
/// GRPPWM: group duty cycle.
pub const REG_GRPPWM: u8 = 0x06;
/// GRPFREQ: group blink period, (code + 1) / 24 seconds.
pub const REG_GRPFREQ: u8 = 0x07;
/// LEDOUT: per-channel output state, 2 bits per channel.
pub const REG_LEDOUT: u8 = 0x08;

/// MODE1 low-power sleep bit (oscillator off, set at power-on).
pub const MODE1_SLEEP: u8 = 1 << 4;
/// MODE2 bit selecting blinking instead of group dimming.
pub const MODE2_DMBLNK: u8 = 1 << 5;
/// MODE2 output logic invert bit (for external driver stages).
pub const MODE2_INVRT: u8 = 1 << 4;
/// MODE2 output structure bit, 1 = totem pole, 0 = open drain.
pub const MODE2_OUTDRV: u8 = 1 << 2;

/// Number of LED channels.
pub const CHANNEL_COUNT: u8 = 4;

/// Minimum group blink period, code 0x00.
pub const BLINK_PERIOD_MIN_MS: u32 = 41;
/// Maximum group blink period, code 0xFF (10.67 s).
pub const BLINK_PERIOD_MAX_MS: u32 = 10666;

/// Per-channel output state (LEDOUT field values).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedMode {
    /// Driver off.
    Off,
    /// Driver fully on, PWM bypassed.
    On,
    /// Individual PWMx duty control.
    Pwm,
    /// Individual PWMx plus group PWM/blink overlay.
    PwmGroup,
}

impl LedMode {
    const fn field(self) -> u8 {
        match self {
            LedMode::Off => 0b00,
            LedMode::On => 0b01,
            LedMode::Pwm => 0b10,
            LedMode::PwmGroup => 0b11,
        }
    }
}

/// Encode a blink period in milliseconds to the GRPFREQ code.
///
/// Period is (code + 1) / 24 s; rounds to the nearest code. Caller
/// guarantees the period is within the encodable range.
#[inline]
#[must_use]
pub fn encode_blink_period_ms(ms: u32) -> u8 {
    let code = libm::roundf(ms as f32 * 24.0 / 1000.0) - 1.0;
    if code <= 0.0 {
        0
    } else if code >= 255.0 {
        255
    } else {
        code as u8
    }
}

/// PCA9632 driver with lifecycle type-states and a shadowed LEDOUT image.
pub struct Pca9632<I2C, STATE = Uninit> {
    regio: I2cRegio<I2C>,
    ledout: u8,
    _state: PhantomData<STATE>,
}

impl<I2C, E> Pca9632<I2C, Uninit>
where
    I2C: I2c<Error = E>,
{
    /// Create a new driver at the default device address.
    pub fn new(i2c: I2C, num_of_tries: u8) -> Self {
        Self::with_address(i2c, I2C_ADDRESS, num_of_tries)
    }

    /// Create a new driver at a custom device address.
    pub fn with_address(i2c: I2C, address: u8, num_of_tries: u8) -> Self {
        Self {
            regio: I2cRegio::new(i2c, address, num_of_tries),
            ledout: 0x00,
            _state: PhantomData,
        }
    }

    /// Initialize the driver: wake the oscillator and put every channel
    /// under individual PWM control at zero duty.
    pub fn init(mut self) -> core::result::Result<Pca9632<I2C, Ready>, (Self, Error<E>)> {
        match self.wake() {
            Ok(()) => Ok(Pca9632 {
                regio: self.regio,
                ledout: self.ledout,
                _state: PhantomData,
            }),
            Err(e) => Err((self, e)),
        }
    }

    fn wake(&mut self) -> core::result::Result<(), Error<E>> {
        self.regio.modify_reg(REG_MODE1, MODE1_SLEEP, 0)?;
        for channel in 0..CHANNEL_COUNT {
            self.regio.write_reg(REG_PWM0 + channel, 0x00)?;
        }
        // all channels to individual PWM
        self.ledout = 0b10_10_10_10;
        self.regio.write_reg(REG_LEDOUT, self.ledout)?;
        Ok(())
    }
}

impl<I2C, E, STATE> Pca9632<I2C, STATE>
where
    I2C: I2c<Error = E>,
    STATE: DriverState + StateName,
{
    /// Get the 7-bit device address.
    #[inline]
    pub fn address(&self) -> u8 {
        self.regio.address()
    }

    /// Get the lifecycle state name for display/debugging.
    pub fn state_name(&self) -> &'static str {
        STATE::name()
    }

    /// Consume the driver and return the I2C bus handle.
    pub fn release(self) -> I2C {
        self.regio.release()
    }
}

const fn check_channel(channel: u8) -> core::result::Result<(), DeviceError> {
    if channel >= CHANNEL_COUNT {
        Err(DeviceError::InvalidChannel(channel))
    } else {
        Ok(())
    }
}

impl<I2C, E> Pca9632<I2C, Ready>
where
    I2C: I2c<Error = E>,
{
    /// Set a channel's individual PWM duty, 0 (off) to 255 (full on).
    pub fn set_brightness(&mut self, channel: u8, duty: u8) -> core::result::Result<(), Error<E>> {
        check_channel(channel)?;
        self.regio.write_reg(REG_PWM0 + channel, duty)
    }

    /// Select a channel's output mode in LEDOUT.
    pub fn set_channel_mode(
        &mut self,
        channel: u8,
        mode: LedMode,
    ) -> core::result::Result<(), Error<E>> {
        check_channel(channel)?;
        let shift = channel * 2;
        let ledout = (self.ledout & !(0b11 << shift)) | (mode.field() << shift);
        if ledout != self.ledout {
            self.regio.write_reg(REG_LEDOUT, ledout)?;
            self.ledout = ledout;
        }
        Ok(())
    }

    /// Configure group blinking: period in milliseconds (41-10666) and
    /// on-fraction duty (0-255). Channels in [`LedMode::PwmGroup`] blink.
    pub fn set_blink(&mut self, period_ms: u32, duty: u8) -> core::result::Result<(), Error<E>> {
        if !(BLINK_PERIOD_MIN_MS..=BLINK_PERIOD_MAX_MS).contains(&period_ms) {
            return Err(Error::Device(DeviceError::ValueOutOfRange {
                value: period_ms,
                min: BLINK_PERIOD_MIN_MS,
                max: BLINK_PERIOD_MAX_MS,
            }));
        }
        self.regio.modify_reg(REG_MODE2, MODE2_DMBLNK, MODE2_DMBLNK)?;
        self.regio.write_reg(REG_GRPFREQ, encode_blink_period_ms(period_ms))?;
        self.regio.write_reg(REG_GRPPWM, duty)
    }

    /// Switch the group overlay from blinking to dimming with the given
    /// group duty.
    pub fn set_group_dimming(&mut self, duty: u8) -> core::result::Result<(), Error<E>> {
        self.regio.modify_reg(REG_MODE2, MODE2_DMBLNK, 0)?;
        self.regio.write_reg(REG_GRPPWM, duty)
    }

    /// Invert the output logic, for boards driving external transistors.
    pub fn set_output_invert(&mut self, invert: bool) -> core::result::Result<(), Error<E>> {
        let value = if invert { MODE2_INVRT } else { 0 };
        self.regio.modify_reg(REG_MODE2, MODE2_INVRT, value)
    }

    /// Select the output structure: totem pole or open drain.
    pub fn set_totem_pole(&mut self, totem_pole: bool) -> core::result::Result<(), Error<E>> {
        let value = if totem_pole { MODE2_OUTDRV } else { 0 };
        self.regio.modify_reg(REG_MODE2, MODE2_OUTDRV, value)
    }

    /// Turn every channel hard off without touching the PWM registers.
    pub fn all_off(&mut self) -> core::result::Result<(), Error<E>> {
        if self.ledout != 0x00 {
            self.regio.write_reg(REG_LEDOUT, 0x00)?;
            self.ledout = 0x00;
        }
        Ok(())
    }

    /// Turn all channels hard off and enter low-power sleep, returning to
    /// `Uninit`.
    pub fn deinit(mut self) -> core::result::Result<Pca9632<I2C, Uninit>, (Self, Error<E>)> {
        match self.sleep() {
            Ok(()) => Ok(Pca9632 {
                regio: self.regio,
                ledout: self.ledout,
                _state: PhantomData,
            }),
            Err(e) => Err((self, e)),
        }
    }

    fn sleep(&mut self) -> core::result::Result<(), Error<E>> {
        self.ledout = 0x00;
        self.regio.write_reg(REG_LEDOUT, self.ledout)?;
        self.regio.modify_reg(REG_MODE1, MODE1_SLEEP, MODE1_SLEEP)
    }
}
