//! Maxim MAX17048 single-cell fuel gauge driver.
//!
//! Reference: Maxim MAX17048/MAX17049 datasheet (19-6498).
//!
//! All device registers are 16-bit, transferred MSB first. The gauge runs
//! the ModelGauge algorithm in silicon; the driver reads voltage and state
//! of charge, manages hibernation, and configures the low-SOC alert.

use core::marker::PhantomData;

use embedded_hal::i2c::I2c;

use crate::bus::I2cRegio;
use crate::config::units::Millivolts;
use crate::driver::state::{DriverState, Ready, StateName, Uninit};
use crate::error::{DeviceError, Error};

/// Fixed 7-bit I2C device address.
pub const I2C_ADDRESS: u8 = 0x36;

/// VCELL: cell voltage, 78.125 uV/LSB.
pub const REG_VCELL: u8 = 0x02;
/// SOC: state of charge, 1/256 %/LSB.
pub const REG_SOC: u8 = 0x04;
/// MODE: quick-start and hibernation status.
pub const REG_MODE: u8 = 0x06;
/// VERSION: silicon version, fixed upper byte.
pub const REG_VERSION: u8 = 0x08;
/// HIBRT: hibernation thresholds.
pub const REG_HIBRT: u8 = 0x0A;
/// CONFIG: RCOMP, sleep, alert flag and low-SOC alert threshold.
pub const REG_CONFIG: u8 = 0x0C;
/// CMD: power-on-reset command register.
pub const REG_CMD: u8 = 0xFE;

/// MODE bit forcing a quick-start (restarts the SOC estimate).
pub const MODE_QUICK_START: u16 = 1 << 14;
/// HIBRT value that disables hibernation entirely.
pub const HIBRT_DISABLE: u16 = 0x0000;
/// CONFIG alert status bit (set by the gauge, cleared by software).
pub const CONFIG_ALRT: u16 = 1 << 5;
/// CONFIG low-SOC alert threshold mask (ATHD[4:0]).
pub const CONFIG_ATHD_MASK: u16 = 0x001F;
/// CONFIG power-on default (RCOMP 0x97, ATHD 4%).
pub const CONFIG_DEFAULT: u16 = 0x971C;
/// CMD value triggering a full power-on reset.
pub const CMD_POR: u16 = 0x5400;
/// Fixed upper byte of the VERSION register.
pub const VERSION_MSB: u8 = 0x00;

/// Decode a raw VCELL reading to millivolts.
///
/// LSB is 78.125 uV; mV = raw * 78125 / 1_000_000. The multiply is done
/// in u64 because it exceeds u32 for readings above ~4295 mV (max raw
/// value gives 5119 mV).
#[inline]
#[must_use]
pub const fn decode_vcell_mv(raw: u16) -> u32 {
    (raw as u64 * 78125 / 1_000_000) as u32
}

/// Decode a raw SOC reading to whole percent (1/256 %/LSB).
#[inline]
#[must_use]
pub const fn decode_soc_percent(raw: u16) -> u8 {
    let pct = raw >> 8;
    if pct > 100 {
        100
    } else {
        pct as u8
    }
}

/// Encode a low-SOC alert threshold (1-32 %) to the ATHD field.
///
/// ATHD encodes 32 - threshold, caller guarantees 1-32.
#[inline]
#[must_use]
pub const fn encode_alert_threshold(percent: u8) -> u16 {
    (32 - percent as u16) & CONFIG_ATHD_MASK
}

/// MAX17048 driver with lifecycle type-states.
pub struct Max17048<I2C, STATE = Uninit> {
    regio: I2cRegio<I2C>,
    _state: PhantomData<STATE>,
}

impl<I2C, E> Max17048<I2C, Uninit>
where
    I2C: I2c<Error = E>,
{
    /// Create a new driver. The device address is fixed in silicon.
    pub fn new(i2c: I2C, num_of_tries: u8) -> Self {
        Self {
            regio: I2cRegio::new(i2c, I2C_ADDRESS, num_of_tries),
            _state: PhantomData,
        }
    }

    /// Initialize the gauge.
    ///
    /// Verifies the fixed VERSION upper byte, then disables hibernation so
    /// readings track load transients.
    pub fn init(mut self) -> core::result::Result<Max17048<I2C, Ready>, (Self, Error<E>)> {
        match self.probe() {
            Ok(()) => Ok(Max17048 {
                regio: self.regio,
                _state: PhantomData,
            }),
            Err(e) => Err((self, e)),
        }
    }

    fn probe(&mut self) -> core::result::Result<(), Error<E>> {
        let version = self.regio.read_reg_u16_be(REG_VERSION)?;
        if (version >> 8) as u8 != VERSION_MSB {
            return Err(Error::Device(DeviceError::UnknownDeviceId {
                address: self.regio.address(),
                found: (version >> 8) as u8,
            }));
        }
        self.regio.write_reg_u16_be(REG_HIBRT, HIBRT_DISABLE)?;
        Ok(())
    }
}

impl<I2C, E, STATE> Max17048<I2C, STATE>
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

impl<I2C, E> Max17048<I2C, Ready>
where
    I2C: I2c<Error = E>,
{
    /// Read the cell voltage.
    pub fn cell_voltage(&mut self) -> core::result::Result<Millivolts, Error<E>> {
        let raw = self.regio.read_reg_u16_be(REG_VCELL)?;
        Ok(Millivolts(decode_vcell_mv(raw)))
    }

    /// Read the state of charge in whole percent, clamped to 100.
    pub fn state_of_charge(&mut self) -> core::result::Result<u8, Error<E>> {
        let raw = self.regio.read_reg_u16_be(REG_SOC)?;
        Ok(decode_soc_percent(raw))
    }

    /// Read the raw state of charge (1/256 %/LSB) for finer resolution.
    pub fn state_of_charge_raw(&mut self) -> core::result::Result<u16, Error<E>> {
        self.regio.read_reg_u16_be(REG_SOC)
    }

    /// Read the silicon version register.
    pub fn version(&mut self) -> core::result::Result<u16, Error<E>> {
        self.regio.read_reg_u16_be(REG_VERSION)
    }

    /// Force a quick-start, restarting the SOC estimate from the cell
    /// voltage. Only use with the battery relaxed; a quick-start under
    /// load skews the estimate.
    pub fn quick_start(&mut self) -> core::result::Result<(), Error<E>> {
        self.regio.write_reg_u16_be(REG_MODE, MODE_QUICK_START)
    }

    /// Set the low-SOC alert threshold, 1-32 %.
    pub fn set_alert_threshold(&mut self, percent: u8) -> core::result::Result<(), Error<E>> {
        if !(1..=32).contains(&percent) {
            return Err(Error::Device(DeviceError::ValueOutOfRange {
                value: percent as u32,
                min: 1,
                max: 32,
            }));
        }
        let config = self.regio.read_reg_u16_be(REG_CONFIG)?;
        let config = (config & !CONFIG_ATHD_MASK) | encode_alert_threshold(percent);
        self.regio.write_reg_u16_be(REG_CONFIG, config)
    }

    /// Check whether the low-SOC alert has fired.
    pub fn alert_active(&mut self) -> core::result::Result<bool, Error<E>> {
        let config = self.regio.read_reg_u16_be(REG_CONFIG)?;
        Ok(config & CONFIG_ALRT != 0)
    }

    /// Clear the low-SOC alert flag so the ALRT pin deasserts.
    pub fn clear_alert(&mut self) -> core::result::Result<(), Error<E>> {
        let config = self.regio.read_reg_u16_be(REG_CONFIG)?;
        if config & CONFIG_ALRT != 0 {
            self.regio.write_reg_u16_be(REG_CONFIG, config & !CONFIG_ALRT)?;
        }
        Ok(())
    }

    /// Issue a full power-on reset and return to `Uninit`.
    ///
    /// The gauge reloads its default model; re-run `init` before reading
    /// again.
    pub fn reset(mut self) -> core::result::Result<Max17048<I2C, Uninit>, (Self, Error<E>)> {
        match self.regio.write_reg_u16_be(REG_CMD, CMD_POR) {
            Ok(()) => Ok(Max17048 {
                regio: self.regio,
                _state: PhantomData,
            }),
            Err(e) => Err((self, e)),
        }
    }
}
