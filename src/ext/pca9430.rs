//! NXP PCA9430 Qi wireless power receiver driver.
//!
//! Reference: NXP PCA9430 datasheet.
//!
//! The receiver rectifies the coil voltage (VRECT) and regulates it down
//! to the VOUT rail. The driver checks the device ID, reads the 10-bit
//! telemetry ADCs and programs the VOUT setpoint.

use core::marker::PhantomData;

use embedded_hal::i2c::I2c;

use crate::bus::I2cRegio;
use crate::config::units::{Milliamps, Millivolts};
use crate::driver::state::{DriverState, Ready, StateName, Uninit};
use crate::error::{DeviceError, Error};

/// Fixed 7-bit I2C device address.
pub const I2C_ADDRESS: u8 = 0x29;

/// Device ID register.
pub const REG_DEVICE_ID: u8 = 0x00;
/// System status register.
pub const REG_STATUS: u8 = 0x01;
/// VOUT setpoint register.
pub const REG_VOUT_SET: u8 = 0x07;
/// VRECT undervoltage threshold register.
pub const REG_VRECT_THR: u8 = 0x08;
/// VRECT ADC result, MSB first (LSB register follows).
pub const REG_VRECT_ADC_H: u8 = 0x10;
/// VOUT ADC result, MSB first.
pub const REG_VOUT_ADC_H: u8 = 0x12;
/// IOUT ADC result, MSB first.
pub const REG_IOUT_ADC_H: u8 = 0x14;

/// Expected device ID value.
pub const DEVICE_ID: u8 = 0x30;

/// STATUS bit set while the receiver sits on a powered transmitter pad.
pub const STATUS_ON_PAD: u8 = 1 << 0;
/// STATUS bit set while VOUT regulation is active.
pub const STATUS_VOUT_ON: u8 = 1 << 1;

/// Minimum VOUT setpoint.
pub const VOUT_MIN_MV: u32 = 3300;
/// Maximum VOUT setpoint.
pub const VOUT_MAX_MV: u32 = 5500;
/// VOUT setpoint step size.
pub const VOUT_STEP_MV: u32 = 100;

/// Minimum VRECT undervoltage threshold.
pub const VRECT_THR_MIN_MV: u32 = 3500;
/// Maximum VRECT undervoltage threshold.
pub const VRECT_THR_MAX_MV: u32 = 9800;
/// VRECT threshold step size.
pub const VRECT_THR_STEP_MV: u32 = 100;

const ADC_MASK: u16 = 0x03FF;

/// Decode a 10-bit VRECT/VOUT ADC reading to millivolts (10 mV/LSB).
#[inline]
#[must_use]
pub const fn decode_voltage_mv(raw: u16) -> u32 {
    (raw & ADC_MASK) as u32 * 10
}

/// Decode a 10-bit IOUT ADC reading to milliamps (2 mA/LSB).
#[inline]
#[must_use]
pub const fn decode_current_ma(raw: u16) -> u32 {
    (raw & ADC_MASK) as u32 * 2
}

/// Encode a VOUT setpoint to its register code.
///
/// Code 0 is 3300 mV, 100 mV/step; caller guarantees 3300-5500 mV.
#[inline]
#[must_use]
pub const fn encode_vout_mv(mv: u32) -> u8 {
    ((mv - VOUT_MIN_MV) / VOUT_STEP_MV) as u8
}

/// Encode a VRECT undervoltage threshold to its register code.
///
/// Code 0 is 3500 mV, 100 mV/step; caller guarantees 3500-9800 mV.
#[inline]
#[must_use]
pub const fn encode_vrect_thr_mv(mv: u32) -> u8 {
    ((mv - VRECT_THR_MIN_MV) / VRECT_THR_STEP_MV) as u8
}

/// PCA9430 driver with lifecycle type-states.
pub struct Pca9430<I2C, STATE = Uninit> {
    regio: I2cRegio<I2C>,
    _state: PhantomData<STATE>,
}

impl<I2C, E> Pca9430<I2C, Uninit>
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

    /// Initialize the receiver, verifying the device ID.
    pub fn init(mut self) -> core::result::Result<Pca9430<I2C, Ready>, (Self, Error<E>)> {
        match self.probe() {
            Ok(()) => Ok(Pca9430 {
                regio: self.regio,
                _state: PhantomData,
            }),
            Err(e) => Err((self, e)),
        }
    }

    fn probe(&mut self) -> core::result::Result<(), Error<E>> {
        let id = self.regio.read_reg(REG_DEVICE_ID)?;
        if id != DEVICE_ID {
            return Err(Error::Device(DeviceError::UnknownDeviceId {
                address: self.regio.address(),
                found: id,
            }));
        }
        Ok(())
    }
}

impl<I2C, E, STATE> Pca9430<I2C, STATE>
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

impl<I2C, E> Pca9430<I2C, Ready>
where
    I2C: I2c<Error = E>,
{
    /// Read the rectified coil voltage.
    pub fn rect_voltage(&mut self) -> core::result::Result<Millivolts, Error<E>> {
        let raw = self.regio.read_reg_u16_be(REG_VRECT_ADC_H)?;
        Ok(Millivolts(decode_voltage_mv(raw)))
    }

    /// Read the regulated output voltage.
    pub fn output_voltage(&mut self) -> core::result::Result<Millivolts, Error<E>> {
        let raw = self.regio.read_reg_u16_be(REG_VOUT_ADC_H)?;
        Ok(Millivolts(decode_voltage_mv(raw)))
    }

    /// Read the output current.
    pub fn output_current(&mut self) -> core::result::Result<Milliamps, Error<E>> {
        let raw = self.regio.read_reg_u16_be(REG_IOUT_ADC_H)?;
        Ok(Milliamps(decode_current_ma(raw)))
    }

    /// Program the VOUT regulation setpoint, 3300-5500 mV in 100 mV steps.
    ///
    /// Values between steps round down, so 5050 mV programs 5000 mV.
    pub fn set_output_voltage(
        &mut self,
        voltage: Millivolts,
    ) -> core::result::Result<(), Error<E>> {
        if !(VOUT_MIN_MV..=VOUT_MAX_MV).contains(&voltage.0) {
            return Err(Error::Device(DeviceError::ValueOutOfRange {
                value: voltage.0,
                min: VOUT_MIN_MV,
                max: VOUT_MAX_MV,
            }));
        }
        self.regio.write_reg(REG_VOUT_SET, encode_vout_mv(voltage.0))
    }

    /// Program the VRECT undervoltage threshold, 3500-9800 mV in 100 mV
    /// steps, rounding down between steps. Regulation drops out when the
    /// rectified voltage falls below it.
    pub fn set_rect_threshold(
        &mut self,
        voltage: Millivolts,
    ) -> core::result::Result<(), Error<E>> {
        if !(VRECT_THR_MIN_MV..=VRECT_THR_MAX_MV).contains(&voltage.0) {
            return Err(Error::Device(DeviceError::ValueOutOfRange {
                value: voltage.0,
                min: VRECT_THR_MIN_MV,
                max: VRECT_THR_MAX_MV,
            }));
        }
        self.regio
            .write_reg(REG_VRECT_THR, encode_vrect_thr_mv(voltage.0))
    }

    /// Check whether the receiver is coupled to a powered transmitter pad.
    pub fn is_on_pad(&mut self) -> core::result::Result<bool, Error<E>> {
        let status = self.regio.read_reg(REG_STATUS)?;
        Ok(status & STATUS_ON_PAD != 0)
    }

    /// Check whether VOUT regulation is active.
    pub fn is_output_on(&mut self) -> core::result::Result<bool, Error<E>> {
        let status = self.regio.read_reg(REG_STATUS)?;
        Ok(status & STATUS_VOUT_ON != 0)
    }
}
