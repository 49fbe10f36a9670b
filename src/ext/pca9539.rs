//! NXP PCA9539 16-bit I2C IO expander driver.
//!
//! Reference: NXP PCA9539 datasheet.
//!
//! The output and configuration registers are shadowed in the driver so a
//! single-pin change costs one register write instead of a read-modify-
//! write over the bus. Input reads always hit the device.

use core::marker::PhantomData;

use embedded_hal::i2c::I2c;

use crate::bus::I2cRegio;
use crate::driver::state::{DriverState, Ready, StateName, Uninit};
use crate::error::{DeviceError, Error};

/// Default 7-bit I2C device address (A1 = A0 = high).
pub const I2C_ADDRESS: u8 = 0x74;

/// Input port registers (port 0 at 0x00, port 1 at 0x01).
pub const REG_INPUT_0: u8 = 0x00;
/// Output port registers (port 0 at 0x02, port 1 at 0x03).
pub const REG_OUTPUT_0: u8 = 0x02;
/// Polarity inversion registers.
pub const REG_POLARITY_0: u8 = 0x04;
/// Configuration registers, 1 = input (power-on default).
pub const REG_CONFIG_0: u8 = 0x06;

/// Number of IO pins.
pub const PIN_COUNT: u8 = 16;

const OUTPUT_POR: u16 = 0xFFFF;
const CONFIG_POR: u16 = 0xFFFF;
const POLARITY_POR: u16 = 0x0000;

/// Direction of a single expander pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// High-impedance input (power-on default).
    Input,
    /// Push-pull output.
    Output,
}

/// PCA9539 driver with lifecycle type-states and shadowed output state.
///
/// Pins are numbered 0-15; 0-7 map to port 0, 8-15 to port 1.
pub struct Pca9539<I2C, STATE = Uninit> {
    regio: I2cRegio<I2C>,
    output: u16,
    config: u16,
    polarity: u16,
    _state: PhantomData<STATE>,
}

impl<I2C, E> Pca9539<I2C, Uninit>
where
    I2C: I2c<Error = E>,
{
    /// Create a new driver at the default device address.
    pub fn new(i2c: I2C, num_of_tries: u8) -> Self {
        Self::with_address(i2c, I2C_ADDRESS, num_of_tries)
    }

    /// Create a new driver at a custom device address (0x74-0x77).
    pub fn with_address(i2c: I2C, address: u8, num_of_tries: u8) -> Self {
        Self {
            regio: I2cRegio::new(i2c, address, num_of_tries),
            output: OUTPUT_POR,
            config: CONFIG_POR,
            polarity: POLARITY_POR,
            _state: PhantomData,
        }
    }

    /// Initialize the expander to its power-on state.
    ///
    /// Writes the shadow defaults (all pins input, outputs high) so the
    /// driver and device agree even after a warm restart, and confirms the
    /// device responds.
    pub fn init(mut self) -> core::result::Result<Pca9539<I2C, Ready>, (Self, Error<E>)> {
        match self.sync() {
            Ok(()) => Ok(Pca9539 {
                regio: self.regio,
                output: self.output,
                config: self.config,
                polarity: self.polarity,
                _state: PhantomData,
            }),
            Err(e) => Err((self, e)),
        }
    }

    fn sync(&mut self) -> core::result::Result<(), Error<E>> {
        self.output = OUTPUT_POR;
        self.config = CONFIG_POR;
        self.polarity = POLARITY_POR;
        self.write_pair(REG_OUTPUT_0, self.output)?;
        self.write_pair(REG_CONFIG_0, self.config)?;
        self.write_pair(REG_POLARITY_0, self.polarity)?;
        Ok(())
    }
}

impl<I2C, E, STATE> Pca9539<I2C, STATE>
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

    fn write_pair(&mut self, base: u8, value: u16) -> core::result::Result<(), Error<E>> {
        // ports are at consecutive addresses, low port first
        self.regio
            .write_regs(base, &[(value & 0xFF) as u8, (value >> 8) as u8])
    }

    fn read_pair(&mut self, base: u8) -> core::result::Result<u16, Error<E>> {
        let mut buf = [0u8; 2];
        self.regio.read_regs(base, &mut buf)?;
        Ok(buf[0] as u16 | (buf[1] as u16) << 8)
    }
}

const fn check_pin(pin: u8) -> core::result::Result<(), DeviceError> {
    if pin >= PIN_COUNT {
        Err(DeviceError::InvalidPin(pin))
    } else {
        Ok(())
    }
}

impl<I2C, E> Pca9539<I2C, Ready>
where
    I2C: I2c<Error = E>,
{
    /// Configure a single pin as input or output.
    pub fn set_pin_mode(&mut self, pin: u8, mode: PinMode) -> core::result::Result<(), Error<E>> {
        check_pin(pin)?;
        let mask = 1u16 << pin;
        let config = match mode {
            PinMode::Input => self.config | mask,
            PinMode::Output => self.config & !mask,
        };
        if config != self.config {
            self.write_pair(REG_CONFIG_0, config)?;
            self.config = config;
        }
        Ok(())
    }

    /// Drive a single output pin. Has no electrical effect until the pin
    /// is configured as an output.
    pub fn write_pin(&mut self, pin: u8, high: bool) -> core::result::Result<(), Error<E>> {
        check_pin(pin)?;
        let mask = 1u16 << pin;
        let output = if high {
            self.output | mask
        } else {
            self.output & !mask
        };
        if output != self.output {
            self.write_pair(REG_OUTPUT_0, output)?;
            self.output = output;
        }
        Ok(())
    }

    /// Read the level of a single pin from the input port registers.
    pub fn read_pin(&mut self, pin: u8) -> core::result::Result<bool, Error<E>> {
        check_pin(pin)?;
        let inputs = self.read_pair(REG_INPUT_0)?;
        Ok(inputs & (1 << pin) != 0)
    }

    /// Read both input ports as one 16-bit word, pin 0 in bit 0.
    pub fn read_inputs(&mut self) -> core::result::Result<u16, Error<E>> {
        self.read_pair(REG_INPUT_0)
    }

    /// Write both output ports as one 16-bit word.
    pub fn write_outputs(&mut self, value: u16) -> core::result::Result<(), Error<E>> {
        if value != self.output {
            self.write_pair(REG_OUTPUT_0, value)?;
            self.output = value;
        }
        Ok(())
    }

    /// Configure both ports' directions as one 16-bit word, 1 = input.
    pub fn set_directions(&mut self, config: u16) -> core::result::Result<(), Error<E>> {
        if config != self.config {
            self.write_pair(REG_CONFIG_0, config)?;
            self.config = config;
        }
        Ok(())
    }

    /// Set both ports' input polarity inversion as one 16-bit word,
    /// 1 = inverted. Affects input reads only.
    pub fn set_polarity(&mut self, polarity: u16) -> core::result::Result<(), Error<E>> {
        if polarity != self.polarity {
            self.write_pair(REG_POLARITY_0, polarity)?;
            self.polarity = polarity;
        }
        Ok(())
    }

    /// The shadowed output word (last value written).
    #[inline]
    pub fn outputs(&self) -> u16 {
        self.output
    }

    /// Return all pins to inputs and go back to `Uninit`.
    pub fn deinit(mut self) -> core::result::Result<Pca9539<I2C, Uninit>, (Self, Error<E>)> {
        match self.write_pair(REG_CONFIG_0, CONFIG_POR) {
            Ok(()) => {
                self.config = CONFIG_POR;
                Ok(Pca9539 {
                    regio: self.regio,
                    output: self.output,
                    config: self.config,
                    polarity: self.polarity,
                    _state: PhantomData,
                })
            }
            Err(e) => Err((self, e)),
        }
    }
}
