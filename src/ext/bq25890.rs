//! TI BQ25890 single-cell battery charger driver.
//!
//! Reference: Texas Instruments BQ25890 datasheet (SLUSC88).
//!
//! The driver verifies the part number on `init`, encodes all setpoints
//! from physical units into register fields (rejecting values outside the
//! encodable range), and decodes status, fault, and one-shot ADC registers.

use core::marker::PhantomData;

use embedded_hal::i2c::I2c;

use crate::bus::I2cRegio;
use crate::config::units::{Milliamps, Millivolts};
use crate::config::ChargerConfig;
use crate::driver::state::{DriverState, Ready, StateName, Uninit};
use crate::error::{DeviceError, Error};

/// Default 7-bit I2C device address (fixed in silicon).
pub const I2C_ADDRESS: u8 = 0x6A;

/// REG00: Input source control (EN_HIZ, EN_ILIM, IINLIM).
pub const REG00_INPUT_SOURCE: u8 = 0x00;
/// REG02: ADC / input-detection control (CONV_START, CONV_RATE, ICO_EN, ...).
pub const REG02_ADC_CONTROL: u8 = 0x02;
/// REG03: Charge configuration (WD_RST, OTG_CONFIG, CHG_CONFIG, SYS_MIN).
pub const REG03_CHARGE_CONFIG: u8 = 0x03;
/// REG04: Fast-charge current control (EN_PUMPX, ICHG).
pub const REG04_CHARGE_CURRENT: u8 = 0x04;
/// REG05: Pre-charge / termination current control (IPRECHG, ITERM).
pub const REG05_PRECHARGE_TERM: u8 = 0x05;
/// REG06: Charge voltage control (VREG, BATLOWV, VRECHG).
pub const REG06_CHARGE_VOLTAGE: u8 = 0x06;
/// REG07: Termination / watchdog / safety-timer control (EN_TERM, WATCHDOG, EN_TIMER).
pub const REG07_TIMER_CONTROL: u8 = 0x07;
/// REG0B: Status register (VBUS_STAT, CHRG_STAT, PG_STAT, VSYS_STAT).
pub const REG0B_STATUS: u8 = 0x0B;
/// REG0C: Fault register (WATCHDOG_FAULT, BOOST_FAULT, CHRG_FAULT, BAT_FAULT, NTC_FAULT).
pub const REG0C_FAULT: u8 = 0x0C;
/// REG0D: VINDPM threshold (FORCE_VINDPM, VINDPM).
pub const REG0D_VINDPM: u8 = 0x0D;
/// REG0E: ADC conversion result - battery voltage (THERM_STAT, BATV).
pub const REG0E_BATTERY_VOLTAGE: u8 = 0x0E;
/// REG0F: ADC conversion result - system voltage (SYSV).
pub const REG0F_SYSTEM_VOLTAGE: u8 = 0x0F;
/// REG11: ADC conversion result - VBUS voltage (VBUS_GD, VBUSV).
pub const REG11_VBUS_VOLTAGE: u8 = 0x11;
/// REG12: ADC conversion result - charge current (ICHGR).
pub const REG12_CHARGE_CURRENT_ADC: u8 = 0x12;
/// REG14: Device revision / part number (REG_RST, ICO_OPTIMIZED, PN, DEV_REV).
pub const REG14_DEVICE_ID: u8 = 0x14;

/// REG00 mask for the IINLIM field.
pub const IINLIM_MASK: u8 = 0x3F;
/// REG02 bit starting a one-shot ADC conversion.
pub const CONV_START: u8 = 1 << 7;
/// REG03 bit resetting the I2C watchdog.
pub const WD_RST: u8 = 1 << 6;
/// REG03 bit enabling battery charging.
pub const CHG_CONFIG: u8 = 1 << 4;
/// REG04 mask for the ICHG field.
pub const ICHG_MASK: u8 = 0x7F;
/// REG05 mask for the ITERM field.
pub const ITERM_MASK: u8 = 0x0F;
/// REG06 mask for the VREG field (pre-shifted, bits 7:2).
pub const VREG_MASK: u8 = 0xFC;
/// REG07 mask for the WATCHDOG field (bits 5:4).
pub const WATCHDOG_MASK: u8 = 0x30;
/// REG0B mask for the VBUS status field (VBUS_STAT[7:5]).
pub const STATUS_VBUS_MASK: u8 = 0b111 << 5;
/// REG0B mask for the charge status field (CHRG_STAT[4:3]).
pub const STATUS_CHRG_MASK: u8 = 0b11 << 3;
/// REG0B mask for the Power Good status bit.
pub const STATUS_PG_MASK: u8 = 1 << 2;
/// REG14 mask for the part-number field (PN[5:3]).
pub const DEVICE_ID_PN_MASK: u8 = 0b111 << 3;
/// Part-number field value for the BQ25890.
pub const DEVICE_ID_PN_BQ25890: u8 = 0b011 << 3;

/// Minimum encodable input current limit (IINLIM offset).
pub const IINLIM_MIN_MA: u32 = 100;
/// Maximum encodable input current limit.
pub const IINLIM_MAX_MA: u32 = 3250;
/// Maximum encodable fast-charge current (79 x 64 mA).
pub const ICHG_MAX_MA: u32 = 5056;
/// Minimum encodable charge regulation voltage (VREG offset).
pub const VREG_MIN_MV: u32 = 3840;
/// Maximum encodable charge regulation voltage.
pub const VREG_MAX_MV: u32 = 4608;
/// Minimum encodable termination current (ITERM offset).
pub const ITERM_MIN_MA: u32 = 64;
/// Maximum encodable termination current.
pub const ITERM_MAX_MA: u32 = 1024;

/// Encode an input current limit to the IINLIM field.
///
/// Formula: code = (mA - 100) / 50, caller guarantees 100-3250 mA.
#[inline]
#[must_use]
pub const fn encode_iinlim_ma(ma: u32) -> u8 {
    ((ma - IINLIM_MIN_MA) / 50) as u8
}

/// Decode the IINLIM field to milliamps.
#[inline]
#[must_use]
pub const fn decode_iinlim_ma(code: u8) -> u32 {
    IINLIM_MIN_MA + (code & IINLIM_MASK) as u32 * 50
}

/// Encode a fast-charge current to the ICHG field (64 mA/LSB).
#[inline]
#[must_use]
pub const fn encode_ichg_ma(ma: u32) -> u8 {
    (ma / 64) as u8
}

/// Decode the ICHG field to milliamps.
#[inline]
#[must_use]
pub const fn decode_ichg_ma(code: u8) -> u32 {
    (code & ICHG_MASK) as u32 * 64
}

/// Encode a charge regulation voltage to the pre-shifted VREG field.
///
/// Formula: code = (mV - 3840) / 16, caller guarantees 3840-4608 mV.
#[inline]
#[must_use]
pub const fn encode_vreg_mv(mv: u32) -> u8 {
    (((mv - VREG_MIN_MV) / 16) as u8) << 2
}

/// Decode the pre-shifted VREG field to millivolts.
#[inline]
#[must_use]
pub const fn decode_vreg_mv(field: u8) -> u32 {
    VREG_MIN_MV + ((field & VREG_MASK) >> 2) as u32 * 16
}

/// Encode a termination current to the ITERM field.
///
/// Formula: code = (mA - 64) / 64, caller guarantees 64-1024 mA.
#[inline]
#[must_use]
pub const fn encode_iterm_ma(ma: u32) -> u8 {
    ((ma - ITERM_MIN_MA) / 64) as u8
}

/// Decode the ITERM field to milliamps.
#[inline]
#[must_use]
pub const fn decode_iterm_ma(code: u8) -> u32 {
    ITERM_MIN_MA + (code & ITERM_MASK) as u32 * 64
}

/// Decode REG0E raw ADC byte to battery voltage in millivolts.
///
/// Formula: V_BAT = 2304 mV + BATV[6:0] x 20 mV. Bit 7 (THERM_STAT) is
/// masked out.
#[inline]
#[must_use]
pub const fn decode_battery_mv(raw: u8) -> u32 {
    2304 + (raw as u32 & 0x7F) * 20
}

/// Decode REG0F raw ADC byte to system voltage in millivolts.
///
/// Formula: V_SYS = 2304 mV + SYSV[6:0] x 20 mV.
#[inline]
#[must_use]
pub const fn decode_system_mv(raw: u8) -> u32 {
    2304 + (raw as u32 & 0x7F) * 20
}

/// Decode REG11 raw ADC byte to VBUS voltage in millivolts.
///
/// Formula: V_BUS = 2600 mV + VBUSV[6:0] x 100 mV. Bit 7 (VBUS_GD) is
/// masked out.
#[inline]
#[must_use]
pub const fn decode_vbus_mv(raw: u8) -> u32 {
    2600 + (raw as u32 & 0x7F) * 100
}

/// Decode REG12 raw ADC byte to charge current in milliamps (50 mA/LSB).
#[inline]
#[must_use]
pub const fn decode_charge_current_ma(raw: u8) -> u32 {
    (raw as u32 & 0x7F) * 50
}

/// Charge cycle status (REG0B CHRG_STAT field).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChargeStatus {
    /// Not charging.
    NotCharging,
    /// Pre-charge (battery below BATLOWV).
    PreCharge,
    /// Fast charging.
    FastCharge,
    /// Charge termination done.
    Done,
}

impl ChargeStatus {
    /// Decode from a raw REG0B value.
    pub fn from_status_reg(reg: u8) -> Self {
        match (reg & STATUS_CHRG_MASK) >> 3 {
            0b00 => ChargeStatus::NotCharging,
            0b01 => ChargeStatus::PreCharge,
            0b10 => ChargeStatus::FastCharge,
            _ => ChargeStatus::Done,
        }
    }
}

/// Charge-path fault kind (REG0C CHRG_FAULT field).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChargeFault {
    /// No charge-path fault.
    Normal,
    /// Input fault (VBUS over-voltage or collapsed).
    Input,
    /// Thermal shutdown.
    Thermal,
    /// Safety timer expired.
    TimerExpired,
}

/// Decoded fault register (REG0C).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChargerFaults {
    /// I2C watchdog expired.
    pub watchdog: bool,
    /// Boost (OTG) fault.
    pub boost: bool,
    /// Charge-path fault.
    pub charge: Option<ChargeFault>,
    /// Battery over-voltage.
    pub battery_ovp: bool,
    /// NTC reports battery too cold.
    pub ntc_cold: bool,
    /// NTC reports battery too hot.
    pub ntc_hot: bool,
}

impl ChargerFaults {
    /// Decode from a raw REG0C value.
    pub fn from_fault_reg(reg: u8) -> Self {
        let charge = match (reg >> 4) & 0b11 {
            0b00 => None,
            0b01 => Some(ChargeFault::Input),
            0b10 => Some(ChargeFault::Thermal),
            _ => Some(ChargeFault::TimerExpired),
        };
        Self {
            watchdog: reg & (1 << 7) != 0,
            boost: reg & (1 << 6) != 0,
            charge,
            battery_ovp: reg & (1 << 3) != 0,
            // NTC_FAULT[2:0]: 101 cold, 110 hot (buck mode)
            ntc_cold: reg & 0b111 == 0b101,
            ntc_hot: reg & 0b111 == 0b110,
        }
    }

    /// Returns true if any fault is active.
    pub fn has_any(&self) -> bool {
        self.watchdog
            || self.boost
            || self.charge.is_some()
            || self.battery_ovp
            || self.has_thermal()
    }

    /// Returns true if an NTC temperature fault is active.
    pub fn has_thermal(&self) -> bool {
        self.ntc_cold || self.ntc_hot
    }
}

/// I2C watchdog timeout setting (REG07 WATCHDOG field).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WatchdogTimeout {
    /// Watchdog disabled.
    Disabled,
    /// 40 second timeout.
    Sec40,
    /// 80 second timeout.
    Sec80,
    /// 160 second timeout.
    Sec160,
}

impl WatchdogTimeout {
    const fn field(self) -> u8 {
        match self {
            WatchdogTimeout::Disabled => 0b00 << 4,
            WatchdogTimeout::Sec40 => 0b01 << 4,
            WatchdogTimeout::Sec80 => 0b10 << 4,
            WatchdogTimeout::Sec160 => 0b11 << 4,
        }
    }
}

/// BQ25890 driver with lifecycle type-states.
///
/// Construct with [`Bq25890::new`], then [`init`](Bq25890::init) to verify
/// the part and reach the `Ready` state where chip operations live.
pub struct Bq25890<I2C, STATE = Uninit> {
    regio: I2cRegio<I2C>,
    _state: PhantomData<STATE>,
}

impl<I2C, E> Bq25890<I2C, Uninit>
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
            _state: PhantomData,
        }
    }

    /// Initialize the charger.
    ///
    /// Verifies the REG14 part-number field and kicks the watchdog.
    /// On failure the driver is handed back with the error so the bus can
    /// be recovered.
    pub fn init(mut self) -> core::result::Result<Bq25890<I2C, Ready>, (Self, Error<E>)> {
        match self.probe() {
            Ok(()) => Ok(Bq25890 {
                regio: self.regio,
                _state: PhantomData,
            }),
            Err(e) => Err((self, e)),
        }
    }

    fn probe(&mut self) -> core::result::Result<(), Error<E>> {
        let id = self.regio.read_reg(REG14_DEVICE_ID)?;
        if id & DEVICE_ID_PN_MASK != DEVICE_ID_PN_BQ25890 {
            return Err(Error::Device(DeviceError::UnknownDeviceId {
                address: self.regio.address(),
                found: id,
            }));
        }
        self.regio.modify_reg(REG03_CHARGE_CONFIG, WD_RST, WD_RST)?;
        Ok(())
    }
}

impl<I2C, E, STATE> Bq25890<I2C, STATE>
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

impl<I2C, E> Bq25890<I2C, Ready>
where
    I2C: I2c<Error = E>,
{
    /// Set the input current limit (IINLIM), 100-3250 mA in 50 mA steps.
    ///
    /// Values between steps round down, so 1475 mA programs 1450 mA.
    pub fn set_input_current_limit(
        &mut self,
        limit: Milliamps,
    ) -> core::result::Result<(), Error<E>> {
        if !(IINLIM_MIN_MA..=IINLIM_MAX_MA).contains(&limit.0) {
            return Err(Error::Device(DeviceError::ValueOutOfRange {
                value: limit.0,
                min: IINLIM_MIN_MA,
                max: IINLIM_MAX_MA,
            }));
        }
        self.regio
            .modify_reg(REG00_INPUT_SOURCE, IINLIM_MASK, encode_iinlim_ma(limit.0))
    }

    /// Read back the programmed input current limit.
    pub fn input_current_limit(&mut self) -> core::result::Result<Milliamps, Error<E>> {
        let reg = self.regio.read_reg(REG00_INPUT_SOURCE)?;
        Ok(Milliamps(decode_iinlim_ma(reg)))
    }

    /// Set the fast-charge current (ICHG), 0-5056 mA in 64 mA steps.
    ///
    /// Values between steps round down, so 1500 mA programs 1472 mA.
    pub fn set_charge_current(
        &mut self,
        current: Milliamps,
    ) -> core::result::Result<(), Error<E>> {
        if current.0 > ICHG_MAX_MA {
            return Err(Error::Device(DeviceError::ValueOutOfRange {
                value: current.0,
                min: 0,
                max: ICHG_MAX_MA,
            }));
        }
        self.regio
            .modify_reg(REG04_CHARGE_CURRENT, ICHG_MASK, encode_ichg_ma(current.0))
    }

    /// Set the charge regulation voltage (VREG), 3840-4608 mV in 16 mV steps.
    ///
    /// Values between steps round down to the next lower step.
    pub fn set_charge_voltage(
        &mut self,
        voltage: Millivolts,
    ) -> core::result::Result<(), Error<E>> {
        if !(VREG_MIN_MV..=VREG_MAX_MV).contains(&voltage.0) {
            return Err(Error::Device(DeviceError::ValueOutOfRange {
                value: voltage.0,
                min: VREG_MIN_MV,
                max: VREG_MAX_MV,
            }));
        }
        self.regio
            .modify_reg(REG06_CHARGE_VOLTAGE, VREG_MASK, encode_vreg_mv(voltage.0))
    }

    /// Set the termination current (ITERM), 64-1024 mA in 64 mA steps.
    ///
    /// Values between steps round down to the next lower step.
    pub fn set_termination_current(
        &mut self,
        current: Milliamps,
    ) -> core::result::Result<(), Error<E>> {
        if !(ITERM_MIN_MA..=ITERM_MAX_MA).contains(&current.0) {
            return Err(Error::Device(DeviceError::ValueOutOfRange {
                value: current.0,
                min: ITERM_MIN_MA,
                max: ITERM_MAX_MA,
            }));
        }
        self.regio
            .modify_reg(REG05_PRECHARGE_TERM, ITERM_MASK, encode_iterm_ma(current.0))
    }

    /// Enable battery charging.
    pub fn enable_charging(&mut self) -> core::result::Result<(), Error<E>> {
        self.regio
            .modify_reg(REG03_CHARGE_CONFIG, CHG_CONFIG, CHG_CONFIG)
    }

    /// Disable battery charging.
    pub fn disable_charging(&mut self) -> core::result::Result<(), Error<E>> {
        self.regio.modify_reg(REG03_CHARGE_CONFIG, CHG_CONFIG, 0)
    }

    /// Reset the I2C watchdog. Call periodically while the watchdog runs.
    pub fn reset_watchdog(&mut self) -> core::result::Result<(), Error<E>> {
        self.regio.modify_reg(REG03_CHARGE_CONFIG, WD_RST, WD_RST)
    }

    /// Configure the I2C watchdog timeout.
    pub fn set_watchdog(
        &mut self,
        timeout: WatchdogTimeout,
    ) -> core::result::Result<(), Error<E>> {
        self.regio
            .modify_reg(REG07_TIMER_CONTROL, WATCHDOG_MASK, timeout.field())
    }

    /// Read the charge cycle status.
    pub fn charge_status(&mut self) -> core::result::Result<ChargeStatus, Error<E>> {
        let reg = self.regio.read_reg(REG0B_STATUS)?;
        Ok(ChargeStatus::from_status_reg(reg))
    }

    /// Check the Power Good status bit.
    pub fn is_power_good(&mut self) -> core::result::Result<bool, Error<E>> {
        let reg = self.regio.read_reg(REG0B_STATUS)?;
        Ok(reg & STATUS_PG_MASK != 0)
    }

    /// Read and decode the fault register.
    ///
    /// REG0C latches faults until read; a second read returns the current
    /// fault state.
    pub fn faults(&mut self) -> core::result::Result<ChargerFaults, Error<E>> {
        let reg = self.regio.read_reg(REG0C_FAULT)?;
        Ok(ChargerFaults::from_fault_reg(reg))
    }

    /// Start a one-shot ADC conversion.
    ///
    /// CONV_START self-clears when the conversion completes (typically
    /// within 1 s); poll [`adc_busy`](Self::adc_busy).
    pub fn start_adc_conversion(&mut self) -> core::result::Result<(), Error<E>> {
        self.regio
            .modify_reg(REG02_ADC_CONTROL, CONV_START, CONV_START)
    }

    /// Check whether a one-shot ADC conversion is still running.
    pub fn adc_busy(&mut self) -> core::result::Result<bool, Error<E>> {
        let reg = self.regio.read_reg(REG02_ADC_CONTROL)?;
        Ok(reg & CONV_START != 0)
    }

    /// Read the last converted battery voltage.
    pub fn battery_mv(&mut self) -> core::result::Result<Millivolts, Error<E>> {
        let raw = self.regio.read_reg(REG0E_BATTERY_VOLTAGE)?;
        Ok(Millivolts(decode_battery_mv(raw)))
    }

    /// Read the last converted system voltage.
    pub fn system_mv(&mut self) -> core::result::Result<Millivolts, Error<E>> {
        let raw = self.regio.read_reg(REG0F_SYSTEM_VOLTAGE)?;
        Ok(Millivolts(decode_system_mv(raw)))
    }

    /// Read the last converted VBUS voltage.
    pub fn vbus_mv(&mut self) -> core::result::Result<Millivolts, Error<E>> {
        let raw = self.regio.read_reg(REG11_VBUS_VOLTAGE)?;
        Ok(Millivolts(decode_vbus_mv(raw)))
    }

    /// Read the last converted charge current.
    pub fn charge_current_ma(&mut self) -> core::result::Result<Milliamps, Error<E>> {
        let raw = self.regio.read_reg(REG12_CHARGE_CURRENT_ADC)?;
        Ok(Milliamps(decode_charge_current_ma(raw)))
    }

    /// Apply a full charger setpoint set and enable charging.
    pub fn apply_config(
        &mut self,
        config: &ChargerConfig,
    ) -> core::result::Result<(), Error<E>> {
        self.set_input_current_limit(config.input_limit)?;
        self.set_charge_current(config.charge_current)?;
        self.set_charge_voltage(config.charge_voltage)?;
        if let Some(iterm) = config.termination_current {
            self.set_termination_current(iterm)?;
        }
        self.enable_charging()
    }

    /// Put the charger in a safe state and return to `Uninit`.
    ///
    /// Disables charging; the chip keeps powering the system from the
    /// input or battery.
    pub fn deinit(mut self) -> core::result::Result<Bq25890<I2C, Uninit>, (Self, Error<E>)> {
        match self.disable_charging() {
            Ok(()) => Ok(Bq25890 {
                regio: self.regio,
                _state: PhantomData,
            }),
            Err(e) => Err((self, e)),
        }
    }
}
