//! Configuration validation.

use crate::error::{ConfigError, Error, Result};
use crate::ext::bq25890;

use super::charger::ChargerConfig;
use super::input::InputConfig;
use super::rail::RailConfig;
use super::BoardConfig;

/// Validate a board configuration.
///
/// Checks:
/// - Rail dividers use positive resistances
/// - Hysteresis thresholds are ordered (on > off)
/// - Input debounce times are nonzero
/// - Charger setpoints fit their register fields
pub fn validate_config(config: &BoardConfig) -> Result<()> {
    for (name, rail) in config.rails.iter() {
        validate_rail(name.as_str(), rail)?;
    }

    for (name, input) in config.inputs.iter() {
        validate_input(name.as_str(), input)?;
    }

    for (name, charger) in config.chargers.iter() {
        validate_charger(name.as_str(), charger)?;
    }

    Ok(())
}

fn validate_rail(_name: &str, rail: &RailConfig) -> Result<()> {
    if rail.r_top.0 == 0 || rail.r_bottom.0 == 0 {
        return Err(Error::Config(ConfigError::InvalidDivider {
            r_top: rail.r_top.0,
            r_bottom: rail.r_bottom.0,
        }));
    }

    if !rail.thresholds_valid() {
        return Err(Error::Config(ConfigError::InvalidThresholds {
            on_mv: rail.on_threshold.0,
            off_mv: rail.off_threshold.0,
        }));
    }

    Ok(())
}

fn validate_input(_name: &str, input: &InputConfig) -> Result<()> {
    if !input.is_valid() {
        let bad = if input.stable_high.0 == 0 {
            input.stable_high.0
        } else {
            input.stable_low.0
        };
        return Err(Error::Config(ConfigError::InvalidStableTime(bad)));
    }

    Ok(())
}

fn validate_charger(_name: &str, charger: &ChargerConfig) -> Result<()> {
    let iinlim = charger.input_limit.0;
    if !(bq25890::IINLIM_MIN_MA..=bq25890::IINLIM_MAX_MA).contains(&iinlim) {
        return Err(Error::Config(ConfigError::InvalidInputLimit(iinlim)));
    }

    let ichg = charger.charge_current.0;
    if ichg > bq25890::ICHG_MAX_MA {
        return Err(Error::Config(ConfigError::InvalidChargeCurrent(ichg)));
    }

    let vreg = charger.charge_voltage.0;
    if !(bq25890::VREG_MIN_MV..=bq25890::VREG_MAX_MV).contains(&vreg) {
        return Err(Error::Config(ConfigError::InvalidChargeVoltage(vreg)));
    }

    if let Some(iterm) = charger.termination_current {
        if !(bq25890::ITERM_MIN_MA..=bq25890::ITERM_MAX_MA).contains(&iterm.0) {
            return Err(Error::Config(ConfigError::InvalidChargeCurrent(iterm.0)));
        }
    }

    Ok(())
}
