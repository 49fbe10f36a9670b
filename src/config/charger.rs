//! Battery-charger setpoint configuration from TOML.

use serde::Deserialize;

use super::units::{Milliamps, Millivolts};

/// Charger setpoints applied to a BQ25890 at bring-up.
///
/// Values are given in physical units and encoded into register fields by
/// the driver; validation rejects values outside each field's encodable
/// range so nothing is silently truncated.
#[derive(Debug, Clone, Deserialize)]
pub struct ChargerConfig {
    /// Input current limit (IINLIM), 100-3250 mA.
    #[serde(rename = "input_limit_ma")]
    pub input_limit: Milliamps,

    /// Fast-charge current (ICHG), 0-5056 mA in 64 mA steps.
    #[serde(rename = "charge_current_ma")]
    pub charge_current: Milliamps,

    /// Charge regulation voltage (VREG), 3840-4608 mV in 16 mV steps.
    #[serde(rename = "charge_voltage_mv")]
    pub charge_voltage: Millivolts,

    /// Optional termination current (ITERM), 64-1024 mA in 64 mA steps.
    #[serde(default, rename = "termination_current_ma")]
    pub termination_current: Option<Milliamps>,
}
