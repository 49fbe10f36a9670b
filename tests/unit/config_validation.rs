//! Unit tests for board-configuration validation.

use auralix::error::{ConfigError, Error};
use auralix::{validate_config, BoardConfig};

fn parse(toml_str: &str) -> BoardConfig {
    toml::from_str(toml_str).expect("Failed to parse TOML")
}

/// Test validation of a complete valid configuration.
#[test]
fn test_valid_config_passes_validation() {
    let config = parse(
        r#"
[rails.v3v3]
name = "3.3V rail"
r_top_ohm = 100000
r_bottom_ohm = 100000
on_threshold_mv = 3100
off_threshold_mv = 2900

[inputs.dc_ok]
stable_high_us = 1000
stable_low_us = 1000

[chargers.main]
input_limit_ma = 1500
charge_current_ma = 2048
charge_voltage_mv = 4208
"#,
    );
    assert!(validate_config(&config).is_ok());
}

/// Test a zero divider resistor is rejected.
#[test]
fn test_zero_divider_resistor_rejected() {
    let config = parse(
        r#"
[rails.bad]
name = "bad"
r_top_ohm = 0
r_bottom_ohm = 100000
on_threshold_mv = 3100
off_threshold_mv = 2900
"#,
    );
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidDivider { .. }))
    ));
}

/// Test thresholds must form a window with on above off.
#[test]
fn test_equal_thresholds_rejected() {
    let config = parse(
        r#"
[rails.bad]
name = "bad"
r_top_ohm = 100000
r_bottom_ohm = 100000
on_threshold_mv = 3000
off_threshold_mv = 3000
"#,
    );
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidThresholds {
            on_mv: 3000,
            off_mv: 3000
        }))
    ));
}

/// Test a zero debounce time is rejected.
#[test]
fn test_zero_stable_time_rejected() {
    let config = parse(
        r#"
[inputs.bad]
stable_high_us = 0
stable_low_us = 1000
"#,
    );
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidStableTime(0)))
    ));
}

/// Test charger setpoints outside the register ranges are rejected.
#[test]
fn test_charger_setpoints_bounded_by_register_fields() {
    let too_low_vreg = parse(
        r#"
[chargers.main]
input_limit_ma = 1500
charge_current_ma = 2048
charge_voltage_mv = 3000
"#,
    );
    assert!(matches!(
        validate_config(&too_low_vreg),
        Err(Error::Config(ConfigError::InvalidChargeVoltage(3000)))
    ));

    let too_high_iinlim = parse(
        r#"
[chargers.main]
input_limit_ma = 4000
charge_current_ma = 2048
charge_voltage_mv = 4208
"#,
    );
    assert!(matches!(
        validate_config(&too_high_iinlim),
        Err(Error::Config(ConfigError::InvalidInputLimit(4000)))
    ));
}
