//! Charger bring-up example.
//!
//! Demonstrates configuring a BQ25890 from TOML setpoints and reading back
//! status and telemetry, using embedded-hal-mock in place of a real bus.

use auralix::{validate_config, BoardConfig, Bq25890};
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

const BOARD_TOML: &str = r#"
[chargers.main]
input_limit_ma = 1500
charge_current_ma = 2048
charge_voltage_mv = 4208
termination_current_ma = 128
"#;

const ADDR: u8 = 0x6A;

fn main() {
    println!("=== Charger Bring-up Example ===\n");

    let config: BoardConfig = toml::from_str(BOARD_TOML).expect("Failed to parse board TOML");
    validate_config(&config).expect("Board config should validate");
    let setpoints = config.charger("main").expect("Charger should exist");

    // Mock bus scripted with the exact transactions the bring-up performs.
    let expectations = [
        // init: part number probe + watchdog kick
        I2cTransaction::write_read(ADDR, vec![0x14], vec![0b011 << 3]),
        I2cTransaction::write_read(ADDR, vec![0x03], vec![0x1A]),
        I2cTransaction::write(ADDR, vec![0x03, 0x5A]),
        // apply_config: IINLIM, ICHG, VREG, ITERM, charge enable
        I2cTransaction::write_read(ADDR, vec![0x00], vec![0x40]),
        I2cTransaction::write(ADDR, vec![0x00, 0x40 | 28]),
        I2cTransaction::write_read(ADDR, vec![0x04], vec![0x00]),
        I2cTransaction::write(ADDR, vec![0x04, 32]),
        I2cTransaction::write_read(ADDR, vec![0x06], vec![0x02]),
        I2cTransaction::write(ADDR, vec![0x06, (23 << 2) | 0x02]),
        I2cTransaction::write_read(ADDR, vec![0x05], vec![0x10]),
        I2cTransaction::write(ADDR, vec![0x05, 0x11]),
        I2cTransaction::write_read(ADDR, vec![0x03], vec![0x5A]),
        // status: fast charging, power good
        I2cTransaction::write_read(ADDR, vec![0x0B], vec![0b0001_0100]),
        // telemetry: battery 3984 mV, charge current 1850 mA
        I2cTransaction::write_read(ADDR, vec![0x0E], vec![84]),
        I2cTransaction::write_read(ADDR, vec![0x12], vec![37]),
    ];
    let mut i2c = I2cMock::new(&expectations);

    let mut charger = Bq25890::new(i2c.clone(), 3)
        .init()
        .map_err(|(_, e)| e)
        .expect("Charger should initialize");
    println!("Charger found at 0x{:02X}", charger.address());

    charger
        .apply_config(setpoints)
        .expect("Setpoints should apply");
    println!(
        "Configured: {} mA input / {} mA fast charge / {} mV regulation",
        setpoints.input_limit.0, setpoints.charge_current.0, setpoints.charge_voltage.0
    );

    let status = charger.charge_status().expect("Status read");
    println!("Charge status: {:?}", status);

    let vbat = charger.battery_mv().expect("Battery readback");
    let ichg = charger.charge_current_ma().expect("Current readback");
    println!("Battery: {} mV, charging at {} mA", vbat.0, ichg.0);

    charger.release();
    i2c.done();
    println!("\nAll scripted bus transactions consumed.");
}
