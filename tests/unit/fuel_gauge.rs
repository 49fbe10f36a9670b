//! Unit tests for the MAX17048 fuel-gauge driver over a mock I2C bus.

use auralix::{Max17048, Millivolts};
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

const ADDR: u8 = 0x36;

fn init_expectations() -> Vec<I2cTransaction> {
    vec![
        // VERSION probe, fixed 0x00 upper byte
        I2cTransaction::write_read(ADDR, vec![0x08], vec![0x00, 0x12]),
        // hibernation disabled
        I2cTransaction::write(ADDR, vec![0x0A, 0x00, 0x00]),
    ]
}

#[test]
fn test_init_disables_hibernation() {
    let mut i2c = I2cMock::new(&init_expectations());

    let gauge = Max17048::new(i2c.clone(), 1).init().map_err(|(_, e)| e).unwrap();

    gauge.release();
    i2c.done();
}

#[test]
fn test_cell_voltage_decode() {
    let mut expectations = init_expectations();
    // 51200 LSB x 78.125 uV = 4.000 V
    expectations.push(I2cTransaction::write_read(ADDR, vec![0x02], vec![0xC8, 0x00]));
    // 55040 LSB = 4.300 V, a near-full cell
    expectations.push(I2cTransaction::write_read(ADDR, vec![0x02], vec![0xD7, 0x00]));
    let mut i2c = I2cMock::new(&expectations);

    let mut gauge = Max17048::new(i2c.clone(), 1).init().map_err(|(_, e)| e).unwrap();
    assert_eq!(gauge.cell_voltage().unwrap(), Millivolts(4000));
    assert_eq!(gauge.cell_voltage().unwrap(), Millivolts(4300));

    gauge.release();
    i2c.done();
}

#[test]
fn test_soc_decode_and_clamp() {
    let mut expectations = init_expectations();
    expectations.push(I2cTransaction::write_read(ADDR, vec![0x04], vec![0x32, 0x80]));
    // just after a charge cycle the gauge can report above 100%
    expectations.push(I2cTransaction::write_read(ADDR, vec![0x04], vec![0x68, 0x00]));
    let mut i2c = I2cMock::new(&expectations);

    let mut gauge = Max17048::new(i2c.clone(), 1).init().map_err(|(_, e)| e).unwrap();
    assert_eq!(gauge.state_of_charge().unwrap(), 50);
    assert_eq!(gauge.state_of_charge().unwrap(), 100);

    gauge.release();
    i2c.done();
}

#[test]
fn test_alert_threshold_written_into_config() {
    let mut expectations = init_expectations();
    // CONFIG default RCOMP 0x97, ATHD 4% (0x1C); 10% alert -> ATHD 22 (0x16)
    expectations.push(I2cTransaction::write_read(ADDR, vec![0x0C], vec![0x97, 0x1C]));
    expectations.push(I2cTransaction::write(ADDR, vec![0x0C, 0x97, 0x16]));
    let mut i2c = I2cMock::new(&expectations);

    let mut gauge = Max17048::new(i2c.clone(), 1).init().map_err(|(_, e)| e).unwrap();
    gauge.set_alert_threshold(10).unwrap();

    gauge.release();
    i2c.done();
}

#[test]
fn test_clear_alert_only_writes_when_set() {
    let mut expectations = init_expectations();
    // alert bit clear: read only, no write
    expectations.push(I2cTransaction::write_read(ADDR, vec![0x0C], vec![0x97, 0x1C]));
    // alert bit set: read then clearing write
    expectations.push(I2cTransaction::write_read(ADDR, vec![0x0C], vec![0x97, 0x3C]));
    expectations.push(I2cTransaction::write(ADDR, vec![0x0C, 0x97, 0x1C]));
    let mut i2c = I2cMock::new(&expectations);

    let mut gauge = Max17048::new(i2c.clone(), 1).init().map_err(|(_, e)| e).unwrap();
    gauge.clear_alert().unwrap();
    gauge.clear_alert().unwrap();

    gauge.release();
    i2c.done();
}
