//! Unit tests for the BQ25890 charger driver over a mock I2C bus.

use auralix::error::{DeviceError, Error};
use auralix::ext::bq25890::{self, ChargeStatus};
use auralix::{Bq25890, Milliamps, Millivolts};
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

const ADDR: u8 = 0x6A;

/// REG14 with the BQ25890 part number (PN = 0b011).
const DEVICE_ID: u8 = 0b011 << 3;
/// REG03 power-on default (CHG_CONFIG set, SYS_MIN 3.5 V).
const REG03_POR: u8 = 0x1A;

fn init_expectations() -> Vec<I2cTransaction> {
    vec![
        // part number probe
        I2cTransaction::write_read(ADDR, vec![0x14], vec![DEVICE_ID]),
        // watchdog kick (read-modify-write of REG03)
        I2cTransaction::write_read(ADDR, vec![0x03], vec![REG03_POR]),
        I2cTransaction::write(ADDR, vec![0x03, REG03_POR | 0x40]),
    ]
}

#[test]
fn test_init_verifies_part_number() {
    let mut i2c = I2cMock::new(&init_expectations());

    let charger = Bq25890::new(i2c.clone(), 1).init().map_err(|(_, e)| e).unwrap();

    charger.release();
    i2c.done();
}

#[test]
fn test_init_rejects_wrong_part_number() {
    let expectations = [I2cTransaction::write_read(ADDR, vec![0x14], vec![0x00])];
    let mut i2c = I2cMock::new(&expectations);

    let result = Bq25890::new(i2c.clone(), 1).init();
    match result {
        Err((_, Error::Device(DeviceError::UnknownDeviceId { address, found }))) => {
            assert_eq!(address, ADDR);
            assert_eq!(found, 0x00);
        }
        _ => panic!("expected UnknownDeviceId"),
    }

    i2c.done();
}

#[test]
fn test_set_charge_voltage_writes_vreg_field() {
    let mut expectations = init_expectations();
    // 4208 mV -> VREG code 23 in bits 7:2; BATLOWV bit preserved
    expectations.push(I2cTransaction::write_read(ADDR, vec![0x06], vec![0x02]));
    expectations.push(I2cTransaction::write(ADDR, vec![0x06, (23 << 2) | 0x02]));
    let mut i2c = I2cMock::new(&expectations);

    let mut charger = Bq25890::new(i2c.clone(), 1).init().map_err(|(_, e)| e).unwrap();
    charger.set_charge_voltage(Millivolts(4208)).unwrap();

    charger.release();
    i2c.done();
}

#[test]
fn test_set_input_limit_preserves_control_bits() {
    let mut expectations = init_expectations();
    // 500 mA -> IINLIM code 8; EN_ILIM (bit 6) untouched
    expectations.push(I2cTransaction::write_read(ADDR, vec![0x00], vec![0x40]));
    expectations.push(I2cTransaction::write(ADDR, vec![0x00, 0x48]));
    let mut i2c = I2cMock::new(&expectations);

    let mut charger = Bq25890::new(i2c.clone(), 1).init().map_err(|(_, e)| e).unwrap();
    charger.set_input_current_limit(Milliamps(500)).unwrap();

    charger.release();
    i2c.done();
}

#[test]
fn test_out_of_range_setpoints_rejected_without_bus_traffic() {
    let mut i2c = I2cMock::new(&init_expectations());

    let mut charger = Bq25890::new(i2c.clone(), 1).init().map_err(|(_, e)| e).unwrap();

    assert!(matches!(
        charger.set_input_current_limit(Milliamps(50)),
        Err(Error::Device(DeviceError::ValueOutOfRange { min: 100, .. }))
    ));
    assert!(matches!(
        charger.set_charge_voltage(Millivolts(5000)),
        Err(Error::Device(DeviceError::ValueOutOfRange { max: 4608, .. }))
    ));
    assert!(matches!(
        charger.set_charge_current(Milliamps(6000)),
        Err(Error::Device(DeviceError::ValueOutOfRange { max: 5056, .. }))
    ));

    charger.release();
    i2c.done();
}

#[test]
fn test_charge_status_and_power_good() {
    let mut expectations = init_expectations();
    // CHRG_STAT = fast charge, PG_STAT set
    expectations.push(I2cTransaction::write_read(ADDR, vec![0x0B], vec![0b0001_0100]));
    expectations.push(I2cTransaction::write_read(ADDR, vec![0x0B], vec![0b0001_0100]));
    let mut i2c = I2cMock::new(&expectations);

    let mut charger = Bq25890::new(i2c.clone(), 1).init().map_err(|(_, e)| e).unwrap();
    assert_eq!(charger.charge_status().unwrap(), ChargeStatus::FastCharge);
    assert!(charger.is_power_good().unwrap());

    charger.release();
    i2c.done();
}

#[test]
fn test_adc_readback_decodes_battery_voltage() {
    let mut expectations = init_expectations();
    // start conversion: set CONV_START in REG02
    expectations.push(I2cTransaction::write_read(ADDR, vec![0x02], vec![0x00]));
    expectations.push(I2cTransaction::write(ADDR, vec![0x02, 0x80]));
    // conversion done
    expectations.push(I2cTransaction::write_read(ADDR, vec![0x02], vec![0x00]));
    // BATV = 42 -> 2304 + 840 = 3144 mV
    expectations.push(I2cTransaction::write_read(ADDR, vec![0x0E], vec![42]));
    let mut i2c = I2cMock::new(&expectations);

    let mut charger = Bq25890::new(i2c.clone(), 1).init().map_err(|(_, e)| e).unwrap();
    charger.start_adc_conversion().unwrap();
    assert!(!charger.adc_busy().unwrap());
    assert_eq!(charger.battery_mv().unwrap(), Millivolts(3144));

    charger.release();
    i2c.done();
}

#[test]
fn test_fault_register_decode_matches_driver() {
    let mut expectations = init_expectations();
    // watchdog + thermal charge fault
    expectations.push(I2cTransaction::write_read(ADDR, vec![0x0C], vec![0b1010_0000]));
    let mut i2c = I2cMock::new(&expectations);

    let mut charger = Bq25890::new(i2c.clone(), 1).init().map_err(|(_, e)| e).unwrap();
    let faults = charger.faults().unwrap();
    assert!(faults.watchdog);
    assert_eq!(faults.charge, Some(bq25890::ChargeFault::Thermal));
    assert!(faults.has_any());

    charger.release();
    i2c.done();
}
