//! Unit tests for the PCA9539 IO-expander driver over a mock I2C bus.

use auralix::error::{DeviceError, Error};
use auralix::ext::pca9539::PinMode;
use auralix::Pca9539;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

const ADDR: u8 = 0x74;

fn init_expectations() -> Vec<I2cTransaction> {
    vec![
        // outputs high, all pins input, polarity normal
        I2cTransaction::write(ADDR, vec![0x02, 0xFF, 0xFF]),
        I2cTransaction::write(ADDR, vec![0x06, 0xFF, 0xFF]),
        I2cTransaction::write(ADDR, vec![0x04, 0x00, 0x00]),
    ]
}

#[test]
fn test_init_restores_power_on_state() {
    let mut i2c = I2cMock::new(&init_expectations());

    let expander = Pca9539::new(i2c.clone(), 1).init().map_err(|(_, e)| e).unwrap();
    assert_eq!(expander.outputs(), 0xFFFF);

    expander.release();
    i2c.done();
}

#[test]
fn test_pin_writes_go_through_shadow() {
    let mut expectations = init_expectations();
    // pin 3 to output: config 0xFFF7
    expectations.push(I2cTransaction::write(ADDR, vec![0x06, 0xF7, 0xFF]));
    // pin 3 low: output 0xFFF7
    expectations.push(I2cTransaction::write(ADDR, vec![0x02, 0xF7, 0xFF]));
    // pin 3 low again: shadow unchanged, no bus traffic
    let mut i2c = I2cMock::new(&expectations);

    let mut expander = Pca9539::new(i2c.clone(), 1).init().map_err(|(_, e)| e).unwrap();
    expander.set_pin_mode(3, PinMode::Output).unwrap();
    expander.write_pin(3, false).unwrap();
    expander.write_pin(3, false).unwrap();
    assert_eq!(expander.outputs(), 0xFFF7);

    expander.release();
    i2c.done();
}

#[test]
fn test_port1_pin_maps_to_high_byte() {
    let mut expectations = init_expectations();
    // pin 10 to output: config bit 10 cleared -> high byte 0xFB
    expectations.push(I2cTransaction::write(ADDR, vec![0x06, 0xFF, 0xFB]));
    let mut i2c = I2cMock::new(&expectations);

    let mut expander = Pca9539::new(i2c.clone(), 1).init().map_err(|(_, e)| e).unwrap();
    expander.set_pin_mode(10, PinMode::Output).unwrap();

    expander.release();
    i2c.done();
}

#[test]
fn test_read_inputs_hits_the_device() {
    let mut expectations = init_expectations();
    expectations.push(I2cTransaction::write_read(ADDR, vec![0x00], vec![0x08, 0x01]));
    expectations.push(I2cTransaction::write_read(ADDR, vec![0x00], vec![0x08, 0x01]));
    let mut i2c = I2cMock::new(&expectations);

    let mut expander = Pca9539::new(i2c.clone(), 1).init().map_err(|(_, e)| e).unwrap();
    assert_eq!(expander.read_inputs().unwrap(), 0x0108);
    assert!(expander.read_pin(8).unwrap());

    expander.release();
    i2c.done();
}

#[test]
fn test_polarity_writes_go_through_shadow() {
    let mut expectations = init_expectations();
    // invert pin 0 and pin 9: low byte 0x01, high byte 0x02
    expectations.push(I2cTransaction::write(ADDR, vec![0x04, 0x01, 0x02]));
    // same word again: shadow unchanged, no bus traffic
    // back to normal polarity
    expectations.push(I2cTransaction::write(ADDR, vec![0x04, 0x00, 0x00]));
    let mut i2c = I2cMock::new(&expectations);

    let mut expander = Pca9539::new(i2c.clone(), 1).init().map_err(|(_, e)| e).unwrap();
    expander.set_polarity(0x0201).unwrap();
    expander.set_polarity(0x0201).unwrap();
    expander.set_polarity(0x0000).unwrap();

    expander.release();
    i2c.done();
}

#[test]
fn test_invalid_pin_rejected() {
    let mut i2c = I2cMock::new(&init_expectations());

    let mut expander = Pca9539::new(i2c.clone(), 1).init().map_err(|(_, e)| e).unwrap();
    assert!(matches!(
        expander.write_pin(16, true),
        Err(Error::Device(DeviceError::InvalidPin(16)))
    ));

    expander.release();
    i2c.done();
}
