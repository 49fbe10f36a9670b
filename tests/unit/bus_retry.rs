//! Unit tests for the I2C register shim and its retry behavior.

use auralix::error::Error;
use auralix::I2cRegio;
use embedded_hal::i2c::ErrorKind;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

const ADDR: u8 = 0x50;

/// A transient bus error is retried and the read still succeeds.
#[test]
fn test_read_succeeds_after_transient_errors() {
    let expectations = [
        I2cTransaction::write_read(ADDR, vec![0x10], vec![0x00]).with_error(ErrorKind::Other),
        I2cTransaction::write_read(ADDR, vec![0x10], vec![0x00]).with_error(ErrorKind::Other),
        I2cTransaction::write_read(ADDR, vec![0x10], vec![0xAB]),
    ];
    let mut regio = I2cRegio::new(I2cMock::new(&expectations), ADDR, 3);

    assert_eq!(regio.read_reg(0x10).unwrap(), 0xAB);

    regio.release().done();
}

/// Once the retry budget is spent the last bus error is returned.
#[test]
fn test_retries_exhausted_returns_bus_error() {
    let expectations = [
        I2cTransaction::write(ADDR, vec![0x10, 0x01]).with_error(ErrorKind::Other),
        I2cTransaction::write(ADDR, vec![0x10, 0x01]).with_error(ErrorKind::Other),
    ];
    let mut regio = I2cRegio::new(I2cMock::new(&expectations), ADDR, 2);

    assert!(matches!(regio.write_reg(0x10, 0x01), Err(Error::Bus(_))));

    regio.release().done();
}

/// A retry count of zero is clamped so one attempt always runs.
#[test]
fn test_zero_tries_clamped_to_one() {
    let expectations = [I2cTransaction::write_read(ADDR, vec![0x10], vec![0x42])];
    let mut regio = I2cRegio::new(I2cMock::new(&expectations), ADDR, 0);

    assert_eq!(regio.num_of_tries(), 1);
    assert_eq!(regio.read_reg(0x10).unwrap(), 0x42);

    regio.release().done();
}

/// modify_reg skips the write when the masked update changes nothing.
#[test]
fn test_modify_reg_skips_redundant_write() {
    let expectations = [I2cTransaction::write_read(ADDR, vec![0x03], vec![0xFF])];
    let mut regio = I2cRegio::new(I2cMock::new(&expectations), ADDR, 1);

    regio.modify_reg(0x03, 0x0F, 0x0F).unwrap();

    regio.release().done();
}

/// modify_reg preserves bits outside the mask.
#[test]
fn test_modify_reg_preserves_unmasked_bits() {
    let expectations = [
        I2cTransaction::write_read(ADDR, vec![0x03], vec![0b1010_0000]),
        I2cTransaction::write(ADDR, vec![0x03, 0b1010_0101]),
    ];
    let mut regio = I2cRegio::new(I2cMock::new(&expectations), ADDR, 1);

    regio.modify_reg(0x03, 0x0F, 0b0000_0101).unwrap();

    regio.release().done();
}

/// 16-bit register pairs go over the wire MSB first.
#[test]
fn test_u16_registers_are_big_endian() {
    let expectations = [
        I2cTransaction::write(ADDR, vec![0x0A, 0x12, 0x34]),
        I2cTransaction::write_read(ADDR, vec![0x0A], vec![0x12, 0x34]),
    ];
    let mut regio = I2cRegio::new(I2cMock::new(&expectations), ADDR, 1);

    regio.write_reg_u16_be(0x0A, 0x1234).unwrap();
    assert_eq!(regio.read_reg_u16_be(0x0A).unwrap(), 0x1234);

    regio.release().done();
}
