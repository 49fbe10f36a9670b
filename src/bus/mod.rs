//! Bus access shims shared by the IC drivers.

pub mod i2c;

pub use i2c::I2cRegio;
