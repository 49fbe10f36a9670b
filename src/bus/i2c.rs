//! I2C register access with a fixed retry count.
//!
//! Every IC driver in this crate talks to its chip through [`I2cRegio`]:
//! a thin shim over `embedded_hal::i2c::I2c` that owns the device address
//! and retries each transaction a fixed number of times before giving up.
//! There is no backoff between attempts; transaction timeouts are owned by
//! the HAL bus implementation, not this layer.

use embedded_hal::i2c::I2c;

use crate::error::Error;

/// Addressed register access over an owned I2C bus handle.
///
/// Generic over the bus type; the device address is 7-bit. The caller is
/// responsible for serializing access to a shared bus (e.g. via
/// `embedded-hal-bus`).
pub struct I2cRegio<I2C> {
    i2c: I2C,
    address: u8,
    num_of_tries: u8,
}

impl<I2C, E> I2cRegio<I2C>
where
    I2C: I2c<Error = E>,
{
    /// Create a new register accessor.
    ///
    /// `num_of_tries` is clamped to at least 1.
    pub fn new(i2c: I2C, address: u8, num_of_tries: u8) -> Self {
        Self {
            i2c,
            address,
            num_of_tries: num_of_tries.max(1),
        }
    }

    /// Get the 7-bit device address.
    #[inline]
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Get the configured retry count.
    #[inline]
    pub fn num_of_tries(&self) -> u8 {
        self.num_of_tries
    }

    /// Consume the accessor and return the I2C bus handle.
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn retry<T>(
        &mut self,
        mut op: impl FnMut(&mut I2C, u8) -> core::result::Result<T, E>,
    ) -> core::result::Result<T, Error<E>> {
        let mut attempts = 0;
        loop {
            match op(&mut self.i2c, self.address) {
                Ok(v) => return Ok(v),
                Err(e) => {
                    attempts += 1;
                    if attempts >= self.num_of_tries {
                        return Err(Error::Bus(e));
                    }
                }
            }
        }
    }

    /// Read a single 8-bit register.
    pub fn read_reg(&mut self, reg: u8) -> core::result::Result<u8, Error<E>> {
        let mut buf = [0u8; 1];
        self.retry(|i2c, addr| i2c.write_read(addr, &[reg], &mut buf))?;
        Ok(buf[0])
    }

    /// Write a single 8-bit register.
    pub fn write_reg(&mut self, reg: u8, value: u8) -> core::result::Result<(), Error<E>> {
        self.retry(|i2c, addr| i2c.write(addr, &[reg, value]))
    }

    /// Burst-read consecutive registers starting at `reg`.
    pub fn read_regs(
        &mut self,
        reg: u8,
        buf: &mut [u8],
    ) -> core::result::Result<(), Error<E>> {
        self.retry(|i2c, addr| i2c.write_read(addr, &[reg], buf))
    }

    /// Burst-write consecutive registers starting at `reg` (max 32 data bytes).
    pub fn write_regs(&mut self, reg: u8, data: &[u8]) -> core::result::Result<(), Error<E>> {
        debug_assert!(data.len() <= 32);
        let mut buffer = [0u8; 33]; // 1 register byte + up to 32 data bytes
        buffer[0] = reg;
        let len = data.len().min(32);
        buffer[1..=len].copy_from_slice(&data[..len]);
        self.retry(|i2c, addr| i2c.write(addr, &buffer[..=len]))
    }

    /// Read a 16-bit big-endian register pair.
    pub fn read_reg_u16_be(&mut self, reg: u8) -> core::result::Result<u16, Error<E>> {
        let mut buf = [0u8; 2];
        self.read_regs(reg, &mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    /// Write a 16-bit big-endian register pair.
    pub fn write_reg_u16_be(&mut self, reg: u8, value: u16) -> core::result::Result<(), Error<E>> {
        let bytes = value.to_be_bytes();
        self.write_regs(reg, &bytes)
    }

    /// Read-modify-write the masked bits of an 8-bit register.
    ///
    /// Bits set in `mask` are replaced with the corresponding bits of
    /// `value`; all other bits are preserved.
    pub fn modify_reg(
        &mut self,
        reg: u8,
        mask: u8,
        value: u8,
    ) -> core::result::Result<(), Error<E>> {
        let current = self.read_reg(reg)?;
        let updated = (current & !mask) | (value & mask);
        if updated != current {
            self.write_reg(reg, updated)?;
        }
        Ok(())
    }
}
