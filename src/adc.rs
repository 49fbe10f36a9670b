//! ADC input seam.
//!
//! `embedded-hal` 1.0 carries no blocking ADC trait, so the crate defines
//! the seam it needs: a single-channel millivolt reading. HAL glue for a
//! concrete target implements this once per channel.

/// A single ADC channel read in millivolts.
pub trait AdcChannel {
    /// Error type of the underlying ADC.
    type Error;

    /// Read the channel voltage in millivolts.
    fn read_mv(&mut self) -> Result<u16, Self::Error>;
}

impl<T: AdcChannel + ?Sized> AdcChannel for &mut T {
    type Error = T::Error;

    fn read_mv(&mut self) -> Result<u16, Self::Error> {
        T::read_mv(self)
    }
}
