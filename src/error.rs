//! Error types for the auralix driver library.
//!
//! Provides unified error handling across configuration, bus access, and
//! device operations. `Error` is generic over the bus error type so drivers
//! can surface the underlying `embedded-hal` error unchanged.

use core::convert::Infallible;
use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T, E = Infallible> = core::result::Result<T, Error<E>>;

/// Unified error type for all auralix operations.
///
/// `E` is the bus (I2C) error type of the underlying HAL implementation.
/// Drivers that own no bus (pin-driven devices, software monitors) use the
/// default `Infallible` parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Error<E = Infallible> {
    /// Bus transaction failed (after all retries).
    Bus(E),
    /// Device-level error (bad ID, out-of-range setpoint, pin fault).
    Device(DeviceError),
    /// Configuration parsing or validation error.
    Config(ConfigError),
}

/// Device operation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceError {
    /// Device identification register did not match the expected part.
    UnknownDeviceId {
        /// I2C address that was probed.
        address: u8,
        /// Value read from the identification register.
        found: u8,
    },
    /// Channel index outside the device's channel count.
    InvalidChannel(u8),
    /// Pin index outside the device's pin count.
    InvalidPin(u8),
    /// Requested setpoint cannot be encoded in the register field.
    ValueOutOfRange {
        /// Requested value.
        value: u32,
        /// Minimum encodable value.
        min: u32,
        /// Maximum encodable value.
        max: u32,
    },
    /// GPIO pin operation failed.
    PinError,
    /// ADC read failed.
    AdcError,
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Rail name not found in configuration
    RailNotFound(heapless::String<32>),
    /// Input name not found in configuration
    InputNotFound(heapless::String<32>),
    /// Charger name not found in configuration
    ChargerNotFound(heapless::String<32>),
    /// Invalid voltage divider (resistances must be > 0)
    InvalidDivider {
        /// Top resistor in ohms
        r_top: u32,
        /// Bottom resistor in ohms
        r_bottom: u32,
    },
    /// Invalid hysteresis thresholds (on must be > off)
    InvalidThresholds {
        /// Assert threshold in millivolts
        on_mv: u32,
        /// Deassert threshold in millivolts
        off_mv: u32,
    },
    /// Invalid debounce time (must be > 0)
    InvalidStableTime(u64),
    /// Charger input current limit outside the encodable range
    InvalidInputLimit(u32),
    /// Charger fast-charge current outside the encodable range
    InvalidChargeCurrent(u32),
    /// Charger regulation voltage outside the encodable range
    InvalidChargeVoltage(u32),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Bus(e) => write!(f, "Bus error: {:?}", e),
            Error::Device(e) => write!(f, "Device error: {}", e),
            Error::Config(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceError::UnknownDeviceId { address, found } => {
                write!(f, "Unknown device id {:#04x} at address {:#04x}", found, address)
            }
            DeviceError::InvalidChannel(ch) => write!(f, "Invalid channel: {}", ch),
            DeviceError::InvalidPin(pin) => write!(f, "Invalid pin: {}", pin),
            DeviceError::ValueOutOfRange { value, min, max } => {
                write!(f, "Value {} outside encodable range [{}, {}]", value, min, max)
            }
            DeviceError::PinError => write!(f, "GPIO pin operation failed"),
            DeviceError::AdcError => write!(f, "ADC read failed"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::RailNotFound(name) => write!(f, "Rail '{}' not found", name),
            ConfigError::InputNotFound(name) => write!(f, "Input '{}' not found", name),
            ConfigError::ChargerNotFound(name) => write!(f, "Charger '{}' not found", name),
            ConfigError::InvalidDivider { r_top, r_bottom } => {
                write!(f, "Invalid divider: r_top={} r_bottom={}. Both must be > 0", r_top, r_bottom)
            }
            ConfigError::InvalidThresholds { on_mv, off_mv } => {
                write!(f, "Invalid thresholds: on ({} mV) must be > off ({} mV)", on_mv, off_mv)
            }
            ConfigError::InvalidStableTime(us) => {
                write!(f, "Invalid stable time: {} us. Must be > 0", us)
            }
            ConfigError::InvalidInputLimit(ma) => {
                write!(f, "Invalid input current limit: {} mA. Must be 100-3250", ma)
            }
            ConfigError::InvalidChargeCurrent(ma) => {
                write!(f, "Invalid charge current: {} mA. Must be 0-5056", ma)
            }
            ConfigError::InvalidChargeVoltage(mv) => {
                write!(f, "Invalid charge voltage: {} mV. Must be 3840-4608", mv)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

// Conversion impls
impl<E> From<DeviceError> for Error<E> {
    fn from(e: DeviceError) -> Self {
        Error::Device(e)
    }
}

impl<E> From<ConfigError> for Error<E> {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug> std::error::Error for Error<E> {}

#[cfg(feature = "std")]
impl std::error::Error for DeviceError {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
