//! # auralix
//!
//! Configuration-driven drivers for power, audio and IO management ICs
//! with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Configuration-driven**: Describe rails, inputs and charger
//!   setpoints in TOML files
//! - **embedded-hal 1.0**: Drivers sit on `I2c`, `OutputPin`, `InputPin`
//!   and `SetDutyCycle` traits
//! - **no_std compatible**: Core library works without standard library
//! - **Physical units**: Setpoints and readings in millivolts and
//!   milliamps, register encodings kept inside each driver
//! - **Caller-clocked**: Timers, glitch filters and state machines take a
//!   monotonic microsecond timestamp instead of owning a clock
//! - **Type-state safety**: Compile-time driver lifecycle verification
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use auralix::{BoardConfig, Bq25890, RailMonitor};
//!
//! // Load board description from TOML
//! let config: BoardConfig = auralix::load_config("board.toml")?;
//!
//! // Bring up the charger with embedded-hal I2C
//! let mut charger = Bq25890::new(i2c, 3)
//!     .init()
//!     .map_err(|(_, e)| e)?;
//! if let Some(setpoints) = config.charger("main") {
//!     charger.apply_config(setpoints)?;
//! }
//!
//! // Supervise a rail through its divider
//! let mut monitor = RailMonitor::from_config(config.rail("v3v3").unwrap());
//! loop {
//!     let state = monitor.sample(now_us(), adc.read_mv()?);
//!     // ...
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Core modules
pub mod adc;
pub mod bus;
pub mod config;
pub mod driver;
pub mod error;
pub mod ext;
pub mod monitor;

// Re-exports for ergonomic API
pub use adc::AdcChannel;
pub use bus::I2cRegio;
pub use config::{validate_config, BoardConfig, ChargerConfig, InputConfig, RailConfig};
pub use error::{Error, Result};
pub use ext::{Bq25890, Max17048, Pca9430, Pca9539, Pca9632, Tpa3255, Vnh7040};
pub use monitor::{GlitchFilter, Hysteresis, RailMonitor, RailState, SwTimer};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::load_config;

// Unit types
pub use config::units::{Micros, Milliamps, Millivolts, Ohms};
