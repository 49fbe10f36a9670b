//! Configuration module for auralix.
//!
//! Provides types for loading and validating board descriptions (supervised
//! rails, debounced inputs, charger setpoints) from TOML files (with `std`
//! feature) or pre-parsed data.

mod board;
mod charger;
mod input;
mod rail;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use board::BoardConfig;
pub use charger::ChargerConfig;
pub use input::InputConfig;
pub use rail::RailConfig;
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Micros, Milliamps, Millivolts, Ohms};
