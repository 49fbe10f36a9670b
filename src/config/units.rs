//! Unit types for physical quantities.
//!
//! Provides type-safe representations of voltages, currents, resistances,
//! and durations to prevent unit confusion at compile time.

use core::ops::{Add, Sub};

use serde::Deserialize;

/// Voltage in millivolts.
///
/// Used for configuration, thresholds, and ADC readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Millivolts(pub u32);

impl Millivolts {
    /// Create a new Millivolts value.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Convert to volts.
    #[inline]
    pub fn to_volts(self) -> f32 {
        self.0 as f32 / 1000.0
    }
}

impl Add for Millivolts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Millivolts {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

/// Current in milliamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Milliamps(pub u32);

impl Milliamps {
    /// Create a new Milliamps value.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl Add for Milliamps {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Milliamps {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

/// Resistance in ohms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Ohms(pub u32);

impl Ohms {
    /// Create a new Ohms value.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }
}

/// Duration in microseconds.
///
/// All software timers and filters in this crate are clocked in
/// microseconds supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Micros(pub u64);

impl Micros {
    /// Create a new Micros value.
    #[inline]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Create from milliseconds.
    #[inline]
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms * 1_000)
    }
}

impl Add for Micros {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Micros {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

/// Extension trait for creating unit types from primitives.
pub trait UnitExt {
    /// Convert to Millivolts.
    fn millivolts(self) -> Millivolts;
    /// Convert to Milliamps.
    fn milliamps(self) -> Milliamps;
    /// Convert to Ohms.
    fn ohms(self) -> Ohms;
}

impl UnitExt for u32 {
    #[inline]
    fn millivolts(self) -> Millivolts {
        Millivolts(self)
    }

    #[inline]
    fn milliamps(self) -> Milliamps {
        Milliamps(self)
    }

    #[inline]
    fn ohms(self) -> Ohms {
        Ohms(self)
    }
}
