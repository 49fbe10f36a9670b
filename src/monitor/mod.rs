//! Software monitoring utilities.
//!
//! Caller-clocked building blocks: all types here take the current time as
//! a `u64` microsecond timestamp instead of owning a time source, so they
//! are deterministic and usable from any polling loop.

mod debounce;
mod hysteresis;
mod rail;
mod timer;

pub use debounce::GlitchFilter;
pub use hysteresis::Hysteresis;
pub use rail::{RailMonitor, RailState};
pub use timer::SwTimer;
