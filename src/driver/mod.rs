//! Driver lifecycle support.

pub mod state;

pub use state::{DriverState, Ready, StateName, Uninit};
