//! Unit test harness for auralix.
//!
//! This module organizes unit tests for each component of the library.

mod amp_supervisor;
mod bus_retry;
mod charger;
mod config_validation;
mod expander;
mod filters;
mod fuel_gauge;
mod hbridge;
