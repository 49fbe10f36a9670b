//! Driver lifecycle type-state markers.
//!
//! Uses Rust's type system to enforce the construct → init → use → deinit
//! lifecycle at compile time: chip operations only exist on drivers in the
//! `Ready` state, so init-before-use can never be violated at runtime.

/// Driver is constructed but the device has not been initialized.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uninit;

/// Device is initialized and ready for chip operations.
#[derive(Debug, Clone, Copy)]
pub struct Ready;

/// Trait for driver lifecycle states.
pub trait DriverState: private::Sealed {}

impl DriverState for Uninit {}
impl DriverState for Ready {}

mod private {
    pub trait Sealed {}
    impl Sealed for super::Uninit {}
    impl Sealed for super::Ready {}
}

/// State name for display/debugging.
pub trait StateName {
    /// Get the state name as a static string.
    fn name() -> &'static str;
}

impl StateName for Uninit {
    fn name() -> &'static str {
        "Uninit"
    }
}

impl StateName for Ready {
    fn name() -> &'static str {
        "Ready"
    }
}
