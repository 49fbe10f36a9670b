//! Per-IC device drivers.
//!
//! Each driver owns its bus or pin resources, uses the [`Uninit`/`Ready`]
//! lifecycle type-states from [`crate::driver`], and exposes setpoints and
//! readings in physical units. Register maps and conversion formulas live
//! next to the driver that uses them.
//!
//! [`Uninit`/`Ready`]: crate::driver::state

pub mod bq25890;
pub mod max17048;
pub mod pca9430;
pub mod pca9539;
pub mod pca9632;
pub mod tpa3255;
pub mod vnh7040;

pub use bq25890::Bq25890;
pub use max17048::Max17048;
pub use pca9430::Pca9430;
pub use pca9539::Pca9539;
pub use pca9632::Pca9632;
pub use tpa3255::Tpa3255;
pub use vnh7040::Vnh7040;
