//! Configuration types
//!
//! Board-agnostic controller configuration. With the `serde` feature every
//! type deserializes from a board file, and range checks run during parsing.

pub mod calibration;
pub mod hardware;
pub mod sensing;
pub mod types;

pub use calibration::*;
pub use hardware::*;
pub use sensing::*;
pub use types::*;
