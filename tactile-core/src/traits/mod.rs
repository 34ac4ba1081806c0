//! Hardware abstraction traits
//!
//! These traits define the interface between application code and
//! controller-specific drivers.

pub mod touch;

pub use touch::TouchController;
