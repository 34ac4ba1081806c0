//! Touch-screen controller implementations

pub mod stmpe811;

#[cfg(test)]
pub(crate) mod fake_bus;

pub use stmpe811::{Error as Stmpe811Error, Stmpe811};
