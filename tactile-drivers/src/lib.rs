//! Hardware driver implementations
//!
//! Concrete implementations of the traits defined in tactile-core:
//!
//! - STMPE811 resistive touch-screen controller over I2C

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod touch;
