//! Board-agnostic core logic for resistive touch controllers
//!
//! This crate contains everything that does not depend on a specific bus
//! or chip:
//!
//! - Configuration types with range validation
//! - Raw-to-pixel calibration and rotation transform
//! - Software deduplication of jittery sample bursts
//! - The [`TouchController`](traits::TouchController) polling trait

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod touch;
pub mod traits;
