//! Touch samples and the math applied to them
//!
//! - [`transform`] - raw ADC readings to display pixels
//! - [`dedupe`] - collapse bursts of near-identical samples

pub mod dedupe;
pub mod transform;

pub use dedupe::{dedupe, Dedupe, DEFAULT_DEDUPE_DELTA};
pub use transform::{normalize_pressure, to_pixels, ADC_FULL_SCALE};

/// Largest number of samples returned by a single drain
///
/// Matches the STMPE811 FIFO depth.
pub const MAX_SAMPLES: usize = 128;

/// Samples from one drain, oldest first
pub type TouchSamples = heapless::Vec<TouchSample, MAX_SAMPLES>;

/// One touch reading in display space
///
/// `x`/`y` are in the rotated display frame and are not clamped, so readings
/// near the panel edge can fall slightly outside the display.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchSample {
    /// Horizontal pixel
    pub x: i32,
    /// Vertical pixel
    pub y: i32,
    /// Contact pressure, 0.0 to 1.0
    pub pressure: f32,
}

impl TouchSample {
    /// Create a sample
    pub const fn new(x: i32, y: i32, pressure: f32) -> Self {
        Self { x, y, pressure }
    }

    /// True if both axes are within `delta` pixels of `other`
    pub fn is_near(&self, other: &TouchSample, delta: u32) -> bool {
        self.x.abs_diff(other.x) <= delta && self.y.abs_diff(other.y) <= delta
    }
}
