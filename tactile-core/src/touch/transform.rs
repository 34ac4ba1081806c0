//! Raw reading to pixel transform
//!
//! Each 12-bit reading is normalized against full scale, stretched across the
//! matching display extent, then corrected by the calibration:
//!
//! ```text
//! scaled_x = trunc(raw_x / 4095 * width  * slope_x + offset_x)
//! scaled_y = trunc(raw_y / 4095 * height * slope_y + offset_y)
//! ```
//!
//! The rotation picks how the scaled axes land on the display:
//!
//! | rotation | x                 | y                |
//! |----------|-------------------|------------------|
//! | 0°       | width - scaled_x  | height - scaled_y|
//! | 90°      | height - scaled_y | scaled_x         |
//! | 180°     | scaled_x          | scaled_y         |
//! | 270°     | scaled_y          | width - scaled_x |
//!
//! Results are not clamped; see [`DisplayGeometry::clamp`]. Extreme
//! calibrations saturate at the `i32` limits instead of overflowing.

use crate::config::{Calibration, DisplayGeometry, Rotation};

/// Full-scale value of the 12-bit touch ADC
pub const ADC_FULL_SCALE: f32 = 4095.0;

/// Scale one raw axis into pixels, truncating toward zero
fn scale_axis(raw: u16, extent: u16, slope: f32, offset: f32) -> i32 {
    (raw as f32 / ADC_FULL_SCALE * extent as f32 * slope + offset) as i32
}

/// Convert a raw X/Y pair into display pixels
pub fn to_pixels(
    raw_x: u16,
    raw_y: u16,
    display: &DisplayGeometry,
    rotation: Rotation,
    calibration: &Calibration,
) -> (i32, i32) {
    let scaled_x = scale_axis(raw_x, display.width, calibration.slope_x, calibration.offset_x);
    let scaled_y = scale_axis(raw_y, display.height, calibration.slope_y, calibration.offset_y);
    let width = display.width as i32;
    let height = display.height as i32;

    match rotation {
        Rotation::Deg0 => (width.saturating_sub(scaled_x), height.saturating_sub(scaled_y)),
        Rotation::Deg90 => (height.saturating_sub(scaled_y), scaled_x),
        Rotation::Deg180 => (scaled_x, scaled_y),
        Rotation::Deg270 => (scaled_y, width.saturating_sub(scaled_x)),
    }
}

/// Normalize a raw pressure reading to 0.0-1.0
///
/// Only the low byte carries pressure.
pub fn normalize_pressure(raw_z: u16) -> f32 {
    (raw_z & 0x00FF) as f32 / 255.0
}
