//! Touch calibration and display geometry
//!
//! A calibration maps a normalized raw position onto display pixels:
//! `pixel = raw / 4095 * extent * slope + offset`, one slope/offset pair
//! per sensor axis. Values belong to the driver instance, so two controllers
//! with different panels never share constants.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default X slope, measured on the STM32F429 Discovery panel
pub const DEFAULT_SLOPE_X: f32 = 1.13;

/// Default Y slope, measured on the STM32F429 Discovery panel
pub const DEFAULT_SLOPE_Y: f32 = 1.145;

/// Default X offset in pixels
pub const DEFAULT_OFFSET_X: f32 = -15.0;

/// Default Y offset in pixels
pub const DEFAULT_OFFSET_Y: f32 = -13.0;

/// Linear per-axis calibration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Calibration {
    /// Slope applied to the scaled X reading
    pub slope_x: f32,
    /// Offset added to the scaled X reading (pixels)
    pub offset_x: f32,
    /// Slope applied to the scaled Y reading
    pub slope_y: f32,
    /// Offset added to the scaled Y reading (pixels)
    pub offset_y: f32,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            slope_x: DEFAULT_SLOPE_X,
            offset_x: DEFAULT_OFFSET_X,
            slope_y: DEFAULT_SLOPE_Y,
            offset_y: DEFAULT_OFFSET_Y,
        }
    }
}

impl Calibration {
    /// Identity calibration (slope 1, offset 0)
    pub const IDENTITY: Self = Self {
        slope_x: 1.0,
        offset_x: 0.0,
        slope_y: 1.0,
        offset_y: 0.0,
    };

    /// Create a calibration from explicit slopes and offsets
    pub const fn new(slope_x: f32, offset_x: f32, slope_y: f32, offset_y: f32) -> Self {
        Self {
            slope_x,
            offset_x,
            slope_y,
            offset_y,
        }
    }
}

/// Pixel extents of the display the panel is mounted on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct DisplayGeometry {
    /// Width in pixels (native portrait orientation)
    pub width: u16,
    /// Height in pixels (native portrait orientation)
    pub height: u16,
}

impl Default for DisplayGeometry {
    /// ILI9341, 240x320
    fn default() -> Self {
        Self {
            width: 240,
            height: 320,
        }
    }
}

impl DisplayGeometry {
    /// Create a geometry from pixel extents
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Clamp a pixel coordinate into `[0, width) x [0, height)`
    ///
    /// `x`/`y` are in the logical (rotated) frame, so for 90° and 270° the
    /// extents are swapped.
    pub fn clamp(&self, x: i32, y: i32, swapped: bool) -> (i32, i32) {
        let (w, h) = if swapped {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        };
        (
            x.clamp(0, (w as i32 - 1).max(0)),
            y.clamp(0, (h as i32 - 1).max(0)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_calibration() {
        let cal = Calibration::default();
        assert_eq!(cal.slope_x, 1.13);
        assert_eq!(cal.slope_y, 1.145);
        assert_eq!(cal.offset_x, -15.0);
        assert_eq!(cal.offset_y, -13.0);
    }

    #[test]
    fn test_clamp_portrait() {
        let geometry = DisplayGeometry::default();
        assert_eq!(geometry.clamp(-4, 400, false), (0, 319));
        assert_eq!(geometry.clamp(120, 160, false), (120, 160));
    }

    #[test]
    fn test_clamp_landscape_swaps_extents() {
        let geometry = DisplayGeometry::default();
        assert_eq!(geometry.clamp(300, 250, true), (300, 239));
        assert_eq!(geometry.clamp(330, -1, true), (319, 0));
    }
}
