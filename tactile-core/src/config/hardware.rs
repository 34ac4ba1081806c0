//! Controller hardware configuration
//!
//! Everything needed to bring up one touch controller: where it sits on the
//! bus, which display it is mounted on, and how it should sense.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::calibration::{Calibration, DisplayGeometry};
use super::sensing::SensingConfig;
use super::types::{InvalidArgument, Rotation, TrackingWindow};

/// Default 7-bit bus address (ADDR0 pin high)
pub const DEFAULT_ADDRESS: u8 = 0x41;

/// Default FIFO interrupt threshold
pub const DEFAULT_FIFO_THRESHOLD: u8 = 1;

/// Touch controller configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct TouchConfig {
    /// 7-bit bus address
    pub address: u8,
    /// Target display extents
    pub display: DisplayGeometry,
    /// Display orientation
    pub rotation: Rotation,
    /// Raw-to-pixel calibration
    pub calibration: Calibration,
    /// Initial sensing parameters (tracking window lives here)
    pub sensing: SensingConfig,
    /// FIFO interrupt threshold, must be nonzero
    pub fifo_threshold: u8,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            display: DisplayGeometry::default(),
            rotation: Rotation::default(),
            calibration: Calibration::default(),
            sensing: SensingConfig::default(),
            fifo_threshold: DEFAULT_FIFO_THRESHOLD,
        }
    }
}

impl TouchConfig {
    /// Build a configuration from the raw construction parameters
    ///
    /// Rotation is in degrees and the tracking window is its 3-bit code.
    /// Everything else takes its default.
    pub fn new(
        width: u16,
        height: u16,
        rotation_degrees: u16,
        tracking_window: u8,
    ) -> Result<Self, InvalidArgument> {
        let rotation = Rotation::try_from(rotation_degrees)?;
        let window = TrackingWindow::new(tracking_window)?;

        let mut config = Self::default();
        config.display = DisplayGeometry::new(width, height);
        config.rotation = rotation;
        config.sensing.window = window;
        Ok(config)
    }

    /// Use a different bus address
    pub const fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Use a different calibration
    pub const fn with_calibration(mut self, calibration: Calibration) -> Self {
        self.calibration = calibration;
        self
    }

    /// Check fields whose types admit invalid values
    pub fn validate(&self) -> Result<(), InvalidArgument> {
        if self.fifo_threshold == 0 {
            return Err(InvalidArgument::FifoThreshold(0));
        }
        Ok(())
    }
}
