//! Discrete configuration fields
//!
//! Each hardware field has a small documented range. Values are validated on
//! construction so a driver never programs an out-of-range code.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parameter outside its documented range
///
/// Carries the rejected value so callers can report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InvalidArgument {
    /// Rotation must be 0, 90, 180, or 270 degrees
    Rotation(u16),
    /// Tracking window must be in [0, 7]
    TrackingWindow(u8),
    /// Register reads are 1 to 4 bytes wide
    ByteCount(usize),
    /// Operating mode must be in [0, 4]
    OperatingMode(u8),
    /// Averaging must be in [0, 3]
    Averaging(u8),
    /// Touch detect delay must be in [0, 7]
    TouchDelay(u8),
    /// Settling time must be in [0, 7]
    SettleTime(u8),
    /// FIFO threshold must be nonzero
    FifoThreshold(u8),
}

impl fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rotation(v) => write!(f, "rotation must be 0, 90, 180, or 270 degrees (got {v})"),
            Self::TrackingWindow(v) => write!(f, "tracking window must be in [0, 7] (got {v})"),
            Self::ByteCount(v) => write!(f, "register read width must be 1-4 bytes (got {v})"),
            Self::OperatingMode(v) => write!(f, "operating mode must be in [0, 4] (got {v})"),
            Self::Averaging(v) => write!(f, "averaging must be in [0, 3] (got {v})"),
            Self::TouchDelay(v) => write!(f, "touch delay must be in [0, 7] (got {v})"),
            Self::SettleTime(v) => write!(f, "settle time must be in [0, 7] (got {v})"),
            Self::FifoThreshold(v) => write!(f, "FIFO threshold must be nonzero (got {v})"),
        }
    }
}

/// Display orientation relative to the sensor's native axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "u16", into = "u16")
)]
pub enum Rotation {
    /// Portrait; both raw axes flipped
    #[default]
    Deg0,
    /// Landscape; axes swapped
    Deg90,
    /// Portrait, upside down; raw orientation
    Deg180,
    /// Landscape, other side; axes swapped
    Deg270,
}

impl Rotation {
    /// All supported rotations, in ascending order
    pub const ALL: [Rotation; 4] = [Self::Deg0, Self::Deg90, Self::Deg180, Self::Deg270];

    /// Rotation in degrees
    pub const fn degrees(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// True when the sensor X axis maps onto the display Y axis
    pub const fn swaps_axes(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }
}

impl TryFrom<u16> for Rotation {
    type Error = InvalidArgument;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Self::Deg0),
            90 => Ok(Self::Deg90),
            180 => Ok(Self::Deg180),
            270 => Ok(Self::Deg270),
            other => Err(InvalidArgument::Rotation(other)),
        }
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

/// Hardware tracking window (TSC_CTRL[6:4])
///
/// A new sample is only queued once the contact moves further than the
/// window from the previous one. 0 disables the filter, 7 is coarsest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub struct TrackingWindow(u8);

impl TrackingWindow {
    /// Window span in raw ADC units, indexed by code
    const SPAN: [u16; 8] = [0, 4, 8, 16, 32, 64, 92, 127];

    /// Create a tracking window from its 3-bit code
    pub const fn new(code: u8) -> Result<Self, InvalidArgument> {
        if code < 8 {
            Ok(Self(code))
        } else {
            Err(InvalidArgument::TrackingWindow(code))
        }
    }

    /// The 3-bit register code
    pub const fn code(self) -> u8 {
        self.0
    }

    /// Window span in raw 12-bit ADC units
    pub const fn span(self) -> u16 {
        Self::SPAN[self.0 as usize]
    }
}

impl Default for TrackingWindow {
    fn default() -> Self {
        Self(6)
    }
}

impl TryFrom<u8> for TrackingWindow {
    type Error = InvalidArgument;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::new(code)
    }
}

impl From<TrackingWindow> for u8 {
    fn from(window: TrackingWindow) -> Self {
        window.code()
    }
}

/// Which channels are acquired per sample (TSC_CTRL[3:1])
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub enum OperatingMode {
    /// X, Y and pressure
    #[default]
    Xyz,
    /// X and Y only
    Xy,
    /// X only
    X,
    /// Y only
    Y,
    /// Pressure only
    Z,
}

impl OperatingMode {
    /// The 3-bit register code
    pub const fn code(self) -> u8 {
        match self {
            Self::Xyz => 0,
            Self::Xy => 1,
            Self::X => 2,
            Self::Y => 3,
            Self::Z => 4,
        }
    }
}

impl TryFrom<u8> for OperatingMode {
    type Error = InvalidArgument;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Xyz),
            1 => Ok(Self::Xy),
            2 => Ok(Self::X),
            3 => Ok(Self::Y),
            4 => Ok(Self::Z),
            other => Err(InvalidArgument::OperatingMode(other)),
        }
    }
}

impl From<OperatingMode> for u8 {
    fn from(mode: OperatingMode) -> Self {
        mode.code()
    }
}

/// Number of ADC conversions averaged per sample (TSC_CFG[7:6])
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub enum Averaging {
    /// Single conversion
    One,
    /// 2 conversions
    Two,
    /// 4 conversions
    Four,
    /// 8 conversions
    #[default]
    Eight,
}

impl Averaging {
    /// The 2-bit register code
    pub const fn code(self) -> u8 {
        match self {
            Self::One => 0,
            Self::Two => 1,
            Self::Four => 2,
            Self::Eight => 3,
        }
    }

    /// Number of samples averaged
    pub const fn samples(self) -> u8 {
        1 << self.code()
    }
}

impl TryFrom<u8> for Averaging {
    type Error = InvalidArgument;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::One),
            1 => Ok(Self::Two),
            2 => Ok(Self::Four),
            3 => Ok(Self::Eight),
            other => Err(InvalidArgument::Averaging(other)),
        }
    }
}

impl From<Averaging> for u8 {
    fn from(averaging: Averaging) -> Self {
        averaging.code()
    }
}

/// Touch detect delay (TSC_CFG[5:3])
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub struct TouchDelay(u8);

impl TouchDelay {
    const MICROS: [u32; 8] = [10, 50, 100, 500, 1_000, 5_000, 10_000, 50_000];

    /// Create a touch delay from its 3-bit code
    pub const fn new(code: u8) -> Result<Self, InvalidArgument> {
        if code < 8 {
            Ok(Self(code))
        } else {
            Err(InvalidArgument::TouchDelay(code))
        }
    }

    /// The 3-bit register code
    pub const fn code(self) -> u8 {
        self.0
    }

    /// Delay in microseconds
    pub const fn micros(self) -> u32 {
        Self::MICROS[self.0 as usize]
    }
}

impl Default for TouchDelay {
    /// 1 ms
    fn default() -> Self {
        Self(4)
    }
}

impl TryFrom<u8> for TouchDelay {
    type Error = InvalidArgument;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::new(code)
    }
}

impl From<TouchDelay> for u8 {
    fn from(delay: TouchDelay) -> Self {
        delay.code()
    }
}

/// Panel settling time before each conversion (TSC_CFG[2:0])
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub struct SettleTime(u8);

impl SettleTime {
    const MICROS: [u32; 8] = [10, 100, 500, 1_000, 5_000, 10_000, 50_000, 100_000];

    /// Create a settling time from its 3-bit code
    pub const fn new(code: u8) -> Result<Self, InvalidArgument> {
        if code < 8 {
            Ok(Self(code))
        } else {
            Err(InvalidArgument::SettleTime(code))
        }
    }

    /// The 3-bit register code
    pub const fn code(self) -> u8 {
        self.0
    }

    /// Settling time in microseconds
    pub const fn micros(self) -> u32 {
        Self::MICROS[self.0 as usize]
    }
}

impl Default for SettleTime {
    /// 5 ms
    fn default() -> Self {
        Self(4)
    }
}

impl TryFrom<u8> for SettleTime {
    type Error = InvalidArgument;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::new(code)
    }
}

impl From<SettleTime> for u8 {
    fn from(settle: SettleTime) -> Self {
        settle.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_from_degrees() {
        for rotation in Rotation::ALL {
            assert_eq!(Rotation::try_from(rotation.degrees()), Ok(rotation));
        }
        assert_eq!(Rotation::try_from(45), Err(InvalidArgument::Rotation(45)));
        assert_eq!(Rotation::try_from(360), Err(InvalidArgument::Rotation(360)));
    }

    #[test]
    fn test_rotation_axis_swap() {
        assert!(!Rotation::Deg0.swaps_axes());
        assert!(Rotation::Deg90.swaps_axes());
        assert!(!Rotation::Deg180.swaps_axes());
        assert!(Rotation::Deg270.swaps_axes());
    }

    #[test]
    fn test_tracking_window_range() {
        for code in 0..8 {
            assert_eq!(TrackingWindow::new(code).map(|w| w.code()), Ok(code));
        }
        assert_eq!(TrackingWindow::new(8), Err(InvalidArgument::TrackingWindow(8)));
        assert_eq!(TrackingWindow::default().span(), 92);
        assert_eq!(TrackingWindow::new(0).map(|w| w.span()), Ok(0));
    }

    #[test]
    fn test_operating_mode_codes() {
        for code in 0..5 {
            let mode = OperatingMode::try_from(code).unwrap();
            assert_eq!(mode.code(), code);
        }
        assert_eq!(OperatingMode::try_from(5), Err(InvalidArgument::OperatingMode(5)));
    }

    #[test]
    fn test_averaging() {
        assert_eq!(Averaging::default().samples(), 8);
        assert_eq!(Averaging::try_from(0).map(|a| a.samples()), Ok(1));
        assert_eq!(Averaging::try_from(4), Err(InvalidArgument::Averaging(4)));
    }

    #[test]
    fn test_timing_defaults() {
        assert_eq!(TouchDelay::default().micros(), 1_000);
        assert_eq!(SettleTime::default().micros(), 5_000);
        assert_eq!(TouchDelay::new(8), Err(InvalidArgument::TouchDelay(8)));
        assert_eq!(SettleTime::new(9), Err(InvalidArgument::SettleTime(9)));
    }
}
