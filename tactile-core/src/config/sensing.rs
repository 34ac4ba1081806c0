//! Touch-sensing parameters
//!
//! [`SensingConfig`] is the full decoded state of the controller's sensing
//! registers. [`SensingUpdate`] is a partial change request: fields left as
//! `None` keep whatever the hardware currently holds.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::types::{
    Averaging, InvalidArgument, OperatingMode, SettleTime, TouchDelay, TrackingWindow,
};

/// Complete sensing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct SensingConfig {
    /// Channels acquired per sample
    pub mode: OperatingMode,
    /// Hardware jitter window
    pub window: TrackingWindow,
    /// Conversions averaged per sample
    pub averaging: Averaging,
    /// Touch detect delay
    pub touch_delay: TouchDelay,
    /// Settling time
    pub settle: SettleTime,
}

/// Partial reconfiguration request
///
/// Holds raw register codes so that range checking happens in one place,
/// before the driver touches the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensingUpdate {
    /// Operating mode code, 0-4
    pub mode: Option<u8>,
    /// Tracking window code, 0-7
    pub window: Option<u8>,
    /// Averaging code, 0-3
    pub averaging: Option<u8>,
    /// Touch delay code, 0-7
    pub touch_delay: Option<u8>,
    /// Settling time code, 0-7
    pub settle: Option<u8>,
}

impl SensingUpdate {
    /// An update that changes nothing
    pub const fn new() -> Self {
        Self {
            mode: None,
            window: None,
            averaging: None,
            touch_delay: None,
            settle: None,
        }
    }

    /// Set the operating mode code
    pub const fn mode(mut self, code: u8) -> Self {
        self.mode = Some(code);
        self
    }

    /// Set the tracking window code
    pub const fn window(mut self, code: u8) -> Self {
        self.window = Some(code);
        self
    }

    /// Set the averaging code
    pub const fn averaging(mut self, code: u8) -> Self {
        self.averaging = Some(code);
        self
    }

    /// Set the touch delay code
    pub const fn touch_delay(mut self, code: u8) -> Self {
        self.touch_delay = Some(code);
        self
    }

    /// Set the settling time code
    pub const fn settle(mut self, code: u8) -> Self {
        self.settle = Some(code);
        self
    }

    /// True if every field keeps its current value
    pub const fn is_empty(&self) -> bool {
        self.mode.is_none()
            && self.window.is_none()
            && self.averaging.is_none()
            && self.touch_delay.is_none()
            && self.settle.is_none()
    }

    /// Range-check every specified field
    ///
    /// Fails on the first out-of-range field, in declaration order.
    pub fn validate(&self) -> Result<SensingOverrides, InvalidArgument> {
        Ok(SensingOverrides {
            mode: self.mode.map(OperatingMode::try_from).transpose()?,
            window: self.window.map(TrackingWindow::new).transpose()?,
            averaging: self.averaging.map(Averaging::try_from).transpose()?,
            touch_delay: self.touch_delay.map(TouchDelay::new).transpose()?,
            settle: self.settle.map(SettleTime::new).transpose()?,
        })
    }
}

/// A validated [`SensingUpdate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensingOverrides {
    /// Operating mode, if changing
    pub mode: Option<OperatingMode>,
    /// Tracking window, if changing
    pub window: Option<TrackingWindow>,
    /// Averaging, if changing
    pub averaging: Option<Averaging>,
    /// Touch delay, if changing
    pub touch_delay: Option<TouchDelay>,
    /// Settling time, if changing
    pub settle: Option<SettleTime>,
}

impl SensingOverrides {
    /// Merge onto the current configuration
    pub fn apply(&self, current: SensingConfig) -> SensingConfig {
        SensingConfig {
            mode: self.mode.unwrap_or(current.mode),
            window: self.window.unwrap_or(current.window),
            averaging: self.averaging.unwrap_or(current.averaging),
            touch_delay: self.touch_delay.unwrap_or(current.touch_delay),
            settle: self.settle.unwrap_or(current.settle),
        }
    }
}
