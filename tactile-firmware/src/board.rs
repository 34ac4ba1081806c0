//! Board configuration from board.toml
//!
//! build.rs has already range-checked every value, so the fallible
//! constructors below only fail if the generated file is edited by hand.

use tactile_core::config::{Calibration, InvalidArgument, SensingUpdate, TouchConfig};

mod generated {
    include!(concat!(env!("OUT_DIR"), "/board_config.rs"));
}

pub use generated::{DEDUPE_DELTA, I2C_KHZ, POLL_INTERVAL_MS};

/// Assemble the touch controller configuration
pub fn touch_config() -> Result<TouchConfig, InvalidArgument> {
    use generated::*;

    let mut config = TouchConfig::new(DISPLAY_WIDTH, DISPLAY_HEIGHT, ROTATION_DEGREES, TRACKING_WINDOW)?
        .with_address(TOUCH_ADDRESS)
        .with_calibration(Calibration::new(SLOPE_X, OFFSET_X, SLOPE_Y, OFFSET_Y));

    config.sensing = SensingUpdate::new()
        .mode(MODE)
        .averaging(AVERAGING)
        .touch_delay(TOUCH_DELAY)
        .settle(SETTLE)
        .validate()?
        .apply(config.sensing);
    config.fifo_threshold = FIFO_THRESHOLD;

    config.validate()?;
    Ok(config)
}
