//! Tactile - STM32F429 Discovery touch demo
//!
//! Brings up the STMPE811 on I2C3 (PA8 = SCL, PC9 = SDA) and polls it at a
//! fixed rate, logging every deduplicated touch point over RTT. Nothing is
//! drawn on the LCD.

#![no_std]
#![no_main]

mod board;

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::i2c::{self, I2c};
use embassy_stm32::time::Hertz;
use embassy_time::{Duration, Ticker, Timer};
use {defmt_rtt as _, panic_probe as _};

use tactile_core::traits::TouchController;
use tactile_drivers::touch::Stmpe811;

/// Settling time before the first bus access
const POWER_UP_MS: u64 = 10;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Tactile touch demo starting...");

    let p = embassy_stm32::init(Default::default());

    let touch_config = match board::touch_config() {
        Ok(config) => config,
        Err(e) => defmt::panic!("board configuration rejected: {}", e),
    };

    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = Hertz::khz(board::I2C_KHZ);
    i2c_config.timeout = Duration::from_millis(100);

    let bus = I2c::new_blocking(p.I2C3, p.PA8, p.PC9, i2c_config);

    // The controller needs a moment after power-up before it answers
    Timer::after_millis(POWER_UP_MS).await;

    let mut touch = match Stmpe811::new(bus, touch_config) {
        Ok(touch) => touch,
        Err(e) => defmt::panic!("STMPE811 bring-up failed: {}", e),
    };

    match touch.id_version() {
        Ok(rev) => info!("STMPE811 ready, revision {=u8:#x}", rev),
        Err(e) => warn!("could not read revision: {}", e),
    }

    let mut ticker = Ticker::every(Duration::from_millis(board::POLL_INTERVAL_MS));

    loop {
        ticker.next().await;

        match touch.unique_touch_points(board::DEDUPE_DELTA) {
            Ok(points) => {
                for point in points.iter() {
                    info!(
                        "touch x={} y={} pressure={}",
                        point.x, point.y, point.pressure
                    );
                }
            }
            Err(e) => warn!("touch poll failed: {}", e),
        }
    }
}
