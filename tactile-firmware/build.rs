//! Build script for tactile-firmware
//!
//! - Emits the cortex-m-rt and defmt linker scripts
//! - Validates board.toml and generates `board_config.rs` in OUT_DIR

use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tactile_core::config::TouchConfig;

fn main() {
    setup_linker();
    let board = load_board();
    validate_poll(&board.poll);
    generate_board_config(&board);
}

/// Link arguments for cortex-m-rt and defmt
///
/// memory.x is supplied by embassy-stm32's `memory-x` feature.
fn setup_linker() {
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Top level of board.toml
#[derive(Debug, Deserialize)]
struct BoardFile {
    touch: TouchConfig,
    #[serde(default)]
    poll: PollSettings,
}

/// Demo loop parameters
#[derive(Debug, Deserialize)]
#[serde(default)]
struct PollSettings {
    interval_ms: u64,
    dedupe_delta: u32,
    i2c_khz: u32,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval_ms: 50,
            dedupe_delta: 5,
            i2c_khz: 100,
        }
    }
}

/// Parse board.toml, rejecting out-of-range values with a readable banner
fn load_board() -> BoardFile {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a board.toml describing the touch panel.  ║\n\
            ║  Please create one in the tactile-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read board.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Range errors from the core types surface here as serde errors
    let board: BoardFile = match toml::from_str(&content) {
        Ok(board) => board,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid board.toml                                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    if let Err(e) = board.touch.validate() {
        report_errors("Invalid [touch] configuration", &[e.to_string()]);
    }

    board
}

/// Validate the [poll] section
fn validate_poll(poll: &PollSettings) {
    let mut errors = Vec::new();

    if poll.interval_ms == 0 {
        errors.push("[poll] interval_ms must be at least 1".to_string());
    }
    if !(10..=400).contains(&poll.i2c_khz) {
        errors.push(format!("[poll] i2c_khz must be 10-400 (got {})", poll.i2c_khz));
    }

    if !errors.is_empty() {
        report_errors("Invalid [poll] configuration", &errors);
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn report_errors(title: &str, errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Write the validated board as constants for `include!`
fn generate_board_config(board: &BoardFile) {
    let touch = &board.touch;
    let cal = &touch.calibration;
    let sensing = &touch.sensing;
    let mut out = String::new();

    let _ = writeln!(out, "// Generated from board.toml by build.rs");
    let _ = writeln!(out);
    let _ = writeln!(out, "pub const TOUCH_ADDRESS: u8 = {:#04x};", touch.address);
    let _ = writeln!(out, "pub const DISPLAY_WIDTH: u16 = {};", touch.display.width);
    let _ = writeln!(out, "pub const DISPLAY_HEIGHT: u16 = {};", touch.display.height);
    let _ = writeln!(out, "pub const ROTATION_DEGREES: u16 = {};", touch.rotation.degrees());
    let _ = writeln!(out, "pub const FIFO_THRESHOLD: u8 = {};", touch.fifo_threshold);
    let _ = writeln!(out);
    let _ = writeln!(out, "pub const SLOPE_X: f32 = {:?};", cal.slope_x);
    let _ = writeln!(out, "pub const OFFSET_X: f32 = {:?};", cal.offset_x);
    let _ = writeln!(out, "pub const SLOPE_Y: f32 = {:?};", cal.slope_y);
    let _ = writeln!(out, "pub const OFFSET_Y: f32 = {:?};", cal.offset_y);
    let _ = writeln!(out);
    let _ = writeln!(out, "pub const MODE: u8 = {};", sensing.mode.code());
    let _ = writeln!(out, "pub const TRACKING_WINDOW: u8 = {};", sensing.window.code());
    let _ = writeln!(out, "pub const AVERAGING: u8 = {};", sensing.averaging.code());
    let _ = writeln!(out, "pub const TOUCH_DELAY: u8 = {};", sensing.touch_delay.code());
    let _ = writeln!(out, "pub const SETTLE: u8 = {};", sensing.settle.code());
    let _ = writeln!(out);
    let _ = writeln!(out, "pub const POLL_INTERVAL_MS: u64 = {};", board.poll.interval_ms);
    let _ = writeln!(out, "pub const DEDUPE_DELTA: u32 = {};", board.poll.dedupe_delta);
    let _ = writeln!(out, "pub const I2C_KHZ: u32 = {};", board.poll.i2c_khz);

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    fs::write(out_dir.join("board_config.rs"), out).expect("failed to write board_config.rs");

    println!(
        "cargo:warning=board.toml validated: {}x{} at {}°",
        touch.display.width,
        touch.display.height,
        touch.rotation.degrees()
    );
}
