//! STMPE811 resistive touch-screen controller (I2C mode)
//!
//! The STMPE811 digitizes a 4-wire resistive panel into 12-bit X/Y readings
//! plus a pressure reading, and buffers them in a 128-entry FIFO. This driver
//! polls that FIFO; the interrupt pin is not used.
//!
//! # Register protocol
//!
//! - Read: write the 1-byte register address, then read 1-4 bytes in a
//!   separate transaction. Multi-byte values are big-endian.
//! - Write: a single 2-byte transaction `[register, value]`.
//!
//! No retries and no read-back verification happen here. Bus errors are
//! returned unchanged, and a failure partway through a multi-register
//! sequence leaves the chip in whatever state the completed writes produced.
//!
//! # Bring-up sequence
//!
//! 1. Verify the chip identity (`0x0811`)
//! 2. Soft reset
//! 3. Clock the touch controller, ADC, and temperature sensor (GPIO gated)
//! 4. Set the FIFO threshold (never 0)
//! 5. Program TSC_CFG (averaging, touch delay, settling)
//! 6. Program TSC_CTRL (tracking window, operating mode) and enable sensing

use core::fmt;

use embedded_hal::i2c::I2c;
use tactile_core::config::{
    Averaging, Calibration, DisplayGeometry, InvalidArgument, OperatingMode, Rotation,
    SensingConfig, SensingUpdate, SettleTime, TouchConfig, TouchDelay, TrackingWindow,
};
use tactile_core::touch::{normalize_pressure, to_pixels, TouchSample, TouchSamples};
use tactile_core::traits::TouchController;

/// STMPE811 register addresses
pub mod reg {
    /// Chip identity, 16 bit, reads 0x0811
    pub const CHIP_ID: u8 = 0x00;
    /// Silicon revision (0x03; 0x01 on engineering samples)
    pub const ID_VER: u8 = 0x02;
    /// Soft reset and hibernate
    pub const SYS_CTRL1: u8 = 0x03;
    /// Per-block clock gates, active low
    pub const SYS_CTRL2: u8 = 0x04;
    /// SPI interface configuration (unused in I2C mode)
    pub const SPI_CFG: u8 = 0x08;
    /// Interrupt pin polarity/type and global enable
    pub const INT_CTRL: u8 = 0x09;
    /// Interrupt enable mask
    pub const INT_EN: u8 = 0x0A;
    /// Interrupt status
    pub const INT_STA: u8 = 0x0B;
    /// GPIO interrupt enable mask
    pub const GPIO_INT_EN: u8 = 0x0C;
    /// GPIO interrupt status
    pub const GPIO_INT_STA: u8 = 0x0D;
    /// ADC interrupt enable mask
    pub const ADC_INT_EN: u8 = 0x0E;
    /// ADC interrupt status
    pub const ADC_INT_STA: u8 = 0x0F;
    /// Touch-screen controller control
    pub const TSC_CTRL: u8 = 0x40;
    /// Touch-screen controller configuration
    pub const TSC_CFG: u8 = 0x41;
    /// Tracking window top-right X, 12 bit
    pub const WDW_TR_X: u8 = 0x42;
    /// Tracking window top-right Y, 12 bit
    pub const WDW_TR_Y: u8 = 0x44;
    /// Tracking window bottom-left X, 12 bit
    pub const WDW_BL_X: u8 = 0x46;
    /// Tracking window bottom-left Y, 12 bit
    pub const WDW_BL_Y: u8 = 0x48;
    /// FIFO interrupt threshold, must not be 0
    pub const FIFO_TH: u8 = 0x4A;
    /// FIFO status and reset
    pub const FIFO_STA: u8 = 0x4B;
    /// Number of samples in the FIFO
    pub const FIFO_SIZE: u8 = 0x4C;
    /// Sample X, 12 bit
    pub const TSC_DATA_X: u8 = 0x4D;
    /// Sample Y, 12 bit
    pub const TSC_DATA_Y: u8 = 0x4F;
    /// Sample pressure, read 2 bytes
    pub const TSC_DATA_Z: u8 = 0x51;
    /// Pressure fixed-point format
    pub const TSC_FRACTION_Z: u8 = 0x56;
    /// Packed X/Y/Z, 4 byte read
    pub const TSC_DATA_XYZ: u8 = 0x57;
    /// Panel drive current
    pub const TSC_I_DRIVE: u8 = 0x58;
    /// Ground shield
    pub const TSC_SHIELD: u8 = 0x59;
}

/// Register bit fields
pub mod bits {
    /// SYS_CTRL1: hibernate
    pub const HIBERNATE: u8 = 1 << 0;
    /// SYS_CTRL1: soft reset
    pub const SOFT_RESET: u8 = 1 << 1;

    /// SYS_CTRL2: gate the ADC clock
    pub const ADC_OFF: u8 = 1 << 0;
    /// SYS_CTRL2: gate the touch controller clock
    pub const TSC_OFF: u8 = 1 << 1;
    /// SYS_CTRL2: gate the GPIO clock
    pub const GPIO_OFF: u8 = 1 << 2;
    /// SYS_CTRL2: gate the temperature sensor clock
    pub const TS_OFF: u8 = 1 << 3;
    /// SYS_CTRL2 value used at bring-up: everything but GPIO clocked
    pub const CLOCKS_TOUCH: u8 = GPIO_OFF;

    /// TSC_CTRL: enable sensing
    pub const TSC_EN: u8 = 1 << 0;
    /// TSC_CTRL: operating mode shift
    pub const OP_MOD_SHIFT: u8 = 1;
    /// TSC_CTRL: operating mode mask
    pub const OP_MOD_MASK: u8 = 0b0000_1110;
    /// TSC_CTRL: tracking window shift
    pub const TRACK_SHIFT: u8 = 4;
    /// TSC_CTRL: tracking window mask
    pub const TRACK_MASK: u8 = 0b0111_0000;
    /// TSC_CTRL: touch detected (read only)
    pub const TSC_STA: u8 = 1 << 7;

    /// TSC_CFG: averaging shift
    pub const AVE_SHIFT: u8 = 6;
    /// TSC_CFG: averaging mask
    pub const AVE_MASK: u8 = 0b1100_0000;
    /// TSC_CFG: touch detect delay shift
    pub const DELAY_SHIFT: u8 = 3;
    /// TSC_CFG: touch detect delay mask
    pub const DELAY_MASK: u8 = 0b0011_1000;
    /// TSC_CFG: settling time mask
    pub const SETTLE_MASK: u8 = 0b0000_0111;

    /// FIFO_STA: reset (write 1, then 0 to resume)
    pub const FIFO_RESET: u8 = 1 << 0;
    /// FIFO_STA: threshold reached
    pub const FIFO_TH_TRIG: u8 = 1 << 4;
    /// FIFO_STA: empty
    pub const FIFO_EMPTY: u8 = 1 << 5;
    /// FIFO_STA: full
    pub const FIFO_FULL: u8 = 1 << 6;
    /// FIFO_STA: overflowed
    pub const FIFO_OFLOW: u8 = 1 << 7;
}

/// Expected CHIP_ID contents
pub const CHIP_ID_VALUE: u16 = 0x0811;

/// Mask for the 12-bit position readings
const DATA_MASK: u32 = 0x0FFF;

/// STMPE811 driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Parameter out of range; nothing was written
    InvalidArgument(InvalidArgument),
    /// CHIP_ID did not read back as 0x0811
    IdentityMismatch {
        /// Value actually read
        found: u16,
    },
    /// Bus transaction failed
    Bus(E),
}

impl<E> From<InvalidArgument> for Error<E> {
    fn from(e: InvalidArgument) -> Self {
        Error::InvalidArgument(e)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(e) => write!(f, "invalid argument: {}", e),
            Error::IdentityMismatch { found } => {
                write!(f, "expected chip id {:#06x}, found {:#06x}", CHIP_ID_VALUE, found)
            }
            Error::Bus(e) => write!(f, "I2C error: {:?}", e),
        }
    }
}

/// Encode TSC_CTRL from a sensing configuration
pub fn encode_tsc_ctrl(config: &SensingConfig, enable: bool) -> u8 {
    let mut value = (config.window.code() << bits::TRACK_SHIFT) & bits::TRACK_MASK;
    value |= (config.mode.code() << bits::OP_MOD_SHIFT) & bits::OP_MOD_MASK;
    if enable {
        value |= bits::TSC_EN;
    }
    value
}

/// Encode TSC_CFG from a sensing configuration
pub fn encode_tsc_cfg(config: &SensingConfig) -> u8 {
    ((config.averaging.code() << bits::AVE_SHIFT) & bits::AVE_MASK)
        | ((config.touch_delay.code() << bits::DELAY_SHIFT) & bits::DELAY_MASK)
        | (config.settle.code() & bits::SETTLE_MASK)
}

/// Decode TSC_CTRL and TSC_CFG into a sensing configuration
///
/// The enable and touch-status bits are ignored. Fails only if the operating
/// mode field holds a reserved code (5-7).
pub fn decode_sensing(tsc_ctrl: u8, tsc_cfg: u8) -> Result<SensingConfig, InvalidArgument> {
    // All other fields are masked to their width, so only the mode can fail
    let mode = OperatingMode::try_from((tsc_ctrl & bits::OP_MOD_MASK) >> bits::OP_MOD_SHIFT)?;
    let window = TrackingWindow::new((tsc_ctrl & bits::TRACK_MASK) >> bits::TRACK_SHIFT)?;
    let averaging = Averaging::try_from((tsc_cfg & bits::AVE_MASK) >> bits::AVE_SHIFT)?;
    let touch_delay = TouchDelay::new((tsc_cfg & bits::DELAY_MASK) >> bits::DELAY_SHIFT)?;
    let settle = SettleTime::new(tsc_cfg & bits::SETTLE_MASK)?;

    Ok(SensingConfig {
        mode,
        window,
        averaging,
        touch_delay,
        settle,
    })
}

/// STMPE811 driver
///
/// Owns the bus handle for its lifetime and assumes exclusive access: the
/// reconfiguration read-modify-write is not atomic with respect to other bus
/// users. Use [`release`](Self::release) to get the bus back.
pub struct Stmpe811<I2C> {
    i2c: I2C,
    address: u8,
    display: DisplayGeometry,
    rotation: Rotation,
    calibration: Calibration,
}

impl<I2C> Stmpe811<I2C>
where
    I2C: I2c,
{
    /// Create the driver, verify the chip, and enable sensing
    ///
    /// The configuration is validated before any bus traffic. An identity
    /// mismatch fails construction without writing any register.
    pub fn new(i2c: I2C, config: TouchConfig) -> Result<Self, Error<I2C::Error>> {
        config.validate()?;

        let mut driver = Self {
            i2c,
            address: config.address,
            display: config.display,
            rotation: config.rotation,
            calibration: config.calibration,
        };
        driver.init(&config)?;
        Ok(driver)
    }

    /// Create the driver from raw construction parameters
    ///
    /// `rotation_degrees` must be 0, 90, 180, or 270 and `tracking_window`
    /// in [0, 7]; anything else fails before the bus is touched.
    pub fn from_parts(
        i2c: I2C,
        address: u8,
        width: u16,
        height: u16,
        rotation_degrees: u16,
        tracking_window: u8,
    ) -> Result<Self, Error<I2C::Error>> {
        let config =
            TouchConfig::new(width, height, rotation_degrees, tracking_window)?.with_address(address);
        Self::new(i2c, config)
    }

    fn init(&mut self, config: &TouchConfig) -> Result<(), Error<I2C::Error>> {
        let found = self.read_register(reg::CHIP_ID, 2)? as u16;
        if found != CHIP_ID_VALUE {
            return Err(Error::IdentityMismatch { found });
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("STMPE811 found at {=u8:#x}", self.address);

        self.write_register(reg::SYS_CTRL1, bits::SOFT_RESET)?;
        self.write_register(reg::SYS_CTRL2, bits::CLOCKS_TOUCH)?;
        self.write_register(reg::FIFO_TH, config.fifo_threshold)?;
        self.write_register(reg::TSC_CFG, encode_tsc_cfg(&config.sensing))?;
        self.write_register(reg::TSC_CTRL, encode_tsc_ctrl(&config.sensing, true))?;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "STMPE811 sensing enabled: {}, rotation {}",
            config.sensing,
            self.rotation
        );

        Ok(())
    }

    /// Read a 1-4 byte register, most significant byte first
    pub fn read_register(&mut self, register: u8, byte_count: usize) -> Result<u32, Error<I2C::Error>> {
        if !(1..=4).contains(&byte_count) {
            return Err(Error::InvalidArgument(InvalidArgument::ByteCount(byte_count)));
        }

        let mut buf = [0u8; 4];
        self.i2c
            .write(self.address, &[register])
            .map_err(Error::Bus)?;
        self.i2c
            .read(self.address, &mut buf[..byte_count])
            .map_err(Error::Bus)?;

        Ok(buf[..byte_count]
            .iter()
            .fold(0u32, |acc, &b| (acc << 8) | b as u32))
    }

    /// Write an 8-bit register
    pub fn write_register(&mut self, register: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write(self.address, &[register, value])
            .map_err(Error::Bus)
    }

    /// Silicon revision from ID_VER
    pub fn id_version(&mut self) -> Result<u8, Error<I2C::Error>> {
        Ok(self.read_register(reg::ID_VER, 1)? as u8)
    }

    /// Read back the current sensing configuration
    pub fn sensing_config(&mut self) -> Result<SensingConfig, Error<I2C::Error>> {
        let tsc_cfg = self.read_register(reg::TSC_CFG, 1)? as u8;
        let tsc_ctrl = self.read_register(reg::TSC_CTRL, 1)? as u8;
        Ok(decode_sensing(tsc_ctrl, tsc_cfg)?)
    }

    /// Change sensing parameters at runtime
    ///
    /// Unspecified fields keep their current register values. Every field
    /// is range-checked before any bus traffic. The sequence is: read both
    /// sensing registers, disable sensing, reset the FIFO, write TSC_CFG,
    /// then write TSC_CTRL with sensing re-enabled. Queued samples are lost.
    ///
    /// Returns the configuration now programmed.
    pub fn set_sensing_config(
        &mut self,
        update: SensingUpdate,
    ) -> Result<SensingConfig, Error<I2C::Error>> {
        let overrides = update.validate()?;
        let next = overrides.apply(self.sensing_config()?);

        self.write_register(reg::TSC_CTRL, 0x00)?;
        self.reset_fifo()?;
        self.write_register(reg::TSC_CFG, encode_tsc_cfg(&next))?;
        self.write_register(reg::TSC_CTRL, encode_tsc_ctrl(&next, true))?;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "TSC_CFG = {=u8:#x}, TSC_CTRL = {=u8:#x}",
            encode_tsc_cfg(&next),
            encode_tsc_ctrl(&next, true)
        );

        Ok(next)
    }

    /// Discard all queued samples, leaving sensing enabled
    pub fn clear_fifo(&mut self) -> Result<(), Error<I2C::Error>> {
        self.reset_fifo()
    }

    fn reset_fifo(&mut self) -> Result<(), Error<I2C::Error>> {
        self.write_register(reg::FIFO_STA, bits::FIFO_RESET)?;
        self.write_register(reg::FIFO_STA, 0x00)
    }

    /// Read one queued sample and convert it to display space
    fn read_sample(&mut self) -> Result<TouchSample, Error<I2C::Error>> {
        let raw_x = (self.read_register(reg::TSC_DATA_X, 2)? & DATA_MASK) as u16;
        let raw_y = (self.read_register(reg::TSC_DATA_Y, 2)? & DATA_MASK) as u16;
        let raw_z = self.read_register(reg::TSC_DATA_Z, 2)? as u16;

        let (x, y) = to_pixels(raw_x, raw_y, &self.display, self.rotation, &self.calibration);
        Ok(TouchSample::new(x, y, normalize_pressure(raw_z)))
    }

    /// Current calibration
    pub fn calibration(&self) -> Calibration {
        self.calibration
    }

    /// Replace the calibration used for subsequent samples
    pub fn set_calibration(&mut self, calibration: Calibration) {
        self.calibration = calibration;
    }

    /// Display orientation
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Display extents used for scaling
    pub fn display(&self) -> DisplayGeometry {
        self.display
    }

    /// 7-bit bus address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Consume the driver and return the bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> TouchController for Stmpe811<I2C>
where
    I2C: I2c,
{
    type Error = Error<I2C::Error>;

    fn touch_count(&mut self) -> Result<u8, Self::Error> {
        Ok(self.read_register(reg::FIFO_SIZE, 1)? as u8)
    }

    /// Drain the FIFO, oldest sample first
    ///
    /// FIFO_SIZE is re-read after every sample because the chip keeps
    /// queueing while a finger is down. A drain that starts mid-touch can
    /// therefore also pick up samples taken after the call began; the result
    /// is not a snapshot of one instant. The drain stops at
    /// [`MAX_SAMPLES`](tactile_core::touch::MAX_SAMPLES), leaving any excess
    /// queued for the next call.
    fn touch_points(&mut self) -> Result<TouchSamples, Self::Error> {
        let mut samples = TouchSamples::new();
        let mut queued = self.touch_count()?;

        while queued > 0 && !samples.is_full() {
            let sample = self.read_sample()?;
            // Capacity checked above
            let _ = samples.push(sample);
            queued = self.touch_count()?;
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("drained {} samples, {} still queued", samples.len(), queued);

        Ok(samples)
    }
}
