//! CST226SE capacitive touch controller.
//!
//! Polled register reader over I2C. The interrupt line only raises a flag
//! (`TouchInterrupt`); the application decides when to read.

use core::convert::Infallible;
use core::marker::PhantomData;
use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::digital::OutputPin;
#[cfg(not(feature = "async"))]
use embedded_hal::i2c::I2c;
#[cfg(feature = "async")]
use embedded_hal_async::i2c::I2c;
use heapless::Vec;

use crate::{Error, Timer};

pub const DEFAULT_ADDRESS: u8 = 0x5A;
pub const MAX_TOUCH_POINTS: usize = 5;

const REG_FINGER_COUNT: u8 = 0x05;
const REG_DEVICE_ID: u8 = 0x06;

const RESET_HOLD_MS: u64 = 100;
const STARTUP_DELAY_MS: u64 = 1000;

/// Register addresses for one finger slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FingerRegisters {
    pub x_high: u8,
    pub x_low: u8,
    pub y_high: u8,
    pub y_low: u8,
    pub pressure: u8,
}

const fn regs(x_high: u8, x_low: u8, y_high: u8, y_low: u8, pressure: u8) -> FingerRegisters {
    FingerRegisters {
        x_high,
        x_low,
        y_high,
        y_low,
        pressure,
    }
}

/// Fingers 1..=5, in slot order. The low nibbles of X and Y share a byte.
pub const FINGER_REGISTERS: [FingerRegisters; MAX_TOUCH_POINTS] = [
    regs(0x01, 0x03, 0x02, 0x03, 0x04),
    regs(0x08, 0x0A, 0x09, 0x0A, 0x07),
    regs(0x0D, 0x0F, 0x0E, 0x0F, 0x0C),
    regs(0x12, 0x14, 0x13, 0x14, 0x11),
    regs(0x17, 0x19, 0x18, 0x19, 0x16),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchPoint {
    pub x: u16,
    pub y: u16,
    pub pressure: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchReport {
    /// Finger count as reported by the controller, which may exceed the
    /// number of decoded points.
    pub finger_count: u8,
    pub points: Vec<TouchPoint, MAX_TOUCH_POINTS>,
}

/// 12-bit X: high byte, then the upper nibble of the shared low byte.
pub fn decode_x(high: u8, low: u8) -> u16 {
    (u16::from(high) << 4) | (u16::from(low & 0xF0) >> 4)
}

/// 12-bit Y: high byte, then the lower nibble of the shared low byte.
pub fn decode_y(high: u8, low: u8) -> u16 {
    (u16::from(high) << 4) | u16::from(low & 0x0F)
}

/// Pending flag set from the touch interrupt and cleared by the poller.
///
/// Only the interrupt handler calls `signal` and only the polling loop
/// calls `clear`.
pub struct TouchInterrupt {
    pending: AtomicBool,
}

impl TouchInterrupt {
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
        }
    }

    pub fn signal(&self) {
        self.pending.store(true, Ordering::Release);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    pub fn clear(&self) {
        self.pending.store(false, Ordering::Release);
    }
}

impl Default for TouchInterrupt {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Cst226se<I2C, RST, TIMER>
where
    I2C: I2c,
    RST: OutputPin<Error = Infallible>,
    TIMER: Timer,
{
    i2c: I2C,
    rst: RST,
    address: u8,
    device_id: Option<u8>,
    _timer: PhantomData<TIMER>,
}

#[maybe_async_cfg::maybe(
    sync(cfg(not(feature = "async")), self = "Cst226se",),
    async(feature = "async", keep_self)
)]
impl<I2C, RST, E, TIMER> Cst226se<I2C, RST, TIMER>
where
    I2C: I2c<Error = E>,
    RST: OutputPin<Error = Infallible>,
    TIMER: Timer,
{
    pub fn new(i2c: I2C, rst: RST) -> Self {
        Self {
            i2c,
            rst,
            address: DEFAULT_ADDRESS,
            device_id: None,
            _timer: PhantomData,
        }
    }

    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    pub fn release(self) -> (I2C, RST) {
        (self.i2c, self.rst)
    }

    /// Device id read by the last successful `begin`.
    pub fn device_id(&self) -> Option<u8> {
        self.device_id
    }

    pub async fn reset(&mut self) -> Result<(), Error<E>> {
        self.rst.set_low().map_err(Error::Pin)?;
        TIMER::delay_ms(RESET_HOLD_MS).await;
        self.rst.set_high().map_err(Error::Pin)
    }

    /// Wait for the controller to boot and probe its id register.
    pub async fn begin(&mut self) -> Result<u8, Error<E>> {
        TIMER::delay_ms(STARTUP_DELAY_MS).await;
        let id = self.read_register(REG_DEVICE_ID).await?;

        #[cfg(feature = "defmt")]
        defmt::debug!("cst226se: device id {=u8:#x}", id);

        self.device_id = Some(id);
        Ok(id)
    }

    /// Read the finger count and every finger slot the register table covers.
    pub async fn read_touch_data(&mut self) -> Result<TouchReport, Error<E>> {
        let finger_count = self.read_register(REG_FINGER_COUNT).await?;
        let mut points = Vec::new();

        for regs in FINGER_REGISTERS.iter().take(finger_count as usize) {
            let x_high = self.read_register(regs.x_high).await?;
            let x_low = self.read_register(regs.x_low).await?;
            let y_high = self.read_register(regs.y_high).await?;
            let y_low = self.read_register(regs.y_low).await?;
            let pressure = self.read_register(regs.pressure).await?;

            // capacity equals the table length
            let _ = points.push(TouchPoint {
                x: decode_x(x_high, x_low),
                y: decode_y(y_high, y_low),
                pressure,
            });
        }

        Ok(TouchReport {
            finger_count,
            points,
        })
    }

    async fn read_register(&mut self, reg: u8) -> Result<u8, Error<E>> {
        let mut value = [0u8; 1];
        self.i2c
            .write_read(self.address, &[reg], &mut value)
            .await
            .map_err(Error::Comm)?;
        Ok(value[0])
    }
}
