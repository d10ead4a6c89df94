#![cfg_attr(not(test), no_std)]

use core::convert::Infallible;
use core::marker::PhantomData;

use embedded_hal::digital::OutputPin;
#[cfg(not(feature = "async"))]
use embedded_hal::spi::SpiBus;
#[cfg(feature = "async")]
use embedded_hal_async::spi::SpiBus;

mod blit;
pub mod board;
pub mod color;
pub mod font;
pub mod instruction;
pub mod interface;
mod rotation;
mod text;
pub mod touch;

#[cfg(test)]
mod mock;

pub use instruction::Instruction;
pub use interface::SpiInterface;
pub use rotation::Rotation;
pub use text::DEFAULT_TEXT_SPACING;

use instruction::PIXEL_FORMAT_16BIT;

// Panel dimensions for the 3.5" ST7796 320×480 module, landscape native
pub const SCREEN_WIDTH: u16 = 480;
pub const SCREEN_HEIGHT: u16 = 320;

// Scratch buffer size for batched pixel streams
pub const BUF_SIZE: usize = 48 * 24 * 2;

// Datasheet timings, not tunable
const RESET_HOLD_MS: u64 = 100;
const SLEEP_OUT_DELAY_MS: u64 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Physical width in pixels
    pub width: u16,
    /// Physical height in pixels
    pub height: u16,
    /// Rotation applied during `init`
    pub rotation: Rotation,
    /// RGB color order; BGR when false
    pub rgb: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            rotation: Rotation::Deg0,
            rgb: true,
        }
    }
}

/// Controller bring-up progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelStatus {
    Uninitialized,
    Reset,
    Configuring,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelState {
    pub physical_width: u16,
    pub physical_height: u16,
    pub rotation: Rotation,
    pub backlight_on: bool,
    pub status: PanelStatus,
}

impl PanelState {
    /// Screen size as seen through the current rotation.
    pub fn logical_size(&self) -> (u16, u16) {
        self.rotation
            .logical_size(self.physical_width, self.physical_height)
    }
}

#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E = ()> {
    /// Communication error
    Comm(E),
    /// Pin setting error
    Pin(Infallible),
    /// Pixel buffer length does not match the addressed window
    BufferSize { expected: usize, actual: usize },
}

pub struct ST7796<'b, SPI, CS, DC, RST, BL, TIMER>
where
    SPI: SpiBus,
    CS: OutputPin<Error = Infallible>,
    DC: OutputPin<Error = Infallible>,
    RST: OutputPin<Error = Infallible>,
    BL: OutputPin<Error = Infallible>,
    TIMER: Timer,
{
    interface: SpiInterface<SPI, CS, DC>,
    rst: RST,
    bl: BL,
    rgb: bool,
    state: PanelState,
    buffer: &'b mut [u8],
    _timer: PhantomData<TIMER>,
}

#[maybe_async_cfg::maybe(
    sync(cfg(not(feature = "async")), self = "ST7796",),
    async(feature = "async", keep_self)
)]
impl<'b, SPI, CS, DC, RST, BL, E, TIMER> ST7796<'b, SPI, CS, DC, RST, BL, TIMER>
where
    SPI: SpiBus<Error = E>,
    CS: OutputPin<Error = Infallible>,
    DC: OutputPin<Error = Infallible>,
    RST: OutputPin<Error = Infallible>,
    BL: OutputPin<Error = Infallible>,
    TIMER: Timer,
{
    /// `buffer` is scratch space for batched pixel streams; `BUF_SIZE` is a
    /// good default and anything under two bytes degrades to per-pixel writes.
    pub fn new(
        config: Config,
        spi: SPI,
        cs: CS,
        dc: DC,
        rst: RST,
        bl: BL,
        buffer: &'b mut [u8],
    ) -> Self {
        Self {
            interface: SpiInterface::new(spi, cs, dc),
            rst,
            bl,
            rgb: config.rgb,
            state: PanelState {
                physical_width: config.width,
                physical_height: config.height,
                rotation: config.rotation,
                backlight_on: false,
                status: PanelStatus::Uninitialized,
            },
            buffer,
            _timer: PhantomData,
        }
    }

    /// Give back the bus and the four control lines.
    pub fn release(self) -> (SPI, CS, DC, RST, BL) {
        let (spi, cs, dc) = self.interface.release();
        (spi, cs, dc, self.rst, self.bl)
    }

    pub async fn init(&mut self) -> Result<(), Error<E>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("st7796: init, rotation {}", self.state.rotation.degrees());

        self.reset().await?;
        self.state.status = PanelStatus::Configuring;

        self.write_command(Instruction::SleepOut, &[]).await?;
        TIMER::delay_ms(SLEEP_OUT_DELAY_MS).await;

        self.write_command(Instruction::PixelFormatSet, &[PIXEL_FORMAT_16BIT])
            .await?;

        // Vendor tuning from the panel bring-up sequence, order matters
        self.write_command(Instruction::PorchControl, &[0x02, 0x02, 0x02, 0x02, 0x02])
            .await?;
        self.write_command(Instruction::EntryModeSet, &[0x07]).await?;
        self.write_command(Instruction::VcomSetting, &[0x28]).await?;
        self.write_command(Instruction::PowerControl1, &[0x28, 0x0C])
            .await?;
        self.write_command(Instruction::PowerControl2, &[0xC0, 0x00, 0x00, 0x00, 0x00])
            .await?;
        self.write_command(Instruction::VcomControl, &[0x00, 0x00, 0x00, 0x00])
            .await?;
        self.write_command(Instruction::VcomOffset, &[0x00]).await?;

        self.apply_rotation().await?;
        self.write_command(Instruction::PixelFormatSet, &[PIXEL_FORMAT_16BIT])
            .await?;
        self.write_command(Instruction::DisplayOn, &[]).await?;
        self.set_backlight(true)?;

        self.state.status = PanelStatus::Ready;
        Ok(())
    }

    pub async fn reset(&mut self) -> Result<(), Error<E>> {
        self.state.status = PanelStatus::Reset;
        self.rst.set_low().map_err(Error::Pin)?;
        TIMER::delay_ms(RESET_HOLD_MS).await;
        self.rst.set_high().map_err(Error::Pin)?;
        TIMER::delay_ms(RESET_HOLD_MS).await;
        Ok(())
    }

    /// Store the rotation and reprogram MADCTL.
    pub async fn set_rotation(&mut self, rotation: Rotation) -> Result<(), Error<E>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("st7796: rotation {}", rotation.degrees());

        self.state.rotation = rotation;
        self.apply_rotation().await
    }

    async fn apply_rotation(&mut self) -> Result<(), Error<E>> {
        let madctl = self.state.rotation.madctl(self.rgb);
        self.write_command(Instruction::MemoryAccessControl, &[madctl])
            .await
    }

    pub fn rotation(&self) -> Rotation {
        self.state.rotation
    }

    /// Get logical screen dimensions (after rotation)
    pub fn logical_dimensions(&self) -> (u16, u16) {
        self.state.logical_size()
    }

    pub fn width(&self) -> u16 {
        self.logical_dimensions().0
    }

    pub fn height(&self) -> u16 {
        self.logical_dimensions().1
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn set_backlight(&mut self, on: bool) -> Result<(), Error<E>> {
        if on {
            self.bl.set_high().map_err(Error::Pin)?;
        } else {
            self.bl.set_low().map_err(Error::Pin)?;
        }
        self.state.backlight_on = on;
        Ok(())
    }

    pub async fn set_inversion(&mut self, inverted: bool) -> Result<(), Error<E>> {
        let instruction = if inverted {
            Instruction::DisplayInversionOn
        } else {
            Instruction::DisplayInversionOff
        };
        self.write_command(instruction, &[]).await
    }

    pub async fn sleep(&mut self) -> Result<(), Error<E>> {
        self.write_command(Instruction::SleepIn, &[]).await
    }

    pub async fn wake(&mut self) -> Result<(), Error<E>> {
        self.write_command(Instruction::SleepOut, &[]).await?;
        TIMER::delay_ms(SLEEP_OUT_DELAY_MS).await;
        Ok(())
    }

    pub async fn display_on(&mut self) -> Result<(), Error<E>> {
        self.write_command(Instruction::DisplayOn, &[]).await
    }

    pub async fn display_off(&mut self) -> Result<(), Error<E>> {
        self.write_command(Instruction::DisplayOff, &[]).await
    }

    /// Program the column/page window and arm memory write.
    ///
    /// The controller only remembers the last window, so every pixel stream
    /// has to be preceded by its own call.
    pub async fn set_window(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
    ) -> Result<(), Error<E>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("st7796: window ({},{})-({},{})", x0, y0, x1, y1);

        self.write_command(Instruction::ColumnAddressSet, &span(x0, x1))
            .await?;
        self.write_command(Instruction::PageAddressSet, &span(y0, y1))
            .await?;
        self.write_command(Instruction::MemoryWrite, &[]).await
    }

    async fn write_command(
        &mut self,
        instruction: Instruction,
        params: &[u8],
    ) -> Result<(), Error<E>> {
        self.interface
            .write_command(instruction.into(), params)
            .await
    }
}

/// Start/end pair as two big-endian 16-bit values.
fn span(start: u16, end: u16) -> [u8; 4] {
    let [sh, sl] = start.to_be_bytes();
    let [eh, el] = end.to_be_bytes();
    [sh, sl, eh, el]
}

#[maybe_async_cfg::maybe(
    sync(cfg(not(feature = "async")), self = "Timer",),
    async(feature = "async", keep_self)
)]
/// Simplified timer trait for delay operations.
pub trait Timer {
    /// Delay for the specified number of milliseconds.
    async fn delay_ms(milliseconds: u64);
}

/// `Timer` backed by the embassy time driver.
#[cfg(feature = "embassy-time")]
pub struct EmbassyTimer;

#[cfg(all(feature = "embassy-time", feature = "async"))]
impl Timer for EmbassyTimer {
    async fn delay_ms(milliseconds: u64) {
        embassy_time::Timer::after_millis(milliseconds).await;
    }
}

#[cfg(all(feature = "embassy-time", not(feature = "async")))]
impl Timer for EmbassyTimer {
    fn delay_ms(milliseconds: u64) {
        embassy_time::block_for(embassy_time::Duration::from_millis(milliseconds));
    }
}
