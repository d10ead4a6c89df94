use core::convert::Infallible;

use embedded_graphics_core::pixelcolor::Rgb565;
use embedded_hal::digital::OutputPin;
#[cfg(not(feature = "async"))]
use embedded_hal::spi::SpiBus;
#[cfg(feature = "async")]
use embedded_hal_async::spi::SpiBus;

use crate::font::{self, GLYPH_SIZE};
use crate::{Error, Rotation, ST7796, Timer, color};

/// Default gap between glyphs; one pixel of overlap.
pub const DEFAULT_TEXT_SPACING: i16 = -1;

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
    /// Draw one 8x8 glyph scaled by `size` into an `8*size` square at (x, y).
    ///
    /// Nothing is sent when `size` is 0 or `8*size` does not fit a window.
    pub async fn draw_char(
        &mut self,
        x: u16,
        y: u16,
        ch: char,
        color: Rgb565,
        bg_color: Rgb565,
        size: u16,
    ) -> Result<(), Error<E>> {
        if size == 0 {
            return Ok(());
        }

        let Some(side) = GLYPH_SIZE.checked_mul(size) else {
            #[cfg(feature = "defmt")]
            defmt::warn!("st7796: glyph size {} exceeds the address range", size);
            return Ok(());
        };

        let glyph = font::glyph(ch);
        self.set_window(
            x,
            y,
            x.saturating_add(side - 1),
            y.saturating_add(side - 1),
        )
        .await?;

        let front_bytes = color::to_be_bytes(color);
        let back_bytes = color::to_be_bytes(bg_color);
        let scale = size as usize;
        let row_len = GLYPH_SIZE as usize * scale * 2;

        self.interface.begin_data()?;
        if row_len <= self.buffer.len() {
            for &bits in glyph.iter() {
                for (i, pixel) in self.buffer[..row_len].chunks_exact_mut(2).enumerate() {
                    let on = bits & (0x80 >> (i / scale)) != 0;
                    pixel.copy_from_slice(if on { &front_bytes } else { &back_bytes });
                }
                for _ in 0..size {
                    self.interface.write_data(&self.buffer[..row_len]).await?;
                }
            }
        } else {
            // Scratch too small for a whole scaled row, go run by run
            for &bits in glyph.iter() {
                for _ in 0..size {
                    for bit in 0..8 {
                        let on = bits & (0x80 >> bit) != 0;
                        let run = if on { color } else { bg_color };
                        self.write_color_run(run, scale).await?;
                    }
                }
            }
        }
        self.interface.end_data().await
    }

    /// Set `rotation`, then draw `text` left to right, advancing
    /// `8*size + spacing` pixels per character.
    #[allow(clippy::too_many_arguments)]
    pub async fn draw_text(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        color: Rgb565,
        bg_color: Rgb565,
        size: u16,
        rotation: Rotation,
        spacing: i16,
    ) -> Result<(), Error<E>> {
        self.set_rotation(rotation).await?;
        self.draw_text_at(
            i32::from(x),
            i32::from(y),
            text,
            color,
            bg_color,
            size,
            spacing,
        )
        .await
    }

    /// Glyph placement shared by `draw_text` and `draw_button`. The start may
    /// lie off-screen; glyphs whose origin falls outside the address range
    /// are skipped, the rest keep their positions.
    #[allow(clippy::too_many_arguments)]
    async fn draw_text_at(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        color: Rgb565,
        bg_color: Rgb565,
        size: u16,
        spacing: i16,
    ) -> Result<(), Error<E>> {
        let Ok(y) = u16::try_from(y) else {
            return Ok(());
        };

        let advance = i32::from(GLYPH_SIZE) * i32::from(size) + i32::from(spacing);
        for (i, ch) in text.chars().enumerate() {
            let char_x = x + i as i32 * advance;
            let Ok(char_x) = u16::try_from(char_x) else {
                continue;
            };
            self.draw_char(char_x, y, ch, color, bg_color, size).await?;
        }
        Ok(())
    }

    /// Filled rectangle with an optional centered label.
    ///
    /// The extents go through the same exchange as the reference firmware:
    /// swapped at 90°/270°, handed to `fill_rect` as (height, width), then
    /// swapped back at 0°/180° before the label is centered. The net effect
    /// is that `height` spans the x axis and `width` the y axis.
    #[allow(clippy::too_many_arguments)]
    pub async fn draw_button(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        color: Rgb565,
        text: &str,
        text_color: Rgb565,
        text_size: u16,
        rotation: Rotation,
    ) -> Result<(), Error<E>> {
        let text_width = text.chars().count() as i32 * i32::from(GLYPH_SIZE) * i32::from(text_size);
        let text_height = i32::from(GLYPH_SIZE) * i32::from(text_size);

        let (mut width, mut height) = (width, height);
        if rotation.is_transposed() {
            core::mem::swap(&mut width, &mut height);
        }

        self.fill_rect(x, y, height, width, color).await?;

        if !rotation.is_transposed() {
            core::mem::swap(&mut width, &mut height);
        }

        let text_x = i32::from(x) + (i32::from(width) - text_width).div_euclid(2);
        let text_y = i32::from(y) + (i32::from(height) - text_height).div_euclid(2);

        if !text.is_empty() {
            self.set_rotation(rotation).await?;
            self.draw_text_at(
                text_x,
                text_y,
                text,
                text_color,
                color,
                text_size,
                DEFAULT_TEXT_SPACING,
            )
            .await?;
        }
        Ok(())
    }
}
