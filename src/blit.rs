use core::convert::Infallible;

use embedded_graphics_core::pixelcolor::Rgb565;
use embedded_hal::digital::OutputPin;
#[cfg(not(feature = "async"))]
use embedded_hal::spi::SpiBus;
#[cfg(feature = "async")]
use embedded_hal_async::spi::SpiBus;

use crate::{Error, Rotation, ST7796, Timer, color};

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
    /// Fill a rectangle with a single color.
    ///
    /// At 90° and 270° the extents are exchanged before the window is
    /// programmed, so callers hand in sizes in the unrotated frame.
    pub async fn fill_rect(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        color: Rgb565,
    ) -> Result<(), Error<E>> {
        let (width, height) = if self.state.rotation.is_transposed() {
            (height, width)
        } else {
            (width, height)
        };

        if width == 0 || height == 0 {
            return Ok(()); // Nothing to draw
        }

        self.set_window(
            x,
            y,
            x.saturating_add(width - 1),
            y.saturating_add(height - 1),
        )
        .await?;
        self.stream_color(color, width as usize * height as usize)
            .await
    }

    /// Fill entire logical screen with a single color
    pub async fn fill_screen(&mut self, color: Rgb565) -> Result<(), Error<E>> {
        let (width, height) = self.logical_dimensions();
        if width == 0 || height == 0 {
            return Ok(());
        }

        self.set_window(0, 0, width - 1, height - 1).await?;
        self.stream_color(color, width as usize * height as usize)
            .await
    }

    /// Draw a single pixel (basic drawing primitive)
    pub async fn draw_pixel(&mut self, x: u16, y: u16, color: Rgb565) -> Result<(), Error<E>> {
        self.set_window(x, y, x, y).await?;
        self.interface.send_data(&color::to_be_bytes(color)).await
    }

    /// Set `rotation`, then copy a prepared RGB565 buffer into the window at
    /// (x, y). The extents are used as given.
    pub async fn blit_buffer(
        &mut self,
        buffer: &[u8],
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        rotation: Rotation,
    ) -> Result<(), Error<E>> {
        check_len(buffer, width, height)?;
        self.set_rotation(rotation).await?;

        if width == 0 || height == 0 {
            return Ok(());
        }

        self.set_window(
            x,
            y,
            x.saturating_add(width - 1),
            y.saturating_add(height - 1),
        )
        .await?;
        self.interface.send_data(buffer).await
    }

    /// Stream a full-screen RGB565 image at the current rotation.
    pub async fn display_image(&mut self, data: &[u8]) -> Result<(), Error<E>> {
        let (width, height) = self.logical_dimensions();
        check_len(data, width, height)?;
        if width == 0 || height == 0 {
            return Ok(());
        }

        self.set_window(0, 0, width - 1, height - 1).await?;
        self.interface.send_data(data).await
    }

    /// Stream `pixels` copies of `color` as one data frame.
    pub(crate) async fn stream_color(
        &mut self,
        color: Rgb565,
        pixels: usize,
    ) -> Result<(), Error<E>> {
        self.interface.begin_data()?;
        self.write_color_run(color, pixels).await?;
        self.interface.end_data().await
    }

    /// Write `pixels` copies of `color` into an already open data frame.
    pub(crate) async fn write_color_run(
        &mut self,
        color: Rgb565,
        pixels: usize,
    ) -> Result<(), Error<E>> {
        let bytes = color::to_be_bytes(color);
        let batch = (self.buffer.len() / 2).min(pixels);

        if batch == 0 {
            for _ in 0..pixels {
                self.interface.write_data(&bytes).await?;
            }
            return Ok(());
        }

        for pixel in self.buffer[..batch * 2].chunks_exact_mut(2) {
            pixel.copy_from_slice(&bytes);
        }

        let mut remaining = pixels;
        while remaining > 0 {
            let count = remaining.min(batch);
            self.interface
                .write_data(&self.buffer[..count * 2])
                .await?;
            remaining -= count;
        }
        Ok(())
    }
}

fn check_len<E>(data: &[u8], width: u16, height: u16) -> Result<(), Error<E>> {
    // An unaddressable size on 16-bit or 32-bit targets can never match
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(2))
        .unwrap_or(usize::MAX);
    if data.len() != expected {
        #[cfg(feature = "defmt")]
        defmt::warn!(
            "st7796: buffer is {} bytes, window needs {}",
            data.len(),
            expected
        );
        return Err(Error::BufferSize {
            expected,
            actual: data.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use embedded_graphics_core::pixelcolor::RgbColor;

    use super::*;
    use crate::Config;
    use crate::mock::{
        Frame, Line, MockBus, MockPin, block, commands, data_after, decode_frames, new_log,
    };
    use crate::tests::{TestDisplay, display};

    fn pixels(color: Rgb565, count: usize) -> Vec<u8> {
        color::to_be_bytes(color).repeat(count)
    }

    #[test]
    fn fill_rect_unrotated_keeps_extents() {
        let log = new_log();
        let mut buffer = [0u8; 16];
        let mut lcd = display(&log, &mut buffer);

        block!(lcd.fill_rect(10, 20, 5, 3, Rgb565::RED)).unwrap();

        let frames = decode_frames(&log.borrow());
        assert_eq!(data_after(&frames, 0x2A), Some(vec![0, 10, 0, 14]));
        assert_eq!(data_after(&frames, 0x2B), Some(vec![0, 20, 0, 22]));
        assert_eq!(data_after(&frames, 0x2C), Some(pixels(Rgb565::RED, 15)));
    }

    #[test]
    fn fill_rect_swaps_extents_when_transposed() {
        for rotation in [Rotation::Deg90, Rotation::Deg270] {
            let log = new_log();
            let mut buffer = [0u8; 16];
            let mut lcd = display(&log, &mut buffer);
            block!(lcd.set_rotation(rotation)).unwrap();
            log.borrow_mut().clear();

            block!(lcd.fill_rect(0, 0, 7, 2, Rgb565::BLUE)).unwrap();

            let frames = decode_frames(&log.borrow());
            // 7 wide by 2 tall requested, 2 wide by 7 tall programmed
            assert_eq!(data_after(&frames, 0x2A), Some(vec![0, 0, 0, 1]));
            assert_eq!(data_after(&frames, 0x2B), Some(vec![0, 0, 0, 6]));
            assert_eq!(data_after(&frames, 0x2C), Some(pixels(Rgb565::BLUE, 14)));
        }
    }

    #[test]
    fn fill_rect_zero_size_is_silent() {
        let log = new_log();
        let mut buffer = [0u8; 16];
        let mut lcd = display(&log, &mut buffer);

        block!(lcd.fill_rect(0, 0, 0, 10, Rgb565::RED)).unwrap();

        assert!(log.borrow().is_empty());
    }

    #[test]
    fn fill_without_scratch_buffer_writes_per_pixel() {
        let log = new_log();
        let mut buffer = [0u8; 0];
        let mut lcd = display(&log, &mut buffer);

        block!(lcd.fill_rect(0, 0, 3, 3, Rgb565::GREEN)).unwrap();

        let frames = decode_frames(&log.borrow());
        assert_eq!(data_after(&frames, 0x2C), Some(pixels(Rgb565::GREEN, 9)));
    }

    #[test]
    fn fill_screen_covers_logical_screen() {
        let log = new_log();
        let mut buffer = [0u8; crate::BUF_SIZE];
        let mut lcd = display(&log, &mut buffer);
        block!(lcd.set_rotation(Rotation::Deg90)).unwrap();
        log.borrow_mut().clear();

        block!(lcd.fill_screen(Rgb565::BLACK)).unwrap();

        let frames = decode_frames(&log.borrow());
        assert_eq!(data_after(&frames, 0x2A), Some(vec![0, 0, 0x01, 0x3F]));
        assert_eq!(data_after(&frames, 0x2B), Some(vec![0, 0, 0x01, 0xDF]));
        let data = data_after(&frames, 0x2C).unwrap();
        assert_eq!(data.len(), 320 * 480 * 2);
        assert!(data.iter().all(|&b| b == 0));
    }

    #[test]
    fn each_pixel_reprograms_the_window() {
        let log = new_log();
        let mut buffer = [0u8; 16];
        let mut lcd = display(&log, &mut buffer);

        block!(lcd.draw_pixel(1, 2, Rgb565::WHITE)).unwrap();
        block!(lcd.draw_pixel(3, 4, Rgb565::RED)).unwrap();

        let frames = decode_frames(&log.borrow());
        assert_eq!(commands(&frames), vec![0x2A, 0x2B, 0x2C, 0x2A, 0x2B, 0x2C]);
        assert_eq!(
            frames,
            vec![
                Frame::Command(0x2A),
                Frame::Data(vec![0, 1, 0, 1]),
                Frame::Command(0x2B),
                Frame::Data(vec![0, 2, 0, 2]),
                Frame::Command(0x2C),
                Frame::Data(vec![0xFF, 0xFF]),
                Frame::Command(0x2A),
                Frame::Data(vec![0, 3, 0, 3]),
                Frame::Command(0x2B),
                Frame::Data(vec![0, 4, 0, 4]),
                Frame::Command(0x2C),
                Frame::Data(vec![0xF8, 0x00]),
            ]
        );
    }

    #[test]
    fn blit_buffer_streams_bytes_verbatim() {
        let log = new_log();
        let mut scratch = [0u8; 16];
        let mut lcd = display(&log, &mut scratch);
        let image: Vec<u8> = (0..4 * 3 * 2).map(|i| i as u8).collect();

        block!(lcd.blit_buffer(&image, 100, 50, 4, 3, Rotation::Deg90)).unwrap();

        let frames = decode_frames(&log.borrow());
        assert_eq!(frames[0], Frame::Command(0x36));
        assert_eq!(frames[1], Frame::Data(vec![0xA0]));
        assert_eq!(lcd.rotation(), Rotation::Deg90);
        // no swap: extents exactly as given
        assert_eq!(data_after(&frames, 0x2A), Some(vec![0, 100, 0, 103]));
        assert_eq!(data_after(&frames, 0x2B), Some(vec![0, 50, 0, 52]));
        assert_eq!(data_after(&frames, 0x2C), Some(image));
    }

    #[test]
    fn blit_buffer_rejects_wrong_length_without_traffic() {
        let log = new_log();
        let mut scratch = [0u8; 16];
        let mut lcd = display(&log, &mut scratch);
        let image = [0u8; 10];

        let result = block!(lcd.blit_buffer(&image, 0, 0, 2, 3, Rotation::Deg180));

        assert!(matches!(
            result,
            Err(Error::BufferSize {
                expected: 12,
                actual: 10
            })
        ));
        assert!(log.borrow().is_empty());
        assert_eq!(lcd.rotation(), Rotation::Deg0);
    }

    #[test]
    fn display_image_uses_full_logical_window() {
        let log = new_log();
        let mut scratch = [0u8; 16];
        let mut lcd = display(&log, &mut scratch);
        let image = vec![0x5Au8; 480 * 320 * 2];

        block!(lcd.display_image(&image)).unwrap();

        let frames = decode_frames(&log.borrow());
        assert_eq!(data_after(&frames, 0x2A), Some(vec![0, 0, 0x01, 0xDF]));
        assert_eq!(data_after(&frames, 0x2B), Some(vec![0, 0, 0x01, 0x3F]));
        assert_eq!(data_after(&frames, 0x2C), Some(image));

        let short = [0u8; 4];
        assert!(matches!(
            block!(lcd.display_image(&short)),
            Err(Error::BufferSize { .. })
        ));
    }

    #[test]
    fn zero_sized_panel_sends_nothing() {
        let log = new_log();
        let mut scratch = [0u8; 16];
        let config = Config {
            width: 0,
            ..Config::default()
        };
        let mut lcd: TestDisplay = ST7796::new(
            config,
            MockBus::new(&log),
            MockPin::new(Line::Cs, &log),
            MockPin::new(Line::Dc, &log),
            MockPin::new(Line::Rst, &log),
            MockPin::new(Line::Bl, &log),
            &mut scratch,
        );

        block!(lcd.fill_screen(Rgb565::RED)).unwrap();
        block!(lcd.display_image(&[])).unwrap();

        assert!(log.borrow().is_empty());
    }

    #[test]
    fn length_check_covers_largest_window() {
        let result = check_len::<()>(&[0u8; 4], u16::MAX, u16::MAX);
        assert!(matches!(result, Err(Error::BufferSize { actual: 4, .. })));

        assert!(check_len::<()>(&[], 0, u16::MAX).is_ok());
    }
}
