use embedded_graphics_core::pixelcolor::{Rgb565, raw::RawU16};
use embedded_graphics_core::prelude::RawData;

pub use embedded_graphics_core::pixelcolor::RgbColor;

// Board palette in addition to the `RgbColor` primaries.
pub const PALE_RED: Rgb565 = Rgb565::new(31, 45, 24); // 0xFDB8
pub const PURPLE: Rgb565 = Rgb565::new(16, 0, 16); // 0x8010
pub const DARK_GREEN: Rgb565 = Rgb565::new(26, 60, 28); // 0xD79C

/// Wire form of a pixel: high byte first.
pub fn to_be_bytes(color: Rgb565) -> [u8; 2] {
    RawU16::from(color).into_inner().to_be_bytes()
}
