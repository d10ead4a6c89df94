/// ST7796 command set used by this driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Instruction {
    /// Sleep In (10h) - Enter low-power mode
    SleepIn = 0x10,
    /// Sleep Out (11h) - Exit low-power mode
    SleepOut = 0x11,

    /// Display Inversion Off (20h) - Disable color inversion
    DisplayInversionOff = 0x20,
    /// Display Inversion On (21h) - Enable color inversion
    DisplayInversionOn = 0x21,

    /// Display Off (28h) - Disable panel output
    DisplayOff = 0x28,
    /// Display On (29h) - Enable panel output
    DisplayOn = 0x29,
    /// Column Address Set (2Ah) - Horizontal addressing bounds
    ColumnAddressSet = 0x2A,
    /// Page Address Set (2Bh) - Vertical addressing bounds
    PageAddressSet = 0x2B,
    /// Memory Write (2Ch) - Write to memory
    MemoryWrite = 0x2C,

    /// Memory Access Control (36h) - GRAM orientation/order
    MemoryAccessControl = 0x36,
    /// Interface Pixel Format (3Ah) - Color depth configuration
    PixelFormatSet = 0x3A,

    /// Porch Control (B2h)
    PorchControl = 0xB2,
    /// Entry Mode Set (B7h)
    EntryModeSet = 0xB7,
    /// VCOM Setting (BBh)
    VcomSetting = 0xBB,

    /// Power Control 1 (C0h)
    PowerControl1 = 0xC0,
    /// Power Control 2 (C1h)
    PowerControl2 = 0xC1,
    /// VCOM Control (C5h)
    VcomControl = 0xC5,
    /// VCOM Offset (C7h)
    VcomOffset = 0xC7,
}

impl From<Instruction> for u8 {
    fn from(instruction: Instruction) -> Self {
        instruction as u8
    }
}

/// MADCTL (36h) bits.
pub mod madctl {
    /// Row address order
    pub const MY: u8 = 0x80;
    /// Column address order
    pub const MX: u8 = 0x40;
    /// Row/column exchange
    pub const MV: u8 = 0x20;
    pub const ML: u8 = 0x10;
    pub const RGB: u8 = 0x00;
    pub const BGR: u8 = 0x08;
    pub const MH: u8 = 0x04;
}

/// 16 bits per pixel on both the RGB and MCU interfaces.
pub const PIXEL_FORMAT_16BIT: u8 = 0x55;
