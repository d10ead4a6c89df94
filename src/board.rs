//! Per-board pin assignments.
//!
//! Each supported board maps to a `BoardConfig` value. Drivers receive
//! resolved pin numbers from it; nothing here is global or mutable.

use core::fmt;
use core::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Platform {
    TSim7000g,
    TA7670,
    TA7608xS3,
    TSim7670g,
}

/// Board identifier not in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnsupportedPlatform;

impl fmt::Display for UnsupportedPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unsupported platform")
    }
}

impl core::error::Error for UnsupportedPlatform {}

impl FromStr for Platform {
    type Err = UnsupportedPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LILYGO_T_SIM7000G" => Ok(Platform::TSim7000g),
            "LILYGO_T_A7670" => Ok(Platform::TA7670),
            "LILYGO_T_A7608X_S3" => Ok(Platform::TA7608xS3),
            "LILYGO_T_SIM7670G" => Ok(Platform::TSim7670g),
            _ => Err(UnsupportedPlatform),
        }
    }
}

impl Platform {
    pub fn name(self) -> &'static str {
        match self {
            Platform::TSim7000g => "LILYGO_T_SIM7000G",
            Platform::TA7670 => "LILYGO_T_A7670",
            Platform::TA7608xS3 => "LILYGO_T_A7608X_S3",
            Platform::TSim7670g => "LILYGO_T_SIM7670G",
        }
    }

    pub const fn config(self) -> BoardConfig {
        match self {
            Platform::TSim7000g => T_SIM7000G,
            Platform::TA7670 => T_A7670,
            Platform::TA7608xS3 => T_A7608X_S3,
            Platform::TSim7670g => T_SIM7670G,
        }
    }
}

/// Resolve a board identifier string to its pin table.
pub fn config_for(name: &str) -> Result<BoardConfig, UnsupportedPlatform> {
    name.parse::<Platform>().map(Platform::config)
}

/// SPI/UART/I2C pins of the SimShield add-on board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SimShieldPins {
    pub mosi: u8,
    pub miso: u8,
    pub sck: u8,
    pub sd_cs: u8,
    pub radio_busy: u8,
    pub radio_cs: u8,
    pub radio_irq: u8,
    pub radio_rst: u8,
    pub rs_rx: u8,
    pub rs_tx: u8,
    pub sda: u8,
    pub scl: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardConfig {
    pub modem_baudrate: u32,
    pub modem_dtr_pin: u8,
    pub modem_tx_pin: u8,
    pub modem_rx_pin: u8,
    pub modem_ring_pin: Option<u8>,
    pub modem_reset_pin: Option<u8>,
    /// Level that holds the modem in reset
    pub modem_reset_level: Option<bool>,
    pub modem_gps_enable_gpio: u8,
    pub modem_gps_enable_level: bool,
    pub board_pwrkey_pin: u8,
    pub board_poweron_pin: Option<u8>,
    pub board_led_pin: Option<u8>,
    /// Level that lights the LED
    pub led_on: Option<bool>,
    pub board_miso_pin: u8,
    pub board_mosi_pin: u8,
    pub board_sck_pin: u8,
    pub board_sd_cs_pin: u8,
    pub board_bat_adc_pin: u8,
    pub board_solar_adc_pin: Option<u8>,
    pub simshield: Option<SimShieldPins>,
}

const T_SIM7000G: BoardConfig = BoardConfig {
    modem_baudrate: 115_200,
    modem_dtr_pin: 25,
    modem_tx_pin: 27,
    modem_rx_pin: 26,
    modem_ring_pin: None,
    modem_reset_pin: None,
    modem_reset_level: None,
    modem_gps_enable_gpio: 0,
    modem_gps_enable_level: true,
    board_pwrkey_pin: 4,
    board_poweron_pin: None,
    board_led_pin: Some(12),
    led_on: Some(false),
    board_miso_pin: 2,
    board_mosi_pin: 15,
    board_sck_pin: 14,
    board_sd_cs_pin: 13,
    board_bat_adc_pin: 35,
    board_solar_adc_pin: Some(36),
    simshield: Some(SimShieldPins {
        mosi: 23,
        miso: 19,
        sck: 18,
        sd_cs: 32,
        radio_busy: 39,
        radio_cs: 5,
        radio_irq: 34,
        radio_rst: 15,
        rs_rx: 13,
        rs_tx: 14,
        sda: 21,
        scl: 22,
    }),
};

const T_A7670: BoardConfig = BoardConfig {
    modem_baudrate: 115_200,
    modem_dtr_pin: 25,
    modem_tx_pin: 26,
    modem_rx_pin: 27,
    modem_ring_pin: Some(33),
    modem_reset_pin: Some(5),
    modem_reset_level: Some(true),
    modem_gps_enable_gpio: 0,
    modem_gps_enable_level: false,
    board_pwrkey_pin: 4,
    board_poweron_pin: Some(12),
    board_led_pin: None,
    led_on: None,
    board_miso_pin: 2,
    board_mosi_pin: 15,
    board_sck_pin: 14,
    board_sd_cs_pin: 13,
    board_bat_adc_pin: 35,
    board_solar_adc_pin: None,
    simshield: None,
};

const T_A7608X_S3: BoardConfig = BoardConfig {
    modem_baudrate: 115_200,
    modem_dtr_pin: 7,
    modem_tx_pin: 17,
    modem_rx_pin: 18,
    modem_ring_pin: Some(6),
    modem_reset_pin: Some(16),
    modem_reset_level: Some(false),
    modem_gps_enable_gpio: 0,
    modem_gps_enable_level: true,
    board_pwrkey_pin: 15,
    board_poweron_pin: Some(12),
    board_led_pin: None,
    led_on: None,
    board_miso_pin: 47,
    board_mosi_pin: 14,
    board_sck_pin: 21,
    board_sd_cs_pin: 13,
    board_bat_adc_pin: 4,
    board_solar_adc_pin: Some(3),
    simshield: None,
};

const T_SIM7670G: BoardConfig = BoardConfig {
    modem_baudrate: 115_200,
    modem_dtr_pin: 9,
    modem_tx_pin: 11,
    modem_rx_pin: 10,
    modem_ring_pin: Some(3),
    modem_reset_pin: Some(17),
    modem_reset_level: Some(false),
    modem_gps_enable_gpio: 4,
    modem_gps_enable_level: true,
    board_pwrkey_pin: 18,
    board_poweron_pin: Some(12),
    board_led_pin: Some(12),
    led_on: None,
    board_miso_pin: 47,
    board_mosi_pin: 14,
    board_sck_pin: 21,
    board_sd_cs_pin: 13,
    board_bat_adc_pin: 4,
    board_solar_adc_pin: Some(5),
    simshield: None,
};
