//! Startup configuration.
//!
//! Read once when the render context is built; nothing here is checked again
//! at runtime.

use serde::Deserialize;

use crate::output::DeviceAddress;

/// Default OPC listening port.
pub const DEFAULT_OPC_PORT: u16 = 42069;

/// Default number of admitted channels.
pub const DEFAULT_MAX_PANELS: u8 = 4;

/// Default LED count for generated patterns.
pub const DEFAULT_LED_COUNT: usize = 360;

/// Default `spidev` clock in Hz.
pub const DEFAULT_SPI_CLOCK_HZ: u32 = 500_000;

/// Transport the OPC server listens on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    #[default]
    Tcp,
    Udp,
}

/// Procedural pattern rendered ahead of the OPC colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    /// Only colors received over OPC are shown.
    #[default]
    None,
    /// Every LED shows the same slowly cycling hue.
    SingleRainbow,
    /// A rainbow that travels along the strip.
    RainbowFlow,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Port used to listen for OPC messages.
    pub opc_port: u16,
    /// Largest number of panels this controller can address.
    pub max_panels: u8,
    /// Global brightness, 0.0-1.0.
    pub brightness: f32,
    pub transport: Transport,
    /// Target frames per second; `None` renders back to back.
    pub frame_rate: Option<u32>,
    /// LEDs per channel for generated patterns.
    pub led_count: usize,
    pub pattern: Pattern,
    /// Output devices, bound to channels 0, 1, ... in order.
    pub devices: Vec<DeviceAddress>,
    /// Clock for every `spidev` output.
    pub spi_clock_hz: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            opc_port: DEFAULT_OPC_PORT,
            max_panels: DEFAULT_MAX_PANELS,
            brightness: 1.0,
            transport: Transport::default(),
            frame_rate: None,
            led_count: DEFAULT_LED_COUNT,
            pattern: Pattern::default(),
            devices: vec![
                DeviceAddress::new(0, 0),
                DeviceAddress::new(0, 1),
                DeviceAddress::new(1, 0),
                DeviceAddress::new(1, 1),
            ],
            spi_clock_hz: DEFAULT_SPI_CLOCK_HZ,
        }
    }
}
