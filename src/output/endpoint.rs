use std::io::{self, Write};
use std::path::PathBuf;

use embedded_hal::spi::{Error as _, SpiBus};
use serde::Deserialize;
use spidev::{SpiModeFlags, Spidev, SpidevOptions};

use super::DeviceEndpoint;
use crate::error::DeviceWriteError;

/// SPI bus and chip-select pair of a physical output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub struct DeviceAddress {
    pub bus: u8,
    pub device: u8,
}

impl DeviceAddress {
    pub const fn new(bus: u8, device: u8) -> Self {
        Self { bus, device }
    }

    /// Linux `spidev` node for this address.
    pub fn spidev_path(self) -> PathBuf {
        PathBuf::from(format!("/dev/spidev{}.{}", self.bus, self.device))
    }
}

/// Linux `spidev` character device.
///
/// The node is configured for SPI mode 0 at the requested clock when it is
/// opened. Each `write(2)` is then one half-duplex transfer.
pub struct SpidevEndpoint {
    address: DeviceAddress,
    spi: Spidev,
}

impl SpidevEndpoint {
    /// Open the node for `address` and set its clock to `clock_hz`.
    pub fn open(address: DeviceAddress, clock_hz: u32) -> io::Result<Self> {
        let mut spi = Spidev::open(address.spidev_path())?;
        let options = SpidevOptions::new()
            .bits_per_word(8)
            .max_speed_hz(clock_hz)
            .mode(SpiModeFlags::SPI_MODE_0)
            .build();
        spi.configure(&options)?;
        log::debug!(
            "{}: mode 0 at {clock_hz} Hz",
            address.spidev_path().display()
        );
        Ok(Self { address, spi })
    }

    pub const fn address(&self) -> DeviceAddress {
        self.address
    }
}

impl DeviceEndpoint for SpidevEndpoint {
    fn write(&mut self, frame: &[u8]) -> Result<Option<Vec<u8>>, DeviceWriteError> {
        // spidev transfers each write as one message, no partial retries
        let written = self.spi.write(frame)?;
        if written != frame.len() {
            return Err(DeviceWriteError::ShortWrite {
                written,
                expected: frame.len(),
            });
        }
        Ok(None)
    }
}

/// Any `embedded-hal` SPI bus.
pub struct SpiBusEndpoint<B> {
    bus: B,
}

impl<B: SpiBus<u8>> SpiBusEndpoint<B> {
    pub const fn new(bus: B) -> Self {
        Self { bus }
    }

    pub fn into_inner(self) -> B {
        self.bus
    }
}

impl<B: SpiBus<u8> + Send> DeviceEndpoint for SpiBusEndpoint<B> {
    fn write(&mut self, frame: &[u8]) -> Result<Option<Vec<u8>>, DeviceWriteError> {
        self.bus
            .write(frame)
            .and_then(|()| self.bus.flush())
            .map_err(|err| DeviceWriteError::Bus(err.kind()))?;
        Ok(None)
    }
}

/// Endpoint that echoes every frame back, for running without hardware.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoopbackEndpoint;

impl DeviceEndpoint for LoopbackEndpoint {
    fn write(&mut self, frame: &[u8]) -> Result<Option<Vec<u8>>, DeviceWriteError> {
        Ok(Some(frame.to_vec()))
    }
}
