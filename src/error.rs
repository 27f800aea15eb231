//! Error types for the OPC receive path and the LED output path.
//!
//! None of these are fatal: each one is logged where it is recovered and the
//! render loop keeps going.

use thiserror::Error;

/// Failure to turn raw bytes into an [`OpcMessage`](crate::OpcMessage).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Fewer than four bytes were available for the header.
    #[error("truncated header: {available} of 4 bytes")]
    TruncatedHeader { available: usize },

    /// The header declared more payload than was received.
    #[error("truncated payload: header declares {declared} bytes, {available} available")]
    TruncatedPayload { declared: usize, available: usize },

    /// Set-pixel payload is not a whole number of RGB triples.
    #[error("malformed payload: {len} bytes is not a multiple of 3")]
    MalformedPayload { len: usize },

    /// Payload does not fit the 16-bit length field.
    #[error("payload too large: {len} bytes exceeds {max}", max = u16::MAX)]
    PayloadTooLarge { len: usize },
}

/// Message addressed to a channel that is not admitted.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingError {
    #[error("channel {channel} out of range (max panels {max_panels})")]
    ChannelOutOfRange { channel: u8, max_panels: u8 },
}

/// Failure reported by a device endpoint.
#[derive(Error, Debug)]
pub enum DeviceWriteError {
    /// Character device or socket error.
    #[error("device I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error reported by an `embedded-hal` SPI bus.
    #[error("SPI bus error: {0:?}")]
    Bus(embedded_hal::spi::ErrorKind),

    /// The endpoint accepted fewer bytes than the frame holds.
    #[error("short write: {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },

    /// The writer thread for this channel is gone.
    #[error("device writer disconnected")]
    Disconnected,
}

/// Crate level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Routing(#[from] RoutingError),

    #[error(transparent)]
    DeviceWrite(#[from] DeviceWriteError),
}

/// Result type for fallible operations in this crate.
pub type Result<T> = core::result::Result<T, Error>;
