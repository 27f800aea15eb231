//! Open Pixel Control wire protocol.
//!
//! Every message is a 4-byte header followed by the payload:
//!
//! ```text
//! ┌─────────┬─────────┬──────────────┬──────────────────────┐
//! │ channel │ command │ length (BE)  │ payload (length B)   │
//! │ 1 B     │ 1 B     │ 2 B          │                      │
//! └─────────┴─────────┴──────────────┴──────────────────────┘
//! ```
//!
//! For [`Command::SetPixelColors`] the payload is a packed sequence of
//! RGB triples, one per LED.

mod codec;
mod stream;

pub use codec::{HEADER_SIZE, decode, decode_prefix, encode};
pub use stream::StreamDecoder;

use crate::color::{ColorSequence, Rgb};
use crate::error::DecodeError;

/// Output lane identifier.
pub type Channel = u8;

const COMMAND_SET_PIXEL_COLORS: u8 = 0;
const COMMAND_SYSTEM_EXCLUSIVE: u8 = 255;

/// Largest payload the length field can describe.
pub const MAX_PAYLOAD_LEN: usize = u16::MAX as usize;

/// OPC command byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Replace the colors of a channel.
    SetPixelColors,
    /// Vendor specific message, accepted but not interpreted.
    SystemExclusive,
    /// Any other command byte.
    Reserved(u8),
}

impl From<u8> for Command {
    fn from(value: u8) -> Self {
        match value {
            COMMAND_SET_PIXEL_COLORS => Self::SetPixelColors,
            COMMAND_SYSTEM_EXCLUSIVE => Self::SystemExclusive,
            other => Self::Reserved(other),
        }
    }
}

impl From<Command> for u8 {
    fn from(command: Command) -> Self {
        match command {
            Command::SetPixelColors => COMMAND_SET_PIXEL_COLORS,
            Command::SystemExclusive => COMMAND_SYSTEM_EXCLUSIVE,
            Command::Reserved(other) => other,
        }
    }
}

/// A decoded OPC message.
///
/// The payload length always equals the header's declared length, so a
/// value of this type can always be encoded back to the same bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpcMessage {
    channel: Channel,
    command: Command,
    payload: Vec<u8>,
}

impl OpcMessage {
    /// Create a message from raw parts.
    pub fn new(
        channel: Channel,
        command: Command,
        payload: Vec<u8>,
    ) -> Result<Self, DecodeError> {
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(DecodeError::PayloadTooLarge { len: payload.len() });
        }
        Ok(Self {
            channel,
            command,
            payload,
        })
    }

    /// Create a set-pixel message carrying `colors`.
    pub fn set_pixel_colors(channel: Channel, colors: &[Rgb]) -> Result<Self, DecodeError> {
        let payload = colors.iter().flat_map(|c| [c.r, c.g, c.b]).collect();
        Self::new(channel, Command::SetPixelColors, payload)
    }

    pub const fn channel(&self) -> Channel {
        self.channel
    }

    pub const fn command(&self) -> Command {
        self.command
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Interpret the payload as packed RGB triples.
    ///
    /// A trailing partial triple makes the whole payload malformed.
    pub fn colors(&self) -> Result<ColorSequence, DecodeError> {
        if !self.payload.len().is_multiple_of(3) {
            return Err(DecodeError::MalformedPayload {
                len: self.payload.len(),
            });
        }
        Ok(self
            .payload
            .chunks_exact(3)
            .map(|rgb| Rgb::new(rgb[0], rgb[1], rgb[2]))
            .collect())
    }

    /// Size of the encoded message on the wire.
    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + self.payload.len()
    }
}
