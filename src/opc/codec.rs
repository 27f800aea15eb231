use super::{Command, OpcMessage};
use crate::error::DecodeError;

/// Header size: channel, command and a big-endian 16-bit length.
pub const HEADER_SIZE: usize = 4;

/// Decode one message from the start of `bytes`.
///
/// Returns the message and the number of bytes it occupied. Bytes after the
/// message are left for the caller, so a datagram carrying several messages
/// can be walked with repeated calls.
pub fn decode_prefix(bytes: &[u8]) -> Result<(OpcMessage, usize), DecodeError> {
    let Some(header) = bytes.first_chunk::<HEADER_SIZE>() else {
        return Err(DecodeError::TruncatedHeader {
            available: bytes.len(),
        });
    };
    let [channel, command, len_hi, len_lo] = *header;
    let declared = usize::from(u16::from_be_bytes([len_hi, len_lo]));
    let total = HEADER_SIZE + declared;

    let Some(payload) = bytes.get(HEADER_SIZE..total) else {
        return Err(DecodeError::TruncatedPayload {
            declared,
            available: bytes.len() - HEADER_SIZE,
        });
    };

    let message = OpcMessage {
        channel,
        command: Command::from(command),
        payload: payload.to_vec(),
    };
    Ok((message, total))
}

/// Decode one message from `bytes`.
pub fn decode(bytes: &[u8]) -> Result<OpcMessage, DecodeError> {
    decode_prefix(bytes).map(|(message, _)| message)
}

/// Encode a message to its wire form.
///
/// Always produces `HEADER_SIZE + payload.len()` bytes.
#[allow(clippy::cast_possible_truncation)]
pub fn encode(message: &OpcMessage) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(message.encoded_len());
    buffer.push(message.channel);
    buffer.push(u8::from(message.command));
    // Length is bounded by `OpcMessage::new`
    buffer.extend_from_slice(&(message.payload.len() as u16).to_be_bytes());
    buffer.extend_from_slice(&message.payload);
    buffer
}
