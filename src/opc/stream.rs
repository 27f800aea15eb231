//! Decoder for stream transports.
//!
//! A single read may return part of a header, part of a payload, or several
//! messages at once. The decoder accumulates bytes and yields each complete
//! message exactly once; a truncated tail simply waits for more input.

use super::OpcMessage;
use super::codec::decode_prefix;

/// Streaming OPC decoder.
#[derive(Debug, Default)]
pub struct StreamDecoder {
    buffer: Vec<u8>,
}

impl StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed bytes received from the transport.
    pub fn feed(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Take the next complete message, if one is buffered.
    ///
    /// Truncation is the only way decoding a header can fail, so an error
    /// here just means more bytes are needed.
    pub fn next_message(&mut self) -> Option<OpcMessage> {
        let (message, consumed) = decode_prefix(&self.buffer).ok()?;
        self.buffer.drain(..consumed);
        Some(message)
    }

    /// Feed bytes and collect every message they complete.
    pub fn decode(&mut self, data: &[u8]) -> Vec<OpcMessage> {
        self.feed(data);
        core::iter::from_fn(|| self.next_message()).collect()
    }

    /// Number of bytes waiting for the rest of their message.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Drop buffered bytes (e.g. after a reconnect).
    pub fn reset(&mut self) {
        self.buffer.clear();
    }
}
