//! LED output.
//!
//! Each channel is bound to a [`DeviceEndpoint`] owned by its own writer
//! thread. The render loop only hands finished frames over, so a slow or
//! failing device never stalls the next frame or the other channels.

mod endpoint;
mod mailbox;
mod writer;

use std::collections::BTreeMap;
use std::io;

use embassy_time::{Duration, Instant};

pub use endpoint::{DeviceAddress, LoopbackEndpoint, SpiBusEndpoint, SpidevEndpoint};
pub use writer::{FrameWriter, WriteStats};

use crate::error::DeviceWriteError;
use crate::opc::Channel;

/// A physical output that accepts encoded frames.
///
/// Implement this trait to support different hardware platforms.
pub trait DeviceEndpoint: Send {
    /// Write one frame to the device.
    ///
    /// Returns `Some(echo)` for endpoints that read back what they clocked
    /// out (loopback). Echoed data is not an error.
    fn write(&mut self, frame: &[u8]) -> Result<Option<Vec<u8>>, DeviceWriteError>;
}

impl<E: DeviceEndpoint + ?Sized> DeviceEndpoint for Box<E> {
    fn write(&mut self, frame: &[u8]) -> Result<Option<Vec<u8>>, DeviceWriteError> {
        (**self).write(frame)
    }
}

/// Hand a frame to `endpoint`, logging a failure.
///
/// No retry: the next frame is the retry.
pub fn write_frame<E: DeviceEndpoint + ?Sized>(
    endpoint: &mut E,
    channel: Channel,
    frame: &[u8],
) -> Result<(), DeviceWriteError> {
    match endpoint.write(frame) {
        Ok(Some(echo)) => {
            log::trace!("channel {channel}: loopback returned {} bytes", echo.len());
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(err) => {
            log::error!("channel {channel}: device write failed: {err}");
            Err(err)
        }
    }
}

/// Channel to device bindings.
#[derive(Default)]
pub struct OutputDriver {
    writers: BTreeMap<Channel, FrameWriter>,
}

impl OutputDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `channel` to `endpoint`, replacing any previous binding.
    pub fn bind<E>(&mut self, channel: Channel, endpoint: E) -> io::Result<()>
    where
        E: DeviceEndpoint + 'static,
    {
        let writer = FrameWriter::spawn(channel, endpoint)?;
        // Dropping the old writer lets its last frame finish first
        self.writers.insert(channel, writer);
        Ok(())
    }

    /// Bound channels in ascending order.
    pub fn channels(&self) -> impl Iterator<Item = Channel> + '_ {
        self.writers.keys().copied()
    }

    pub fn is_bound(&self, channel: Channel) -> bool {
        self.writers.contains_key(&channel)
    }

    /// Queue a frame for `channel`.
    ///
    /// Returns false if the channel has no device.
    pub fn submit(&self, channel: Channel, frame: Vec<u8>) -> bool {
        match self.writers.get(&channel) {
            Some(writer) => {
                writer.submit(frame);
                true
            }
            None => false,
        }
    }

    pub fn stats(&self, channel: Channel) -> Option<WriteStats> {
        self.writers.get(&channel).map(FrameWriter::stats)
    }

    /// Block until every submitted frame was written, failed or skipped.
    ///
    /// Returns false if `timeout` passed first.
    pub fn wait_idle(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            if self.writers.values().all(FrameWriter::is_idle) {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
    }
}
