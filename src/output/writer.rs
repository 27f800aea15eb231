use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::JoinHandle;

use crossbeam_channel::Receiver;

use super::mailbox::{FrameMailbox, Put};
use super::{DeviceEndpoint, write_frame};
use crate::error::DeviceWriteError;
use crate::opc::Channel;

/// Per-channel write counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteStats {
    /// Frames handed to the writer.
    pub submitted: u64,
    /// Frames the device accepted.
    pub written: u64,
    /// Frames the device rejected.
    pub failed: u64,
    /// Frames replaced before they were written.
    pub skipped: u64,
}

impl WriteStats {
    /// Frames not yet accounted for (pending or in flight).
    pub const fn outstanding(&self) -> u64 {
        self.submitted
            .saturating_sub(self.written + self.failed + self.skipped)
    }
}

#[derive(Debug, Default)]
struct Counters {
    submitted: AtomicU64,
    written: AtomicU64,
    failed: AtomicU64,
    skipped: AtomicU64,
    disconnected: AtomicBool,
}

impl Counters {
    fn snapshot(&self) -> WriteStats {
        WriteStats {
            submitted: self.submitted.load(Ordering::Acquire),
            written: self.written.load(Ordering::Acquire),
            failed: self.failed.load(Ordering::Acquire),
            skipped: self.skipped.load(Ordering::Acquire),
        }
    }
}

/// Writer thread for one channel.
///
/// At most one write is in flight and at most one frame waits behind it.
/// A frame submitted while another is waiting replaces it.
pub struct FrameWriter {
    channel: Channel,
    mailbox: Option<FrameMailbox>,
    counters: Arc<Counters>,
    thread: Option<JoinHandle<()>>,
}

impl FrameWriter {
    /// Move `endpoint` onto a new writer thread.
    pub fn spawn<E>(channel: Channel, endpoint: E) -> io::Result<Self>
    where
        E: DeviceEndpoint + 'static,
    {
        let mailbox = FrameMailbox::new();
        let counters = Arc::new(Counters::default());
        let frames = mailbox.receiver();
        let thread_counters = Arc::clone(&counters);

        let thread = std::thread::Builder::new()
            .name(format!("opc-writer-{channel}"))
            .spawn(move || write_loop(channel, endpoint, &frames, &thread_counters))?;

        log::debug!("channel {channel}: writer started");
        Ok(Self {
            channel,
            mailbox: Some(mailbox),
            counters,
            thread: Some(thread),
        })
    }

    pub const fn channel(&self) -> Channel {
        self.channel
    }

    /// Hand a frame to the writer without waiting for the device.
    pub fn submit(&self, frame: Vec<u8>) {
        let Some(mailbox) = &self.mailbox else {
            return;
        };
        // Count before the hand-over so `outstanding` never goes negative
        self.counters.submitted.fetch_add(1, Ordering::AcqRel);
        let finished = self.thread.as_ref().is_none_or(JoinHandle::is_finished);
        let put = if finished { Put::Closed } else { mailbox.put(frame) };
        match put {
            Put::Queued => {}
            Put::Replaced => {
                self.counters.skipped.fetch_add(1, Ordering::AcqRel);
                log::trace!("channel {}: skipped stale frame", self.channel);
            }
            Put::Closed => {
                self.counters.failed.fetch_add(1, Ordering::AcqRel);
                if !self.counters.disconnected.swap(true, Ordering::AcqRel) {
                    log::error!("channel {}: {}", self.channel, DeviceWriteError::Disconnected);
                }
            }
        }
    }

    pub fn stats(&self) -> WriteStats {
        self.counters.snapshot()
    }

    /// True when nothing is pending or in flight.
    pub fn is_idle(&self) -> bool {
        self.stats().outstanding() == 0
    }
}

impl Drop for FrameWriter {
    fn drop(&mut self) {
        // Closing the sender ends the loop once the pending frame is written
        self.mailbox.take();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("channel {}: writer thread panicked", self.channel);
            }
        }
    }
}

fn write_loop<E: DeviceEndpoint>(
    channel: Channel,
    mut endpoint: E,
    frames: &Receiver<Vec<u8>>,
    counters: &Counters,
) {
    while let Ok(frame) = frames.recv() {
        match write_frame(&mut endpoint, channel, &frame) {
            Ok(()) => counters.written.fetch_add(1, Ordering::AcqRel),
            Err(_) => counters.failed.fetch_add(1, Ordering::AcqRel),
        };
    }
    log::debug!("channel {channel}: writer stopped");
}
