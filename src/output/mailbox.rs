//! Single-slot frame hand-over between the render loop and a writer thread.
//!
//! The slot holds at most one pending frame. Putting a frame while one is
//! pending replaces it, so a device that falls behind skips stale frames
//! instead of building a queue.

use crossbeam_channel::{Receiver, Sender, TryRecvError, TrySendError, bounded};

/// Outcome of [`FrameMailbox::put`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Put {
    /// The slot was empty.
    Queued,
    /// A pending frame was dropped in favour of the new one.
    Replaced,
    /// The writer side is gone.
    Closed,
}

pub(crate) struct FrameMailbox {
    tx: Sender<Vec<u8>>,
    // Kept to pull back a stale frame before it is written
    rx: Receiver<Vec<u8>>,
}

impl FrameMailbox {
    pub(crate) fn new() -> Self {
        let (tx, rx) = bounded(1);
        Self { tx, rx }
    }

    /// Receiving end for the writer thread.
    pub(crate) fn receiver(&self) -> Receiver<Vec<u8>> {
        self.rx.clone()
    }

    pub(crate) fn put(&self, frame: Vec<u8>) -> Put {
        let mut frame = frame;
        let mut outcome = Put::Queued;
        loop {
            match self.tx.try_send(frame) {
                Ok(()) => return outcome,
                Err(TrySendError::Full(rejected)) => {
                    frame = rejected;
                    match self.rx.try_recv() {
                        Ok(_stale) => outcome = Put::Replaced,
                        // The writer took it in the meantime
                        Err(TryRecvError::Empty) => {}
                        Err(TryRecvError::Disconnected) => return Put::Closed,
                    }
                }
                Err(TrySendError::Disconnected(_)) => return Put::Closed,
            }
        }
    }
}
