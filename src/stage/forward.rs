use std::collections::BTreeSet;
use std::io::Write;

use super::Stage;
use crate::context::RenderContext;
use crate::opc::{Channel, OpcMessage, encode};

/// Client role: send the color table to another OPC server.
///
/// Each channel is written as one set-pixel message. A failing sink, and a
/// channel too long for one message, are logged when the condition starts
/// and when it clears, not on every frame.
pub struct Forward {
    sink: Box<dyn Write + Send>,
    failing: bool,
    oversized: BTreeSet<Channel>,
}

impl Forward {
    pub fn new<W: Write + Send + 'static>(sink: W) -> Self {
        Self {
            sink: Box::new(sink),
            failing: false,
            oversized: BTreeSet::new(),
        }
    }

    fn send(&mut self, ctx: &RenderContext) -> std::io::Result<()> {
        for (&channel, colors) in &ctx.channel_colors {
            match OpcMessage::set_pixel_colors(channel, colors) {
                Ok(message) => {
                    if self.oversized.remove(&channel) {
                        log::info!("channel {channel}: forwarding again");
                    }
                    self.sink.write_all(&encode(&message))?;
                }
                Err(err) => {
                    if self.oversized.insert(channel) {
                        log::warn!("channel {channel}: not forwarded: {err}");
                    }
                }
            }
        }
        self.sink.flush()
    }
}

impl Stage for Forward {
    fn apply(&mut self, ctx: &mut RenderContext) {
        match self.send(ctx) {
            Ok(()) if self.failing => {
                self.failing = false;
                log::info!("OPC forward sink recovered");
            }
            Ok(()) => {}
            Err(err) if !self.failing => {
                self.failing = true;
                log::error!("OPC forward failed: {err}");
            }
            Err(_) => {}
        }
    }
}
