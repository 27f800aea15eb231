use super::Stage;
use crate::context::RenderContext;
use crate::sk9822::encode_frame;

/// Encode every channel in the color table and hand it to its device.
///
/// Channels without a device are skipped. Device errors are reported by the
/// channel's writer and never reach the frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct Drive;

impl Stage for Drive {
    fn apply(&mut self, ctx: &mut RenderContext) {
        for (&channel, colors) in &ctx.channel_colors {
            let frame = encode_frame(colors, ctx.brightness);
            if !ctx.output.submit(channel, frame) {
                log::trace!("channel {channel}: no device bound");
            }
        }
    }
}
