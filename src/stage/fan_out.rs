use super::Stage;
use crate::context::RenderContext;
use crate::opc::Channel;

/// Copy the generated colors to channels.
///
/// Each target channel's entry is replaced as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FanOut {
    /// Every channel bound to a device.
    All,
    /// Only the listed channels.
    Channels(Vec<Channel>),
}

impl Stage for FanOut {
    fn apply(&mut self, ctx: &mut RenderContext) {
        let targets: Vec<Channel> = match self {
            Self::All => ctx.output.channels().collect(),
            Self::Channels(channels) => channels
                .iter()
                .copied()
                .filter(|channel| ctx.router().admits(*channel))
                .collect(),
        };
        for channel in targets {
            ctx.channel_colors.insert(channel, ctx.colors.clone());
        }
    }
}
