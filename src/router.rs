//! Channel admission and color table updates.

use std::collections::BTreeMap;

use crate::color::ColorSequence;
use crate::error::{Result, RoutingError};
use crate::opc::{Channel, Command, OpcMessage};

/// Current colors of every channel that received an update.
///
/// Ordered by channel so frames are always written in the same order.
pub type ColorTable = BTreeMap<Channel, ColorSequence>;

/// What routing did with an accepted message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// The channel's colors were replaced.
    Updated { channel: Channel, leds: usize },
    /// Command has no defined effect; the table is untouched.
    Ignored { channel: Channel, command: Command },
}

/// Validates channel ids against the panel count and applies updates.
#[derive(Debug, Clone, Copy)]
pub struct ChannelRouter {
    max_panels: u8,
}

impl ChannelRouter {
    pub const fn new(max_panels: u8) -> Self {
        Self { max_panels }
    }

    pub const fn max_panels(&self) -> u8 {
        self.max_panels
    }

    /// True if `channel` is in `[0, max_panels)`.
    pub const fn admits(&self, channel: Channel) -> bool {
        channel < self.max_panels
    }

    /// Apply `message` to `table`.
    ///
    /// A set-pixel message replaces the channel's whole sequence, so a
    /// channel never shows a mix of two updates. On error the table is
    /// left as it was.
    pub fn route(&self, table: &mut ColorTable, message: &OpcMessage) -> Result<RouteOutcome> {
        let channel = message.channel();
        if !self.admits(channel) {
            return Err(RoutingError::ChannelOutOfRange {
                channel,
                max_panels: self.max_panels,
            }
            .into());
        }

        match message.command() {
            Command::SetPixelColors => {
                let colors = message.colors()?;
                let leds = colors.len();
                table.insert(channel, colors);
                Ok(RouteOutcome::Updated { channel, leds })
            }
            command @ (Command::SystemExclusive | Command::Reserved(_)) => {
                Ok(RouteOutcome::Ignored { channel, command })
            }
        }
    }
}
