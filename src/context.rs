//! Render context shared by the router, the pipeline stages and the
//! scheduler.

use embassy_time::Instant;

use crate::color::{ColorSequence, describe_all};
use crate::config::Config;
use crate::opc::OpcMessage;
use crate::output::OutputDriver;
use crate::router::{ChannelRouter, ColorTable, RouteOutcome};

/// Counters for inbound messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageStats {
    /// Messages that replaced a channel's colors.
    pub routed: u64,
    /// Messages with a reserved command.
    pub ignored: u64,
    /// Messages dropped for a routing or payload error.
    pub rejected: u64,
}

/// Session state for one controller.
///
/// Created once at startup and owned by the
/// [`FrameScheduler`](crate::FrameScheduler); stages get it by mutable
/// reference, one at a time.
pub struct RenderContext {
    /// Scratch colors written by generator stages, read by fan-out.
    pub colors: ColorSequence,
    /// Colors per channel, consumed by the drive stage.
    pub channel_colors: ColorTable,
    /// Global brightness, 0.0-1.0.
    pub brightness: f32,
    /// Channel to device bindings.
    pub output: OutputDriver,

    router: ChannelRouter,
    messages: MessageStats,

    pub(crate) frames: u64,
    pub(crate) start: Instant,
    pub(crate) last_report: Instant,
    pub(crate) rate: f32,
}

impl RenderContext {
    pub fn new(config: &Config, output: OutputDriver, now: Instant) -> Self {
        Self {
            colors: ColorSequence::new(),
            channel_colors: ColorTable::new(),
            brightness: config.brightness,
            output,
            router: ChannelRouter::new(config.max_panels),
            messages: MessageStats::default(),
            frames: 0,
            start: now,
            last_report: now,
            rate: 0.0,
        }
    }

    /// Route an inbound message into the color table.
    ///
    /// Errors are logged and counted here; the message is dropped and the
    /// table keeps its previous contents.
    pub fn route(&mut self, message: &OpcMessage) -> bool {
        match self.router.route(&mut self.channel_colors, message) {
            Ok(RouteOutcome::Updated { channel, leds }) => {
                self.messages.routed += 1;
                if log::log_enabled!(log::Level::Trace) {
                    if let Some(colors) = self.channel_colors.get(&channel) {
                        log::trace!("channel {channel}: {leds} colors\n{}", describe_all(colors));
                    }
                }
                true
            }
            Ok(RouteOutcome::Ignored { channel, command }) => {
                self.messages.ignored += 1;
                log::debug!("channel {channel}: ignoring command {command:?}");
                false
            }
            Err(err) => {
                self.messages.rejected += 1;
                log::warn!("dropping OPC message: {err}");
                false
            }
        }
    }

    pub const fn router(&self) -> &ChannelRouter {
        &self.router
    }

    pub const fn message_stats(&self) -> MessageStats {
        self.messages
    }

    /// Frames rendered since start.
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    pub const fn start(&self) -> Instant {
        self.start
    }

    pub const fn last_report(&self) -> Instant {
        self.last_report
    }

    /// Frames per second as of the last report.
    pub const fn rate(&self) -> f32 {
        self.rate
    }
}
