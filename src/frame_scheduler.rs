//! Frame scheduling and throughput accounting.
//!
//! One [`FrameScheduler::tick`] is one indivisible unit of work: pending OPC
//! messages are routed, then the pipeline runs. Nothing else touches the
//! render context, so routing and rendering never interleave.

use embassy_time::{Duration, Instant};

use crate::channel::MessageReceiver;
use crate::color::describe;
use crate::context::RenderContext;
use crate::pipeline::Pipeline;

/// Minimum time between throughput reports.
pub const REPORT_INTERVAL: Duration = Duration::from_secs(1);

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// Frames rendered so far, this one included.
    pub frames: u64,
    /// Throughput, if this tick produced a report.
    pub report: Option<f32>,
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (zero when unpaced or behind).
    pub sleep_duration: Duration,
}

/// Drives the pipeline and keeps the frame statistics.
///
/// Unpaced by default: the next frame starts as soon as the previous one is
/// handed to the devices. With a frame duration set, the scheduler computes
/// a deadline per frame and skips the backlog after a stall instead of
/// catching up.
pub struct FrameScheduler<'a, const INBOX_SIZE: usize> {
    pipeline: Pipeline,
    context: RenderContext,
    inbox: Option<MessageReceiver<'a, INBOX_SIZE>>,
    frame_duration: Option<Duration>,
    next_frame: Instant,
}

impl<'a, const INBOX_SIZE: usize> FrameScheduler<'a, INBOX_SIZE> {
    pub fn new(pipeline: Pipeline, context: RenderContext) -> Self {
        let next_frame = context.start();
        Self {
            pipeline,
            context,
            inbox: None,
            frame_duration: None,
            next_frame,
        }
    }

    /// Route messages from `inbox` at the start of every frame.
    #[must_use]
    pub fn with_inbox(mut self, inbox: MessageReceiver<'a, INBOX_SIZE>) -> Self {
        self.inbox = Some(inbox);
        self
    }

    /// Pace frames to `frame_rate` per second.
    #[must_use]
    pub fn with_frame_rate(mut self, frame_rate: u32) -> Self {
        let micros = 1_000_000 / u64::from(frame_rate.max(1));
        self.frame_duration = Some(Duration::from_micros(micros));
        self
    }

    /// Process one frame and return timing information.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        if let Some(frame_duration) = self.frame_duration {
            // More than two frames behind: start over from now
            let max_drift = frame_duration * 2;
            if now > self.next_frame + max_drift {
                self.next_frame = now;
            }
        }

        self.process_messages();
        self.pipeline.run(&mut self.context);
        let report = self.record_frame(now);

        let (next_deadline, sleep_duration) = match self.frame_duration {
            Some(frame_duration) => {
                self.next_frame += frame_duration;
                let sleep = if self.next_frame > now {
                    self.next_frame - now
                } else {
                    Duration::from_ticks(0)
                };
                (self.next_frame, sleep)
            }
            None => (now, Duration::from_ticks(0)),
        };

        FrameResult {
            frames: self.context.frames,
            report,
            next_deadline,
            sleep_duration,
        }
    }

    /// Run forever.
    pub fn run(&mut self) -> ! {
        log::info!(
            "frame scheduler running: {}",
            self.pipeline.names().collect::<Vec<_>>().join(" -> ")
        );
        loop {
            let result = self.tick(Instant::now());
            if result.sleep_duration.as_ticks() > 0 {
                std::thread::sleep(std::time::Duration::from_micros(
                    result.sleep_duration.as_micros(),
                ));
            }
        }
    }

    pub const fn context(&self) -> &RenderContext {
        &self.context
    }

    pub const fn context_mut(&mut self) -> &mut RenderContext {
        &mut self.context
    }

    pub const fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    fn process_messages(&mut self) {
        let Some(inbox) = self.inbox else {
            return;
        };
        for message in inbox.try_iter() {
            self.context.route(&message);
        }
    }

    /// Count the frame and report throughput at most once per interval.
    #[allow(clippy::cast_precision_loss)]
    fn record_frame(&mut self, now: Instant) -> Option<f32> {
        let ctx = &mut self.context;
        ctx.frames += 1;

        if now.saturating_duration_since(ctx.last_report) < REPORT_INTERVAL {
            return None;
        }

        let elapsed = now.saturating_duration_since(ctx.start).as_micros() as f32 / 1_000_000.0;
        ctx.rate = ctx.frames as f32 / elapsed.max(1.0);
        ctx.last_report = now;

        match ctx.channel_colors.values().find_map(|colors| colors.first()) {
            Some(color) => log::info!("{} : {:.2} fps", describe(*color), ctx.rate),
            None => log::info!("{:.2} fps", ctx.rate),
        }
        Some(ctx.rate)
    }
}
