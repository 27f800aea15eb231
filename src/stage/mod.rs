//! Pipeline stages.
//!
//! Stages are stored in an enum so a pipeline is a plain list of values.
//! Each variant implements the [`Stage`] trait; `Custom` takes any other
//! implementation.

mod drive;
mod fan_out;
mod forward;
mod rainbow;

pub use drive::Drive;
pub use fan_out::FanOut;
pub use forward::Forward;
pub use rainbow::{RainbowFlow, SingleRainbow};

use crate::context::RenderContext;

/// A context transform run once per frame.
///
/// Stages must not fail the frame: anything that goes wrong inside a stage
/// is logged and handled there.
pub trait Stage {
    fn apply(&mut self, ctx: &mut RenderContext);
}

/// Stage slot - enum containing all known stages.
pub enum StageSlot {
    /// One cycling color on every LED.
    SingleRainbow(SingleRainbow),
    /// Rainbow travelling along the strip.
    RainbowFlow(RainbowFlow),
    /// Copy generated colors to channels.
    FanOut(FanOut),
    /// Encode and write every channel.
    Drive(Drive),
    /// Send every channel to another OPC server.
    Forward(Forward),
    /// User supplied stage.
    Custom(Box<dyn Stage + Send>),
}

impl StageSlot {
    /// Wrap a user stage.
    pub fn custom<S: Stage + Send + 'static>(stage: S) -> Self {
        Self::Custom(Box::new(stage))
    }

    /// Short name for logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SingleRainbow(_) => "single_rainbow",
            Self::RainbowFlow(_) => "rainbow_flow",
            Self::FanOut(_) => "fan_out",
            Self::Drive(_) => "drive",
            Self::Forward(_) => "forward",
            Self::Custom(_) => "custom",
        }
    }
}

impl Stage for StageSlot {
    fn apply(&mut self, ctx: &mut RenderContext) {
        match self {
            Self::SingleRainbow(stage) => stage.apply(ctx),
            Self::RainbowFlow(stage) => stage.apply(ctx),
            Self::FanOut(stage) => stage.apply(ctx),
            Self::Drive(stage) => stage.apply(ctx),
            Self::Forward(stage) => stage.apply(ctx),
            Self::Custom(stage) => stage.apply(ctx),
        }
    }
}

impl From<SingleRainbow> for StageSlot {
    fn from(stage: SingleRainbow) -> Self {
        Self::SingleRainbow(stage)
    }
}

impl From<RainbowFlow> for StageSlot {
    fn from(stage: RainbowFlow) -> Self {
        Self::RainbowFlow(stage)
    }
}

impl From<FanOut> for StageSlot {
    fn from(stage: FanOut) -> Self {
        Self::FanOut(stage)
    }
}

impl From<Drive> for StageSlot {
    fn from(stage: Drive) -> Self {
        Self::Drive(stage)
    }
}

impl From<Forward> for StageSlot {
    fn from(stage: Forward) -> Self {
        Self::Forward(stage)
    }
}
