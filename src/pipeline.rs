//! Ordered stage composition.

use crate::context::RenderContext;
use crate::stage::{Stage, StageSlot};

/// Stages run left to right, each seeing the writes of the ones before it.
///
/// The list is fixed once composed. A pipeline is itself a [`Stage`], so
/// pipelines nest.
pub struct Pipeline {
    stages: Vec<StageSlot>,
}

impl Pipeline {
    /// Compose `stages` into one render step.
    pub fn compose<I, S>(stages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StageSlot>,
    {
        Self {
            stages: stages.into_iter().map(Into::into).collect(),
        }
    }

    /// Run every stage once, in order.
    pub fn run(&mut self, ctx: &mut RenderContext) {
        for stage in &mut self.stages {
            stage.apply(ctx);
        }
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage names in run order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.stages.iter().map(StageSlot::name)
    }
}

impl Stage for Pipeline {
    fn apply(&mut self, ctx: &mut RenderContext) {
        self.run(ctx);
    }
}
