//! The stage abstraction.

use screenwiz_common::error::ScreenwizResult;

use crate::frame::FrameContext;

/// One step of the frame pipeline.
///
/// Stages own their configuration and caches. A stage must produce the same
/// output for the same context regardless of which frames it saw before.
pub trait FrameStage: Send {
    /// Stage name used in logs.
    fn name(&self) -> &'static str;

    /// Transform the frame context.
    fn apply(&mut self, ctx: FrameContext) -> ScreenwizResult<FrameContext>;
}
