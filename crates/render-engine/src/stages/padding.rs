//! Working-frame padding.

use screenwiz_common::error::ScreenwizResult;
use screenwiz_processing_core::pad_working_frame;
use screenwiz_project_model::settings::PaddingSpec;

use crate::frame::FrameContext;
use crate::stage::FrameStage;

/// Shrinks the working size inside the canvas.
#[derive(Debug, Clone, Default)]
pub struct PaddingStage {
    padding: PaddingSpec,
}

impl PaddingStage {
    pub fn new(padding: PaddingSpec) -> Self {
        Self { padding }
    }

    pub fn padding(&self) -> PaddingSpec {
        self.padding
    }
}

impl FrameStage for PaddingStage {
    fn name(&self) -> &'static str {
        "padding"
    }

    fn apply(&mut self, mut ctx: FrameContext) -> ScreenwizResult<FrameContext> {
        let padded = pad_working_frame(ctx.canvas, ctx.working, self.padding);
        ctx.working = padded.working;
        ctx.x_offset = padded.pad_x;
        ctx.y_offset = padded.pad_y;
        Ok(ctx)
    }
}
