//! Canvas sizing.

use screenwiz_common::error::ScreenwizResult;
use screenwiz_processing_core::canvas_size;
use screenwiz_project_model::settings::AspectRatio;

use crate::frame::FrameContext;
use crate::stage::FrameStage;

/// Sets the canvas size from the source frame and an aspect ratio, and
/// resets the working size to the source size.
#[derive(Debug, Clone, Default)]
pub struct AspectRatioStage {
    aspect: AspectRatio,
}

impl AspectRatioStage {
    pub fn new(aspect: AspectRatio) -> Self {
        Self { aspect }
    }

    pub fn aspect(&self) -> AspectRatio {
        self.aspect
    }
}

impl FrameStage for AspectRatioStage {
    fn name(&self) -> &'static str {
        "aspect_ratio"
    }

    fn apply(&mut self, mut ctx: FrameContext) -> ScreenwizResult<FrameContext> {
        let source = ctx.image_size();
        ctx.canvas = canvas_size(self.aspect, source);
        ctx.working = source;
        Ok(ctx)
    }
}
