//! Inset border around the source picture.

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};

use screenwiz_common::error::ScreenwizResult;
use screenwiz_processing_core::{InsetSides, Size};
use screenwiz_project_model::settings::{self, InsetSpec};

use crate::frame::FrameContext;
use crate::stage::FrameStage;

pub const DEFAULT_INSET_COLOR: settings::Rgb = settings::Rgb::new(0, 122, 222);

/// Shrinks the source picture inside its own frame and fills the freed
/// border with a solid colour. The frame size does not change.
#[derive(Debug, Clone)]
pub struct InsetStage {
    spec: InsetSpec,
    color: settings::Rgb,
    filled: Option<RgbImage>,
}

impl InsetStage {
    pub fn new(spec: InsetSpec) -> Self {
        Self::with_color(spec, DEFAULT_INSET_COLOR)
    }

    pub fn with_color(spec: InsetSpec, color: settings::Rgb) -> Self {
        Self {
            spec,
            color,
            filled: None,
        }
    }

    pub fn spec(&self) -> InsetSpec {
        self.spec
    }

    fn filled_frame(&mut self, size: Size) -> RgbImage {
        match &self.filled {
            Some(filled) if filled.dimensions() == (size.width, size.height) => filled.clone(),
            _ => {
                let filled =
                    RgbImage::from_pixel(size.width, size.height, Rgb(self.color.to_array()));
                self.filled = Some(filled.clone());
                filled
            }
        }
    }
}

impl FrameStage for InsetStage {
    fn name(&self) -> &'static str {
        "inset"
    }

    fn apply(&mut self, mut ctx: FrameContext) -> ScreenwizResult<FrameContext> {
        let size = ctx.image_size();
        let sides = InsetSides::resolve(self.spec, size)?;
        if sides.is_zero() {
            return Ok(ctx);
        }

        let picture = sides.picture_size(size);
        let resized = imageops::resize(&ctx.image, picture.width, picture.height, FilterType::Triangle);
        let mut framed = self.filled_frame(size);
        imageops::replace(&mut framed, &resized, sides.left as i64, sides.top as i64);
        ctx.image = framed;
        Ok(ctx)
    }
}
