//! Rounded-corner mask.

use image::{GrayImage, Luma};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;

use screenwiz_common::error::ScreenwizResult;
use screenwiz_processing_core::{CornerEligibility, Size};

use crate::frame::FrameContext;
use crate::stage::FrameStage;

const OPAQUE: Luma<u8> = Luma([255]);

/// Builds a binary opacity mask over the working rectangle with rounded
/// corners where the zoom layout allows them.
#[derive(Debug, Clone, Default)]
pub struct RoundnessMaskStage {
    radius: u32,
}

impl RoundnessMaskStage {
    pub fn new(radius: u32) -> Self {
        Self { radius }
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Radius used for a frame: scaled with the zoom factor, never more
    /// than half the smaller side.
    pub fn effective_radius(&self, zoom_factor: f64, working: Size) -> u32 {
        let scaled = if zoom_factor > 1.0 {
            (zoom_factor * self.radius as f64) as u32
        } else {
            self.radius
        };
        scaled.min(working.width.min(working.height) / 2)
    }
}

/// Opacity mask of `size` with radius `r` on the eligible corners.
pub fn rounded_mask(size: Size, r: u32, corners: CornerEligibility) -> GrayImage {
    let (w, h) = (size.width, size.height);
    if r == 0 {
        return GrayImage::from_pixel(w, h, OPAQUE);
    }

    let mut mask = GrayImage::new(w, h);
    if w > 2 * r {
        draw_filled_rect_mut(&mut mask, Rect::at(r as i32, 0).of_size(w - 2 * r, h), OPAQUE);
    }
    if h > 2 * r {
        draw_filled_rect_mut(&mut mask, Rect::at(0, r as i32).of_size(w, h - 2 * r), OPAQUE);
    }

    let (near, far_x, far_y) = (r as i32, (w - 1 - r) as i32, (h - 1 - r) as i32);
    let quarters = [
        (corners.top_left, (near, near), (0, 0)),
        (corners.top_right, (far_x, near), (w - r, 0)),
        (corners.bottom_right, (far_x, far_y), (w - r, h - r)),
        (corners.bottom_left, (near, far_y), (0, h - r)),
    ];
    for (eligible, center, (sx, sy)) in quarters {
        if eligible {
            draw_filled_circle_mut(&mut mask, center, r as i32, OPAQUE);
        } else {
            draw_filled_rect_mut(&mut mask, Rect::at(sx as i32, sy as i32).of_size(r, r), OPAQUE);
        }
    }
    mask
}

impl FrameStage for RoundnessMaskStage {
    fn name(&self) -> &'static str {
        "roundness"
    }

    fn apply(&mut self, mut ctx: FrameContext) -> ScreenwizResult<FrameContext> {
        let r = self.effective_radius(ctx.zoom_factor, ctx.working);
        ctx.mask = Some(rounded_mask(ctx.working, r, ctx.corners));
        Ok(ctx)
    }
}
