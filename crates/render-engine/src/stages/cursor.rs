//! Cursor glyph overlay.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{RgbImage, RgbaImage};

use screenwiz_common::error::{ScreenwizError, ScreenwizResult};
use screenwiz_project_model::recording::CursorPosition;

use crate::frame::FrameContext;
use crate::stage::FrameStage;

pub const DEFAULT_CURSOR_SIZE: u32 = 64;

/// Alpha-blends a cursor glyph at the recorded position of each frame.
///
/// Positions are normalized to the buffer the stage runs on, so the same
/// track works on the source frame and on the final canvas.
#[derive(Debug, Clone)]
pub struct CursorOverlayStage {
    glyph: RgbaImage,
    track: Vec<Option<CursorPosition>>,
}

impl CursorOverlayStage {
    /// Load a PNG glyph and scale its longer side to `size`.
    pub fn load(path: impl AsRef<Path>, size: u32) -> ScreenwizResult<Self> {
        let path = path.as_ref();
        let glyph = image::open(path)
            .map_err(|e| ScreenwizError::asset(path, e.to_string()))?
            .to_rgba8();
        Self::from_glyph(glyph, size)
    }

    pub fn from_glyph(glyph: RgbaImage, size: u32) -> ScreenwizResult<Self> {
        if size == 0 || glyph.width() == 0 || glyph.height() == 0 {
            return Err(ScreenwizError::config("cursor glyph and size must be non-empty"));
        }
        Ok(Self {
            glyph: fit_longer_side(&glyph, size),
            track: Vec::new(),
        })
    }

    /// Replace the per-frame positions, indexed by frame number.
    pub fn set_track(&mut self, track: Vec<Option<CursorPosition>>) {
        self.track = track;
    }

    pub fn take_track(&mut self) -> Vec<Option<CursorPosition>> {
        std::mem::take(&mut self.track)
    }

    pub fn glyph_size(&self) -> (u32, u32) {
        self.glyph.dimensions()
    }

    pub fn position_at(&self, frame_index: u64) -> Option<CursorPosition> {
        usize::try_from(frame_index)
            .ok()
            .and_then(|i| self.track.get(i).copied().flatten())
    }
}

fn fit_longer_side(glyph: &RgbaImage, size: u32) -> RgbaImage {
    let (w, h) = glyph.dimensions();
    let (new_w, new_h) = if h > w {
        ((size as u64 * w as u64 / h as u64) as u32, size)
    } else {
        (size, (size as u64 * h as u64 / w as u64) as u32)
    };
    imageops::resize(glyph, new_w.max(1), new_h.max(1), FilterType::Triangle)
}

/// Blend `glyph` onto `image` with its top-left at `(x, y)`, clipped to
/// the image bounds.
pub fn blend_glyph(image: &mut RgbImage, glyph: &RgbaImage, x: u32, y: u32) {
    let w = glyph.width().min(image.width().saturating_sub(x));
    let h = glyph.height().min(image.height().saturating_sub(y));
    for gy in 0..h {
        for gx in 0..w {
            let src = glyph.get_pixel(gx, gy).0;
            let alpha = src[3] as u16;
            if alpha == 0 {
                continue;
            }
            let dst = image.get_pixel_mut(x + gx, y + gy);
            for c in 0..3 {
                dst.0[c] = ((src[c] as u16 * alpha + dst.0[c] as u16 * (255 - alpha) + 127) / 255) as u8;
            }
        }
    }
}

impl FrameStage for CursorOverlayStage {
    fn name(&self) -> &'static str {
        "cursor"
    }

    fn apply(&mut self, mut ctx: FrameContext) -> ScreenwizResult<FrameContext> {
        let Some((x, y)) = self.position_at(ctx.frame_index) else {
            return Ok(ctx);
        };
        if x < 0.0 || y < 0.0 {
            return Ok(ctx);
        }
        let (width, height) = ctx.image.dimensions();
        let px = (x * width as f64).floor() as u32;
        let py = (y * height as f64).floor() as u32;
        blend_glyph(&mut ctx.image, &self.glyph, px, py);
        Ok(ctx)
    }
}
