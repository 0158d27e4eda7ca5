//! Placement of a zoomed working frame on the canvas.

use serde::{Deserialize, Serialize};

use crate::anchor::ZoomAnchor;
use crate::framing::Size;

/// Which corners of the placed frame may be rounded.
///
/// A corner loses eligibility when the frame was clamped against a canvas
/// edge adjacent to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CornerEligibility {
    pub top_left: bool,
    pub top_right: bool,
    pub bottom_right: bool,
    pub bottom_left: bool,
}

impl CornerEligibility {
    pub const ALL: Self = Self {
        top_left: true,
        top_right: true,
        bottom_right: true,
        bottom_left: true,
    };

    pub const NONE: Self = Self {
        top_left: false,
        top_right: false,
        bottom_right: false,
        bottom_left: false,
    };
}

impl Default for CornerEligibility {
    fn default() -> Self {
        Self::ALL
    }
}

/// Geometry of one zoomed frame.
///
/// `frame_x1/frame_y1` is where the grown frame would start before
/// clamping. `[x1, x2) x [y1, y2)` is the visible part on the canvas and
/// `(crop_x, crop_y)` is where that part starts inside the grown frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLayout {
    pub factor: f64,
    pub zoomed: Size,
    pub frame_x1: i64,
    pub frame_y1: i64,
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
    pub crop_x: u32,
    pub crop_y: u32,
    pub corners: CornerEligibility,
}

impl ZoomLayout {
    /// Lay out `working` grown by `factor` on `canvas`, anchored at `anchor`.
    pub fn compute(canvas: Size, working: Size, factor: f64, anchor: ZoomAnchor) -> Self {
        let zoomed = Size::new(
            ((working.width as f64 * factor) as u32).max(1),
            ((working.height as f64 * factor) as u32).max(1),
        );
        let (shift_x, shift_y) = anchor.shift(working, zoomed);

        let (cw, ch) = (canvas.width as i64, canvas.height as i64);
        let (zw, zh) = (zoomed.width as i64, zoomed.height as i64);

        let frame_x1 = cw / 2 + shift_x - zw / 2;
        let frame_y1 = ch / 2 + shift_y - zh / 2;

        let x1 = frame_x1.clamp(0, cw);
        let y1 = frame_y1.clamp(0, ch);
        let x2 = (frame_x1 + zw).clamp(x1, cw);
        let y2 = (frame_y1 + zh).clamp(y1, ch);

        let mut corners = CornerEligibility::ALL;
        if frame_x1 < 0 {
            corners.top_left = false;
            corners.bottom_left = false;
        }
        if frame_y1 < 0 {
            corners.top_left = false;
            corners.top_right = false;
        }
        if frame_x1 + zw > cw {
            corners.top_right = false;
            corners.bottom_right = false;
        }
        if frame_y1 + zh > ch {
            corners.bottom_right = false;
            corners.bottom_left = false;
        }

        Self {
            factor,
            zoomed,
            frame_x1,
            frame_y1,
            x1: x1 as u32,
            y1: y1 as u32,
            x2: x2 as u32,
            y2: y2 as u32,
            crop_x: (-frame_x1).max(0) as u32,
            crop_y: (-frame_y1).max(0) as u32,
            corners,
        }
    }

    /// Unzoomed frame centred on the canvas.
    pub fn centered(canvas: Size, working: Size) -> Self {
        Self::compute(canvas, working, 1.0, ZoomAnchor::CENTER)
    }

    /// Size of the visible part, which becomes the new working size.
    pub fn visible_size(&self) -> Size {
        Size::new(self.x2 - self.x1, self.y2 - self.y1)
    }
}
