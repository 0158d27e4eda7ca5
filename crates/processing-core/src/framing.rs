//! Canvas framing arithmetic: aspect ratio, padding, and inset borders.
//!
//! All sizes are in pixels. Intermediate math is done in `i64` so that
//! negative slack (a working frame larger than its canvas) clamps cleanly.

use serde::{Deserialize, Serialize};

use screenwiz_common::error::{ScreenwizError, ScreenwizResult};
use screenwiz_project_model::settings::{AspectRatio, InsetSpec, PaddingSpec};

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

/// Canvas size for a source frame under the given aspect ratio.
///
/// Width-driven sizing wins when both orientations fit exactly.
pub fn canvas_size(aspect: AspectRatio, source: Size) -> Size {
    let Some(ratio) = aspect.value() else {
        return source;
    };
    let (w, h) = (source.width as f64, source.height as f64);
    if w / ratio >= h {
        Size::new(source.width, ((w / ratio).round() as u32).max(1))
    } else {
        Size::new(((h * ratio).round() as u32).max(1), source.height)
    }
}

/// Result of padding a working frame inside its canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaddedFrame {
    pub pad_x: u32,
    pub pad_y: u32,
    pub working: Size,
}

/// Shrink `working` inside `canvas` by `padding`.
///
/// A uniform padding is applied to the axis with less slack and the other
/// axis is derived so the working frame keeps its aspect ratio. Explicit
/// axes are subtracted as-is. Each resulting dimension is at least 1.
pub fn pad_working_frame(canvas: Size, working: Size, padding: PaddingSpec) -> PaddedFrame {
    let (cw, ch) = (canvas.width as i64, canvas.height as i64);
    let (ww, wh) = (working.width.max(1) as i64, working.height.max(1) as i64);

    let (pad_x, pad_y) = match padding {
        PaddingSpec::Axes { x, y } => (x as i64, y as i64),
        PaddingSpec::Uniform(p) => {
            let p = p as i64;
            let gap_x = ((cw - ww) / 2).max(0);
            let gap_y = ((ch - wh) / 2).max(0);
            if gap_x > gap_y {
                let new_h = ch - 2 * p;
                let new_w = (new_h as f64 * ww as f64 / wh as f64) as i64;
                (((cw - new_w) / 2).max(0), p)
            } else {
                let new_w = cw - 2 * p;
                let new_h = (new_w as f64 * wh as f64 / ww as f64) as i64;
                (p, ((ch - new_h) / 2).max(0))
            }
        }
    };

    PaddedFrame {
        pad_x: pad_x as u32,
        pad_y: pad_y as u32,
        working: Size::new(
            (cw - 2 * pad_x).max(1) as u32,
            (ch - 2 * pad_y).max(1) as u32,
        ),
    }
}

/// Border widths drawn by the inset stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InsetSides {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl InsetSides {
    /// Resolve `spec` against a frame. A uniform inset sets top and bottom
    /// and scales left and right by the frame's aspect ratio.
    ///
    /// Fails when the borders leave no picture.
    pub fn resolve(spec: InsetSpec, frame: Size) -> ScreenwizResult<Self> {
        let sides = match spec {
            InsetSpec::Uniform(n) => {
                let horizontal =
                    (n as f64 * frame.width as f64 / frame.height.max(1) as f64) as u32;
                Self {
                    left: horizontal,
                    top: n,
                    right: horizontal,
                    bottom: n,
                }
            }
            InsetSpec::Pairs([left, right], [top, bottom]) => Self {
                left,
                top,
                right,
                bottom,
            },
            InsetSpec::Sides([left, top, right, bottom]) => Self {
                left,
                top,
                right,
                bottom,
            },
        };

        let horizontal = sides.left as u64 + sides.right as u64;
        let vertical = sides.top as u64 + sides.bottom as u64;
        if horizontal >= frame.width as u64 || vertical >= frame.height as u64 {
            return Err(ScreenwizError::config(format!(
                "inset {sides:?} leaves no picture in a {}x{} frame",
                frame.width, frame.height
            )));
        }
        Ok(sides)
    }

    /// Size of the picture area left inside the borders.
    pub fn picture_size(&self, frame: Size) -> Size {
        Size::new(
            frame.width.saturating_sub(self.left + self.right),
            frame.height.saturating_sub(self.top + self.bottom),
        )
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}
