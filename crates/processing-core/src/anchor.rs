//! Zoom anchoring.
//!
//! A click position falls into one of nine zones (a 3x3 grid split at
//! `corner_ratio` and `1 - corner_ratio`). The zone decides which side of
//! the working frame stays put while the frame grows.

use std::fmt;

use crate::framing::Size;

/// Position of a click along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisZone {
    /// Left or top band. The low edge stays fixed.
    Low,
    /// Centre band. The frame grows symmetrically.
    Middle,
    /// Right or bottom band. The high edge stays fixed.
    High,
}

impl AxisZone {
    pub fn classify(value: f64, corner_ratio: f64) -> Self {
        if value < corner_ratio {
            Self::Low
        } else if value < 1.0 - corner_ratio {
            Self::Middle
        } else {
            Self::High
        }
    }

    /// Offset of the grown frame's centre from the canvas centre along this
    /// axis, given the original and zoomed extents.
    pub fn shift(self, extent: u32, zoomed: u32) -> i64 {
        let (extent, zoomed) = (extent as i64, zoomed as i64);
        match self {
            Self::Low => zoomed / 2 - extent / 2,
            Self::Middle => 0,
            // ceil(extent / 2) - ceil(zoomed / 2)
            Self::High => (extent - extent / 2) - (zoomed - zoomed / 2),
        }
    }
}

/// One of the nine anchor zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZoomAnchor {
    pub horizontal: AxisZone,
    pub vertical: AxisZone,
}

impl ZoomAnchor {
    pub const CENTER: Self = Self {
        horizontal: AxisZone::Middle,
        vertical: AxisZone::Middle,
    };

    /// Zone of the normalized click position `(x, y)`.
    pub fn classify(x: f64, y: f64, corner_ratio: f64) -> Self {
        Self {
            horizontal: AxisZone::classify(x, corner_ratio),
            vertical: AxisZone::classify(y, corner_ratio),
        }
    }

    /// `(shift_x, shift_y)` for a working frame grown to `zoomed`.
    pub fn shift(&self, working: Size, zoomed: Size) -> (i64, i64) {
        (
            self.horizontal.shift(working.width, zoomed.width),
            self.vertical.shift(working.height, zoomed.height),
        )
    }
}

impl fmt::Display for ZoomAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match (self.vertical, self.horizontal) {
            (AxisZone::Low, AxisZone::Low) => "top-left",
            (AxisZone::Low, AxisZone::Middle) => "top",
            (AxisZone::Low, AxisZone::High) => "top-right",
            (AxisZone::Middle, AxisZone::Low) => "left",
            (AxisZone::Middle, AxisZone::Middle) => "center",
            (AxisZone::Middle, AxisZone::High) => "right",
            (AxisZone::High, AxisZone::Low) => "bottom-left",
            (AxisZone::High, AxisZone::Middle) => "bottom",
            (AxisZone::High, AxisZone::High) => "bottom-right",
        };
        f.write_str(name)
    }
}
