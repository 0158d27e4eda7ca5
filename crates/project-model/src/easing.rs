//! Scalar easing curves for zoom animation.

use serde::{Deserialize, Serialize};

/// Interpolation curve applied to normalized animation progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// Quadratic ease-in/ease-out, C1-continuous at the midpoint.
    #[default]
    EaseInOutQuad,
}

impl EasingFunction {
    /// Map progress `t` (clamped to `[0, 1]`) to eased progress in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Self::EaseInOutQuad => ease_in_out_quad(t),
        }
    }
}

/// `2t²` below the midpoint, `1 - 2(1-t)²` above it.
pub fn ease_in_out_quad(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - 2.0 * (1.0 - t) * (1.0 - t)
    }
}
