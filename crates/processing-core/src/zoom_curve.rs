//! Zoom factor animation over the lifetime of a zoom event.

use screenwiz_common::error::{ScreenwizError, ScreenwizResult};
use screenwiz_project_model::easing::EasingFunction;
use screenwiz_project_model::sorted::largest_leq;
use screenwiz_project_model::timeline::ZoomEvent;

/// Which part of the animation a frame falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomPhase {
    /// No event covers the frame.
    Idle,
    ZoomIn,
    Hold,
    ZoomOut,
}

/// Zoom factor at a frame, with the phase that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomSample {
    pub phase: ZoomPhase,
    pub factor: f64,
}

impl ZoomSample {
    pub const IDLE: Self = Self {
        phase: ZoomPhase::Idle,
        factor: 1.0,
    };
}

/// Ramp-in, hold, ramp-out animation parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomCurve {
    /// Ramp-in duration in seconds.
    pub zoom_in_duration: f64,
    /// Ramp-out duration in seconds.
    pub zoom_out_duration: f64,
    /// Peak zoom multiplier.
    pub zoom_factor: f64,
    pub easing: EasingFunction,
}

impl Default for ZoomCurve {
    fn default() -> Self {
        Self {
            zoom_in_duration: 1.0,
            zoom_out_duration: 1.0,
            zoom_factor: 2.0,
            easing: EasingFunction::EaseInOutQuad,
        }
    }
}

impl ZoomCurve {
    pub fn validate(&self) -> ScreenwizResult<()> {
        if !(self.zoom_factor.is_finite() && self.zoom_factor >= 1.0) {
            return Err(ScreenwizError::config(format!(
                "zoom factor must be >= 1, got {}",
                self.zoom_factor
            )));
        }
        for (name, value) in [
            ("zoom_in_duration", self.zoom_in_duration),
            ("zoom_out_duration", self.zoom_out_duration),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ScreenwizError::config(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Zoom factor for `frame_index` under `event`.
    ///
    /// Frames outside `[start, start + duration_in_frames)` are idle. When
    /// the ramp-in and ramp-out windows overlap the ramp-in wins.
    pub fn sample(&self, event: &ZoomEvent, frame_index: u64, fps: f64) -> ZoomSample {
        if frame_index < event.frame_index || frame_index >= event.end_frame(fps) {
            return ZoomSample::IDLE;
        }

        let elapsed = (frame_index - event.frame_index) as f64 / fps;
        let peak = self.zoom_factor;
        let ramp_out_start = event.duration - self.zoom_out_duration;

        if elapsed <= self.zoom_in_duration {
            let t = elapsed / self.zoom_in_duration;
            ZoomSample {
                phase: ZoomPhase::ZoomIn,
                factor: 1.0 + (peak - 1.0) * self.easing.apply(t),
            }
        } else if elapsed >= ramp_out_start {
            let t = (elapsed - ramp_out_start) / self.zoom_out_duration;
            ZoomSample {
                phase: ZoomPhase::ZoomOut,
                factor: peak - (peak - 1.0) * self.easing.apply(t),
            }
        } else {
            ZoomSample {
                phase: ZoomPhase::Hold,
                factor: peak,
            }
        }
    }
}

/// The live event nearest at or before `frame_index`.
///
/// `frame_indices` must be the ascending start frames of `events`. Only this
/// one event is considered; an earlier event that is still running does not
/// override a later one that has already ended.
pub fn preceding_event<'a>(
    events: &'a [ZoomEvent],
    frame_indices: &[u64],
    frame_index: u64,
) -> Option<&'a ZoomEvent> {
    largest_leq(frame_indices, &frame_index).and_then(|idx| events.get(idx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FPS: f64 = 30.0;

    fn event() -> ZoomEvent {
        ZoomEvent::new(0.5, 0.5, 50, 1.5).unwrap()
    }

    #[test]
    fn test_factor_at_event_start_is_one() {
        let s = ZoomCurve::default().sample(&event(), 50, FPS);
        assert_eq!(s.phase, ZoomPhase::ZoomIn);
        assert!((s.factor - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_factor_reaches_peak_after_ramp_in() {
        let s = ZoomCurve::default().sample(&event(), 80, FPS);
        assert_eq!(s.phase, ZoomPhase::ZoomIn);
        assert!((s.factor - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_ramp_in_strictly_between() {
        let curve = ZoomCurve::default();
        let mut previous = 1.0;
        for frame in 51..80 {
            let f = curve.sample(&event(), frame, FPS).factor;
            assert!(f > 1.0 && f < 2.0, "frame {frame}: {f}");
            assert!(f > previous, "frame {frame} not increasing");
            previous = f;
        }
    }

    #[test]
    fn test_ramp_out_decreases_toward_one() {
        let curve = ZoomCurve::default();
        let mut previous = 2.0;
        for frame in 81..95 {
            let s = curve.sample(&event(), frame, FPS);
            assert_eq!(s.phase, ZoomPhase::ZoomOut);
            assert!(s.factor < previous, "frame {frame} not decreasing");
            assert!(s.factor >= 1.0);
            previous = s.factor;
        }
        assert!(previous < 1.01);
    }

    #[test]
    fn test_outside_window_is_idle() {
        let curve = ZoomCurve::default();
        assert_eq!(curve.sample(&event(), 49, FPS), ZoomSample::IDLE);
        assert_eq!(curve.sample(&event(), 95, FPS), ZoomSample::IDLE);
    }

    #[test]
    fn test_hold_phase_between_ramps() {
        let long = ZoomEvent::new(0.5, 0.5, 0, 4.0).unwrap();
        let s = ZoomCurve::default().sample(&long, 60, FPS);
        assert_eq!(s.phase, ZoomPhase::Hold);
        assert!((s.factor - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_preceding_event_uses_nearest_only() {
        let events = vec![
            ZoomEvent::new(0.5, 0.5, 0, 10.0).unwrap(),
            ZoomEvent::new(0.5, 0.5, 30, 0.5).unwrap(),
        ];
        let indices = [0, 30];
        assert!(preceding_event(&events, &indices, 0).is_some());
        let later = preceding_event(&events, &indices, 100).unwrap();
        assert_eq!(later.frame_index, 30);
        // The long first event still covers frame 100, but only the nearest counts.
        let s = ZoomCurve::default().sample(later, 100, FPS);
        assert_eq!(s, ZoomSample::IDLE);
        assert!(preceding_event(&[], &[], 5).is_none());
    }

    #[test]
    fn test_huge_duration_holds_instead_of_overflowing() {
        let curve = ZoomCurve::default();
        let endless = ZoomEvent::new(0.5, 0.5, 1, 1e20).unwrap();
        let s = curve.sample(&endless, 5, FPS);
        assert_eq!(s.phase, ZoomPhase::ZoomIn);
        assert!(s.factor > 1.0 && s.factor < 2.0);
        let s = curve.sample(&endless, 10_000, FPS);
        assert_eq!(s.phase, ZoomPhase::Hold);
        assert_eq!(curve.sample(&endless, 0, FPS), ZoomSample::IDLE);
    }

    #[test]
    fn test_event_at_last_frames_samples_without_overflow() {
        let curve = ZoomCurve::default();
        let late = ZoomEvent::new(0.5, 0.5, u64::MAX - 10, 1.5).unwrap();
        let s = curve.sample(&late, u64::MAX - 10, FPS);
        assert_eq!(s.phase, ZoomPhase::ZoomIn);
        assert!((s.factor - 1.0).abs() < 1e-12);
        assert_eq!(curve.sample(&late, u64::MAX - 1, FPS).phase, ZoomPhase::ZoomIn);
        assert_eq!(curve.sample(&late, u64::MAX, FPS), ZoomSample::IDLE);
    }

    #[test]
    fn test_zero_frame_event_is_idle() {
        let blink = ZoomEvent::new(0.5, 0.5, 50, 0.001).unwrap();
        let curve = ZoomCurve::default();
        for frame in 49..=51 {
            assert_eq!(curve.sample(&blink, frame, FPS), ZoomSample::IDLE);
        }
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        let mut curve = ZoomCurve::default();
        assert!(curve.validate().is_ok());
        curve.zoom_factor = 0.5;
        assert!(curve.validate().is_err());
        curve.zoom_factor = 2.0;
        curve.zoom_in_duration = 0.0;
        assert!(curve.validate().is_err());
    }

    proptest! {
        #[test]
        fn prop_factor_within_bounds(
            start in 0u64..500,
            offset in 0u64..600,
            duration in 0.1f64..10.0,
            zin in 0.1f64..3.0,
            zout in 0.1f64..3.0,
            peak in 1.0f64..5.0,
            fps in 1.0f64..120.0,
        ) {
            let curve = ZoomCurve {
                zoom_in_duration: zin,
                zoom_out_duration: zout,
                zoom_factor: peak,
                easing: EasingFunction::EaseInOutQuad,
            };
            let event = ZoomEvent::new(0.5, 0.5, start, duration).unwrap();
            let s = curve.sample(&event, start + offset, fps);
            prop_assert!(s.factor >= 1.0 - 1e-9);
            prop_assert!(s.factor <= peak + 1e-9);
        }
    }
}
