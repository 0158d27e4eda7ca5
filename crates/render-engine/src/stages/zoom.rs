//! Click-triggered zoom and pan.

use image::imageops::{self, FilterType};

use screenwiz_common::error::{ScreenwizError, ScreenwizResult};
use screenwiz_processing_core::{
    preceding_event, ZoomAnchor, ZoomCurve, ZoomLayout, ZoomPhase, ZoomSample,
};
use screenwiz_project_model::timeline::ZoomEvent;

use crate::frame::FrameContext;
use crate::stage::FrameStage;

pub const DEFAULT_CORNER_RATIO: f64 = 0.3;

/// Resizes the frame to the animated zoom factor of the governing event,
/// crops it to the canvas, and records placement and corner eligibility.
///
/// Works on a snapshot of the live events; call [`ZoomStage::set_events`]
/// after every timeline edit.
#[derive(Debug, Clone)]
pub struct ZoomStage {
    curve: ZoomCurve,
    corner_ratio: f64,
    fps: f64,
    events: Vec<ZoomEvent>,
    frame_indices: Vec<u64>,
}

impl ZoomStage {
    pub fn new(fps: f64, curve: ZoomCurve, corner_ratio: f64) -> ScreenwizResult<Self> {
        curve.validate()?;
        if !(fps.is_finite() && fps > 0.0) {
            return Err(ScreenwizError::config(format!("fps must be positive, got {fps}")));
        }
        if !(0.0..=0.5).contains(&corner_ratio) {
            return Err(ScreenwizError::config(format!(
                "corner ratio must be in [0, 0.5], got {corner_ratio}"
            )));
        }
        Ok(Self {
            curve,
            corner_ratio,
            fps,
            events: Vec::new(),
            frame_indices: Vec::new(),
        })
    }

    /// Replace the event snapshot. `events` must be live events in
    /// ascending frame order.
    pub fn set_events(&mut self, events: Vec<ZoomEvent>) {
        self.frame_indices = events.iter().map(|e| e.frame_index).collect();
        self.events = events;
    }

    pub fn events(&self) -> &[ZoomEvent] {
        &self.events
    }

    pub fn set_curve(&mut self, curve: ZoomCurve) -> ScreenwizResult<()> {
        curve.validate()?;
        self.curve = curve;
        Ok(())
    }

    pub fn curve(&self) -> ZoomCurve {
        self.curve
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Zoom factor and anchor governing `frame_index`.
    pub fn resolve(&self, frame_index: u64) -> (ZoomSample, ZoomAnchor) {
        match preceding_event(&self.events, &self.frame_indices, frame_index) {
            Some(event) => (
                self.curve.sample(event, frame_index, self.fps),
                ZoomAnchor::classify(event.x, event.y, self.corner_ratio),
            ),
            None => (ZoomSample::IDLE, ZoomAnchor::CENTER),
        }
    }
}

impl FrameStage for ZoomStage {
    fn name(&self) -> &'static str {
        "zoom"
    }

    fn apply(&mut self, mut ctx: FrameContext) -> ScreenwizResult<FrameContext> {
        let (sample, anchor) = self.resolve(ctx.frame_index);
        let layout = ZoomLayout::compute(ctx.canvas, ctx.working, sample.factor, anchor);
        let visible = layout.visible_size();
        if visible.is_empty() {
            return Err(ScreenwizError::render(format!(
                "frame {} zoomed to {}x{} has no visible area on a {}x{} canvas",
                ctx.frame_index,
                layout.zoomed.width,
                layout.zoomed.height,
                ctx.canvas.width,
                ctx.canvas.height
            )));
        }

        if sample.phase != ZoomPhase::Idle {
            tracing::debug!(
                frame = ctx.frame_index,
                factor = sample.factor,
                phase = ?sample.phase,
                anchor = %anchor,
                "Zooming frame"
            );
        }

        let resized = imageops::resize(
            &ctx.image,
            layout.zoomed.width,
            layout.zoomed.height,
            FilterType::Triangle,
        );
        ctx.image = imageops::crop_imm(
            &resized,
            layout.crop_x,
            layout.crop_y,
            visible.width,
            visible.height,
        )
        .to_image();
        ctx.working = visible;
        ctx.x_offset = layout.x1;
        ctx.y_offset = layout.y1;
        ctx.zoom_factor = sample.factor;
        ctx.corners = layout.corners;
        Ok(ctx)
    }
}
