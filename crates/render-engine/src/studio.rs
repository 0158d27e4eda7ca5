//! Editing session: a frame source, its zoom timeline, and the pipeline
//! that renders it.

use image::RgbImage;

use screenwiz_common::config::AppConfig;
use screenwiz_common::error::ScreenwizResult;
use screenwiz_processing_core::ZoomCurve;
use screenwiz_project_model::recording::{CursorPosition, MouseRecording};
use screenwiz_project_model::settings::{AspectRatio, BackgroundSpec, InsetSpec, PaddingSpec};
use screenwiz_project_model::timeline::{ZoomEvent, ZoomEventPatch, ZoomTimeline};

use crate::pipeline::Pipeline;
use crate::source::FrameSource;

/// One open recording.
///
/// Every timeline edit refreshes the zoom stage's snapshot, so the next
/// rendered frame reflects it. Navigation renders through the pipeline.
pub struct Studio {
    source: Box<dyn FrameSource>,
    timeline: ZoomTimeline,
    pipeline: Pipeline,
    current: Option<u64>,
}

impl std::fmt::Debug for Studio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Studio")
            .field("frame_count", &self.source.frame_count())
            .field("fps", &self.source.fps())
            .field("timeline", &self.timeline)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl Studio {
    pub fn new(source: Box<dyn FrameSource>, pipeline: Pipeline, timeline: ZoomTimeline) -> Self {
        let mut studio = Self {
            source,
            timeline,
            pipeline,
            current: None,
        };
        studio.refresh_zoom();
        tracing::info!(
            frames = studio.source.frame_count(),
            fps = studio.source.fps(),
            zoom_events = studio.timeline.len(),
            "Studio opened"
        );
        studio
    }

    /// Open `source` with the pipeline described by `config` and an empty
    /// timeline.
    pub fn from_config(source: Box<dyn FrameSource>, config: &AppConfig) -> ScreenwizResult<Self> {
        let pipeline = Pipeline::from_config(config, source.fps())?;
        Ok(Self::new(source, pipeline, ZoomTimeline::new()))
    }

    /// Seed the timeline from recorded clicks and the cursor overlay from
    /// recorded positions.
    pub fn apply_recording(
        &mut self,
        recording: &MouseRecording,
        default_duration: f64,
    ) -> ScreenwizResult<Vec<ZoomEvent>> {
        self.timeline = recording.zoom_timeline(default_duration)?;
        self.pipeline
            .set_cursor_track(recording.cursor_track(self.source.frame_count()));
        tracing::info!(
            clicks = recording.clicks.len(),
            moves = recording.moves.len(),
            "Applied mouse recording"
        );
        Ok(self.refresh_zoom())
    }

    pub fn fps(&self) -> f64 {
        self.source.fps()
    }

    pub fn frame_count(&self) -> u64 {
        self.source.frame_count()
    }

    pub fn duration_secs(&self) -> f64 {
        self.source.duration_secs()
    }

    /// Index of the most recently rendered frame.
    pub fn current_index(&self) -> Option<u64> {
        self.current
    }

    pub fn timeline(&self) -> &ZoomTimeline {
        &self.timeline
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Read and render `index`, or the next frame when `None`.
    ///
    /// `Ok(None)` at end of stream; the current frame is unchanged then.
    pub fn read(&mut self, index: Option<u64>) -> ScreenwizResult<Option<RgbImage>> {
        let frame_index = index.unwrap_or_else(|| self.source.position());
        let Some(frame) = self.source.frame(Some(frame_index))? else {
            return Ok(None);
        };
        self.current = Some(frame_index);
        self.pipeline.render(frame, frame_index).map(Some)
    }

    pub fn seek(&mut self, index: u64) -> ScreenwizResult<Option<RgbImage>> {
        self.read(Some(index))
    }

    pub fn next_frame(&mut self) -> ScreenwizResult<Option<RgbImage>> {
        self.read(None)
    }

    /// Frame before the current one, clamped at 0.
    pub fn prev_frame(&mut self) -> ScreenwizResult<Option<RgbImage>> {
        let index = self.current.map_or(0, |i| i.saturating_sub(1));
        self.read(Some(index))
    }

    /// Re-render the current frame, e.g. after a settings change.
    pub fn current_frame(&mut self) -> ScreenwizResult<Option<RgbImage>> {
        self.read(Some(self.current.unwrap_or(0)))
    }

    pub fn insert_zoom_event(&mut self, event: ZoomEvent) -> ScreenwizResult<Vec<ZoomEvent>> {
        let frame_index = event.frame_index;
        self.timeline.insert(event)?;
        tracing::info!(frame_index, "Inserted zoom event");
        Ok(self.refresh_zoom())
    }

    pub fn update_zoom_event(
        &mut self,
        index: usize,
        patch: ZoomEventPatch,
    ) -> ScreenwizResult<Vec<ZoomEvent>> {
        self.timeline.update(index, patch)?;
        tracing::info!(index, ?patch, "Updated zoom event");
        Ok(self.refresh_zoom())
    }

    pub fn delete_zoom_event(&mut self, index: usize) -> ScreenwizResult<Vec<ZoomEvent>> {
        self.timeline.soft_delete(index)?;
        tracing::info!(index, "Deleted zoom event");
        Ok(self.refresh_zoom())
    }

    pub fn delete_all_zoom_events(&mut self) -> Vec<ZoomEvent> {
        self.timeline.soft_delete_all();
        tracing::info!("Deleted all zoom events");
        self.refresh_zoom()
    }

    pub fn update_aspect_ratio(&mut self, aspect: AspectRatio) {
        tracing::info!(%aspect, "Aspect ratio changed");
        self.pipeline.set_aspect_ratio(aspect);
    }

    pub fn update_padding(&mut self, padding: PaddingSpec) {
        tracing::info!(?padding, "Padding changed");
        self.pipeline.set_padding(padding);
    }

    pub fn update_inset(&mut self, inset: Option<InsetSpec>) {
        tracing::info!(?inset, "Inset changed");
        self.pipeline.set_inset(inset);
    }

    pub fn update_border_radius(&mut self, radius: u32) {
        tracing::info!(radius, "Border radius changed");
        self.pipeline.set_border_radius(radius);
    }

    pub fn update_background(&mut self, spec: BackgroundSpec) -> ScreenwizResult<()> {
        self.pipeline.set_background(spec.clone())?;
        tracing::info!(background = ?spec, "Background changed");
        Ok(())
    }

    pub fn update_zoom_curve(&mut self, curve: ZoomCurve) -> ScreenwizResult<()> {
        self.pipeline.set_zoom_curve(curve)
    }

    /// See [`Pipeline::set_cursor_track`].
    pub fn set_cursor_track(&mut self, track: Vec<Option<CursorPosition>>) -> bool {
        self.pipeline.set_cursor_track(track)
    }

    pub fn pipeline_mut(&mut self) -> &mut Pipeline {
        &mut self.pipeline
    }

    fn refresh_zoom(&mut self) -> Vec<ZoomEvent> {
        let live = self.timeline.live_events();
        self.pipeline.set_zoom_events(live.clone());
        live
    }
}
