//! The fixed-order frame pipeline.
//!
//! ```text
//! source frame
//!   ├── [cursor overlay]        (CursorPlacement::Source)
//!   ├── aspect ratio            canvas size
//!   ├── padding                 working size
//!   ├── [inset]                 border inside the source picture
//!   ├── zoom                    resize, crop, placement, corner flags
//!   ├── roundness mask          opacity over the working rectangle
//!   ├── background composite    canvas-sized output
//!   └── [cursor overlay]        (CursorPlacement::Canvas)
//! ```

use std::path::PathBuf;

use image::RgbImage;

use screenwiz_common::config::{AppConfig, AssetPaths};
use screenwiz_common::error::ScreenwizResult;
use screenwiz_processing_core::ZoomCurve;
use screenwiz_project_model::recording::CursorPosition;
use screenwiz_project_model::settings::{
    AspectRatio, BackgroundSpec, CursorPlacement, InsetSpec, PaddingSpec,
};
use screenwiz_project_model::timeline::ZoomEvent;

use crate::frame::FrameContext;
use crate::stage::FrameStage;
use crate::stages::zoom::DEFAULT_CORNER_RATIO;
use crate::stages::{
    AspectRatioStage, BackgroundCompositeStage, CursorOverlayStage, InsetStage, PaddingStage,
    RoundnessMaskStage, ZoomStage,
};

/// Typed configuration for every stage.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub aspect_ratio: AspectRatio,
    pub padding: PaddingSpec,
    /// `None` leaves the inset stage out.
    pub inset: Option<InsetSpec>,
    pub border_radius: u32,
    pub background: BackgroundSpec,
    pub zoom: ZoomCurve,
    pub corner_ratio: f64,
    pub cursor_placement: CursorPlacement,
    pub wallpaper_dir: PathBuf,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            aspect_ratio: AspectRatio::Auto,
            padding: PaddingSpec::Uniform(100),
            inset: None,
            border_radius: 50,
            background: BackgroundSpec::Wallpaper { index: 1 },
            zoom: ZoomCurve::default(),
            corner_ratio: DEFAULT_CORNER_RATIO,
            cursor_placement: CursorPlacement::Canvas,
            wallpaper_dir: AssetPaths::default().wallpaper_dir,
        }
    }
}

impl PipelineSettings {
    /// Parse the string-typed studio defaults of `config`.
    pub fn from_config(config: &AppConfig) -> ScreenwizResult<Self> {
        let studio = &config.studio;
        Ok(Self {
            aspect_ratio: studio.aspect_ratio.parse()?,
            padding: studio.padding.parse()?,
            inset: (studio.inset > 0).then_some(InsetSpec::Uniform(studio.inset)),
            border_radius: studio.border_radius,
            background: BackgroundSpec::from_json(studio.background.clone())?,
            zoom: ZoomCurve {
                zoom_in_duration: config.zoom.zoom_in_duration,
                zoom_out_duration: config.zoom.zoom_out_duration,
                zoom_factor: config.zoom.zoom_factor,
                ..ZoomCurve::default()
            },
            corner_ratio: config.zoom.corner_ratio,
            cursor_placement: studio.cursor_placement.parse()?,
            wallpaper_dir: config.assets.wallpaper_dir.clone(),
        })
    }
}

/// Owns one instance of every stage and runs them in order.
#[derive(Debug, Clone)]
pub struct Pipeline {
    aspect: AspectRatioStage,
    padding: PaddingStage,
    inset: Option<InsetStage>,
    zoom: ZoomStage,
    roundness: RoundnessMaskStage,
    background: BackgroundCompositeStage,
    cursor: Option<CursorOverlayStage>,
    cursor_placement: CursorPlacement,
}

impl Pipeline {
    /// Build every stage. Fails on invalid zoom parameters or a missing
    /// wallpaper.
    pub fn new(settings: PipelineSettings, fps: f64) -> ScreenwizResult<Self> {
        Ok(Self {
            aspect: AspectRatioStage::new(settings.aspect_ratio),
            padding: PaddingStage::new(settings.padding),
            inset: settings.inset.map(InsetStage::new),
            zoom: ZoomStage::new(fps, settings.zoom, settings.corner_ratio)?,
            roundness: RoundnessMaskStage::new(settings.border_radius),
            background: BackgroundCompositeStage::new(settings.background, settings.wallpaper_dir)?,
            cursor: None,
            cursor_placement: settings.cursor_placement,
        })
    }

    /// Build from application config, including the cursor glyph when one
    /// is configured.
    pub fn from_config(config: &AppConfig, fps: f64) -> ScreenwizResult<Self> {
        let mut pipeline = Self::new(PipelineSettings::from_config(config)?, fps)?;
        if let Some(path) = &config.assets.cursor {
            pipeline.cursor = Some(CursorOverlayStage::load(path, config.studio.cursor_size)?);
        }
        Ok(pipeline)
    }

    fn stages_mut(&mut self) -> Vec<&mut dyn FrameStage> {
        let mut cursor = self.cursor.as_mut().map(|c| c as &mut dyn FrameStage);
        let mut stages: Vec<&mut dyn FrameStage> = Vec::with_capacity(8);
        if self.cursor_placement == CursorPlacement::Source {
            stages.extend(cursor.take());
        }
        stages.push(&mut self.aspect);
        stages.push(&mut self.padding);
        if let Some(inset) = self.inset.as_mut() {
            stages.push(inset);
        }
        stages.push(&mut self.zoom);
        stages.push(&mut self.roundness);
        stages.push(&mut self.background);
        stages.extend(cursor.take());
        stages
    }

    /// Names of the active stages in execution order.
    pub fn stage_names(&mut self) -> Vec<&'static str> {
        self.stages_mut().iter().map(|s| s.name()).collect()
    }

    /// Run every stage over `frame` and return the final context.
    pub fn render_context(&mut self, frame: RgbImage, frame_index: u64) -> ScreenwizResult<FrameContext> {
        let mut ctx = FrameContext::new(frame, frame_index);
        for stage in self.stages_mut() {
            ctx = stage.apply(ctx)?;
        }
        Ok(ctx)
    }

    /// Render `frame` as frame number `frame_index` of the video.
    pub fn render(&mut self, frame: RgbImage, frame_index: u64) -> ScreenwizResult<RgbImage> {
        self.render_context(frame, frame_index).map(FrameContext::into_image)
    }

    pub fn set_aspect_ratio(&mut self, aspect: AspectRatio) {
        self.aspect = AspectRatioStage::new(aspect);
    }

    pub fn set_padding(&mut self, padding: PaddingSpec) {
        self.padding = PaddingStage::new(padding);
    }

    pub fn set_inset(&mut self, inset: Option<InsetSpec>) {
        self.inset = inset.map(InsetStage::new);
    }

    pub fn set_border_radius(&mut self, radius: u32) {
        self.roundness = RoundnessMaskStage::new(radius);
    }

    /// Switch backgrounds, loading any new wallpaper now.
    pub fn set_background(&mut self, spec: BackgroundSpec) -> ScreenwizResult<()> {
        self.background.set_spec(spec)
    }

    pub fn set_zoom_curve(&mut self, curve: ZoomCurve) -> ScreenwizResult<()> {
        self.zoom.set_curve(curve)
    }

    /// Replace the zoom stage's snapshot of live events.
    pub fn set_zoom_events(&mut self, events: Vec<ZoomEvent>) {
        self.zoom.set_events(events);
    }

    /// Install or remove the cursor overlay. An existing track is kept when
    /// a new glyph replaces an old one.
    pub fn set_cursor(&mut self, mut cursor: Option<CursorOverlayStage>) {
        if let (Some(old), Some(new)) = (self.cursor.as_mut(), cursor.as_mut()) {
            new.set_track(old.take_track());
        }
        self.cursor = cursor;
    }

    /// Hand the per-frame positions to the cursor overlay. Returns `false`
    /// and drops the track when no cursor glyph is installed.
    pub fn set_cursor_track(&mut self, track: Vec<Option<CursorPosition>>) -> bool {
        match self.cursor.as_mut() {
            Some(cursor) => {
                cursor.set_track(track);
                true
            }
            None => {
                tracing::debug!(
                    frames = track.len(),
                    "No cursor glyph installed, dropping cursor track"
                );
                false
            }
        }
    }

    pub fn set_cursor_placement(&mut self, placement: CursorPlacement) {
        self.cursor_placement = placement;
    }

    pub fn zoom(&self) -> &ZoomStage {
        &self.zoom
    }

    pub fn background(&self) -> &BackgroundCompositeStage {
        &self.background
    }

    pub fn has_cursor(&self) -> bool {
        self.cursor.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbaImage};
    use screenwiz_project_model::settings::Rgb as Color;

    fn settings() -> PipelineSettings {
        PipelineSettings {
            background: BackgroundSpec::Color {
                value: Color::new(255, 0, 0),
            },
            ..PipelineSettings::default()
        }
    }

    #[test]
    fn test_stage_order() {
        let mut pipeline = Pipeline::new(settings(), 30.0).unwrap();
        assert_eq!(
            pipeline.stage_names(),
            vec!["aspect_ratio", "padding", "zoom", "roundness", "background"]
        );

        pipeline.set_inset(Some(InsetSpec::Uniform(2)));
        pipeline.set_cursor(Some(
            CursorOverlayStage::from_glyph(RgbaImage::new(2, 2), 4).unwrap(),
        ));
        assert_eq!(
            pipeline.stage_names(),
            vec!["aspect_ratio", "padding", "inset", "zoom", "roundness", "background", "cursor"]
        );

        assert!(pipeline.set_cursor_track(vec![Some((0.5, 0.5))]));
        pipeline.set_cursor(Some(
            CursorOverlayStage::from_glyph(RgbaImage::new(3, 3), 4).unwrap(),
        ));
        assert!(pipeline.cursor.as_ref().unwrap().position_at(0).is_some());

        pipeline.set_cursor_placement(CursorPlacement::Source);
        assert_eq!(pipeline.stage_names()[0], "cursor");
        assert_eq!(pipeline.stage_names().len(), 7);
    }

    #[test]
    fn test_cursor_track_without_glyph_is_dropped() {
        let mut pipeline = Pipeline::new(settings(), 30.0).unwrap();
        assert!(!pipeline.set_cursor_track(vec![Some((0.5, 0.5))]));
        pipeline.set_cursor(Some(
            CursorOverlayStage::from_glyph(RgbaImage::new(2, 2), 4).unwrap(),
        ));
        assert!(pipeline.cursor.as_ref().unwrap().position_at(0).is_none());
    }

    #[test]
    fn test_padding_shows_background_around_frame() {
        let mut pipeline = Pipeline::new(settings(), 30.0).unwrap();
        pipeline.set_padding(PaddingSpec::Uniform(10));
        pipeline.set_border_radius(0);
        let out = pipeline
            .render(RgbImage::from_pixel(100, 50, Rgb([0, 0, 255])), 0)
            .unwrap();
        assert_eq!(out.dimensions(), (100, 50));
        assert_eq!(out.get_pixel(0, 0), &Rgb([255, 0, 0]));
        assert_eq!(out.get_pixel(50, 25), &Rgb([0, 0, 255]));
    }

    #[test]
    fn test_aspect_ratio_change_resizes_canvas() {
        let mut pipeline = Pipeline::new(settings(), 30.0).unwrap();
        pipeline.set_aspect_ratio(AspectRatio::ratio(1.0, 1.0).unwrap());
        let out = pipeline.render(RgbImage::new(100, 50), 0).unwrap();
        assert_eq!(out.dimensions(), (100, 100));
    }

    #[test]
    fn test_from_config_rejects_malformed_padding() {
        let mut config = AppConfig::default();
        config.studio.padding = "1,2,3".to_string();
        assert!(PipelineSettings::from_config(&config).is_err());
    }

    #[test]
    fn test_from_config_parses_studio_defaults() {
        let mut config = AppConfig::default();
        config.studio.inset = 4;
        config.studio.cursor_placement = "source".to_string();
        let settings = PipelineSettings::from_config(&config).unwrap();
        assert_eq!(settings.aspect_ratio, AspectRatio::Auto);
        assert_eq!(settings.padding, PaddingSpec::Uniform(100));
        assert_eq!(settings.inset, Some(InsetSpec::Uniform(4)));
        assert_eq!(settings.background, BackgroundSpec::Wallpaper { index: 1 });
        assert_eq!(settings.cursor_placement, CursorPlacement::Source);
    }
}
