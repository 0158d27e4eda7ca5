//! Render a frame sequence to PNG files.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use tokio::sync::Mutex;

use screenwiz_common::config::AppConfig;
use screenwiz_project_model::recording::MouseRecording;
use screenwiz_project_model::settings::InsetSpec;
use screenwiz_project_model::timeline::ZoomTimeline;
use screenwiz_render_engine::stages::CursorOverlayStage;
use screenwiz_render_engine::{
    export_frames, ExportJob, ExportProgress, ImageSequenceSource, Pipeline, PipelineSettings,
    Studio,
};

#[derive(Args)]
pub struct RenderArgs {
    /// Directory of numbered frame images
    frames_dir: PathBuf,

    /// Frame rate of the recording
    #[arg(long, default_value = "30")]
    fps: f64,

    /// Output directory for rendered frames
    #[arg(short, long)]
    output: PathBuf,

    /// Zoom timeline JSON file
    #[arg(long)]
    timeline: Option<PathBuf>,

    /// Mouse recording (JSONL); seeds zoom events when no timeline is given
    #[arg(long)]
    recording: Option<PathBuf>,

    /// Aspect ratio: Auto or W:H
    #[arg(long)]
    aspect_ratio: Option<String>,

    /// Padding: N or X,Y
    #[arg(long)]
    padding: Option<String>,

    /// Corner radius in pixels
    #[arg(long)]
    radius: Option<u32>,

    /// Uniform inset in pixels
    #[arg(long)]
    inset: Option<u32>,

    /// Background: wallpaper:N, color:#rrggbb or gradient:#from,#to[,angle]
    #[arg(long)]
    background: Option<String>,

    /// Cursor glyph PNG
    #[arg(long)]
    cursor: Option<PathBuf>,

    /// First frame to render
    #[arg(long, default_value = "0")]
    start: u64,

    /// Exclusive end frame
    #[arg(long)]
    end: Option<u64>,
}

impl RenderArgs {
    fn settings(&self, config: &AppConfig) -> anyhow::Result<PipelineSettings> {
        let mut settings = PipelineSettings::from_config(config)?;
        if let Some(aspect) = &self.aspect_ratio {
            settings.aspect_ratio = aspect.parse()?;
        }
        if let Some(padding) = &self.padding {
            settings.padding = padding.parse()?;
        }
        if let Some(radius) = self.radius {
            settings.border_radius = radius;
        }
        if let Some(inset) = self.inset {
            settings.inset = (inset > 0).then_some(InsetSpec::Uniform(inset));
        }
        if let Some(background) = &self.background {
            settings.background = background.parse()?;
        }
        Ok(settings)
    }
}

pub async fn run(args: RenderArgs, config: &AppConfig) -> anyhow::Result<()> {
    println!("Rendering frames from: {}", args.frames_dir.display());

    let source = ImageSequenceSource::open(&args.frames_dir, args.fps)
        .map_err(|e| anyhow::anyhow!("Failed to open frames: {e}"))?;
    let settings = args.settings(config)?;

    println!("  Aspect ratio: {}", settings.aspect_ratio);
    println!("  Padding: {:?}", settings.padding);
    println!("  Border radius: {}", settings.border_radius);
    println!("  Background: {:?}", settings.background);

    let mut pipeline = Pipeline::new(settings, args.fps)?;
    if let Some(path) = args.cursor.as_ref().or(config.assets.cursor.as_ref()) {
        pipeline.set_cursor(Some(CursorOverlayStage::load(path, config.studio.cursor_size)?));
    }

    let timeline = match &args.timeline {
        Some(path) => ZoomTimeline::load(path)
            .map_err(|e| anyhow::anyhow!("Failed to load timeline: {e}"))?,
        None => ZoomTimeline::new(),
    };

    let mut studio = Studio::new(Box::new(source), pipeline, timeline);
    if let Some(path) = &args.recording {
        let recording = MouseRecording::load(path)
            .map_err(|e| anyhow::anyhow!("Failed to load recording: {e}"))?;
        if args.timeline.is_some() {
            studio.set_cursor_track(recording.cursor_track(studio.frame_count()));
        } else {
            studio.apply_recording(&recording, config.zoom.event_duration)?;
        }
    }
    println!("  Zoom events: {}", studio.timeline().len());
    println!("  Output: {}", args.output.display());

    let job = ExportJob {
        output_dir: args.output.clone(),
        start_frame: args.start,
        end_frame: args.end,
    };

    let progress_cb: Box<dyn Fn(ExportProgress) + Send> = Box::new(|p| {
        print!(
            "\r  Progress: {:.1}% ({}/{} frames, ETA: {:.0}s)  ",
            p.progress * 100.0,
            p.frames_rendered,
            p.total_frames,
            p.eta_secs,
        );
    });

    let summary = export_frames(Arc::new(Mutex::new(studio)), job, Some(progress_cb)).await?;
    println!(
        "\nRender complete: {} frame(s) written to {}",
        summary.rendered,
        args.output.display()
    );
    if summary.skipped > 0 {
        println!("  {} frame(s) failed and were skipped", summary.skipped);
    }

    Ok(())
}
