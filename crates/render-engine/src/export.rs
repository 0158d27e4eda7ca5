//! Rendering a frame range to numbered PNG files.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;

use screenwiz_common::error::{ScreenwizError, ScreenwizResult};

use crate::playback::{PlaybackOptions, PlaybackSummary, Player};
use crate::studio::Studio;

/// A frame export ready to run.
#[derive(Debug, Clone)]
pub struct ExportJob {
    /// Directory receiving `frame_NNNNNN.png` files.
    pub output_dir: PathBuf,

    /// First frame to render.
    pub start_frame: u64,

    /// Exclusive end frame; `None` renders to end of stream.
    pub end_frame: Option<u64>,
}

impl ExportJob {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            start_frame: 0,
            end_frame: None,
        }
    }

    /// Output path of frame `index`.
    pub fn frame_path(&self, index: u64) -> PathBuf {
        frame_path(&self.output_dir, index)
    }
}

pub fn frame_path(dir: &Path, index: u64) -> PathBuf {
    dir.join(format!("frame_{index:06}.png"))
}

/// Progress callback for export rendering.
pub type ProgressCallback = Box<dyn Fn(ExportProgress) + Send>;

/// Export progress report.
#[derive(Debug, Clone)]
pub struct ExportProgress {
    /// Current progress [0.0, 1.0].
    pub progress: f64,

    /// Frames written so far.
    pub frames_rendered: u64,

    /// Frames in the requested range.
    pub total_frames: u64,

    /// Estimated time remaining in seconds.
    pub eta_secs: f64,

    pub stage: ExportStage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStage {
    Preparing,
    Rendering,
    Complete,
}

/// Render the job's frame range through `studio` and write each frame as
/// a PNG. Frames that fail to render are skipped and counted.
pub async fn export_frames(
    studio: Arc<Mutex<Studio>>,
    job: ExportJob,
    progress: Option<ProgressCallback>,
) -> ScreenwizResult<PlaybackSummary> {
    let frame_count = studio.lock().await.frame_count();
    let end = job.end_frame.map_or(frame_count, |end| end.min(frame_count));
    if job.start_frame >= end {
        return Err(ScreenwizError::config(format!(
            "empty frame range {}..{end} for a source of {frame_count} frames",
            job.start_frame
        )));
    }
    let total_frames = end - job.start_frame;

    tracing::info!(
        output = %job.output_dir.display(),
        start = job.start_frame,
        end,
        "Starting export"
    );
    std::fs::create_dir_all(&job.output_dir)?;

    let report = |frames_rendered: u64, eta_secs: f64, stage: ExportStage| {
        if let Some(cb) = &progress {
            cb(ExportProgress {
                progress: frames_rendered as f64 / total_frames as f64,
                frames_rendered,
                total_frames,
                eta_secs,
                stage,
            });
        }
    };
    report(0, 0.0, ExportStage::Preparing);

    let options = PlaybackOptions {
        start: job.start_frame,
        end: Some(end),
        ..PlaybackOptions::default()
    };
    let (player, mut rx) = Player::start(studio, options);
    let started = Instant::now();
    let mut written = 0u64;

    while let Some(frame) = rx.recv().await {
        let path = job.frame_path(frame.index);
        let image = frame.image;
        let saved = tokio::task::spawn_blocking(move || image.save(&path).map(|_| path))
            .await
            .map_err(|e| ScreenwizError::render(format!("write task failed: {e}")))?;
        match saved {
            Ok(path) => tracing::debug!(path = %path.display(), "Wrote frame"),
            Err(e) => {
                player.stop();
                return Err(ScreenwizError::render(format!(
                    "failed to write frame {}: {e}",
                    frame.index
                )));
            }
        }

        written += 1;
        let per_frame = started.elapsed().as_secs_f64() / written as f64;
        let eta = per_frame * total_frames.saturating_sub(written) as f64;
        report(written, eta, ExportStage::Rendering);
    }

    let summary = player.wait().await?;
    report(written, 0.0, ExportStage::Complete);
    tracing::info!(
        rendered = summary.rendered,
        skipped = summary.skipped,
        elapsed_secs = started.elapsed().as_secs_f64(),
        "Export complete"
    );
    Ok(summary)
}
