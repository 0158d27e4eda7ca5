//! Background playback.
//!
//! The player renders consecutive frames on a tokio task and hands them out
//! over a bounded channel. Each render locks the shared [`Studio`], so edits
//! made through the same mutex land between frames, never inside one.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use image::RgbImage;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

use screenwiz_common::error::{ScreenwizError, ScreenwizResult};

use crate::studio::Studio;

/// A frame produced by the player.
#[derive(Debug, Clone)]
pub struct RenderedFrame {
    pub index: u64,
    pub image: RgbImage,
}

/// Where and how fast to play.
#[derive(Debug, Clone)]
pub struct PlaybackOptions {
    /// First frame index.
    pub start: u64,
    /// Exclusive end; `None` plays to end of stream.
    pub end: Option<u64>,
    /// Channel capacity; a slow consumer blocks rendering at this depth.
    pub capacity: usize,
    /// Delay between frames. `None` renders as fast as possible.
    pub pace: Option<Duration>,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            start: 0,
            end: None,
            capacity: 4,
            pace: None,
        }
    }
}

impl PlaybackOptions {
    /// Pace playback at the source frame rate.
    pub fn realtime(fps: f64) -> Self {
        Self {
            pace: (fps > 0.0).then(|| Duration::from_secs_f64(1.0 / fps)),
            ..Self::default()
        }
    }
}

/// Counters reported when playback ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackSummary {
    pub rendered: u64,
    pub skipped: u64,
}

/// A running playback task.
#[derive(Debug)]
pub struct Player {
    stop_flag: Arc<AtomicBool>,
    task: JoinHandle<ScreenwizResult<PlaybackSummary>>,
}

impl Player {
    /// Start playing `studio` from `options.start`.
    ///
    /// Must be called inside a tokio runtime. Frames that fail to render are
    /// logged and skipped. Playback ends at end of stream, at `options.end`,
    /// on [`Player::stop`], or when the receiver is dropped.
    pub fn start(
        studio: Arc<Mutex<Studio>>,
        options: PlaybackOptions,
    ) -> (Self, mpsc::Receiver<RenderedFrame>) {
        let (tx, rx) = mpsc::channel(options.capacity.max(1));
        let stop_flag = Arc::new(AtomicBool::new(false));
        let task = tokio::spawn(run(studio, options, tx, stop_flag.clone()));
        (Self { stop_flag, task }, rx)
    }

    /// Ask the task to stop after the frame in flight.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::SeqCst);
    }

    /// Stop flag shared with the task, for external coordination.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the task to end.
    pub async fn wait(self) -> ScreenwizResult<PlaybackSummary> {
        self.task
            .await
            .map_err(|e| ScreenwizError::render(format!("playback task failed: {e}")))?
    }
}

async fn run(
    studio: Arc<Mutex<Studio>>,
    options: PlaybackOptions,
    tx: mpsc::Sender<RenderedFrame>,
    stop_flag: Arc<AtomicBool>,
) -> ScreenwizResult<PlaybackSummary> {
    tracing::info!(start = options.start, end = ?options.end, "Playback started");
    let mut summary = PlaybackSummary::default();
    let mut index = options.start;

    while !stop_flag.load(Ordering::SeqCst) && options.end.map_or(true, |end| index < end) {
        let shared = studio.clone();
        let result = tokio::task::spawn_blocking(move || shared.blocking_lock().seek(index))
            .await
            .map_err(|e| ScreenwizError::render(format!("render task failed: {e}")))?;

        match result {
            Ok(Some(image)) => {
                if tx.send(RenderedFrame { index, image }).await.is_err() {
                    tracing::debug!(frame_index = index, "Playback receiver dropped");
                    break;
                }
                summary.rendered += 1;
            }
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(frame_index = index, error = %e, "Skipping frame");
                summary.skipped += 1;
            }
        }

        index += 1;
        if let Some(pace) = options.pace {
            tokio::time::sleep(pace).await;
        }
    }

    tracing::info!(
        rendered = summary.rendered,
        skipped = summary.skipped,
        "Playback stopped"
    );
    Ok(summary)
}
