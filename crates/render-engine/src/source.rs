//! Frame sources feeding the pipeline.

use std::path::{Path, PathBuf};

use image::RgbImage;

use screenwiz_common::error::{ScreenwizError, ScreenwizResult};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// Random-access supplier of decoded frames.
pub trait FrameSource: Send {
    /// Frame at `index`, or the next frame when `index` is `None`.
    ///
    /// `Ok(None)` means end of stream. A successful read moves the position
    /// just past the returned frame.
    fn frame(&mut self, index: Option<u64>) -> ScreenwizResult<Option<RgbImage>>;

    fn fps(&self) -> f64;

    fn frame_count(&self) -> u64;

    /// Index of the frame the next `frame(None)` call returns.
    fn position(&self) -> u64;

    fn duration_secs(&self) -> f64 {
        self.frame_count() as f64 / self.fps()
    }
}

fn validate_fps(fps: f64) -> ScreenwizResult<f64> {
    if fps.is_finite() && fps > 0.0 {
        Ok(fps)
    } else {
        Err(ScreenwizError::config(format!("fps must be positive, got {fps}")))
    }
}

/// Frames held in memory.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    frames: Vec<RgbImage>,
    fps: f64,
    position: u64,
}

impl InMemorySource {
    pub fn new(frames: Vec<RgbImage>, fps: f64) -> ScreenwizResult<Self> {
        Ok(Self {
            frames,
            fps: validate_fps(fps)?,
            position: 0,
        })
    }
}

impl FrameSource for InMemorySource {
    fn frame(&mut self, index: Option<u64>) -> ScreenwizResult<Option<RgbImage>> {
        let index = index.unwrap_or(self.position);
        let Some(frame) = usize::try_from(index).ok().and_then(|i| self.frames.get(i)) else {
            return Ok(None);
        };
        self.position = index + 1;
        Ok(Some(frame.clone()))
    }

    fn fps(&self) -> f64 {
        self.fps
    }

    fn frame_count(&self) -> u64 {
        self.frames.len() as u64
    }

    fn position(&self) -> u64 {
        self.position
    }
}

/// A directory of numbered still images, decoded on demand in file-name
/// order.
#[derive(Debug, Clone)]
pub struct ImageSequenceSource {
    dir: PathBuf,
    paths: Vec<PathBuf>,
    fps: f64,
    position: u64,
}

impl ImageSequenceSource {
    pub fn open(dir: impl AsRef<Path>, fps: f64) -> ScreenwizResult<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(ScreenwizError::FileNotFound {
                path: dir.to_path_buf(),
            });
        }

        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            })
            .collect();
        if paths.is_empty() {
            return Err(ScreenwizError::source(format!(
                "no image frames found in {}",
                dir.display()
            )));
        }
        paths.sort();
        let fps = validate_fps(fps)?;

        tracing::info!(dir = %dir.display(), frames = paths.len(), fps, "Opened image sequence");
        Ok(Self {
            dir: dir.to_path_buf(),
            paths,
            fps,
            position: 0,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn frame_path(&self, index: u64) -> Option<&Path> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.paths.get(i))
            .map(PathBuf::as_path)
    }
}

impl FrameSource for ImageSequenceSource {
    fn frame(&mut self, index: Option<u64>) -> ScreenwizResult<Option<RgbImage>> {
        let index = index.unwrap_or(self.position);
        let Some(path) = self.frame_path(index) else {
            return Ok(None);
        };
        let image = image::open(path).map_err(|e| {
            ScreenwizError::source(format!("failed to decode {}: {e}", path.display()))
        })?;
        self.position = index + 1;
        Ok(Some(image.to_rgb8()))
    }

    fn fps(&self) -> f64 {
        self.fps
    }

    fn frame_count(&self) -> u64 {
        self.paths.len() as u64
    }

    fn position(&self) -> u64 {
        self.position
    }
}
