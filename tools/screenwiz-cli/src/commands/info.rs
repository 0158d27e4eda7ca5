//! Show frame sequence information.

use std::path::PathBuf;

use screenwiz_render_engine::{FrameSource, ImageSequenceSource};

pub fn run(frames_dir: PathBuf, fps: f64) -> anyhow::Result<()> {
    let mut source = ImageSequenceSource::open(&frames_dir, fps)
        .map_err(|e| anyhow::anyhow!("Failed to open frames: {e}"))?;

    println!("Frames: {}", source.dir().display());
    println!("  Count: {}", source.frame_count());
    println!("  FPS: {}", source.fps());
    println!("  Duration: {:.2}s", source.duration_secs());
    if let Some(path) = source.frame_path(0) {
        println!("  First: {}", path.display());
    }
    if let Some(path) = source.frame_path(source.frame_count().saturating_sub(1)) {
        println!("  Last: {}", path.display());
    }

    if let Some(frame) = source.frame(Some(0))? {
        println!("  Resolution: {}x{}", frame.width(), frame.height());
    }

    Ok(())
}
