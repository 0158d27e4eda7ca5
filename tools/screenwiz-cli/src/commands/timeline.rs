//! Edit a zoom timeline file.

use std::path::{Path, PathBuf};

use clap::Subcommand;

use screenwiz_common::config::AppConfig;
use screenwiz_common::error::ScreenwizError;
use screenwiz_project_model::timeline::{ZoomEvent, ZoomEventPatch, ZoomTimeline};

#[derive(Subcommand)]
pub enum TimelineAction {
    /// List the live zoom events
    Show,

    /// Add a zoom event (creates the file if needed)
    Insert {
        /// Normalized horizontal focus [0, 1]
        #[arg(long)]
        x: f64,

        /// Normalized vertical focus [0, 1]
        #[arg(long)]
        y: f64,

        /// Start frame
        #[arg(long)]
        frame: u64,

        /// Lifetime in seconds (defaults to the configured event duration)
        #[arg(long)]
        duration: Option<f64>,
    },

    /// Change fields of the event at INDEX
    Update {
        index: usize,

        #[arg(long)]
        x: Option<f64>,

        #[arg(long)]
        y: Option<f64>,

        #[arg(long)]
        frame: Option<u64>,

        #[arg(long)]
        duration: Option<f64>,
    },

    /// Delete the event at INDEX
    Delete { index: usize },

    /// Delete every event
    Clear,
}

fn load_or_empty(path: &Path) -> anyhow::Result<ZoomTimeline> {
    match ZoomTimeline::load(path) {
        Ok(timeline) => Ok(timeline),
        Err(ScreenwizError::FileNotFound { .. }) => Ok(ZoomTimeline::new()),
        Err(e) => Err(anyhow::anyhow!("Failed to load timeline: {e}")),
    }
}

fn print_events(events: &[ZoomEvent]) {
    if events.is_empty() {
        println!("  (no zoom events)");
        return;
    }
    for (index, event) in events.iter().enumerate() {
        println!(
            "  [{index}] frame {:>6}  at ({:.3}, {:.3})  for {:.2}s",
            event.frame_index, event.x, event.y, event.duration
        );
    }
}

/// Apply `action` to `timeline`, returning whether it changed.
fn apply(
    timeline: &mut ZoomTimeline,
    action: TimelineAction,
    config: &AppConfig,
) -> anyhow::Result<bool> {
    let live = match action {
        TimelineAction::Show => return Ok(false),
        TimelineAction::Insert {
            x,
            y,
            frame,
            duration,
        } => {
            let event = ZoomEvent::new(x, y, frame, duration.unwrap_or(config.zoom.event_duration))?;
            timeline.insert(event)?
        }
        TimelineAction::Update {
            index,
            x,
            y,
            frame,
            duration,
        } => {
            let patch = ZoomEventPatch {
                x,
                y,
                frame_index: frame,
                duration,
            };
            if patch.is_empty() {
                anyhow::bail!("Nothing to update: pass at least one of --x, --y, --frame, --duration");
            }
            timeline.update(index, patch)?
        }
        TimelineAction::Delete { index } => timeline.soft_delete(index)?,
        TimelineAction::Clear => timeline.soft_delete_all(),
    };
    tracing::debug!(live = live.len(), "Timeline edited");
    Ok(true)
}

pub fn run(file: PathBuf, action: TimelineAction, config: &AppConfig) -> anyhow::Result<()> {
    let mut timeline = load_or_empty(&file)?;

    if apply(&mut timeline, action, config)? {
        timeline.save(&file)?;
        println!("Updated {}", file.display());
    } else {
        println!("Timeline: {}", file.display());
    }
    print_events(&timeline.live_events());

    Ok(())
}
