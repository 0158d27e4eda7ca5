//! Screenwiz Render Engine
//!
//! Turns decoded screen-capture frames into finished frames: framing,
//! padding, click-triggered zoom, rounded corners, background and cursor.
//!
//! # Pipeline Architecture
//!
//! ```text
//! frames/ ──► FrameSource ──┐
//!                           ├── Aspect ratio   (canvas size)
//! timeline.json ──┐         ├── Padding        (working size)
//!                 │         ├── Inset          (optional border)
//!                 └─────────┼── Zoom           (resize + crop, live events)
//!                           ├── Roundness mask
//! wallpaper / colour ───────┼── Background composite
//!                           │
//! events.jsonl ─────────────┴── Cursor overlay
//!                                      │
//!                                      ▼
//!                         Studio / Player / export_frames
//!                                      │
//!                                      ▼
//!                              frame_NNNNNN.png
//! ```

pub mod export;
pub mod frame;
pub mod pipeline;
pub mod playback;
pub mod source;
pub mod stage;
pub mod stages;
pub mod studio;

pub use export::{export_frames, ExportJob, ExportProgress, ExportStage, ProgressCallback};
pub use frame::FrameContext;
pub use pipeline::{Pipeline, PipelineSettings};
pub use playback::{PlaybackOptions, PlaybackSummary, Player, RenderedFrame};
pub use source::{FrameSource, ImageSequenceSource, InMemorySource};
pub use stage::FrameStage;
pub use studio::Studio;
