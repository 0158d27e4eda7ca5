//! Screenwiz Project Model
//!
//! Defines the data the frame pipeline consumes:
//! - **Timeline:** ordered click-triggered zoom events with soft deletion
//! - **Sorted search:** binary-search helpers that keep the timeline ordered
//! - **Easing:** the curve that shapes zoom ramps
//! - **Settings:** typed aspect ratio, padding, inset and background values
//! - **Recording:** recorded mouse clicks and moves
//!
//! All pointer coordinates are normalized to `[0.0, 1.0]` relative to the
//! captured frame.

pub mod easing;
pub mod recording;
pub mod settings;
pub mod sorted;
pub mod timeline;

pub use easing::*;
pub use recording::*;
pub use settings::*;
pub use sorted::*;
pub use timeline::*;
