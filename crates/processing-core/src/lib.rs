//! Screenwiz Processing Core: frame geometry
//!
//! Computes where every pixel of a frame ends up:
//! - **Framing:** canvas size from an aspect ratio, padding, inset borders
//! - **Zoom curve:** animated zoom factor for a frame under a zoom event
//! - **Anchoring:** which side of the frame stays put while zooming
//! - **Zoom layout:** clamped placement and per-corner rounding eligibility
//!
//! This crate is pure computation: no pixels, no I/O.
//! All inputs are data; all outputs are data.

pub mod anchor;
pub mod framing;
pub mod zoom_curve;
pub mod zoom_layout;

pub use anchor::{AxisZone, ZoomAnchor};
pub use framing::{canvas_size, pad_working_frame, InsetSides, PaddedFrame, Size};
pub use zoom_curve::{preceding_event, ZoomCurve, ZoomPhase, ZoomSample};
pub use zoom_layout::{CornerEligibility, ZoomLayout};
