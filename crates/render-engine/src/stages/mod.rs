//! The pipeline stages, in the order the pipeline runs them.

pub mod aspect;
pub mod padding;
pub mod inset;
pub mod zoom;
pub mod roundness;
pub mod background;
pub mod cursor;

pub use aspect::AspectRatioStage;
pub use background::BackgroundCompositeStage;
pub use cursor::CursorOverlayStage;
pub use inset::InsetStage;
pub use padding::PaddingStage;
pub use roundness::RoundnessMaskStage;
pub use zoom::ZoomStage;
