//! Per-frame state threaded through the pipeline stages.

use image::{GrayImage, RgbImage};

use screenwiz_processing_core::{CornerEligibility, Size};

/// Everything the stages know about the frame being rendered.
///
/// Lives for one `Pipeline::render` call. Stages read what earlier stages
/// wrote and never go back to fields they already produced.
#[derive(Debug, Clone)]
pub struct FrameContext {
    /// Current pixel buffer. Source-sized until the zoom stage, working-sized
    /// after it, canvas-sized after the background composite.
    pub image: RgbImage,
    /// Size of the decoded source frame.
    pub source_size: Size,
    pub frame_index: u64,
    /// Output canvas size.
    pub canvas: Size,
    /// Size of the picture placed on the canvas.
    pub working: Size,
    /// Top-left of the working frame on the canvas.
    pub x_offset: u32,
    pub y_offset: u32,
    /// Always >= 1.
    pub zoom_factor: f64,
    pub corners: CornerEligibility,
    /// Opacity over the working rectangle, 255 = picture.
    pub mask: Option<GrayImage>,
}

impl FrameContext {
    pub fn new(image: RgbImage, frame_index: u64) -> Self {
        let size = Size::new(image.width(), image.height());
        Self {
            image,
            source_size: size,
            frame_index,
            canvas: size,
            working: size,
            x_offset: 0,
            y_offset: 0,
            zoom_factor: 1.0,
            corners: CornerEligibility::ALL,
            mask: None,
        }
    }

    pub fn image_size(&self) -> Size {
        Size::new(self.image.width(), self.image.height())
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }
}
