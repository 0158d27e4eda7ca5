//! Background compositing.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};

use screenwiz_common::error::{ScreenwizError, ScreenwizResult};
use screenwiz_processing_core::Size;
use screenwiz_project_model::settings::{self, BackgroundSpec};

use crate::frame::FrameContext;
use crate::stage::FrameStage;

/// Resolved background source. Wallpapers are decoded once, when the
/// stage is built or the background changes.
#[derive(Debug, Clone)]
enum Fill {
    Wallpaper(RgbImage),
    Color(settings::Rgb),
    Gradient {
        from: settings::Rgb,
        to: settings::Rgb,
        angle_deg: f64,
    },
}

impl Fill {
    fn load(spec: &BackgroundSpec, wallpaper_dir: &Path) -> ScreenwizResult<Self> {
        Ok(match spec {
            BackgroundSpec::Wallpaper { index } => {
                let path = wallpaper_path(wallpaper_dir, *index);
                let image = image::open(&path)
                    .map_err(|e| ScreenwizError::asset(&path, e.to_string()))?;
                Self::Wallpaper(image.to_rgb8())
            }
            BackgroundSpec::Color { value } => Self::Color(*value),
            BackgroundSpec::Gradient {
                from,
                to,
                angle_deg,
            } => Self::Gradient {
                from: *from,
                to: *to,
                angle_deg: *angle_deg,
            },
        })
    }

    fn render(&self, size: Size) -> RgbImage {
        match self {
            Self::Wallpaper(image) => {
                imageops::resize(image, size.width, size.height, FilterType::Triangle)
            }
            Self::Color(color) => RgbImage::from_pixel(size.width, size.height, Rgb(color.to_array())),
            Self::Gradient {
                from,
                to,
                angle_deg,
            } => linear_gradient(size, *from, *to, *angle_deg),
        }
    }
}

/// Location of wallpaper `index` inside `dir`.
pub fn wallpaper_path(dir: &Path, index: u32) -> PathBuf {
    dir.join(BackgroundSpec::wallpaper_file_name(index))
}

/// Two-colour linear gradient. `angle_deg = 0` runs `from` at the left edge
/// to `to` at the right edge; `90` runs top to bottom.
pub fn linear_gradient(size: Size, from: settings::Rgb, to: settings::Rgb, angle_deg: f64) -> RgbImage {
    let (dx, dy) = (angle_deg.to_radians().cos(), angle_deg.to_radians().sin());
    let (cx, cy) = ((size.width as f64 - 1.0) / 2.0, (size.height as f64 - 1.0) / 2.0);
    let half_span = dx.abs() * cx + dy.abs() * cy;
    let (from, to) = (from.to_array(), to.to_array());

    RgbImage::from_fn(size.width, size.height, |x, y| {
        let t = if half_span > f64::EPSILON {
            let along = (x as f64 - cx) * dx + (y as f64 - cy) * dy;
            ((along / half_span + 1.0) / 2.0).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb([mix(from[0], to[0]), mix(from[1], to[1]), mix(from[2], to[2])])
    })
}

/// Paints the canvas background and places the working frame on it,
/// blending through the mask when one is present.
#[derive(Debug, Clone)]
pub struct BackgroundCompositeStage {
    spec: BackgroundSpec,
    wallpaper_dir: PathBuf,
    fill: Fill,
    cached: Option<RgbImage>,
}

impl BackgroundCompositeStage {
    /// Build the stage, loading the wallpaper asset if `spec` names one.
    pub fn new(spec: BackgroundSpec, wallpaper_dir: impl Into<PathBuf>) -> ScreenwizResult<Self> {
        let wallpaper_dir = wallpaper_dir.into();
        let fill = Fill::load(&spec, &wallpaper_dir)?;
        Ok(Self {
            spec,
            wallpaper_dir,
            fill,
            cached: None,
        })
    }

    pub fn spec(&self) -> &BackgroundSpec {
        &self.spec
    }

    /// Switch to a new background. On failure the previous one stays.
    pub fn set_spec(&mut self, spec: BackgroundSpec) -> ScreenwizResult<()> {
        if spec == self.spec {
            return Ok(());
        }
        self.fill = Fill::load(&spec, &self.wallpaper_dir)?;
        self.spec = spec;
        self.cached = None;
        Ok(())
    }

    fn background(&mut self, canvas: Size) -> &RgbImage {
        let stale = self
            .cached
            .as_ref()
            .map_or(true, |bg| bg.dimensions() != (canvas.width, canvas.height));
        if stale {
            tracing::debug!(
                width = canvas.width,
                height = canvas.height,
                "Rebuilding background"
            );
            self.cached = None;
        }
        let fill = &self.fill;
        self.cached.get_or_insert_with(|| fill.render(canvas))
    }
}

impl FrameStage for BackgroundCompositeStage {
    fn name(&self) -> &'static str {
        "background"
    }

    fn apply(&mut self, mut ctx: FrameContext) -> ScreenwizResult<FrameContext> {
        let (canvas, working) = (ctx.canvas, ctx.working);
        let (x1, y1) = (ctx.x_offset, ctx.y_offset);
        if x1 as u64 + working.width as u64 > canvas.width as u64
            || y1 as u64 + working.height as u64 > canvas.height as u64
        {
            return Err(ScreenwizError::render(format!(
                "frame {}: {}x{} at ({x1}, {y1}) does not fit a {}x{} canvas",
                ctx.frame_index, working.width, working.height, canvas.width, canvas.height
            )));
        }

        let frame = if ctx.image_size() != working {
            imageops::resize(&ctx.image, working.width, working.height, FilterType::Triangle)
        } else {
            std::mem::take(&mut ctx.image)
        };

        let mut output = self.background(canvas).clone();
        match &ctx.mask {
            Some(mask) => {
                if mask.dimensions() != (working.width, working.height) {
                    return Err(ScreenwizError::render(format!(
                        "mask is {}x{} but the working frame is {}x{}",
                        mask.width(),
                        mask.height(),
                        working.width,
                        working.height
                    )));
                }
                for (x, y, px) in frame.enumerate_pixels() {
                    let m = mask.get_pixel(x, y).0[0] as u16;
                    let bg = output.get_pixel_mut(x1 + x, y1 + y);
                    for c in 0..3 {
                        let blended = (px.0[c] as u16 * m + bg.0[c] as u16 * (255 - m) + 127) / 255;
                        bg.0[c] = blended as u8;
                    }
                }
            }
            None => imageops::replace(&mut output, &frame, x1 as i64, y1 as i64),
        }

        ctx.image = output;
        Ok(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GrayImage;

    const RED: settings::Rgb = settings::Rgb::new(255, 0, 0);

    fn color_stage(color: settings::Rgb) -> BackgroundCompositeStage {
        BackgroundCompositeStage::new(BackgroundSpec::Color { value: color }, "/nonexistent")
            .unwrap()
    }

    fn placed(frame: RgbImage, canvas: Size, x: u32, y: u32) -> FrameContext {
        let mut ctx = FrameContext::new(frame, 0);
        ctx.working = ctx.image_size();
        ctx.canvas = canvas;
        ctx.x_offset = x;
        ctx.y_offset = y;
        ctx
    }

    #[test]
    fn test_unmasked_frame_is_pasted_verbatim() {
        let mut stage = color_stage(RED);
        let frame = RgbImage::from_pixel(4, 4, Rgb([0, 0, 255]));
        let ctx = stage.apply(placed(frame, Size::new(10, 10), 3, 2)).unwrap();
        assert_eq!(ctx.image.dimensions(), (10, 10));
        assert_eq!(ctx.image.get_pixel(0, 0), &Rgb([255, 0, 0]));
        assert_eq!(ctx.image.get_pixel(3, 2), &Rgb([0, 0, 255]));
        assert_eq!(ctx.image.get_pixel(6, 5), &Rgb([0, 0, 255]));
        assert_eq!(ctx.image.get_pixel(7, 5), &Rgb([255, 0, 0]));
    }

    #[test]
    fn test_mask_selects_background_where_transparent() {
        let mut stage = color_stage(RED);
        let frame = RgbImage::from_pixel(4, 4, Rgb([0, 0, 255]));
        let mut ctx = placed(frame, Size::new(4, 4), 0, 0);
        let mut mask = GrayImage::from_pixel(4, 4, image::Luma([255]));
        mask.put_pixel(0, 0, image::Luma([0]));
        ctx.mask = Some(mask);
        let ctx = stage.apply(ctx).unwrap();
        assert_eq!(ctx.image.get_pixel(0, 0), &Rgb([255, 0, 0]));
        assert_eq!(ctx.image.get_pixel(1, 0), &Rgb([0, 0, 255]));
    }

    #[test]
    fn test_frame_is_resized_to_working() {
        let mut stage = color_stage(RED);
        let mut ctx = placed(RgbImage::from_pixel(2, 2, Rgb([0, 255, 0])), Size::new(8, 8), 0, 0);
        ctx.working = Size::new(8, 8);
        let ctx = stage.apply(ctx).unwrap();
        assert_eq!(ctx.image.get_pixel(7, 7), &Rgb([0, 255, 0]));
    }

    #[test]
    fn test_out_of_canvas_placement_is_render_error() {
        let mut stage = color_stage(RED);
        let err = stage
            .apply(placed(RgbImage::new(4, 4), Size::new(6, 6), 3, 0))
            .unwrap_err();
        assert!(matches!(err, ScreenwizError::Render { .. }));
    }

    #[test]
    fn test_gradient_endpoints() {
        let black = settings::Rgb::new(0, 0, 0);
        let white = settings::Rgb::new(255, 255, 255);

        let horizontal = linear_gradient(Size::new(11, 3), black, white, 0.0);
        assert_eq!(horizontal.get_pixel(0, 1), &Rgb([0, 0, 0]));
        assert_eq!(horizontal.get_pixel(10, 1), &Rgb([255, 255, 255]));
        assert_eq!(horizontal.get_pixel(5, 0), &Rgb([128, 128, 128]));

        let vertical = linear_gradient(Size::new(3, 11), black, white, 90.0);
        assert_eq!(vertical.get_pixel(1, 0), &Rgb([0, 0, 0]));
        assert_eq!(vertical.get_pixel(1, 10), &Rgb([255, 255, 255]));
    }

    #[test]
    fn test_missing_wallpaper_is_asset_error_at_construction() {
        let err = BackgroundCompositeStage::new(BackgroundSpec::Wallpaper { index: 7 }, "/nonexistent")
            .unwrap_err();
        match err {
            ScreenwizError::Asset { path, .. } => {
                assert!(path.ends_with("gradient-wallpaper-0007.png"));
            }
            other => panic!("expected asset error, got {other:?}"),
        }
    }

    #[test]
    fn test_failed_spec_change_keeps_previous_background() {
        let mut stage = color_stage(RED);
        assert!(stage.set_spec(BackgroundSpec::Wallpaper { index: 1 }).is_err());
        assert_eq!(stage.spec(), &BackgroundSpec::Color { value: RED });

        stage
            .set_spec(BackgroundSpec::Color {
                value: settings::Rgb::new(0, 0, 0),
            })
            .unwrap();
        let ctx = stage
            .apply(placed(RgbImage::new(1, 1), Size::new(2, 2), 0, 0))
            .unwrap();
        assert_eq!(ctx.image.get_pixel(1, 1), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_wallpaper_is_stretched_to_canvas() {
        let dir = std::env::temp_dir().join("screenwiz_test_wallpaper");
        std::fs::create_dir_all(&dir).unwrap();
        RgbImage::from_pixel(4, 4, Rgb([10, 20, 30]))
            .save(wallpaper_path(&dir, 2))
            .unwrap();

        let mut stage =
            BackgroundCompositeStage::new(BackgroundSpec::Wallpaper { index: 2 }, &dir).unwrap();
        let ctx = stage
            .apply(placed(RgbImage::new(1, 1), Size::new(16, 9), 0, 0))
            .unwrap();
        assert_eq!(ctx.image.dimensions(), (16, 9));
        assert_eq!(ctx.image.get_pixel(15, 8), &Rgb([10, 20, 30]));

        std::fs::remove_dir_all(&dir).ok();
    }
}
