//! Typed stage settings.
//!
//! Each setting has a compact text form used by the config file and CLI
//! (`"16:9"`, `"40,20"`, `"color:#1a1a1a"`) and a JSON form. Anything that
//! does not match a known shape is a configuration error.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use screenwiz_common::error::{ScreenwizError, ScreenwizResult};

/// Target canvas aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AspectRatio {
    /// Canvas matches the source frame.
    #[default]
    Auto,
    /// Canvas is framed to `width:height`.
    Ratio { width: f64, height: f64 },
}

impl AspectRatio {
    /// Validated `width:height` ratio.
    pub fn ratio(width: f64, height: f64) -> ScreenwizResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(ScreenwizError::config(format!(
                "aspect ratio components must be positive, got {width}:{height}"
            )));
        }
        Ok(Self::Ratio { width, height })
    }

    /// `width / height`, or `None` for [`AspectRatio::Auto`].
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Auto => None,
            Self::Ratio { width, height } => Some(width / height),
        }
    }
}

impl FromStr for AspectRatio {
    type Err = ScreenwizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }
        let (w, h) = compact.split_once(':').ok_or_else(|| {
            ScreenwizError::config(format!("aspect ratio must be 'Auto' or 'W:H', got '{s}'"))
        })?;
        let parse = |part: &str| {
            part.parse::<f64>().map_err(|_| {
                ScreenwizError::config(format!("invalid aspect ratio component '{part}' in '{s}'"))
            })
        };
        Self::ratio(parse(w)?, parse(h)?)
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "Auto"),
            Self::Ratio { width, height } => write!(f, "{width}:{height}"),
        }
    }
}

impl TryFrom<String> for AspectRatio {
    type Error = ScreenwizError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AspectRatio> for String {
    fn from(value: AspectRatio) -> Self {
        value.to_string()
    }
}

/// Space between the canvas edge and the working frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaddingSpec {
    /// Pad the tighter axis by this amount and derive the other axis so the
    /// working frame keeps its aspect ratio.
    Uniform(u32),
    /// Explicit per-axis padding, no aspect preservation.
    Axes { x: u32, y: u32 },
}

impl Default for PaddingSpec {
    fn default() -> Self {
        Self::Uniform(0)
    }
}

impl FromStr for PaddingSpec {
    type Err = ScreenwizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ScreenwizError::config(format!("padding must be 'N' or 'X,Y', got '{s}'"));
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        match parts.as_slice() {
            [n] => n.parse().map(Self::Uniform).map_err(|_| invalid()),
            [x, y] => Ok(Self::Axes {
                x: x.parse().map_err(|_| invalid())?,
                y: y.parse().map_err(|_| invalid())?,
            }),
            _ => Err(invalid()),
        }
    }
}

/// Border drawn inside the source frame by the inset stage.
///
/// JSON forms: `10`, `[[left, right], [top, bottom]]`, `[left, top, right, bottom]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InsetSpec {
    /// Top and bottom get `n`; left and right are scaled by the frame's
    /// aspect ratio.
    Uniform(u32),
    /// `[left, right]` and `[top, bottom]`.
    Pairs([u32; 2], [u32; 2]),
    /// `[left, top, right, bottom]`.
    Sides([u32; 4]),
}

impl InsetSpec {
    /// Parse from a JSON value, mapping shape mismatches to a configuration
    /// error.
    pub fn from_json(value: serde_json::Value) -> ScreenwizResult<Self> {
        serde_json::from_value(value.clone())
            .map_err(|_| ScreenwizError::config(format!("invalid inset format: {value}")))
    }
}

/// An 8-bit RGB colour, written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl FromStr for Rgb {
    type Err = ScreenwizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        let invalid = || ScreenwizError::config(format!("colour must be '#rrggbb', got '{s}'"));
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel =
            |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).map_err(|_| invalid());
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ScreenwizError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

/// What the background compositor paints behind the working frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BackgroundSpec {
    /// Bundled wallpaper `gradient-wallpaper-NNNN.png`, stretched to the canvas.
    Wallpaper { index: u32 },
    /// Solid colour.
    Color { value: Rgb },
    /// Linear two-colour gradient. `angle_deg = 0` runs left to right,
    /// `90` top to bottom.
    Gradient {
        from: Rgb,
        to: Rgb,
        #[serde(default)]
        angle_deg: f64,
    },
}

impl BackgroundSpec {
    /// File name of a wallpaper asset.
    pub fn wallpaper_file_name(index: u32) -> String {
        format!("gradient-wallpaper-{index:04}.png")
    }

    /// Parse from a JSON value, mapping shape mismatches to a configuration
    /// error.
    pub fn from_json(value: serde_json::Value) -> ScreenwizResult<Self> {
        serde_json::from_value(value.clone())
            .map_err(|e| ScreenwizError::config(format!("invalid background {value}: {e}")))
    }
}

impl Default for BackgroundSpec {
    fn default() -> Self {
        Self::Color {
            value: Rgb::new(0x1a, 0x1a, 0x1a),
        }
    }
}

impl FromStr for BackgroundSpec {
    type Err = ScreenwizError;

    /// `wallpaper:N`, `color:#rrggbb`, or `gradient:#from,#to[,angle]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, value) = s.split_once(':').ok_or_else(|| {
            ScreenwizError::config(format!("background must be 'kind:value', got '{s}'"))
        })?;
        match kind.trim() {
            "wallpaper" => value
                .trim()
                .parse()
                .map(|index| Self::Wallpaper { index })
                .map_err(|_| ScreenwizError::config(format!("invalid wallpaper index '{value}'"))),
            "color" => Ok(Self::Color {
                value: value.parse()?,
            }),
            "gradient" => {
                let parts: Vec<&str> = value.split(',').map(str::trim).collect();
                let (from, to, angle) = match parts.as_slice() {
                    [from, to] => (from, to, "0"),
                    [from, to, angle] => (from, to, *angle),
                    _ => {
                        return Err(ScreenwizError::config(format!(
                            "gradient must be '#from,#to[,angle]', got '{value}'"
                        )))
                    }
                };
                let invalid_angle =
                    || ScreenwizError::config(format!("invalid gradient angle '{angle}'"));
                let angle_deg: f64 = angle.parse().map_err(|_| invalid_angle())?;
                if !angle_deg.is_finite() {
                    return Err(invalid_angle());
                }
                Ok(Self::Gradient {
                    from: from.parse()?,
                    to: to.parse()?,
                    angle_deg,
                })
            }
            other => Err(ScreenwizError::config(format!(
                "unknown background kind '{other}' (expected wallpaper, color, gradient)"
            ))),
        }
    }
}

/// Where the cursor overlay is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorPlacement {
    /// On the final composited canvas, after the background.
    #[default]
    Canvas,
    /// On the source frame before framing, so the glyph zooms with content.
    Source,
}

impl FromStr for CursorPlacement {
    type Err = ScreenwizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "canvas" => Ok(Self::Canvas),
            "source" => Ok(Self::Source),
            _ => Err(ScreenwizError::config(format!(
                "cursor placement must be 'canvas' or 'source', got '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio_parse() {
        assert_eq!("Auto".parse::<AspectRatio>().unwrap(), AspectRatio::Auto);
        assert_eq!("auto".parse::<AspectRatio>().unwrap(), AspectRatio::Auto);
        let ratio: AspectRatio = " 16 : 9 ".parse().unwrap();
        assert!((ratio.value().unwrap() - 16.0 / 9.0).abs() < 1e-12);
        assert!("16x9".parse::<AspectRatio>().is_err());
        assert!("0:9".parse::<AspectRatio>().is_err());
        assert!("a:b".parse::<AspectRatio>().is_err());
    }

    #[test]
    fn test_aspect_ratio_json_uses_text_form() {
        let ratio = AspectRatio::ratio(4.0, 3.0).unwrap();
        let json = serde_json::to_string(&ratio).unwrap();
        assert_eq!(json, "\"4:3\"");
        assert_eq!(serde_json::from_str::<AspectRatio>(&json).unwrap(), ratio);
    }

    #[test]
    fn test_padding_parse() {
        assert_eq!("100".parse::<PaddingSpec>().unwrap(), PaddingSpec::Uniform(100));
        assert_eq!(
            "40, 20".parse::<PaddingSpec>().unwrap(),
            PaddingSpec::Axes { x: 40, y: 20 }
        );
        assert!("1,2,3".parse::<PaddingSpec>().is_err());
        assert!("-5".parse::<PaddingSpec>().is_err());
    }

    #[test]
    fn test_padding_json_shapes() {
        assert_eq!(
            serde_json::from_str::<PaddingSpec>("12").unwrap(),
            PaddingSpec::Uniform(12)
        );
        assert_eq!(
            serde_json::from_str::<PaddingSpec>(r#"{"x":3,"y":4}"#).unwrap(),
            PaddingSpec::Axes { x: 3, y: 4 }
        );
        assert!(serde_json::from_str::<PaddingSpec>("[1,2,3]").is_err());
    }

    #[test]
    fn test_inset_json_shapes() {
        assert_eq!(
            InsetSpec::from_json(serde_json::json!(10)).unwrap(),
            InsetSpec::Uniform(10)
        );
        assert_eq!(
            InsetSpec::from_json(serde_json::json!([[1, 2], [3, 4]])).unwrap(),
            InsetSpec::Pairs([1, 2], [3, 4])
        );
        assert_eq!(
            InsetSpec::from_json(serde_json::json!([1, 2, 3, 4])).unwrap(),
            InsetSpec::Sides([1, 2, 3, 4])
        );
        let err = InsetSpec::from_json(serde_json::json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, ScreenwizError::Config { .. }));
    }

    #[test]
    fn test_rgb_hex() {
        let c: Rgb = "#1a2B3c".parse().unwrap();
        assert_eq!(c, Rgb::new(0x1a, 0x2b, 0x3c));
        assert_eq!(c.to_string(), "#1a2b3c");
        assert!("#12345".parse::<Rgb>().is_err());
        assert!("#zzzzzz".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_rgb_rejects_signed_channels() {
        assert!("#+1+2+3".parse::<Rgb>().is_err());
        assert!("#-1-2-3".parse::<Rgb>().is_err());
        assert!("#12 456".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_gradient_rejects_non_finite_angle() {
        for angle in ["NaN", "inf", "-infinity"] {
            let raw = format!("gradient:#000000,#ffffff,{angle}");
            assert!(raw.parse::<BackgroundSpec>().is_err(), "{angle} accepted");
        }
    }

    #[test]
    fn test_background_parse() {
        assert_eq!(
            "wallpaper:3".parse::<BackgroundSpec>().unwrap(),
            BackgroundSpec::Wallpaper { index: 3 }
        );
        assert_eq!(
            "color:#000000".parse::<BackgroundSpec>().unwrap(),
            BackgroundSpec::Color {
                value: Rgb::new(0, 0, 0)
            }
        );
        assert_eq!(
            "gradient:#000000,#ffffff,90".parse::<BackgroundSpec>().unwrap(),
            BackgroundSpec::Gradient {
                from: Rgb::new(0, 0, 0),
                to: Rgb::new(255, 255, 255),
                angle_deg: 90.0,
            }
        );
        assert!("video:1".parse::<BackgroundSpec>().is_err());
        assert!("color".parse::<BackgroundSpec>().is_err());
    }

    #[test]
    fn test_background_json_matches_config_default() {
        let spec =
            BackgroundSpec::from_json(serde_json::json!({ "type": "wallpaper", "index": 1 }))
                .unwrap();
        assert_eq!(spec, BackgroundSpec::Wallpaper { index: 1 });
        assert_eq!(
            BackgroundSpec::wallpaper_file_name(1),
            "gradient-wallpaper-0001.png"
        );
        assert!(BackgroundSpec::from_json(serde_json::json!({ "type": "video" })).is_err());
    }

    #[test]
    fn test_cursor_placement_parse() {
        assert_eq!(
            "Source".parse::<CursorPlacement>().unwrap(),
            CursorPlacement::Source
        );
        assert!("overlay".parse::<CursorPlacement>().is_err());
    }
}
