//! Application configuration.
//!
//! Values here are plain strings and numbers; the render engine parses them
//! into typed stage settings and reports malformed shapes as configuration
//! errors at that point.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default look of a freshly opened studio.
    pub studio: StudioDefaults,

    /// Zoom animation parameters.
    pub zoom: ZoomDefaults,

    /// Where wallpaper and cursor assets live.
    pub assets: AssetPaths,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default framing and styling parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioDefaults {
    /// Aspect ratio, either `"Auto"` or `"W:H"`.
    pub aspect_ratio: String,

    /// Padding, either `"N"` or `"X,Y"`.
    pub padding: String,

    /// Corner radius in canvas pixels.
    pub border_radius: u32,

    /// Optional inset in source pixels (0 disables the inset stage).
    pub inset: u32,

    /// Background as JSON, e.g. `{"type":"wallpaper","index":1}`.
    pub background: serde_json::Value,

    /// Longer side of the cursor glyph in pixels.
    pub cursor_size: u32,

    /// Where the cursor overlay runs: `"canvas"` or `"source"`.
    pub cursor_placement: String,
}

/// Zoom animation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomDefaults {
    /// Ramp-in duration in seconds.
    pub zoom_in_duration: f64,

    /// Ramp-out duration in seconds.
    pub zoom_out_duration: f64,

    /// Peak zoom multiplier.
    pub zoom_factor: f64,

    /// Fraction of the frame treated as a corner/edge region when
    /// classifying the click anchor.
    pub corner_ratio: f64,

    /// Lifetime of a zoom event created from a recorded click (seconds).
    pub event_duration: f64,
}

/// Asset locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    /// Directory holding `gradient-wallpaper-NNNN.png` files.
    pub wallpaper_dir: PathBuf,

    /// Cursor glyph (PNG with alpha). `None` disables the cursor overlay.
    pub cursor: Option<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "screenwiz=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            studio: StudioDefaults::default(),
            zoom: ZoomDefaults::default(),
            assets: AssetPaths::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for StudioDefaults {
    fn default() -> Self {
        Self {
            aspect_ratio: "Auto".to_string(),
            padding: "100".to_string(),
            border_radius: 50,
            inset: 0,
            background: serde_json::json!({ "type": "wallpaper", "index": 1 }),
            cursor_size: 64,
            cursor_placement: "canvas".to_string(),
        }
    }
}

impl Default for ZoomDefaults {
    fn default() -> Self {
        Self {
            zoom_in_duration: 1.0,
            zoom_out_duration: 1.0,
            zoom_factor: 2.0,
            corner_ratio: 0.3,
            event_duration: 1.5,
        }
    }
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            wallpaper_dir: data_dir().join("wallpapers"),
            cursor: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from an explicit path, falling back to defaults.
    pub fn load_from(config_path: &std::path::Path) -> Self {
        if config_path.exists() {
            match std::fs::read_to_string(config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(&config_file_path())
    }

    /// Save config to an explicit path, creating parent directories.
    pub fn save_to(&self, config_path: &std::path::Path) -> Result<(), std::io::Error> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("screenwiz").join("config.json")
}

fn data_dir() -> PathBuf {
    let base = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".local").join("share")
        });
    base.join("screenwiz")
}
