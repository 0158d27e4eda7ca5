//! Error types shared across Screenwiz crates.

use std::path::PathBuf;

/// Top-level error type for Screenwiz operations.
///
/// Every failure in the frame pipeline is deterministic for a given input,
/// so none of these variants are retryable.
#[derive(Debug, thiserror::Error)]
pub enum ScreenwizError {
    /// Malformed stage configuration (aspect ratio, padding, inset,
    /// background, zoom event fields).
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A caller broke an API contract, e.g. an out-of-range timeline index
    /// or an update that would reorder live zoom events.
    #[error("Precondition violated: {message}")]
    Precondition { message: String },

    /// An asset (wallpaper, cursor glyph) could not be loaded.
    #[error("Asset error at {path}: {message}")]
    Asset { path: PathBuf, message: String },

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("Frame source error: {message}")]
    Source { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using ScreenwizError.
pub type ScreenwizResult<T> = Result<T, ScreenwizError>;

impl ScreenwizError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition {
            message: msg.into(),
        }
    }

    pub fn asset(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Asset {
            path: path.into(),
            message: msg.into(),
        }
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
        }
    }

    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source {
            message: msg.into(),
        }
    }

    /// Whether this error was caused by the caller rather than by data or
    /// the environment.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::Config { .. } | Self::Precondition { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_message() {
        let err = ScreenwizError::precondition("index 4 out of range for 2 live events");
        assert_eq!(
            err.to_string(),
            "Precondition violated: index 4 out of range for 2 live events"
        );
    }

    #[test]
    fn test_caller_error_classification() {
        assert!(ScreenwizError::config("bad padding").is_caller_error());
        assert!(ScreenwizError::precondition("bad index").is_caller_error());
        assert!(!ScreenwizError::render("placement").is_caller_error());
        assert!(!ScreenwizError::asset("/tmp/missing.png", "not found").is_caller_error());
    }
}
