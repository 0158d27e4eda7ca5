//! Recorded mouse activity.
//!
//! Recordings are append-only JSONL, one sample per line. Lines starting
//! with `#` carry free-form metadata and are skipped. Coordinates are
//! normalized to `[0.0, 1.0]` relative to the captured frame.

use std::path::Path;

use serde::{Deserialize, Serialize};

use screenwiz_common::error::{ScreenwizError, ScreenwizResult};

use crate::timeline::{ZoomEvent, ZoomTimeline};

/// Normalized cursor position.
pub type CursorPosition = (f64, f64);

/// A single pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MouseSample {
    #[serde(rename = "frame")]
    pub frame_index: u64,
    pub x: f64,
    pub y: f64,
}

/// One line of a recording.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MouseEvent {
    Click(MouseSample),
    Move(MouseSample),
}

impl MouseEvent {
    pub fn sample(&self) -> &MouseSample {
        match self {
            Self::Click(sample) | Self::Move(sample) => sample,
        }
    }
}

/// Clicks and moves captured alongside a screen recording.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MouseRecording {
    pub clicks: Vec<MouseSample>,
    pub moves: Vec<MouseSample>,
}

impl MouseRecording {
    /// Parse JSONL content. Positions outside `[0, 1]` are rejected with the
    /// offending line number.
    pub fn parse_jsonl(jsonl: &str) -> ScreenwizResult<Self> {
        let mut recording = Self::default();
        for (line_no, line) in jsonl.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let event: MouseEvent = serde_json::from_str(line).map_err(|e| {
                ScreenwizError::config(format!("recording line {}: {e}", line_no + 1))
            })?;
            let sample = event.sample();
            if !(0.0..=1.0).contains(&sample.x) || !(0.0..=1.0).contains(&sample.y) {
                return Err(ScreenwizError::config(format!(
                    "recording line {}: position ({}, {}) outside [0, 1]",
                    line_no + 1,
                    sample.x,
                    sample.y
                )));
            }
            match event {
                MouseEvent::Click(sample) => recording.clicks.push(sample),
                MouseEvent::Move(sample) => recording.moves.push(sample),
            }
        }
        recording.clicks.sort_by_key(|s| s.frame_index);
        recording.moves.sort_by_key(|s| s.frame_index);
        Ok(recording)
    }

    /// Read and parse a recording file.
    pub fn load(path: impl AsRef<Path>) -> ScreenwizResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ScreenwizError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        Self::parse_jsonl(&std::fs::read_to_string(path)?)
    }

    /// Serialize to JSONL, clicks and moves interleaved by frame.
    pub fn to_jsonl(&self) -> ScreenwizResult<String> {
        let mut events: Vec<MouseEvent> = self
            .clicks
            .iter()
            .copied()
            .map(MouseEvent::Click)
            .chain(self.moves.iter().copied().map(MouseEvent::Move))
            .collect();
        events.sort_by_key(|e| e.sample().frame_index);

        let mut output = String::new();
        for event in &events {
            output.push_str(&serde_json::to_string(event)?);
            output.push('\n');
        }
        Ok(output)
    }

    /// One zoom event per click, in frame order, each lasting
    /// `default_duration` seconds.
    pub fn zoom_events(&self, default_duration: f64) -> ScreenwizResult<Vec<ZoomEvent>> {
        self.clicks
            .iter()
            .map(|c| ZoomEvent::new(c.x, c.y, c.frame_index, default_duration))
            .collect()
    }

    /// Timeline seeded from the recorded clicks.
    pub fn zoom_timeline(&self, default_duration: f64) -> ScreenwizResult<ZoomTimeline> {
        ZoomTimeline::from_events(self.zoom_events(default_duration)?)
    }

    /// Per-frame cursor position for frames `0..frame_count`.
    ///
    /// Every sample (click or move) updates the position, which is then held
    /// until the next sample. Frames before the first sample have none.
    pub fn cursor_track(&self, frame_count: u64) -> Vec<Option<CursorPosition>> {
        let mut samples: Vec<&MouseSample> = self.moves.iter().chain(&self.clicks).collect();
        samples.sort_by_key(|s| s.frame_index);

        let mut track = Vec::with_capacity(frame_count as usize);
        let mut pending = samples.into_iter().peekable();
        let mut current = None;
        for frame in 0..frame_count {
            while let Some(sample) = pending.next_if(|s| s.frame_index <= frame) {
                current = Some((sample.x, sample.y));
            }
            track.push(current);
        }
        track
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"# {"source":"screen-1"}
{"type":"move","frame":2,"x":0.1,"y":0.2}
{"type":"click","frame":5,"x":0.5,"y":0.5}
{"type":"move","frame":7,"x":0.9,"y":0.8}
{"type":"click","frame":1,"x":0.2,"y":0.3}
"#;

    #[test]
    fn test_parse_splits_and_sorts() {
        let rec = MouseRecording::parse_jsonl(SAMPLE).unwrap();
        assert_eq!(rec.clicks.len(), 2);
        assert_eq!(rec.moves.len(), 2);
        assert_eq!(rec.clicks[0].frame_index, 1);
        assert_eq!(rec.clicks[1].frame_index, 5);
    }

    #[test]
    fn test_zoom_events_follow_clicks() {
        let rec = MouseRecording::parse_jsonl(SAMPLE).unwrap();
        let events = rec.zoom_events(1.5).unwrap();
        let frames: Vec<u64> = events.iter().map(|e| e.frame_index).collect();
        assert_eq!(frames, vec![1, 5]);
        assert!(events.iter().all(|e| (e.duration - 1.5).abs() < 1e-12));

        let timeline = rec.zoom_timeline(1.5).unwrap();
        assert_eq!(timeline.live_frame_indices(), vec![1, 5]);
    }

    #[test]
    fn test_cursor_track_holds_last_sample() {
        let rec = MouseRecording::parse_jsonl(SAMPLE).unwrap();
        let track = rec.cursor_track(9);
        assert_eq!(track.len(), 9);
        assert_eq!(track[0], None);
        assert_eq!(track[1], Some((0.2, 0.3)));
        assert_eq!(track[3], Some((0.1, 0.2)));
        assert_eq!(track[5], Some((0.5, 0.5)));
        assert_eq!(track[6], Some((0.5, 0.5)));
        assert_eq!(track[8], Some((0.9, 0.8)));
    }

    #[test]
    fn test_out_of_range_position_is_config_error() {
        let err = MouseRecording::parse_jsonl(r#"{"type":"move","frame":0,"x":1.5,"y":0.0}"#)
            .unwrap_err();
        assert!(matches!(err, ScreenwizError::Config { .. }));
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_unknown_line_type_is_rejected() {
        assert!(MouseRecording::parse_jsonl(r#"{"type":"scroll","frame":0}"#).is_err());
    }

    #[test]
    fn test_jsonl_output_reparses() {
        let rec = MouseRecording::parse_jsonl(SAMPLE).unwrap();
        let text = rec.to_jsonl().unwrap();
        assert_eq!(text.lines().count(), 4);
        assert_eq!(MouseRecording::parse_jsonl(&text).unwrap(), rec);
    }

    #[test]
    fn test_load_missing_file() {
        let err = MouseRecording::load("/nonexistent/screenwiz/mouse.jsonl").unwrap_err();
        assert!(matches!(err, ScreenwizError::FileNotFound { .. }));
    }
}
