//! Zoom event timeline.
//!
//! A [`ZoomTimeline`] owns the click-triggered zoom events of a recording,
//! ordered by frame index. Deletion is soft: events are flagged and then
//! physically removed by [`ZoomTimeline::compact`], which runs at the start
//! of every mutating operation. Every mutation returns a snapshot of the
//! live (non-deleted) events so callers can redisplay them.
//!
//! # Ordering
//!
//! The live events, in list order, are non-decreasing in `frame_index`.
//! The zoom stage resolves the active event with a binary search over that
//! order, so any operation that would break it is rejected.

use std::path::Path;

use serde::{Deserialize, Serialize};

use screenwiz_common::error::{ScreenwizError, ScreenwizResult};

use crate::sorted::largest_leq;

/// A recorded click that drives one zoom-in / hold / zoom-out cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoomEvent {
    /// Normalized click X within the frame, `[0.0, 1.0]`.
    pub x: f64,
    /// Normalized click Y within the frame, `[0.0, 1.0]`.
    pub y: f64,
    /// Frame at which the zoom starts.
    pub frame_index: u64,
    /// Total zoom lifetime in seconds.
    pub duration: f64,
    /// Soft-delete marker; removed on the next compaction.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deleted: bool,
}

impl ZoomEvent {
    /// Create a validated, live event.
    pub fn new(x: f64, y: f64, frame_index: u64, duration: f64) -> ScreenwizResult<Self> {
        let event = Self {
            x,
            y,
            frame_index,
            duration,
            deleted: false,
        };
        event.validate()?;
        Ok(event)
    }

    /// Check field ranges.
    pub fn validate(&self) -> ScreenwizResult<()> {
        if !(0.0..=1.0).contains(&self.x) || !(0.0..=1.0).contains(&self.y) {
            return Err(ScreenwizError::config(format!(
                "zoom anchor ({}, {}) is outside the unit square",
                self.x, self.y
            )));
        }
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(ScreenwizError::config(format!(
                "zoom duration must be positive, got {}",
                self.duration
            )));
        }
        Ok(())
    }

    /// Lifetime in frames at the given rate, rounded to the nearest frame.
    pub fn duration_in_frames(&self, fps: f64) -> u64 {
        (self.duration * fps).round().max(0.0) as u64
    }

    /// First frame after the event has ended, saturating at `u64::MAX`.
    pub fn end_frame(&self, fps: f64) -> u64 {
        self.frame_index.saturating_add(self.duration_in_frames(fps))
    }

    /// Whether `frame_index` falls in `[start, start + duration_in_frames)`.
    pub fn is_active_at(&self, frame_index: u64, fps: f64) -> bool {
        frame_index >= self.frame_index && frame_index < self.end_frame(fps)
    }
}

/// Partial update merged into an existing event by [`ZoomTimeline::update`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomEventPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub frame_index: Option<u64>,
    pub duration: Option<f64>,
}

impl ZoomEventPatch {
    /// Patch that only moves the event to a new start frame.
    pub fn frame_index(frame_index: u64) -> Self {
        Self {
            frame_index: Some(frame_index),
            ..Default::default()
        }
    }

    /// Patch that only changes the event lifetime.
    pub fn duration(duration: f64) -> Self {
        Self {
            duration: Some(duration),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_none()
            && self.y.is_none()
            && self.frame_index.is_none()
            && self.duration.is_none()
    }

    fn merge_into(&self, event: &mut ZoomEvent) {
        if let Some(x) = self.x {
            event.x = x;
        }
        if let Some(y) = self.y {
            event.y = y;
        }
        if let Some(frame_index) = self.frame_index {
            event.frame_index = frame_index;
        }
        if let Some(duration) = self.duration {
            event.duration = duration;
        }
    }
}

/// Ordered collection of zoom events.
///
/// Indices passed to [`update`](Self::update) and
/// [`soft_delete`](Self::soft_delete) address the live list as it is *after*
/// compaction. Keeping indices stable across edits is the caller's job:
/// re-read the returned snapshot after every mutation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ZoomEvent>", into = "Vec<ZoomEvent>")]
pub struct ZoomTimeline {
    events: Vec<ZoomEvent>,
}

impl ZoomTimeline {
    /// Create an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a timeline from existing events, validating each event and the
    /// ordering of the live ones.
    pub fn from_events(events: Vec<ZoomEvent>) -> ScreenwizResult<Self> {
        for event in &events {
            event.validate()?;
        }

        let mut previous: Option<u64> = None;
        for (position, event) in events.iter().enumerate().filter(|(_, e)| !e.deleted) {
            if previous.is_some_and(|prev| event.frame_index < prev) {
                return Err(ScreenwizError::precondition(format!(
                    "zoom event at position {position} (frame {}) precedes an earlier event",
                    event.frame_index
                )));
            }
            previous = Some(event.frame_index);
        }

        Ok(Self { events })
    }

    /// Insert a new event at the position given by its frame index.
    ///
    /// Events sharing a frame index keep insertion order: the new event goes
    /// after the existing ones.
    pub fn insert(&mut self, mut event: ZoomEvent) -> ScreenwizResult<Vec<ZoomEvent>> {
        event.validate()?;
        event.deleted = false;
        self.compact();

        let frame_indices = self.live_frame_indices();
        let position = largest_leq(&frame_indices, &event.frame_index).map_or(0, |i| i + 1);
        self.events.insert(position, event);

        Ok(self.live_events())
    }

    /// Merge `patch` into the live event at `index`.
    ///
    /// The list is not re-sorted. A patch whose result would sit out of
    /// order with its live neighbours is rejected and the timeline is left
    /// untouched.
    pub fn update(
        &mut self,
        index: usize,
        patch: ZoomEventPatch,
    ) -> ScreenwizResult<Vec<ZoomEvent>> {
        self.compact();
        self.check_index(index)?;

        let mut candidate = self.events[index].clone();
        patch.merge_into(&mut candidate);
        candidate.validate()?;

        if let Some(prev) = index.checked_sub(1).map(|i| &self.events[i]) {
            if candidate.frame_index < prev.frame_index {
                return Err(ScreenwizError::precondition(format!(
                    "moving zoom event {index} to frame {} would place it before event {} at frame {}",
                    candidate.frame_index,
                    index - 1,
                    prev.frame_index
                )));
            }
        }
        if let Some(next) = self.events.get(index + 1) {
            if candidate.frame_index > next.frame_index {
                return Err(ScreenwizError::precondition(format!(
                    "moving zoom event {index} to frame {} would place it after event {} at frame {}",
                    candidate.frame_index,
                    index + 1,
                    next.frame_index
                )));
            }
        }

        self.events[index] = candidate;
        Ok(self.live_events())
    }

    /// Mark the live event at `index` as deleted.
    pub fn soft_delete(&mut self, index: usize) -> ScreenwizResult<Vec<ZoomEvent>> {
        self.compact();
        self.check_index(index)?;
        self.events[index].deleted = true;
        Ok(self.live_events())
    }

    /// Mark every event as deleted.
    pub fn soft_delete_all(&mut self) -> Vec<ZoomEvent> {
        self.compact();
        for event in &mut self.events {
            event.deleted = true;
        }
        self.live_events()
    }

    /// Physically remove deleted events.
    pub fn compact(&mut self) {
        self.events.retain(|event| !event.deleted);
    }

    /// Snapshot of the live events in order.
    pub fn live_events(&self) -> Vec<ZoomEvent> {
        self.events.iter().filter(|e| !e.deleted).cloned().collect()
    }

    /// Start frames of the live events, ascending.
    pub fn live_frame_indices(&self) -> Vec<u64> {
        self.events
            .iter()
            .filter(|e| !e.deleted)
            .map(|e| e.frame_index)
            .collect()
    }

    /// Number of live events.
    pub fn len(&self) -> usize {
        self.events.iter().filter(|e| !e.deleted).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Load a timeline from a JSON array file.
    pub fn load(path: impl AsRef<Path>) -> ScreenwizResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ScreenwizError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let events: Vec<ZoomEvent> = serde_json::from_str(&content)?;
        Self::from_events(events)
    }

    /// Write the timeline to a JSON file, compacting first.
    pub fn save(&mut self, path: impl AsRef<Path>) -> ScreenwizResult<()> {
        self.compact();
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.events)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    fn check_index(&self, index: usize) -> ScreenwizResult<()> {
        if index >= self.events.len() {
            return Err(ScreenwizError::precondition(format!(
                "zoom event index {index} out of range for {} live events",
                self.events.len()
            )));
        }
        Ok(())
    }
}

impl TryFrom<Vec<ZoomEvent>> for ZoomTimeline {
    type Error = ScreenwizError;

    fn try_from(events: Vec<ZoomEvent>) -> Result<Self, Self::Error> {
        Self::from_events(events)
    }
}

impl From<ZoomTimeline> for Vec<ZoomEvent> {
    fn from(timeline: ZoomTimeline) -> Self {
        timeline.events
    }
}
