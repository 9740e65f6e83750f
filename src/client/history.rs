//! In-memory try-on history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One completed try-on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TryOnResult {
    /// Opaque identifier: creation time in epoch milliseconds.
    pub id: String,
    /// Person image that was sent.
    pub person_image: String,
    /// Garment image that was sent.
    pub clothing_image: String,
    /// Image the proxy returned.
    pub result_image: String,
    /// When the result arrived.
    pub timestamp: DateTime<Utc>,
}

impl TryOnResult {
    /// Creates a result stamped now.
    pub fn new(
        person_image: impl Into<String>,
        clothing_image: impl Into<String>,
        result_image: impl Into<String>,
    ) -> Self {
        Self::at(Utc::now(), person_image, clothing_image, result_image)
    }

    /// Creates a result stamped at `timestamp`.
    pub fn at(
        timestamp: DateTime<Utc>,
        person_image: impl Into<String>,
        clothing_image: impl Into<String>,
        result_image: impl Into<String>,
    ) -> Self {
        Self {
            id: timestamp.timestamp_millis().to_string(),
            person_image: person_image.into(),
            clothing_image: clothing_image.into(),
            result_image: result_image.into(),
            timestamp,
        }
    }

    /// Short display time, e.g. `Oct 16, 3:04 PM`.
    pub fn display_time(&self) -> String {
        self.timestamp.format("%b %-d, %-I:%M %p").to_string()
    }
}

/// Results, most recent first.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: VecDeque<TryOnResult>,
}

impl History {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a result at the front.
    pub fn record(&mut self, result: TryOnResult) {
        self.entries.push_front(result);
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent result.
    pub fn latest(&self) -> Option<&TryOnResult> {
        self.entries.front()
    }

    /// Entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &TryOnResult> {
        self.entries.iter()
    }

    /// Header line for the history drawer.
    pub fn summary(&self) -> String {
        format!("{} results", self.entries.len())
    }
}
