use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// Offset from the start of a track, held at millisecond resolution.
///
/// Keys compare as integers, so two tags that denote the same instant
/// (`[00:01.5]` and `[00:01.500]`) collapse onto the same entry.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const ZERO: Self = Self(0);

    pub fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Rounds to the nearest millisecond. Negative and NaN inputs become zero
    /// and values past the representable range saturate.
    pub fn from_seconds(seconds: f64) -> Self {
        Self((seconds * 1000.0).round() as u64)
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }

    pub fn as_seconds(self) -> f64 {
        self.0 as f64 / 1000.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.0 / 60_000;
        let seconds = (self.0 / 1000) % 60;
        let millis = self.0 % 1000;
        write!(f, "{minutes:02}:{seconds:02}.{millis:03}")
    }
}

/// One lyric line and the instant it becomes current.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampedLine {
    pub time: Timestamp,
    pub text: String,
}

impl TimestampedLine {
    pub fn new(time: Timestamp, text: impl Into<String>) -> Self {
        Self {
            time,
            text: text.into(),
        }
    }

    pub fn time_seconds(&self) -> f64 {
        self.time.as_seconds()
    }
}

/// Time-indexed lyric table for a single song.
///
/// Lines are kept sorted by timestamp with at most one line per timestamp
/// and never with empty text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LyricTrack {
    lines: Vec<TimestampedLine>,
}

impl LyricTrack {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a track from `(time, text)` pairs in source order. A later pair
    /// overwrites an earlier one with the same timestamp; empty text is
    /// skipped.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Timestamp, S)>,
        S: Into<String>,
    {
        let mut table = BTreeMap::new();
        for (time, text) in entries {
            let text = text.into();
            if !text.is_empty() {
                table.insert(time, text);
            }
        }
        Self::from(table)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[TimestampedLine] {
        &self.lines
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimestampedLine> {
        self.lines.iter()
    }

    pub fn first_time(&self) -> Option<Timestamp> {
        self.lines.first().map(|line| line.time)
    }

    /// Number of lines whose timestamp is at or before `seconds`.
    ///
    /// NaN compares false against every timestamp and so counts nothing.
    pub fn count_at_or_before(&self, seconds: f64) -> usize {
        self.lines
            .partition_point(|line| line.time_seconds() <= seconds)
    }

    /// The line with the largest timestamp that is `<= seconds`.
    pub fn line_at_or_before(&self, seconds: f64) -> Option<&TimestampedLine> {
        match self.count_at_or_before(seconds) {
            0 => None,
            count => self.lines.get(count - 1),
        }
    }
}

impl From<BTreeMap<Timestamp, String>> for LyricTrack {
    fn from(table: BTreeMap<Timestamp, String>) -> Self {
        let lines = table
            .into_iter()
            .filter(|(_, text)| !text.is_empty())
            .map(|(time, text)| TimestampedLine { time, text })
            .collect();
        Self { lines }
    }
}

impl<'a> IntoIterator for &'a LyricTrack {
    type Item = &'a TimestampedLine;
    type IntoIter = std::slice::Iter<'a, TimestampedLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
