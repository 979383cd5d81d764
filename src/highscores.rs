//! High score leaderboard
//!
//! In-memory top 10 built from score records. It can be fed directly as a
//! record sink or rebuilt from a score log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::persistence::{RecordSink, ScoreRecord};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// High score leaderboard, best first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<ScoreRecord>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a leaderboard from any sequence of records
    pub fn from_records<I: IntoIterator<Item = ScoreRecord>>(records: I) -> Self {
        let mut scores = Self::new();
        for record in records {
            scores.add_score(record);
        }
        scores
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Must beat the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a record to the leaderboard (if it qualifies).
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, record: ScoreRecord) -> Option<usize> {
        if !self.qualifies(record.score) {
            return None;
        }

        // Sorted descending by score; ties keep the earlier entry first
        let pos = self.entries.iter().position(|e| record.score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, record);
                i + 1
            }
            None => {
                self.entries.push(record);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }
}

impl RecordSink for HighScores {
    fn append(&mut self, record: &ScoreRecord) {
        if let Some(rank) = self.add_score(record.clone()) {
            log::info!("New high score #{}: {}", rank, record.score);
        }
    }
}

/// Format a Unix timestamp relative to `now`
pub fn format_age(timestamp: i64, now: DateTime<Utc>) -> String {
    let Some(then) = DateTime::from_timestamp(timestamp, 0) else {
        return "N/A".to_string();
    };
    let diff = now.signed_duration_since(then);

    let days = diff.num_days();
    let hours = diff.num_hours();
    let mins = diff.num_minutes();

    if days >= 1 {
        if days == 1 {
            "Yesterday".to_string()
        } else if days < 7 {
            format!("{} days ago", days)
        } else {
            then.format("%-m/%-d/%y").to_string()
        }
    } else if hours >= 1 {
        if hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{} hours ago", hours)
        }
    } else if mins >= 1 {
        if mins == 1 {
            "1 min ago".to_string()
        } else {
            format!("{} mins ago", mins)
        }
    } else {
        "Just now".to_string()
    }
}
