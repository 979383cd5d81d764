//! Score records and the bridge that reports finished rounds
//!
//! The core only appends: one record per finished round, never retried and
//! never read back. Storage failures stay inside the sink.

pub mod score_log;

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::settings::Difficulty;

pub use score_log::ScoreLog;

/// One finished round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub player_name: String,
    pub score: u32,
    pub difficulty: Difficulty,
    /// Unix seconds
    pub timestamp: i64,
}

/// Append-only destination for score records
pub trait RecordSink {
    fn append(&mut self, record: &ScoreRecord);
}

impl RecordSink for Vec<ScoreRecord> {
    fn append(&mut self, record: &ScoreRecord) {
        self.push(record.clone());
    }
}

/// Shared sink, so the owner can still inspect it while a game holds a handle
impl<S: RecordSink> RecordSink for Rc<RefCell<S>> {
    fn append(&mut self, record: &ScoreRecord) {
        self.borrow_mut().append(record);
    }
}

/// Turns round-ended events into exactly one record per round
pub struct ScoreBridge {
    player_name: String,
    difficulty: Difficulty,
    sink: Option<Box<dyn RecordSink>>,
    last_reported_round: Option<u32>,
}

impl ScoreBridge {
    pub fn new(player_name: &str, difficulty: Difficulty, sink: Box<dyn RecordSink>) -> Self {
        Self {
            player_name: player_name.to_string(),
            difficulty,
            sink: Some(sink),
            last_reported_round: None,
        }
    }

    /// A bridge with nowhere to write (persistence capability off)
    pub fn disabled(player_name: &str, difficulty: Difficulty) -> Self {
        Self {
            player_name: player_name.to_string(),
            difficulty,
            sink: None,
            last_reported_round: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Report a finished round. A second report for the same round is ignored.
    pub fn round_ended(&mut self, round: u32, score: u32) -> Option<ScoreRecord> {
        if self.last_reported_round == Some(round) {
            log::debug!("Round {} already reported", round);
            return None;
        }
        let sink = self.sink.as_mut()?;
        self.last_reported_round = Some(round);

        let record = ScoreRecord {
            player_name: self.player_name.clone(),
            score,
            difficulty: self.difficulty,
            timestamp: chrono::Utc::now().timestamp(),
        };
        sink.append(&record);
        log::info!(
            "Recorded {} for {} ({})",
            score,
            record.player_name,
            record.difficulty.as_str()
        );
        Some(record)
    }
}

impl std::fmt::Debug for ScoreBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreBridge")
            .field("player_name", &self.player_name)
            .field("difficulty", &self.difficulty)
            .field("enabled", &self.is_enabled())
            .field("last_reported_round", &self.last_reported_round)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_once_per_round() {
        let records = Rc::new(RefCell::new(Vec::<ScoreRecord>::new()));
        let mut bridge = ScoreBridge::new("Ann", Difficulty::Hard, Box::new(records.clone()));

        let record = bridge.round_ended(1, 7).unwrap();
        assert_eq!(record.player_name, "Ann");
        assert_eq!(record.score, 7);
        assert_eq!(record.difficulty, Difficulty::Hard);
        assert!(record.timestamp > 0);

        assert!(bridge.round_ended(1, 7).is_none());
        assert!(bridge.round_ended(2, 0).is_some());
        let stored = records.borrow();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[1].score, 0);
    }

    #[test]
    fn test_disabled_bridge_writes_nothing() {
        let mut bridge = ScoreBridge::disabled("Ann", Difficulty::Easy);
        assert!(!bridge.is_enabled());
        assert!(bridge.round_ended(1, 3).is_none());
    }

    #[test]
    fn test_record_json_shape() {
        let record = ScoreRecord {
            player_name: "Bo".to_string(),
            score: 12,
            difficulty: Difficulty::Medium,
            timestamp: 1_700_000_000,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"player_name":"Bo","score":12,"difficulty":"medium","timestamp":1700000000}"#
        );
    }
}
