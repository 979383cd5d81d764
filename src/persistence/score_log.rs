//! JSON-lines score file
//!
//! One `ScoreRecord` per line, appended. Unreadable lines are skipped on read.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::{RecordSink, ScoreRecord};

/// File-backed record sink
#[derive(Debug, Clone)]
pub struct ScoreLog {
    path: PathBuf,
}

impl ScoreLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record, creating the file if needed
    pub fn try_append(&self, record: &ScoreRecord) -> io::Result<()> {
        let mut line = serde_json::to_string(record).map_err(io::Error::other)?;
        line.push('\n');
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())
    }

    /// Every readable record, in file order
    pub fn read_all(&self) -> Vec<ScoreRecord> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                log::info!("No score log at {} ({})", self.path.display(), e);
                return Vec::new();
            }
        };

        contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(n, line)| match serde_json::from_str(line) {
                Ok(record) => Some(record),
                Err(e) => {
                    log::warn!("Skipping score log line {}: {}", n + 1, e);
                    None
                }
            })
            .collect()
    }

    /// Highest logged score for a player
    pub fn best_for(&self, player_name: &str) -> Option<u32> {
        self.read_all()
            .into_iter()
            .filter(|r| r.player_name == player_name)
            .map(|r| r.score)
            .max()
    }
}

impl RecordSink for ScoreLog {
    fn append(&mut self, record: &ScoreRecord) {
        if let Err(e) = self.try_append(record) {
            log::warn!("Could not write score to {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Difficulty;

    fn record(name: &str, score: u32) -> ScoreRecord {
        ScoreRecord {
            player_name: name.to_string(),
            score,
            difficulty: Difficulty::Medium,
            timestamp: 1_700_000_000,
        }
    }

    #[test]
    fn test_append_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = ScoreLog::new(dir.path().join("scores.jsonl"));
        log.append(&record("Ann", 4));
        log.append(&record("Bo", 9));
        log.append(&record("Ann", 6));

        let all = log.read_all();
        assert_eq!(all.len(), 3);
        assert_eq!(all[1], record("Bo", 9));
        assert_eq!(log.best_for("Ann"), Some(6));
        assert_eq!(log.best_for("Cy"), None);
    }

    #[test]
    fn test_bad_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.jsonl");
        std::fs::write(
            &path,
            "garbage\n\n{\"player_name\":\"Ann\",\"score\":3,\"difficulty\":\"easy\",\"timestamp\":1}\n",
        )
        .unwrap();
        let log = ScoreLog::new(&path);
        let all = log.read_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = ScoreLog::new(dir.path().join("absent.jsonl"));
        assert!(log.read_all().is_empty());
        assert_eq!(log.best_for("Ann"), None);
    }

    #[test]
    fn test_unwritable_path_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for appending
        let mut log = ScoreLog::new(dir.path());
        log.append(&record("Ann", 1));
        assert!(log.try_append(&record("Ann", 1)).is_err());
    }
}
