//! High score leaderboard
//!
//! Receives the final score of each session, keeps the best-ever score and
//! the top 10 runs, and persists them as JSON.

use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Failures reading or writing the score file
#[derive(Debug, Error)]
pub enum ScoreStoreError {
    #[error("score file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("score file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Frames survived
    pub frames: u64,
    /// Unix timestamp (ms) when achieved
    pub timestamp: u64,
}

/// What happened to a submitted score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    /// Strictly greater than the previous best
    pub new_best: bool,
    /// Leaderboard rank (1-indexed), if it placed
    pub rank: Option<usize>,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct HighScores {
    /// Best score ever recorded, kept even if entries get trimmed
    #[serde(default)]
    pub best: u64,
    /// Sorted descending by score
    #[serde(default)]
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Record a finished session. The best score only changes when beaten.
    pub fn submit(&mut self, score: u64, frames: u64, timestamp: u64) -> Submission {
        let new_best = score > self.best;
        if new_best {
            log::info!("New best score: {} (was {})", score, self.best);
            self.best = score;
        }

        if !self.qualifies(score) {
            return Submission { new_best, rank: None };
        }

        let entry = HighScoreEntry {
            score,
            frames,
            timestamp,
        };
        // Ties go after existing entries
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);

        Submission {
            new_best,
            rank: Some(pos + 1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Load from `path`; a missing file is an empty leaderboard
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScoreStoreError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let mut scores: HighScores = serde_json::from_str(&json)?;
                // Older files may predate the `best` field
                if let Some(top) = scores.entries.first() {
                    scores.best = scores.best.max(top.score);
                }
                log::info!("Loaded {} high scores from {}", scores.entries.len(), path.display());
                Ok(scores)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No high scores at {}, starting fresh", path.display());
                Ok(Self::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Load, submit, and save in one go. An unreadable file is left untouched
    /// and the error returned, so existing scores are never clobbered.
    pub fn record(
        path: impl AsRef<Path>,
        score: u64,
        frames: u64,
        timestamp: u64,
    ) -> Result<(Self, Submission), ScoreStoreError> {
        let path = path.as_ref();
        let mut scores = Self::load(path)?;
        let submission = scores.submit(score, frames, timestamp);
        scores.save(path)?;
        Ok((scores, submission))
    }

    /// Write to `path` through a temp file so a crash never leaves half a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ScoreStoreError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, path)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("meteor-dodge-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_best_only_rises() {
        let mut hs = HighScores::new();
        assert!(hs.submit(12, 120, 0).new_best);
        assert!(!hs.submit(7, 70, 1).new_best);
        assert!(!hs.submit(12, 125, 2).new_best, "ties don't count");
        assert_eq!(hs.best(), 12);
        assert!(hs.submit(30, 300, 3).new_best);
        assert_eq!(hs.best(), 30);
    }

    #[test]
    fn test_ranks_and_trim() {
        let mut hs = HighScores::new();
        for s in 1..=MAX_HIGH_SCORES as u64 {
            hs.submit(s * 10, s, s);
        }
        assert_eq!(hs.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(hs.entries[0].score, 100);

        let sub = hs.submit(55, 0, 0);
        assert_eq!(sub.rank, Some(6));
        assert_eq!(hs.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(hs.entries.last().unwrap().score, 20);

        // Below the lowest entry on a full board
        assert_eq!(hs.submit(5, 0, 0).rank, None);
    }

    #[test]
    fn test_zero_score_not_ranked() {
        let mut hs = HighScores::new();
        let sub = hs.submit(0, 3, 0);
        assert_eq!(sub, Submission { new_best: false, rank: None });
        assert!(hs.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("roundtrip");
        let mut hs = HighScores::new();
        hs.submit(42, 420, 1_700_000_000_000);
        hs.save(&path).unwrap();

        let loaded = HighScores::load(&path).unwrap();
        assert_eq!(loaded, hs);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let loaded = HighScores::load(temp_path("missing")).unwrap();
        assert!(loaded.is_empty());
        assert_eq!(loaded.best(), 0);
    }

    #[test]
    fn test_corrupt_file_errors() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(HighScores::load(&path), Err(ScoreStoreError::Json(_))));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_record_keeps_unreadable_file() {
        let path = temp_path("record-corrupt");
        let damaged = r#"{"best": 1000000000, "entries": [{"score": 10"#;
        std::fs::write(&path, damaged).unwrap();

        let result = HighScores::record(&path, 5, 50, 0);
        assert!(matches!(result, Err(ScoreStoreError::Json(_))));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), damaged);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_record_creates_and_appends() {
        let path = temp_path("record");
        let _ = std::fs::remove_file(&path);

        let (_, first) = HighScores::record(&path, 20, 200, 1).unwrap();
        assert_eq!(first, Submission { new_best: true, rank: Some(1) });
        let (scores, second) = HighScores::record(&path, 8, 80, 2).unwrap();
        assert_eq!(second, Submission { new_best: false, rank: Some(2) });
        assert_eq!(scores.best(), 20);
        assert_eq!(HighScores::load(&path).unwrap(), scores);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_legacy_file_without_best() {
        let path = temp_path("legacy");
        std::fs::write(&path, r#"{"entries":[{"score":9,"frames":90,"timestamp":0}]}"#).unwrap();
        let loaded = HighScores::load(&path).unwrap();
        assert_eq!(loaded.best(), 9);
        let _ = std::fs::remove_file(&path);
    }
}
