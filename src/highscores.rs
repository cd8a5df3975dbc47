//! High score persistence
//!
//! A session loads the best score once at start and writes a new one at most
//! once, after the game is over. Storage sits behind [`HighScoreStore`] so
//! hosts can plug in their own backend.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::consts::MAX_HIGH_SCORES;
use crate::error::Result;

/// Where the best score is kept between sessions
pub trait HighScoreStore {
    /// Best score so far, `None` if nothing was ever stored
    fn load_high_score(&self) -> Result<Option<u64>>;

    /// Record a new best score
    fn store_high_score(&mut self, score: u64) -> Result<()>;
}

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Unix timestamp (ms) when achieved
    pub timestamp_ms: f64,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
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

    /// Add a score; returns the rank achieved (1-indexed) or None
    pub fn add_score(&mut self, score: u64, timestamp_ms: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            timestamp_ms,
        };

        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

/// Keeps the best score in memory only
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: Option<u64>,
    /// Number of successful writes, handy for checking write-once behavior
    pub writes: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_high_score(score: u64) -> Self {
        Self {
            best: Some(score),
            writes: 0,
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn load_high_score(&self) -> Result<Option<u64>> {
        Ok(self.best)
    }

    fn store_high_score(&mut self, score: u64) -> Result<()> {
        self.best = Some(score);
        self.writes += 1;
        Ok(())
    }
}

/// Leaderboard stored as a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the leaderboard; a missing file is an empty board
    pub fn read(&self) -> Result<HighScores> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => {
                let scores: HighScores = serde_json::from_str(&json)?;
                log::info!("Loaded {} high scores", scores.entries.len());
                Ok(scores)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No high scores found, starting fresh");
                Ok(HighScores::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, scores: &HighScores) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(scores)?;
        std::fs::write(&self.path, json)?;
        log::info!("High scores saved ({} entries)", scores.entries.len());
        Ok(())
    }
}

impl HighScoreStore for JsonFileStore {
    fn load_high_score(&self) -> Result<Option<u64>> {
        Ok(self.read()?.top_score())
    }

    fn store_high_score(&mut self, score: u64) -> Result<()> {
        let mut scores = self.read()?;
        scores.add_score(score, unix_millis());
        self.write(&scores)
    }
}

fn unix_millis() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}
