//! High score persistence
//!
//! The simulation only knows a single integer; where it lives is up to the store.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by a high-score store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("high score io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("high score file is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}

/// Somewhere a single high score can be read from and written to
pub trait HighScoreStore {
    /// Stored high score, 0 when nothing has been saved yet
    fn load(&self) -> Result<u64, StoreError>;
    fn save(&mut self, score: u64) -> Result<(), StoreError>;

    /// Save `score` only if it beats the stored value. Returns true when written.
    fn submit(&mut self, score: u64) -> Result<bool, StoreError> {
        if score > self.load()? {
            self.save(score)?;
            return Ok(true);
        }
        Ok(false)
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<u64, StoreError> {
        Ok(self.value)
    }

    fn save(&mut self, score: u64) -> Result<(), StoreError> {
        self.value = score;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct HighScoreFile {
    high_score: u64,
}

/// JSON file store: `{"high_score": n}`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load, logging and returning 0 on any failure
    pub fn load_or_zero(&self) -> u64 {
        match self.load() {
            Ok(score) => score,
            Err(e) => {
                log::warn!("Could not read high score from {}: {}", self.path.display(), e);
                0
            }
        }
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> Result<u64, StoreError> {
        if !self.path.exists() {
            log::info!("No high score found, starting fresh");
            return Ok(0);
        }
        let json = std::fs::read_to_string(&self.path)?;
        let file: HighScoreFile = serde_json::from_str(&json)?;
        log::info!("Loaded high score {}", file.high_score);
        Ok(file.high_score)
    }

    fn save(&mut self, score: u64) -> Result<(), StoreError> {
        let json = serde_json::to_string(&HighScoreFile { high_score: score })?;
        std::fs::write(&self.path, json)?;
        log::info!("High score saved ({})", score);
        Ok(())
    }
}
