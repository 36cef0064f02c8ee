//! Bounded calculation history with JSON persistence

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Default number of entries kept
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Result type for history operations
pub type HistoryResult<T> = std::result::Result<T, HistoryError>;

/// Errors from loading or saving history
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Reading or writing the history file failed
    #[error("History I/O error: {0}")]
    Io(#[from] io::Error),

    /// The history file is not valid JSON
    #[error("History file is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

/// One successful evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Expression as entered
    pub expression: String,
    /// Raw result
    pub value: f64,
    /// Result as it was displayed
    pub display: String,
}

impl HistoryEntry {
    pub fn new(expression: impl Into<String>, value: f64, display: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            value,
            display: display.into(),
        }
    }
}

/// On-disk layout
#[derive(Serialize, Deserialize)]
struct HistoryFile {
    entries: Vec<HistoryEntry>,
}

/// Bounded FIFO of past evaluations, oldest first
#[derive(Debug, Clone)]
pub struct History {
    capacity: usize,
    entries: VecDeque<HistoryEntry>,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl History {
    /// Create an empty history. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry, evicting the oldest one when full
    pub fn push(&mut self, entry: HistoryEntry) {
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Entries from oldest to newest
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &HistoryEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    /// Most recent entry
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Load history from a JSON file
    ///
    /// A missing file yields an empty history. When the file holds more
    /// entries than `capacity`, only the newest ones are kept.
    pub fn load<P: AsRef<Path>>(path: P, capacity: usize) -> HistoryResult<Self> {
        let path = path.as_ref();
        Self::read_file(path, capacity).map_err(|e| {
            tracing::warn!("Failed to load history from {}: {}", path.display(), e);
            e
        })
    }

    /// Write history to a JSON file, creating parent directories as needed
    pub fn save<P: AsRef<Path>>(&self, path: P) -> HistoryResult<()> {
        let path = path.as_ref();
        self.write_file(path).map_err(|e| {
            tracing::warn!("Failed to save history to {}: {}", path.display(), e);
            e
        })
    }

    fn read_file(path: &Path, capacity: usize) -> HistoryResult<Self> {
        let mut history = Self::new(capacity);

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No history file at {}", path.display());
                return Ok(history);
            }
            Err(e) => return Err(e.into()),
        };

        let file: HistoryFile = serde_json::from_str(&text)?;
        for entry in file.entries {
            history.push(entry);
        }

        tracing::debug!(
            "Loaded {} history entries from {}",
            history.len(),
            path.display()
        );
        Ok(history)
    }

    fn write_file(&self, path: &Path) -> HistoryResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = HistoryFile {
            entries: self.entries.iter().cloned().collect(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        fs::write(path, json)?;

        tracing::debug!("Saved {} history entries to {}", self.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::capture_logs;
    use pretty_assertions::assert_eq;
    use tracing::Level;

    fn entry(n: usize) -> HistoryEntry {
        HistoryEntry::new(format!("{n}+0"), n as f64, n.to_string())
    }

    #[test]
    fn test_push_evicts_oldest() {
        let mut history = History::new(3);
        for n in 0..5 {
            history.push(entry(n));
        }

        assert_eq!(history.len(), 3);
        let kept: Vec<_> = history.entries().map(|e| e.value).collect();
        assert_eq!(kept, vec![2.0, 3.0, 4.0]);
        assert_eq!(history.latest(), Some(&entry(4)));
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut history = History::new(0);
        history.push(entry(1));
        history.push(entry(2));
        assert_eq!(history.capacity(), 1);
        assert_eq!(history.latest(), Some(&entry(2)));
    }

    #[test]
    fn test_clear() {
        let mut history = History::default();
        history.push(entry(1));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.capacity(), DEFAULT_HISTORY_CAPACITY);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("history.json");

        let mut history = History::new(10);
        history.push(HistoryEntry::new("2+3*4", 14.0, "14"));
        history.push(HistoryEntry::new("1/4", 0.25, "0.25"));
        history.save(&path).unwrap();

        let loaded = History::load(&path, 10).unwrap();
        let entries: Vec<_> = loaded.entries().cloned().collect();
        let expected: Vec<_> = history.entries().cloned().collect();
        assert_eq!(entries, expected);
    }

    #[test]
    fn test_load_truncates_to_capacity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        let mut history = History::new(10);
        for n in 0..6 {
            history.push(entry(n));
        }
        history.save(&path).unwrap();

        let loaded = History::load(&path, 2).unwrap();
        let kept: Vec<_> = loaded.entries().map(|e| e.value).collect();
        assert_eq!(kept, vec![4.0, 5.0]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = History::load(dir.path().join("absent.json"), 5).unwrap();
        assert!(loaded.is_empty());
        assert_eq!(loaded.capacity(), 5);
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "not json").unwrap();

        let (result, logs) = capture_logs(Level::WARN, || History::load(&path, 5));
        assert!(matches!(result.unwrap_err(), HistoryError::Json(_)));
        assert!(logs.contains("Failed to load history"), "logs: {logs}");
    }

    #[test]
    fn test_save_into_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let mut history = History::new(5);
        history.push(entry(1));
        let (result, logs) =
            capture_logs(Level::WARN, || history.save(blocker.join("history.json")));
        assert!(matches!(result.unwrap_err(), HistoryError::Io(_)));
        assert!(logs.contains("Failed to save history"), "logs: {logs}");
    }
}
