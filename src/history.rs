//! Q&A history - append-only log of answered questions.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("history serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type HistoryResult<T> = Result<T, HistoryError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: u64,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// Short local-time label, e.g. `16/10 14:05`.
    pub fn display_timestamp(&self) -> String {
        self.created_at
            .with_timezone(&Local)
            .format("%d/%m %H:%M")
            .to_string()
    }
}

/// Append-only store of answered questions.
pub trait HistoryStore {
    fn record(
        &mut self,
        question: &str,
        answer: &str,
        timestamp: DateTime<Utc>,
    ) -> HistoryResult<HistoryEntry>;

    /// Up to `limit` entries, newest first.
    fn recent(&self, limit: usize) -> HistoryResult<Vec<HistoryEntry>>;
}

fn newest_first(entries: &[HistoryEntry], limit: usize) -> Vec<HistoryEntry> {
    entries.iter().rev().take(limit).cloned().collect()
}

/// In-process history, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryHistory {
    entries: Vec<HistoryEntry>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for MemoryHistory {
    fn record(
        &mut self,
        question: &str,
        answer: &str,
        timestamp: DateTime<Utc>,
    ) -> HistoryResult<HistoryEntry> {
        let entry = HistoryEntry {
            id: self.entries.last().map_or(1, |e| e.id + 1),
            question: question.to_string(),
            answer: answer.to_string(),
            created_at: timestamp,
        };
        self.entries.push(entry.clone());
        Ok(entry)
    }

    fn recent(&self, limit: usize) -> HistoryResult<Vec<HistoryEntry>> {
        Ok(newest_first(&self.entries, limit))
    }
}

/// History persisted as one JSON object per line.
#[derive(Debug)]
pub struct JsonlHistory {
    path: PathBuf,
    next_id: u64,
}

impl JsonlHistory {
    /// Open (or prepare to create) the log at `path`.
    pub fn open(path: impl Into<PathBuf>) -> HistoryResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let next_id = read_entries(&path)?.last().map_or(1, |e| e.id + 1);
        Ok(Self { path, next_id })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for JsonlHistory {
    fn record(
        &mut self,
        question: &str,
        answer: &str,
        timestamp: DateTime<Utc>,
    ) -> HistoryResult<HistoryEntry> {
        let entry = HistoryEntry {
            id: self.next_id,
            question: question.to_string(),
            answer: answer.to_string(),
            created_at: timestamp,
        };
        let line = serde_json::to_string(&entry)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;

        self.next_id += 1;
        info!(id = entry.id, path = %self.path.display(), "recorded question");
        Ok(entry)
    }

    fn recent(&self, limit: usize) -> HistoryResult<Vec<HistoryEntry>> {
        Ok(newest_first(&read_entries(&self.path)?, limit))
    }
}

fn read_entries(path: &Path) -> HistoryResult<Vec<HistoryEntry>> {
    if !path.exists() {
        return Ok(vec![]);
    }

    let mut entries = vec![];
    for (index, line) in BufReader::new(File::open(path)?).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<HistoryEntry>(&line) {
            Ok(entry) => entries.push(entry),
            Err(e) => warn!(line = index + 1, error = %e, "skipping malformed history line"),
        }
    }
    Ok(entries)
}
