//! Bounded question/answer history persisted as JSON Lines.
//!
//! One record per line, at most [`MAX_HISTORY`] entries, oldest evicted
//! first. Every append rewrites the whole truncated log through a temp file
//! and a rename, so readers never observe a partial write. There is no
//! cross-process locking: the log assumes a single writer.

use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Maximum number of records kept in the log.
pub const MAX_HISTORY: usize = 10;

/// One completed question/answer exchange.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub question: String,
    pub answer: String,
}

/// Errors returned by the history store.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// I/O failure while writing the log.
    #[error("history io error: {0}")]
    Io(#[from] std::io::Error),

    /// The log file exists but cannot be read or parsed. Distinct from the
    /// no-file-yet case, which is legitimately empty.
    #[error("history file {path} is corrupt: {reason}")]
    Corrupt {
        /// Location of the offending file.
        path: PathBuf,
        /// What went wrong while reading it.
        reason: String,
    },
}

/// File-backed bounded log of question/answer pairs.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    capacity: usize,
}

impl HistoryStore {
    /// Creates a store over the given file with the default capacity.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_capacity(path, MAX_HISTORY)
    }

    /// Creates a store with an explicit capacity (tests and tooling).
    pub fn with_capacity(path: impl AsRef<Path>, capacity: usize) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            capacity,
        }
    }

    /// Location of the underlying file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the full ordered log.
    ///
    /// A missing file yields an empty sequence. A file that is present but
    /// unreadable or unparsable yields [`HistoryError::Corrupt`]; it is never
    /// silently treated as empty.
    pub fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = OpenOptions::new()
            .read(true)
            .open(&self.path)
            .map_err(|e| self.corrupt(format!("cannot open: {e}")))?;
        let reader = BufReader::new(file);

        let mut entries = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| self.corrupt(format!("read failed at line {}: {e}", idx + 1)))?;
            if line.trim().is_empty() {
                continue;
            }
            let entry: HistoryEntry = serde_json::from_str(&line)
                .map_err(|e| self.corrupt(format!("bad record at line {}: {e}", idx + 1)))?;
            entries.push(entry);
        }
        Ok(entries)
    }

    /// Appends one exchange, evicting the oldest entries beyond capacity,
    /// and rewrites the log atomically.
    ///
    /// # Errors
    /// Propagates [`HistoryError::Corrupt`] from the load step and I/O errors
    /// from the rewrite.
    pub fn append(&self, question: &str, answer: &str) -> Result<(), HistoryError> {
        let mut entries = self.load()?;
        entries.push(HistoryEntry {
            question: question.to_string(),
            answer: answer.to_string(),
        });
        if entries.len() > self.capacity {
            let overflow = entries.len() - self.capacity;
            entries.drain(..overflow);
        }
        self.write_all(&entries)?;
        debug!(
            "history appended (path={}, kept={})",
            self.path.display(),
            entries.len()
        );
        Ok(())
    }

    /// Rewrites the log atomically: temp file next to the destination, then
    /// rename over it.
    fn write_all(&self, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
        let temp_path = self.path.with_extension("tmp");
        {
            let mut file = OpenOptions::new()
                .create(true)
                .truncate(true)
                .write(true)
                .open(&temp_path)?;
            for entry in entries {
                let line = serde_json::to_string(entry)
                    .map_err(|e| self.corrupt(format!("serialize failed: {e}")))?;
                writeln!(file, "{line}")?;
            }
            file.flush()?;
        }
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        std::fs::rename(temp_path, &self.path)?;
        Ok(())
    }

    fn corrupt(&self, reason: String) -> HistoryError {
        HistoryError::Corrupt {
            path: self.path.clone(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().expect("tempdir");
        let store = HistoryStore::new(dir.path().join("history.jsonl"));
        assert!(store.load().expect("load").is_empty());
    }

    #[test]
    fn load_after_append_ends_with_the_new_pair() {
        let dir = tempdir().expect("tempdir");
        let store = HistoryStore::new(dir.path().join("history.jsonl"));

        store.append("Why do lions roar?", "To talk to the pride.").expect("append");
        store.append("Do hippos swim?", "They mostly walk underwater.").expect("append");

        let entries = store.load().expect("load");
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries.last().expect("last"),
            &HistoryEntry {
                question: "Do hippos swim?".into(),
                answer: "They mostly walk underwater.".into(),
            }
        );
    }

    #[test]
    fn capacity_evicts_oldest_and_preserves_order() {
        let dir = tempdir().expect("tempdir");
        let store = HistoryStore::new(dir.path().join("history.jsonl"));

        for i in 0..MAX_HISTORY + 1 {
            store
                .append(&format!("q{i}"), &format!("a{i}"))
                .expect("append");
        }

        let entries = store.load().expect("load");
        assert_eq!(entries.len(), MAX_HISTORY);
        assert_eq!(entries[0].question, "q1");
        assert_eq!(entries[MAX_HISTORY - 1].question, format!("q{MAX_HISTORY}"));
    }

    #[test]
    fn corrupt_file_surfaces_instead_of_loading_empty() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("history.jsonl");
        std::fs::write(&path, "{not json at all").expect("write garbage");

        let store = HistoryStore::new(&path);
        match store.load() {
            Err(HistoryError::Corrupt { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected Corrupt, got {other:?}"),
        }
        // Appending over a corrupt log must refuse too.
        assert!(store.append("q", "a").is_err());
    }

    #[test]
    fn blank_lines_are_ignored() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("history.jsonl");
        std::fs::write(
            &path,
            "{\"question\":\"q\",\"answer\":\"a\"}\n\n{\"question\":\"q2\",\"answer\":\"a2\"}\n",
        )
        .expect("write");

        let store = HistoryStore::new(&path);
        assert_eq!(store.load().expect("load").len(), 2);
    }
}
