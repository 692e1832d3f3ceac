//! Storage of finished-match records.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::StoreError;
use crate::record::MatchRecord;

/// Append-only history of finished matches.
pub trait MatchStore {
    fn append(&mut self, record: &MatchRecord) -> Result<(), StoreError>;

    /// Up to `limit` records, newest first.
    fn recent(&self, limit: usize) -> Result<Vec<MatchRecord>, StoreError>;
}

/// Keeps records in memory; used by tests and embedders without a disk.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    records: Vec<MatchRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl MatchStore for MemoryStore {
    fn append(&mut self, record: &MatchRecord) -> Result<(), StoreError> {
        self.records.push(record.clone());
        Ok(())
    }

    fn recent(&self, limit: usize) -> Result<Vec<MatchRecord>, StoreError> {
        Ok(self.records.iter().rev().take(limit).cloned().collect())
    }
}

/// One JSON record per line in a single file.
#[derive(Clone, Debug)]
pub struct JsonLinesStore {
    path: PathBuf,
}

impl JsonLinesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MatchStore for JsonLinesStore {
    fn append(&mut self, record: &MatchRecord) -> Result<(), StoreError> {
        let line = serde_json::to_string(record)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{line}")?;
        writer.flush()?;
        debug!(path = %self.path.display(), "appended match record");
        Ok(())
    }

    fn recent(&self, limit: usize) -> Result<Vec<MatchRecord>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "no match history yet");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };
        let mut records = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(&line).map_err(|source| StoreError::Malformed {
                line: index + 1,
                source,
            })?;
            records.push(record);
        }
        records.reverse();
        records.truncate(limit);
        Ok(records)
    }
}
