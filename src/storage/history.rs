//! CSV-backed prediction history. Every write rewrites the whole table.
//!
//! There is no locking: two processes appending at once can drop rows.
//! Anything beyond single-user use needs an atomic append or a real store.

use super::record::{COLUMNS, REQUIRED_COLUMNS};
use super::{HistoryRow, PredictionRecord, SCHEMA_VERSION};
use crate::error::StoreError;
use csv::ByteRecord;
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// All history rows in insertion order (oldest first).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryLog {
    rows: Vec<HistoryRow>,
    /// Undecodable rows, verbatim in `COLUMNS` order, each tagged with the
    /// number of decoded rows preceding it in the file.
    raw: Vec<(usize, ByteRecord)>,
}

impl HistoryLog {
    pub fn from_rows(rows: Vec<HistoryRow>) -> Self {
        Self { rows, raw: Vec::new() }
    }

    pub fn rows(&self) -> &[HistoryRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows whose cells are not valid text. They are not in `rows()` but are
    /// written back unchanged on the next rewrite.
    pub fn unreadable(&self) -> usize {
        self.raw.len()
    }

    /// Parsed records, oldest first. Rows that do not parse are left out.
    pub fn records(&self) -> Vec<PredictionRecord> {
        self.rows.iter().filter_map(HistoryRow::record).collect()
    }

    pub fn last_record(&self) -> Option<PredictionRecord> {
        self.rows.last().and_then(HistoryRow::record)
    }
}

pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole log. A missing file is the initial state: an empty log.
    pub fn read_all(&self) -> Result<HistoryLog, StoreError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no history yet");
                return Ok(HistoryLog::default());
            }
            Err(e) => return Err(e.into()),
        };
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let headers = reader.byte_headers()?.clone();
        if headers.is_empty() {
            return Ok(HistoryLog::default());
        }
        let missing: Vec<&'static str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|c| !headers.iter().any(|h| h == c.as_bytes()))
            .collect();
        if !missing.is_empty() {
            return Err(StoreError::SchemaMismatch(missing));
        }
        let positions: Vec<Option<usize>> = COLUMNS
            .iter()
            .map(|c| headers.iter().position(|h| h == c.as_bytes()))
            .collect();

        let mut log = HistoryLog::default();
        for (line, result) in reader.byte_records().enumerate() {
            let record = result?;
            match record.deserialize::<HistoryRow>(Some(&headers)) {
                Ok(row) => log.rows.push(row),
                Err(e) => {
                    warn!(row = line + 1, error = %e, "keeping undecodable history row as is");
                    let raw: ByteRecord = positions
                        .iter()
                        .map(|p| p.and_then(|i| record.get(i)).unwrap_or_default())
                        .collect();
                    log.raw.push((log.rows.len(), raw));
                }
            }
        }

        let versions: Vec<u32> = log.rows.iter().filter_map(HistoryRow::version).collect();
        if let Some(&found) = versions.iter().max() {
            if versions.iter().all(|&v| v > SCHEMA_VERSION) {
                return Err(StoreError::UnsupportedSchema { found, supported: SCHEMA_VERSION });
            }
        }

        let corrupt = log.rows.iter().filter(|r| r.record().is_none()).count();
        if corrupt > 0 {
            warn!(corrupt, total = log.rows.len(), "history contains malformed rows");
        }
        Ok(log)
    }

    /// Append one record: read the existing table, add the row, write it all back.
    pub fn append(&self, record: &PredictionRecord) -> Result<(), StoreError> {
        let mut log = self.read_all()?;
        log.rows.push(HistoryRow::from(record));
        self.write_all(&log)?;
        debug!(rows = log.rows.len(), path = %self.path.display(), "history appended");
        Ok(())
    }

    /// Delete the persisted log. Clearing an absent log is not an error.
    pub fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, log: &HistoryLog) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)?;
        writer.write_record(COLUMNS)?;

        let mut raw = log.raw.iter().peekable();
        for (i, row) in log.rows.iter().enumerate() {
            while let Some((_, record)) = raw.next_if(|(before, _)| *before <= i) {
                writer.write_byte_record(record)?;
            }
            writer.serialize(row)?;
        }
        for (_, record) in raw {
            writer.write_byte_record(record)?;
        }
        writer.flush()?;
        Ok(())
    }
}
