use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use chrono::Local;

use crate::errors::KharchaError;
use crate::record::ExpenseRecord;

/// Owns the record sequence and its persistent mirror. Every successful
/// mutation rewrites the whole data file; nothing else touches it.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    records: Vec<ExpenseRecord>,
}

impl Store {
    /// Reads the record sequence from the data file. A missing or
    /// unparsable file yields an empty store rather than an error.
    pub fn load(path: PathBuf) -> Self {
        let records = match File::open(&path) {
            Ok(file) => serde_json::from_reader(BufReader::new(file)).unwrap_or_default(),
            Err(_) => Vec::new(),
        };
        Self { path, records }
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    /// Validates the record, then appends it and persists. On a validation
    /// error neither memory nor the file changes.
    pub fn add(&mut self, mut record: ExpenseRecord) -> Result<(), KharchaError> {
        record.validate(Local::now().date_naive())?;
        record.amount = record.amount.round_dp(2);
        self.records.push(record);
        self.persist()
    }

    /// Removes the record at `index` and persists. Returns the removed
    /// record so callers can report what was deleted.
    pub fn remove(&mut self, index: usize) -> Result<ExpenseRecord, KharchaError> {
        if index >= self.records.len() {
            return Err(KharchaError::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        let removed = self.records.remove(index);
        self.persist()?;
        Ok(removed)
    }

    fn persist(&self) -> Result<(), KharchaError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.records)?;
        writer.flush()?;
        Ok(())
    }
}
