// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::record::DocumentRecord;
use crate::utils::error::StorageError;

/// Metadata written alongside each extracted record.
#[derive(Debug, Serialize)]
struct RecordMeta<'a> {
    document_id: &'a str,
    extracted_at: String,
    varieties: usize,
}

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Writes a finalized record as `<doc_id>.json` plus a sibling
    /// metadata file, returning the record path.
    pub fn save_record(&self, record: &DocumentRecord) -> Result<PathBuf, StorageError> {
        let record_path = self.base_dir.join(format!("{}.json", record.document_id));
        fs::write(&record_path, serde_json::to_string_pretty(record)?)?;

        let meta = RecordMeta {
            document_id: &record.document_id,
            extracted_at: chrono::Utc::now().to_rfc3339(),
            varieties: record.varieties.len(),
        };
        let meta_path = self.base_dir.join(format!("{}.meta.json", record.document_id));
        fs::write(&meta_path, serde_json::to_string_pretty(&meta)?)?;

        Ok(record_path)
    }
}
