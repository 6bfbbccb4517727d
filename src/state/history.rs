use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One published sales report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadRecord {
    /// 1-based, increases with every upload.
    pub version: u32,

    pub uploaded_at: DateTime<Utc>,

    /// File name the report was uploaded from.
    pub source: String,

    /// File name inside the store.
    pub stored_as: String,
}

/// Versioned list of uploads, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadHistory {
    pub records: Vec<UploadRecord>,
}

impl UploadHistory {
    pub fn latest(&self) -> Option<&UploadRecord> {
        self.records.last()
    }

    pub fn next_version(&self) -> u32 {
        self.latest().map(|r| r.version + 1).unwrap_or(1)
    }

    /// Append a record with the next version number.
    pub fn push(&mut self, source: &str, stored_as: &str, uploaded_at: DateTime<Utc>) -> &UploadRecord {
        let record = UploadRecord {
            version: self.next_version(),
            uploaded_at,
            source: source.to_string(),
            stored_as: stored_as.to_string(),
        };
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    /// The newest `limit` records, newest first.
    pub fn recent(&self, limit: usize) -> Vec<UploadRecord> {
        self.records.iter().rev().take(limit).cloned().collect()
    }
}

/// Load the upload history. A missing file is an empty history.
pub fn load_history<P: AsRef<Path>>(path: P) -> Result<UploadHistory> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(UploadHistory::default());
    }

    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn save_history<P: AsRef<Path>>(path: P, history: &UploadHistory) -> Result<()> {
    let json = serde_json::to_string_pretty(history)?;
    fs::write(path, json)?;
    Ok(())
}
