use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::info;

use crate::error::{PackError, Result};
use crate::models::RawRow;
use crate::report::read_table;
use crate::state::history::{load_history, save_history, UploadHistory, UploadRecord};

/// File name stem of the stored report; the extension follows the upload.
pub const REPORT_FILE_STEM: &str = "latest_packing_plan";

pub const HISTORY_FILE: &str = "upload_history.json";

/// Source of the sales report the planner works from.
pub trait ReportProvider {
    /// Rows of the current report.
    fn current_report(&self) -> Result<Vec<RawRow>>;

    /// Uploads so far, oldest first.
    fn history(&self) -> Result<Vec<UploadRecord>>;
}

/// Report store on disk: the latest upload plus its history.
pub struct FileReportStore {
    root: PathBuf,
}

impl FileReportStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn history_path(&self) -> PathBuf {
        self.root.join(HISTORY_FILE)
    }

    fn load(&self) -> Result<UploadHistory> {
        load_history(self.history_path())
    }

    /// Copy a report into the store and record the upload.
    ///
    /// The file is read first so a table that cannot be parsed is never
    /// published.
    pub fn publish<P: AsRef<Path>>(&self, source: P) -> Result<UploadRecord> {
        let source = source.as_ref();
        let rows = read_table(source)?;

        let ext = source
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("csv")
            .to_lowercase();
        let stored_as = format!("{}.{}", REPORT_FILE_STEM, ext);

        fs::create_dir_all(&self.root)?;
        fs::copy(source, self.root.join(&stored_as))?;

        let source_name = source
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| source.display().to_string());

        let mut history = self.load()?;
        let record = history.push(&source_name, &stored_as, Utc::now()).clone();
        save_history(self.history_path(), &history)?;

        info!(
            version = record.version,
            source = %record.source,
            rows = rows.len(),
            "published packing plan"
        );
        Ok(record)
    }

    /// The newest `limit` uploads, newest first.
    pub fn recent(&self, limit: usize) -> Result<Vec<UploadRecord>> {
        Ok(self.load()?.recent(limit))
    }
}

impl ReportProvider for FileReportStore {
    fn current_report(&self) -> Result<Vec<RawRow>> {
        let history = self.load()?;
        let latest = history.latest().ok_or(PackError::NoReport)?;

        let path = self.root.join(&latest.stored_as);
        if !path.exists() {
            return Err(PackError::NoReport);
        }
        read_table(path)
    }

    fn history(&self) -> Result<Vec<UploadRecord>> {
        Ok(self.load()?.records)
    }
}

/// Report read straight from a file, without a store.
pub struct FileReportProvider {
    path: PathBuf,
}

impl FileReportProvider {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl ReportProvider for FileReportProvider {
    fn current_report(&self) -> Result<Vec<RawRow>> {
        read_table(&self.path)
    }

    fn history(&self) -> Result<Vec<UploadRecord>> {
        Ok(Vec::new())
    }
}

/// Report held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReportProvider {
    rows: Option<Vec<RawRow>>,
    history: UploadHistory,
}

impl InMemoryReportProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current report and record the upload.
    pub fn publish(&mut self, source: &str, rows: Vec<RawRow>) -> &UploadRecord {
        self.rows = Some(rows);
        self.history.push(source, source, Utc::now())
    }
}

impl ReportProvider for InMemoryReportProvider {
    fn current_report(&self) -> Result<Vec<RawRow>> {
        self.rows.clone().ok_or(PackError::NoReport)
    }

    fn history(&self) -> Result<Vec<UploadRecord>> {
        Ok(self.history.records.clone())
    }
}
