mod history;
mod provider;

pub use history::{load_history, save_history, UploadHistory, UploadRecord};
pub use provider::{
    FileReportProvider, FileReportStore, InMemoryReportProvider, ReportProvider, HISTORY_FILE,
    REPORT_FILE_STEM,
};
