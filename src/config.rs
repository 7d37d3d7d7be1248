//! Validated run configuration.

use crate::input::InputSource;
use crate::render::ReportFormat;
use std::path::PathBuf;

pub const DEFAULT_REPORT_PATH: &str = "logs/workflow-analysis-report.txt";
pub const DEFAULT_LOG_EXTENSION: &str = "log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub source: InputSource,
    pub format: ReportFormat,

    /// `None` when the report is printed only.
    pub out: Option<PathBuf>,

    /// Extraction worker threads; `None` keeps rayon's default.
    pub jobs: Option<usize>,

    pub log_filter: String,
}
