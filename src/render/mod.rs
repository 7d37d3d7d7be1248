//! Report rendering for analyzed workflows.

pub mod json;
pub mod text;

pub use json::render_json_report;
pub use text::render_text_report;

use crate::Result;
use crate::compare::Comparison;
use crate::model::Workflow;
use anyhow::Context;
use clap::ValueEnum;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

pub fn render_report(
    format: ReportFormat,
    workflows: &[Workflow],
    comparison: &Comparison,
) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text_report(workflows, comparison)),
        ReportFormat::Json => render_json_report(workflows, comparison),
    }
}

/// Persist a rendered report, creating missing parent directories.
pub fn write_report(path: &Path, report: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create report directory {}", parent.display()))?;
    }
    fs::write(path, report).with_context(|| format!("write report {}", path.display()))?;
    Ok(())
}
