use crate::Result;
use crate::compare::Comparison;
use crate::model::Workflow;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ReportData<'a> {
    workflows: &'a [Workflow],
    comparison: &'a Comparison,
}

/// Render workflows and their comparison as pretty-printed JSON.
pub fn render_json_report(workflows: &[Workflow], comparison: &Comparison) -> Result<String> {
    let data = ReportData {
        workflows,
        comparison,
    };
    Ok(serde_json::to_string_pretty(&data)?)
}
