use crate::compare::Comparison;
use crate::model::{Durations, Workflow};

const RULE_WIDTH: usize = 80;

/// Render the plain-text workflow analysis report.
pub fn render_text_report(workflows: &[Workflow], comparison: &Comparison) -> String {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);
    let mut out: Vec<String> = Vec::new();

    out.push(heavy.clone());
    out.push("HIBENCH WORKFLOW ANALYSIS REPORT".to_string());
    out.push(heavy.clone());
    out.push(String::new());

    out.push("📊 INDIVIDUAL WORKFLOWS:".to_string());
    out.push(light.clone());
    for wf in workflows {
        out.extend(workflow_block(wf));
    }

    out.push(format!("\n{}", heavy));
    out.push("🔍 WORKFLOW COMPARISON:".to_string());
    out.push(light);

    out.push("\n✅ Common Steps (appear in all workflows):".to_string());
    if comparison.common_steps.is_empty() {
        out.push("   (None)".to_string());
    } else {
        let mut labels: Vec<&str> = comparison.common_steps.iter().map(|s| s.label()).collect();
        labels.sort();
        out.push(format!("   {}", labels.join(", ")));
    }

    out.push("\n🔸 Step Frequency:".to_string());
    for count in comparison.frequency_ranked() {
        out.push(format!(
            "   {}: {}/{} workflows",
            count.step,
            count.workflows,
            workflows.len()
        ));
    }

    if !comparison.unique_steps.is_empty() {
        out.push("\n🔹 Unique Steps (per benchmark):".to_string());
        for unique in &comparison.unique_steps {
            out.push(format!("   {}: {}", unique.benchmark, join_steps(&unique.steps, ", ")));
        }
    }

    if !comparison.differences.is_empty() {
        out.push("\n⚠️  Workflow Differences:".to_string());
        for diff in &comparison.differences {
            out.push(format!("   {} vs {}:", diff.left, diff.right));
            out.push(format!("      Differences: {}", join_steps(&diff.steps, ", ")));
        }
    }

    out.push(format!("\n{}", heavy));
    out.join("\n")
}

fn workflow_block(wf: &Workflow) -> Vec<String> {
    let mut lines = vec![
        format!("\n🔹 Benchmark: {}", wf.benchmark),
        format!("   File: {}", wf.file),
        format!("   Timestamp: {}", wf.timestamp.as_deref().unwrap_or("None")),
        format!("   Workflow Steps: {}", join_steps(&wf.steps, " → ")),
        format!("   Phases: {}", wf.phases.present().join(", ")),
        format!("   Stages: {}", wf.stages.len()),
        format!("   Tasks: {}", wf.tasks.len()),
    ];
    if !wf.durations.is_empty() {
        lines.push(format!("   Duration: {}", format_durations(&wf.durations)));
    }
    if !wf.errors.is_empty() {
        lines.push(format!("   ⚠️  Errors: {}", wf.errors.len()));
    }
    lines
}

fn join_steps<'a, I>(steps: I, sep: &str) -> String
where
    I: IntoIterator<Item = &'a crate::model::Step>,
{
    steps
        .into_iter()
        .map(|s| s.label())
        .collect::<Vec<_>>()
        .join(sep)
}

/// `{'total': 37, 'job': 2.25}`
fn format_durations(d: &Durations) -> String {
    let mut parts = Vec::new();
    if let Some(total) = d.total {
        parts.push(format!("'total': {}", total));
    }
    if let Some(job) = d.job {
        parts.push(format!("'job': {}", float_repr(job)));
    }
    format!("{{{}}}", parts.join(", "))
}

/// Shortest round-trip float text with a signed, two-digit exponent
/// (`3.0`, `1e+16`, `2.5e-07`).
fn float_repr(x: f64) -> String {
    let s = format!("{:?}", x);
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => s,
    }
}
