//! Pattern taxonomy for benchmark logs.
//!
//! Every recognizer lives in one of the tables below so adding a pattern
//! never touches the scanning code in `extract`.

use crate::model::{EventKind, StageKind, TaskKind};
use once_cell::sync::Lazy;
use regex::Regex;

/// Phase markers searched for in the whole log text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseMarker {
    Prepare,
    PrepareCompleted,
    Run,
    Report,
}

// Built-in patterns are constants, so a bad one is a programming error.
// `all_patterns_compile` forces every table.
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("built-in pattern {pattern:?} is invalid: {e}"))
}

/// Case-insensitive, matched anywhere in the text.
pub static PHASE_PATTERNS: Lazy<Vec<(PhaseMarker, Regex)>> = Lazy::new(|| {
    vec![
        (
            PhaseMarker::Prepare,
            compile(r"(?i)1️⃣\s+PREPARE PHASE|PREPARE PHASE|prepare phase"),
        ),
        (
            PhaseMarker::PrepareCompleted,
            compile(r"(?i)Prepare phase completed"),
        ),
        (PhaseMarker::Run, compile(r"(?i)2️⃣\s+RUN PHASE|RUN PHASE|run phase")),
        (PhaseMarker::Report, compile(r"(?i)3️⃣\s+REPORT|REPORT")),
    ]
});

/// Per-line event recognizers, tested in this order on every line.
pub static EVENT_PATTERNS: Lazy<Vec<(EventKind, Regex)>> = Lazy::new(|| {
    vec![
        (
            EventKind::SparkContextStart,
            compile(r"SparkContext.*Running Spark version"),
        ),
        (
            EventKind::SparkContextStop,
            compile(r"SparkContext.*Successfully stopped"),
        ),
        (EventKind::JobStart, compile(r"Starting job|Job \d+ is finished")),
        (EventKind::JobFinish, compile(r"Job \d+ finished|Job.*completed")),
        (
            EventKind::ExecutorAdded,
            compile(r"Executor added|Granted executor"),
        ),
    ]
});

// Record patterns: group 1 is the id, optional group 2 the duration.

pub static STAGE_PATTERNS: Lazy<Vec<(StageKind, Regex)>> = Lazy::new(|| {
    vec![
        (StageKind::Submitted, compile(r"Submitting.*Stage (\d+)")),
        (
            StageKind::Finished,
            compile(r"Stage (\d+).*finished in ([\d.]+) s"),
        ),
    ]
});

pub static TASK_PATTERNS: Lazy<Vec<(TaskKind, Regex)>> = Lazy::new(|| {
    vec![
        (TaskKind::Start, compile(r"Starting task (\d+\.\d+)")),
        (
            TaskKind::Finish,
            compile(r"Finished task (\d+\.\d+).*in (\d+) ms"),
        ),
    ]
});

pub static TOTAL_DURATION: Lazy<Regex> = Lazy::new(|| compile(r"Total Duration:\s*(\d+)s"));

pub static JOB_DURATION: Lazy<Regex> =
    Lazy::new(|| compile(r"Job \d+ finished.*took ([\d.]+) s"));

pub static ERROR_LINE: Lazy<Regex> = Lazy::new(|| compile(r"(?i)ERROR|❌|Failed|Exception"));

/// `\r\n` or a bare `\r`; both are rewritten to `\n` before scanning.
pub static LINE_BREAK: Lazy<Regex> = Lazy::new(|| compile(r"\r\n|\r"));

// Filename patterns.

pub static BENCHMARK_NAME: Lazy<Regex> =
    Lazy::new(|| compile(r"benchmark-([^-]+)-([^-]+)-([^-]+)"));

pub static RUN_TIMESTAMP: Lazy<Regex> = Lazy::new(|| compile(r"(\d{8}_\d{6})"));
