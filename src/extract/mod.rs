//! Workflow extraction from raw benchmark log text.
//!
//! `extract` is a composition of independent passes over the text. Each pass
//! returns its own owned result; nothing is accumulated across passes, so
//! distinct logs can be extracted on different threads.

pub mod filename;
pub mod patterns;

use crate::model::{
    Durations, Event, EventKind, Phases, StageRecord, Step, TaskRecord, Workflow,
};
use patterns::{
    ERROR_LINE, EVENT_PATTERNS, JOB_DURATION, LINE_BREAK, PHASE_PATTERNS, PhaseMarker,
    STAGE_PATTERNS, TASK_PATTERNS, TOTAL_DURATION,
};
use std::borrow::Cow;
use std::str::FromStr;

/// Build the workflow for one log. `file` is the display name of the log and
/// is also where the benchmark id and timestamp are read from.
pub fn extract(text: &str, file: &str) -> Workflow {
    let normalized = normalize_line_breaks(text);
    let text: &str = &normalized;
    let lines: Vec<&str> = text.lines().collect();

    let phases = detect_phases(text);
    let events = detect_events(&lines);
    let stages = detect_stages(&lines);
    let tasks = detect_tasks(&lines);
    let durations = detect_durations(text);
    let errors = detect_errors(&lines);
    let steps = build_steps(&phases, &events, &stages);

    Workflow {
        file: file.to_string(),
        benchmark: filename::benchmark_id(file),
        timestamp: filename::run_timestamp(file),
        phases,
        events,
        stages,
        tasks,
        durations,
        errors,
        steps,
    }
}

/// Rewrite `\r\n` and bare `\r` as `\n` so whole-text patterns never
/// match across a line break and every line gets its own number.
pub fn normalize_line_breaks(text: &str) -> Cow<'_, str> {
    LINE_BREAK.replace_all(text, "\n")
}

/// Lines paired with their 1-based line number.
fn numbered<'a>(lines: &'a [&'a str]) -> impl Iterator<Item = (usize, &'a str)> + 'a {
    lines.iter().enumerate().map(|(i, line)| (i + 1, *line))
}

/// Numeric captures that do not convert are dropped, not fatal.
fn parse_capture<T: FromStr>(raw: &str, field: &str, line_number: Option<usize>) -> Option<T> {
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::debug!(field, raw, ?line_number, "ignoring unparseable numeric capture");
            None
        }
    }
}

pub fn detect_phases(text: &str) -> Phases {
    let mut phases = Phases::default();
    for (marker, re) in PHASE_PATTERNS.iter() {
        let seen = re.is_match(text);
        match marker {
            PhaseMarker::Prepare => phases.prepare = seen,
            PhaseMarker::PrepareCompleted => phases.prepare_completed = seen,
            PhaseMarker::Run => phases.run = seen,
            PhaseMarker::Report => phases.report = seen,
        }
    }
    phases
}

pub fn detect_events(lines: &[&str]) -> Vec<Event> {
    numbered(lines)
        .flat_map(|(line_number, line)| {
            EVENT_PATTERNS
                .iter()
                .filter(move |(_, re)| re.is_match(line))
                .map(move |(kind, _)| Event {
                    kind: *kind,
                    line_number,
                    raw_text: line.trim().to_string(),
                })
        })
        .collect()
}

pub fn detect_stages(lines: &[&str]) -> Vec<StageRecord> {
    numbered(lines)
        .flat_map(|(line_number, line)| {
            STAGE_PATTERNS.iter().filter_map(move |(kind, re)| {
                let caps = re.captures(line)?;
                Some(StageRecord {
                    stage_id: caps[1].to_string(),
                    kind: *kind,
                    line_number,
                    duration_seconds: caps
                        .get(2)
                        .and_then(|m| parse_capture(m.as_str(), "stage duration", Some(line_number))),
                })
            })
        })
        .collect()
}

pub fn detect_tasks(lines: &[&str]) -> Vec<TaskRecord> {
    numbered(lines)
        .flat_map(|(line_number, line)| {
            TASK_PATTERNS.iter().filter_map(move |(kind, re)| {
                let caps = re.captures(line)?;
                Some(TaskRecord {
                    task_id: caps[1].to_string(),
                    kind: *kind,
                    line_number,
                    duration_ms: caps
                        .get(2)
                        .and_then(|m| parse_capture(m.as_str(), "task duration", Some(line_number))),
                })
            })
        })
        .collect()
}

/// First match in the whole text wins for each field.
pub fn detect_durations(text: &str) -> Durations {
    Durations {
        total: TOTAL_DURATION
            .captures(text)
            .and_then(|caps| parse_capture(&caps[1], "total duration", None)),
        job: JOB_DURATION
            .captures(text)
            .and_then(|caps| parse_capture(&caps[1], "job duration", None)),
    }
}

pub fn detect_errors(lines: &[&str]) -> Vec<String> {
    numbered(lines)
        .filter(|(_, line)| ERROR_LINE.is_match(line))
        .map(|(line_number, line)| format!("line {}: {}", line_number, line.trim()))
        .collect()
}

/// Canonical lifecycle order, independent of where things appear in the log.
pub fn build_steps(phases: &Phases, events: &[Event], stages: &[StageRecord]) -> Vec<Step> {
    let has = |kind: EventKind| events.iter().any(|e| e.kind == kind);

    [
        (Step::Prepare, phases.prepare),
        (Step::Run, phases.run),
        (Step::Report, phases.report),
        (Step::SparkContextStart, has(EventKind::SparkContextStart)),
        (Step::ExecutorAdded, has(EventKind::ExecutorAdded)),
        (Step::JobStart, has(EventKind::JobStart)),
        (Step::StagesExecution, !stages.is_empty()),
        (Step::JobFinish, has(EventKind::JobFinish)),
        (Step::SparkContextStop, has(EventKind::SparkContextStop)),
    ]
    .into_iter()
    .filter_map(|(step, present)| present.then_some(step))
    .collect()
}
