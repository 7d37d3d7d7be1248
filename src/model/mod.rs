//! Workflow model: what one benchmark log turns into.

pub mod step;

pub use step::Step;

use serde::Serialize;

/// Structured view of a single benchmark log.
///
/// Built once by `extract::extract` and only read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Workflow {
    pub file: String,
    pub benchmark: String,
    pub timestamp: Option<String>,
    pub phases: Phases,
    pub events: Vec<Event>,
    pub stages: Vec<StageRecord>,
    pub tasks: Vec<TaskRecord>,
    pub durations: Durations,
    pub errors: Vec<String>,

    /// Canonical step sequence derived from phases, events and stages.
    pub steps: Vec<Step>,
}

/// Phase markers found anywhere in the log text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Phases {
    pub prepare: bool,
    pub prepare_completed: bool,
    pub run: bool,
    pub report: bool,
}

impl Phases {
    /// Names of the phases that were seen, in report order.
    pub fn present(&self) -> Vec<&'static str> {
        [
            ("prepare", self.prepare),
            ("prepare_completed", self.prepare_completed),
            ("run", self.run),
            ("report", self.report),
        ]
        .into_iter()
        .filter_map(|(name, seen)| seen.then_some(name))
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    SparkContextStart,
    SparkContextStop,
    JobStart,
    JobFinish,
    ExecutorAdded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub kind: EventKind,
    pub line_number: usize,
    pub raw_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Submitted,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageRecord {
    pub stage_id: String,
    pub kind: StageKind,
    pub line_number: usize,
    /// Only set for `Finished` records with a parseable duration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Start,
    Finish,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRecord {
    pub task_id: String,
    pub kind: TaskKind,
    pub line_number: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

/// Aggregate run durations, each present only when its line was found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Durations {
    /// Whole-run duration in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    /// Framework job duration in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job: Option<f64>,
}

impl Durations {
    pub fn is_empty(&self) -> bool {
        self.total.is_none() && self.job.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_phases_keep_report_order() {
        let phases = Phases {
            prepare: true,
            prepare_completed: false,
            run: true,
            report: true,
        };
        assert_eq!(phases.present(), vec!["prepare", "run", "report"]);
        assert!(Phases::default().present().is_empty());
    }

    #[test]
    fn durations_skip_missing_keys_in_json() {
        let d = Durations {
            total: Some(42),
            job: None,
        };
        assert!(!d.is_empty());
        assert_eq!(serde_json::to_string(&d).unwrap(), r#"{"total":42}"#);
        assert!(Durations::default().is_empty());
    }
}
