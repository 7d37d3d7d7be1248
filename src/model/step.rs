//! Canonical workflow steps.
//!
//! Variant order is the canonical lifecycle order, so `Ord` on `Step` and
//! iteration over a `BTreeSet<Step>` both follow it.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Step {
    Prepare,
    Run,
    Report,
    SparkContextStart,
    ExecutorAdded,
    JobStart,
    StagesExecution,
    JobFinish,
    SparkContextStop,
}

impl Step {
    pub fn label(self) -> &'static str {
        match self {
            Step::Prepare => "PREPARE",
            Step::Run => "RUN",
            Step::Report => "REPORT",
            Step::SparkContextStart => "SPARK_CONTEXT_START",
            Step::ExecutorAdded => "EXECUTOR_ADDED",
            Step::JobStart => "JOB_START",
            Step::StagesExecution => "STAGES_EXECUTION",
            Step::JobFinish => "JOB_FINISH",
            Step::SparkContextStop => "SPARK_CONTEXT_STOP",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
