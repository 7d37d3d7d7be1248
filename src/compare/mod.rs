//! Cross-workflow comparison over step sets.

use crate::model::{Step, Workflow};
use serde::Serialize;
use std::collections::BTreeSet;

pub type StepSet = BTreeSet<Step>;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Comparison {
    /// Steps present in every workflow.
    pub common_steps: StepSet,

    /// Steps outside `common_steps`, per benchmark id, in first-seen order.
    pub unique_steps: Vec<UniqueSteps>,

    /// Number of workflows containing each step, in discovery order.
    pub step_frequency: Vec<StepCount>,

    /// One record per pair of workflows whose step sets differ.
    pub differences: Vec<StepDifference>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UniqueSteps {
    pub benchmark: String,
    pub steps: StepSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepCount {
    pub step: Step,
    pub workflows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepDifference {
    pub left: String,
    pub right: String,
    /// Symmetric difference of the two step sets.
    pub steps: StepSet,
}

impl Comparison {
    /// Step frequencies by descending count; ties keep discovery order.
    pub fn frequency_ranked(&self) -> Vec<StepCount> {
        let mut ranked = self.step_frequency.clone();
        ranked.sort_by(|a, b| b.workflows.cmp(&a.workflows));
        ranked
    }
}

/// Compare workflows. Output order follows input order, so callers that
/// extract in parallel must reassemble results before calling this.
pub fn compare(workflows: &[Workflow]) -> Comparison {
    let step_sets: Vec<StepSet> = workflows
        .iter()
        .map(|wf| wf.steps.iter().copied().collect())
        .collect();

    let step_frequency = count_steps(&step_sets);
    let common_steps = intersect_all(&step_sets);

    let mut unique_steps: Vec<UniqueSteps> = Vec::new();
    for (wf, steps) in workflows.iter().zip(&step_sets) {
        let unique: StepSet = steps.difference(&common_steps).copied().collect();
        if unique.is_empty() {
            continue;
        }
        match unique_steps.iter_mut().find(|u| u.benchmark == wf.benchmark) {
            Some(existing) => {
                tracing::warn!(
                    benchmark = %wf.benchmark,
                    file = %wf.file,
                    "benchmark id seen more than once; keeping unique steps of the later log"
                );
                existing.steps = unique;
            }
            None => unique_steps.push(UniqueSteps {
                benchmark: wf.benchmark.clone(),
                steps: unique,
            }),
        }
    }

    let mut differences = Vec::new();
    for (i, (left, left_steps)) in workflows.iter().zip(&step_sets).enumerate() {
        for (right, right_steps) in workflows.iter().zip(&step_sets).skip(i + 1) {
            let diff: StepSet = left_steps
                .symmetric_difference(right_steps)
                .copied()
                .collect();
            if !diff.is_empty() {
                differences.push(StepDifference {
                    left: left.benchmark.clone(),
                    right: right.benchmark.clone(),
                    steps: diff,
                });
            }
        }
    }

    Comparison {
        common_steps,
        unique_steps,
        step_frequency,
        differences,
    }
}

fn count_steps(step_sets: &[StepSet]) -> Vec<StepCount> {
    let mut counts: Vec<StepCount> = Vec::new();
    for steps in step_sets {
        for step in steps {
            match counts.iter_mut().find(|c| c.step == *step) {
                Some(c) => c.workflows += 1,
                None => counts.push(StepCount {
                    step: *step,
                    workflows: 1,
                }),
            }
        }
    }
    counts
}

/// Empty input intersects to the empty set.
fn intersect_all(step_sets: &[StepSet]) -> StepSet {
    let Some((first, rest)) = step_sets.split_first() else {
        return StepSet::new();
    };
    rest.iter().fold(first.clone(), |acc, steps| {
        acc.intersection(steps).copied().collect()
    })
}
