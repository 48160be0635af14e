use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, EvasionError};
use crate::state::{CycleLabel, LabelRecord, TopologicalState};

/// A hole still alive when the run stopped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Survivor {
    pub label: CycleLabel,
    pub created_at: f64,
    /// `end_time - created_at`.
    pub duration: f64,
    pub intruder: bool,
    pub initial: bool,
}

/// End-of-run report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub end_time: f64,
    pub steps: usize,
    pub bisections: usize,
    /// Every label ever allocated, fence included.
    pub labels: Vec<LabelRecord>,
    pub survivors: Vec<Survivor>,
    /// Some live hole may still hide an evader.
    pub evasion_exists: bool,
}

impl Summary {
    pub fn from_state(state: &TopologicalState, end_time: f64, steps: usize, bisections: usize) -> Self {
        let survivors = state
            .alive()
            .filter(|r| !r.label.is_fence())
            .map(|r| Survivor {
                label: r.label,
                created_at: r.created_at,
                duration: r.lifetime(end_time),
                intruder: r.intruder,
                initial: r.initial,
            })
            .collect();
        Self {
            end_time,
            steps,
            bisections,
            labels: state.records().cloned().collect(),
            survivors,
            evasion_exists: state.has_intruder(),
        }
    }

    /// Longest duration among survivors that may hold an intruder.
    pub fn longest_intruder_survival(&self) -> Option<f64> {
        self.survivors
            .iter()
            .filter(|s| s.intruder)
            .map(|s| s.duration)
            .fold(None, |acc, d| Some(acc.map_or(d, |a: f64| a.max(d))))
    }

    pub fn retired(&self) -> usize {
        self.labels.iter().filter(|r| !r.is_alive()).count()
    }
}

/// A trajectory that stopped on an error. Carries what was known up to then.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("step {step} at t={time:.6} failed: {error}")]
pub struct RunFailure {
    pub step: usize,
    pub time: f64,
    #[source]
    pub error: EvasionError,
    pub partial: Summary,
}

impl RunFailure {
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    Completed(Summary),
    Failed(RunFailure),
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// Final summary, or the partial one of a failed run.
    pub fn summary(&self) -> &Summary {
        match self {
            Self::Completed(s) => s,
            Self::Failed(f) => &f.partial,
        }
    }

    pub fn failure(&self) -> Option<&RunFailure> {
        match self {
            Self::Completed(_) => None,
            Self::Failed(f) => Some(f),
        }
    }
}
