//! Per-trial records and failure kinds.

use core::time::Duration;

use crate::config::TrialConfig;

/// Why a trial failed. Recorded in the history, never raised from the loop.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailureKind {
    /// The objective returned an error; the rendered message is kept.
    #[error("evaluation failed: {0}")]
    Evaluation(String),

    /// The objective panicked.
    #[error("evaluation panicked")]
    Panicked,

    /// The trial exceeded its wall-clock budget.
    #[error("trial exceeded its wall-clock budget of {budget:?}")]
    Timeout {
        /// The configured per-trial budget.
        budget: Duration,
    },

    /// The objective returned a non-finite loss.
    #[error("loss is not finite: {0}")]
    NonFiniteLoss(f64),
}

/// Terminal outcome of one trial.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrialOutcome {
    /// The objective returned a finite loss.
    Completed {
        /// The observed loss; lower is better.
        loss: f64,
    },
    /// The trial failed; the run continued without it.
    Failed {
        /// What went wrong.
        error: FailureKind,
    },
}

impl TrialOutcome {
    /// Returns `true` for a completed trial.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Returns the loss of a completed trial.
    #[must_use]
    pub fn loss(&self) -> Option<f64> {
        match self {
            Self::Completed { loss } => Some(*loss),
            Self::Failed { .. } => None,
        }
    }

    /// Returns the failure of a failed trial.
    #[must_use]
    pub fn failure(&self) -> Option<&FailureKind> {
        match self {
            Self::Completed { .. } => None,
            Self::Failed { error } => Some(error),
        }
    }
}

/// One trial's immutable record: its index in submission order, the
/// configuration that was evaluated, and what happened.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialRecord {
    /// Zero-based trial index; equals completion order under sequential
    /// execution.
    pub index: u64,
    /// The configuration evaluated by this trial. Its parameter paths
    /// exactly match the search space's declared paths.
    pub config: TrialConfig,
    /// The trial's terminal outcome.
    pub outcome: TrialOutcome,
}

impl TrialRecord {
    /// Returns `true` for a completed trial.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.outcome.is_completed()
    }

    /// Returns the loss of a completed trial.
    #[must_use]
    pub fn loss(&self) -> Option<f64> {
        self.outcome.loss()
    }
}
