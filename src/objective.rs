//! The [`Objective`] trait defines what each trial evaluates.
//!
//! An objective receives one concrete [`TrialConfig`] and the trial's
//! [`TrialScope`], and returns a scalar loss. The convention is fixed:
//! **lower is better**. A higher-is-better metric such as accuracy or F1
//! must be negated by the caller before it crosses this boundary; the
//! orchestrator never sees the original metric.
//!
//! For simple cases, pass a closure directly to
//! [`Tuner::run`](crate::Tuner::run):
//!
//! ```
//! use tunable::prelude::*;
//!
//! # fn main() -> tunable::Result<()> {
//! let space = SearchSpace::builder()
//!     .uniform("model", "dropout", 0.0, 0.5)
//!     .build()?;
//!
//! let result = Tuner::new().run(
//!     &space,
//!     &RandomSuggester::with_seed(7),
//!     |config: &TrialConfig, _scope: &TrialScope| {
//!         let dropout = config.get_f64("model", "dropout")?;
//!         Ok::<_, tunable::Error>((dropout - 0.2).abs())
//!     },
//!     10,
//! )?;
//! assert_eq!(result.len(), 10);
//! # Ok(())
//! # }
//! ```
//!
//! Implement the trait on a struct to also observe finished trials through
//! [`after_trial`](Objective::after_trial), for example to stop the run once
//! a target loss is reached.

use core::ops::ControlFlow;

use crate::config::TrialConfig;
use crate::record::TrialRecord;
use crate::scope::TrialScope;

/// A black-box evaluation: configuration in, lower-is-better loss out.
///
/// Evaluation runs on a dedicated worker thread so the tuner can enforce a
/// wall-clock budget and isolate panics, hence the `Send + Sync + 'static`
/// bounds on [`Tuner::run`](crate::Tuner::run).
pub trait Objective {
    /// The error type returned by [`evaluate`](Objective::evaluate). Its
    /// rendered message is recorded in the failed trial's history entry.
    type Error: ToString + 'static;

    /// Evaluates one configuration and returns its loss.
    ///
    /// `scope` carries the trial's exclusive scratch directory (when one is
    /// configured); anything the evaluation writes, such as checkpoints,
    /// belongs under [`scope.dir()`](TrialScope::dir).
    ///
    /// # Errors
    ///
    /// Any error whose type implements `ToString`. The failure is recorded
    /// in the trial history; it does not abort the run.
    fn evaluate(&self, config: &TrialConfig, scope: &TrialScope) -> Result<f64, Self::Error>;

    /// Called after every trial with its finished record, completed or
    /// failed. Return `ControlFlow::Break(())` to stop the run early; the
    /// result then covers the trials recorded so far.
    ///
    /// Default: always continues.
    fn after_trial(&self, _record: &TrialRecord) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

impl<F, E> Objective for F
where
    F: Fn(&TrialConfig, &TrialScope) -> Result<f64, E>,
    E: ToString + 'static,
{
    type Error = E;

    fn evaluate(&self, config: &TrialConfig, scope: &TrialScope) -> Result<f64, E> {
        self(config, scope)
    }
}
