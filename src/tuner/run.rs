use core::ops::ControlFlow;
use std::sync::Arc;
use std::thread;

use crossbeam_channel::RecvTimeoutError;

use crate::config::TrialConfig;
use crate::error::{Error, Result};
use crate::objective::Objective;
use crate::record::{FailureKind, TrialOutcome, TrialRecord};
use crate::result::TuningResult;
use crate::scope::TrialScope;
use crate::space::SearchSpace;
use crate::suggest::Suggester;

use super::Tuner;

impl Tuner {
    /// Runs the tuning loop: up to `max_trials` sequential trials, each one
    /// suggested from the history so far, evaluated under an exclusive
    /// scratch scope, and recorded. Completed trials are ranked ascending by
    /// loss into the returned [`TuningResult`].
    ///
    /// Per-trial failures (an objective error or panic, a non-finite loss,
    /// an exceeded wall-clock budget) are recorded in the history and do not
    /// abort the loop. Cancellation via [`cancel_token`](Tuner::cancel_token)
    /// and an `after_trial` break both stop the loop between trials and
    /// return the result over the trials recorded so far.
    ///
    /// Evaluation runs on a dedicated worker thread per trial, which is what
    /// makes the wall-clock budget and panic isolation enforceable; this is
    /// why the objective must be `Send + Sync + 'static`.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptySearchSpace`] if the space declares no parameters.
    /// - [`Error::NoSuccessfulTrials`] if zero trials completed, whether the
    ///   budget was exhausted or the run was cancelled first.
    /// - A config error if the suggester produces a configuration that does
    ///   not materialize the space exactly.
    /// - [`Error::Scratch`] or [`Error::WorkerSpawn`] on environmental
    ///   failures.
    ///
    /// # Examples
    ///
    /// ```
    /// use tunable::prelude::*;
    ///
    /// # fn main() -> tunable::Result<()> {
    /// let space = SearchSpace::builder()
    ///     .uniform("g", "x", -10.0, 10.0)
    ///     .build()?;
    ///
    /// let result = Tuner::new().run(
    ///     &space,
    ///     &RandomSuggester::with_seed(42),
    ///     |config: &TrialConfig, _scope: &TrialScope| {
    ///         let x = config.get_f64("g", "x")?;
    ///         Ok::<_, tunable::Error>((x - 3.0).powi(2))
    ///     },
    ///     50,
    /// )?;
    ///
    /// assert_eq!(result.len(), 50);
    /// let best = result.best().loss().unwrap_or(f64::INFINITY);
    /// assert!(result.iter().all(|r| r.loss().unwrap_or(f64::INFINITY) >= best));
    /// # Ok(())
    /// # }
    /// ```
    pub fn run<S, O>(
        &self,
        space: &SearchSpace,
        suggester: &S,
        objective: O,
        max_trials: u64,
    ) -> Result<TuningResult>
    where
        S: Suggester + ?Sized,
        O: Objective + Send + Sync + 'static,
    {
        if space.is_empty() {
            return Err(Error::EmptySearchSpace);
        }

        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("tune", max_trials).entered();

        let objective = Arc::new(objective);
        let mut history: Vec<TrialRecord> = Vec::new();
        let mut best: Option<f64> = None;

        for index in 0..max_trials {
            if self.cancel.is_cancelled() {
                trace_info!(index, "cancelled, stopping before next trial");
                break;
            }

            let config = suggester.suggest(space, &history)?;
            space.validate_config(&config)?;

            let scope = self.acquire_scope(index)?;
            let outcome = Self::evaluate_scoped(
                Arc::clone(&objective),
                &config,
                scope,
                self.trial_timeout,
            )?;

            match &outcome {
                TrialOutcome::Completed { loss } => {
                    let is_best = best.is_none_or(|b| *loss < b);
                    if is_best {
                        best = Some(*loss);
                    }
                    #[cfg(feature = "tracing")]
                    {
                        if is_best {
                            tracing::info!(index, loss, "new best loss");
                        } else {
                            tracing::info!(index, loss, "trial completed");
                        }
                    }
                }
                TrialOutcome::Failed { error: _error } => {
                    trace_debug!(index, error = %_error, "trial failed");
                }
            }

            let record = TrialRecord {
                index,
                config,
                outcome,
            };
            let flow = objective.after_trial(&record);
            history.push(record);
            if let ControlFlow::Break(()) = flow {
                trace_info!(index, "observer requested early stop");
                break;
            }
        }

        TuningResult::from_history(history)
    }

    fn acquire_scope(&self, index: u64) -> Result<TrialScope> {
        match &self.scratch_root {
            Some(root) => TrialScope::with_dir(index, root, self.keep_scratch),
            None => Ok(TrialScope::detached(index)),
        }
    }

    /// Evaluates one configuration on a dedicated worker thread.
    ///
    /// The scope moves into the worker so its release happens after the
    /// evaluation finishes, even when the loop has already moved on past a
    /// timed-out trial.
    fn evaluate_scoped<O>(
        objective: Arc<O>,
        config: &TrialConfig,
        scope: TrialScope,
        timeout: Option<core::time::Duration>,
    ) -> Result<TrialOutcome>
    where
        O: Objective + Send + Sync + 'static,
    {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let worker_config = config.clone();
        let index = scope.trial();
        let handle = thread::Builder::new()
            .name(format!("trial-{index}"))
            .spawn(move || {
                let result = objective
                    .evaluate(&worker_config, &scope)
                    .map_err(|e| e.to_string());
                drop(scope);
                let _ = tx.send(result);
            })
            .map_err(Error::WorkerSpawn)?;

        let received = match timeout {
            Some(budget) => match rx.recv_timeout(budget) {
                Ok(result) => Some(result),
                Err(RecvTimeoutError::Timeout) => {
                    // Detach the worker; it still owns the scope and releases
                    // it whenever the evaluation actually returns.
                    return Ok(TrialOutcome::Failed {
                        error: FailureKind::Timeout { budget },
                    });
                }
                Err(RecvTimeoutError::Disconnected) => None,
            },
            None => rx.recv().ok(),
        };
        let _ = handle.join();

        Ok(match received {
            Some(Ok(loss)) if loss.is_finite() => TrialOutcome::Completed { loss },
            Some(Ok(loss)) => TrialOutcome::Failed {
                error: FailureKind::NonFiniteLoss(loss),
            },
            Some(Err(message)) => TrialOutcome::Failed {
                error: FailureKind::Evaluation(message),
            },
            None => TrialOutcome::Failed {
                error: FailureKind::Panicked,
            },
        })
    }
}
