//! The trial orchestrator.

mod builder;
mod run;

pub use builder::TunerBuilder;

use std::path::PathBuf;
use std::time::Duration;

use crate::cancel::CancelToken;

/// Drives the tuning loop.
///
/// A `Tuner` holds only the run's ambient configuration: the optional
/// per-trial wall-clock budget, the scratch root for per-trial working
/// directories, and the cancellation token. Everything that varies per run,
/// the search space, the suggestion strategy, the objective, and the trial
/// budget, is passed to [`run`](Tuner::run).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use tunable::Tuner;
///
/// let tuner = Tuner::builder()
///     .trial_timeout(Duration::from_secs(600))
///     .build();
/// # let _ = tuner;
/// ```
pub struct Tuner {
    pub(crate) trial_timeout: Option<Duration>,
    pub(crate) scratch_root: Option<PathBuf>,
    pub(crate) keep_scratch: bool,
    pub(crate) cancel: CancelToken,
}

impl Tuner {
    /// Creates a tuner with default settings: no trial timeout, no scratch
    /// directories, a fresh cancellation token.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Returns a [`TunerBuilder`] for configuring a tuner.
    #[must_use]
    pub fn builder() -> TunerBuilder {
        TunerBuilder::new()
    }

    /// Returns a handle to this tuner's cancellation token. Cancelling it
    /// stops the loop before the next trial starts.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Returns the configured per-trial wall-clock budget.
    #[must_use]
    pub fn trial_timeout(&self) -> Option<Duration> {
        self.trial_timeout
    }
}

impl Default for Tuner {
    fn default() -> Self {
        Self::new()
    }
}
