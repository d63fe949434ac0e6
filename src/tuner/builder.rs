use std::path::PathBuf;
use std::time::Duration;

use crate::cancel::CancelToken;

use super::Tuner;

/// A builder for constructing [`Tuner`] instances with a fluent API.
///
/// Created via [`Tuner::builder()`].
///
/// # Defaults
///
/// - Trial timeout: none (an evaluation may run arbitrarily long)
/// - Scratch root: none (objectives receive a scope without a directory)
/// - Scratch retention: directories are removed on release
/// - Cancellation token: a fresh, unset token
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use tunable::{CancelToken, Tuner};
///
/// let token = CancelToken::new();
/// let tuner = Tuner::builder()
///     .trial_timeout(Duration::from_secs(1800))
///     .scratch_root("/tmp/tuning-run")
///     .keep_scratch(true)
///     .cancel_token(token.clone())
///     .build();
/// # let _ = (tuner, token);
/// ```
#[derive(Debug, Default)]
pub struct TunerBuilder {
    trial_timeout: Option<Duration>,
    scratch_root: Option<PathBuf>,
    keep_scratch: bool,
    cancel: Option<CancelToken>,
}

impl TunerBuilder {
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Sets a per-trial wall-clock budget. A trial exceeding it is recorded
    /// as failed with [`FailureKind::Timeout`](crate::FailureKind::Timeout)
    /// and the loop proceeds to the next trial.
    #[must_use]
    pub fn trial_timeout(mut self, budget: Duration) -> Self {
        self.trial_timeout = Some(budget);
        self
    }

    /// Sets the root under which each trial gets an exclusive
    /// `trial-<index>` scratch directory.
    #[must_use]
    pub fn scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(root.into());
        self
    }

    /// Keeps per-trial scratch directories after release instead of removing
    /// them, so artifacts such as checkpoints remain inspectable.
    #[must_use]
    pub fn keep_scratch(mut self, keep: bool) -> Self {
        self.keep_scratch = keep;
        self
    }

    /// Uses an externally owned cancellation token instead of a fresh one.
    #[must_use]
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Builds the [`Tuner`] with the configured options.
    #[must_use]
    pub fn build(self) -> Tuner {
        Tuner {
            trial_timeout: self.trial_timeout,
            scratch_root: self.scratch_root,
            keep_scratch: self.keep_scratch,
            cancel: self.cancel.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let tuner = Tuner::new();
        assert!(tuner.trial_timeout().is_none());
        assert!(tuner.scratch_root.is_none());
        assert!(!tuner.keep_scratch);
        assert!(!tuner.cancel.is_cancelled());
    }

    #[test]
    fn test_external_token_is_shared() {
        let token = CancelToken::new();
        let tuner = Tuner::builder().cancel_token(token.clone()).build();
        token.cancel();
        assert!(tuner.cancel_token().is_cancelled());
    }
}
