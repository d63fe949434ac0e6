//! Cooperative cancellation.

use core::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cloneable stop flag checked by the orchestrator between trials.
///
/// Cancellation is cooperative: a running evaluation is never interrupted.
/// Once the token is set, the loop stops before asking the suggester for the
/// next candidate, and the run's result covers exactly the trials recorded
/// so far.
///
/// # Examples
///
/// ```
/// use tunable::CancelToken;
///
/// let token = CancelToken::new();
/// let handle = token.clone();
/// assert!(!token.is_cancelled());
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token in the not-cancelled state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. All clones of this token observe it.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Returns `true` once cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
