//! Suggestion strategies for choosing the next trial configuration.

mod random;

pub use random::RandomSuggester;

use crate::config::TrialConfig;
use crate::error::Result;
use crate::record::TrialRecord;
use crate::space::SearchSpace;

/// Trait for pluggable suggestion strategies.
///
/// Before trial *i* the tuner calls [`suggest`](Suggester::suggest) with the
/// search space and the records of trials `0..i-1` in completion order,
/// completed and failed alike. The strategy returns one concrete
/// configuration whose parameter paths exactly match the space; the tuner
/// validates this and fails the run on a mismatch.
///
/// Plain closures implement the trait:
///
/// ```
/// use tunable::prelude::*;
///
/// let stub = |space: &SearchSpace, _history: &[TrialRecord]| {
///     let mut config = TrialConfig::new();
///     for (group, params) in space.groups() {
///         for (name, _spec) in params {
///             config.set(group, name, 0.5);
///         }
///     }
///     Ok::<_, tunable::Error>(config)
/// };
/// # let _ = &stub;
/// ```
pub trait Suggester: Send + Sync {
    /// Produces the configuration for the next trial.
    ///
    /// # Errors
    ///
    /// A strategy may fail, for example when it cannot derive a candidate
    /// from the history; the error aborts the run.
    fn suggest(&self, space: &SearchSpace, history: &[TrialRecord]) -> Result<TrialConfig>;
}

impl<F> Suggester for F
where
    F: Fn(&SearchSpace, &[TrialRecord]) -> Result<TrialConfig> + Send + Sync,
{
    fn suggest(&self, space: &SearchSpace, history: &[TrialRecord]) -> Result<TrialConfig> {
        self(space, history)
    }
}
