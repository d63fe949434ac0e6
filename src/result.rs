//! Ranked tuning results.

use crate::error::{Error, Result};
use crate::record::TrialRecord;

/// The outcome of a tuning run.
///
/// Completed trials are ranked ascending by loss, ties broken by earlier
/// trial index; rank 0 is the best. The full history, including failed
/// trials, stays available in submission order through
/// [`history`](Self::history). A `TuningResult` is only ever constructed
/// with at least one completed trial, so [`best`](Self::best) is total.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TuningResult {
    ranked: Vec<TrialRecord>,
    history: Vec<TrialRecord>,
}

impl TuningResult {
    /// Ranks the completed records out of a finished run's history.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuccessfulTrials`] if no record completed.
    pub(crate) fn from_history(history: Vec<TrialRecord>) -> Result<Self> {
        let mut ranked: Vec<TrialRecord> = history
            .iter()
            .filter(|record| record.is_completed())
            .cloned()
            .collect();
        if ranked.is_empty() {
            return Err(Error::NoSuccessfulTrials);
        }
        // Completed losses are finite, so partial_cmp cannot fail here.
        ranked.sort_by(|a, b| {
            let la = a.loss().unwrap_or(f64::INFINITY);
            let lb = b.loss().unwrap_or(f64::INFINITY);
            la.partial_cmp(&lb)
                .unwrap_or(core::cmp::Ordering::Equal)
                .then_with(|| a.index.cmp(&b.index))
        });
        Ok(Self { ranked, history })
    }

    /// Returns the best completed trial (rank 0).
    #[must_use]
    pub fn best(&self) -> &TrialRecord {
        &self.ranked[0]
    }

    /// Returns the record at the given rank, 0 being the best.
    #[must_use]
    pub fn get(&self, rank: usize) -> Option<&TrialRecord> {
        self.ranked.get(rank)
    }

    /// Returns the ranked completed records, best first.
    #[must_use]
    pub fn ranked(&self) -> &[TrialRecord] {
        &self.ranked
    }

    /// Iterates over the ranked completed records, best first.
    pub fn iter(&self) -> impl Iterator<Item = &TrialRecord> {
        self.ranked.iter()
    }

    /// Returns the number of completed records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    /// Always `false`: a result holds at least one completed record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    /// Returns every record of the run, completed and failed, in submission
    /// order.
    #[must_use]
    pub fn history(&self) -> &[TrialRecord] {
        &self.history
    }

    /// Returns the number of failed records in the history.
    #[must_use]
    pub fn n_failed(&self) -> usize {
        self.history
            .iter()
            .filter(|record| !record.is_completed())
            .count()
    }
}

impl<'a> IntoIterator for &'a TuningResult {
    type Item = &'a TrialRecord;
    type IntoIter = core::slice::Iter<'a, TrialRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranked.iter()
    }
}
