//! Random suggestion strategy.

use parking_lot::Mutex;

use crate::config::TrialConfig;
use crate::error::Result;
use crate::record::TrialRecord;
use crate::space::{ParamKind, SearchSpace};
use crate::value::ParamValue;

/// Generate a random `f64` in the range `[low, high)`.
#[inline]
fn f64_range(rng: &mut fastrand::Rng, low: f64, high: f64) -> f64 {
    low + rng.f64() * (high - low)
}

/// A baseline strategy that samples every parameter independently at random,
/// ignoring the trial history.
///
/// Uniform parameters sample from `[low, high)`, log-uniform parameters
/// sample uniformly in log space, and categorical parameters pick one of the
/// declared choices. It serves as the baseline against informed strategies
/// and makes the crate usable stand-alone.
///
/// # Examples
///
/// ```
/// use tunable::suggest::RandomSuggester;
///
/// // Create with a default random seed
/// let suggester = RandomSuggester::new();
///
/// // Create with a fixed seed for reproducible runs
/// let suggester = RandomSuggester::with_seed(42);
/// # let _ = suggester;
/// ```
pub struct RandomSuggester {
    rng: Mutex<fastrand::Rng>,
}

impl RandomSuggester {
    /// Creates a new random suggester with a default random seed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(fastrand::Rng::new()),
        }
    }

    /// Creates a new random suggester with a fixed seed.
    ///
    /// Two suggesters built from the same seed produce the same sequence of
    /// configurations for the same search space.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(fastrand::Rng::with_seed(seed)),
        }
    }

    fn sample(rng: &mut fastrand::Rng, kind: &ParamKind) -> ParamValue {
        match kind {
            ParamKind::Categorical { choices } => choices[rng.usize(0..choices.len())].clone(),
            ParamKind::Uniform { low, high } => ParamValue::Float(f64_range(rng, *low, *high)),
            ParamKind::LogUniform { low, high } => {
                // Sample uniformly in log space
                let log_value = f64_range(rng, low.ln(), high.ln());
                ParamValue::Float(log_value.exp())
            }
        }
    }
}

impl Default for RandomSuggester {
    fn default() -> Self {
        Self::new()
    }
}

impl super::Suggester for RandomSuggester {
    fn suggest(&self, space: &SearchSpace, _history: &[TrialRecord]) -> Result<TrialConfig> {
        let mut rng = self.rng.lock();
        let mut config = TrialConfig::new();
        for (group, params) in space.groups() {
            for (name, spec) in params {
                config.set(group, name, Self::sample(&mut rng, spec.kind()));
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggest::Suggester;

    fn uniform_space(low: f64, high: f64) -> SearchSpace {
        SearchSpace::builder()
            .uniform("g", "x", low, high)
            .build()
            .unwrap()
    }

    #[test]
    fn test_uniform_within_bounds() {
        let suggester = RandomSuggester::with_seed(42);
        let space = uniform_space(0.0, 1.0);

        for _ in 0..100 {
            let config = suggester.suggest(&space, &[]).unwrap();
            let v = config.get_f64("g", "x").unwrap();
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_log_uniform_within_log_bounds() {
        let suggester = RandomSuggester::with_seed(42);
        let space = SearchSpace::builder()
            .log_uniform("g", "lr", 1e-5, 1.0)
            .build()
            .unwrap();

        for _ in 0..100 {
            let config = suggester.suggest(&space, &[]).unwrap();
            let v = config.get_f64("g", "lr").unwrap();
            assert!((1e-5..=1.0).contains(&v));
            let log_v = v.ln();
            assert!(log_v >= 1e-5f64.ln() && log_v <= 1.0f64.ln());
        }
    }

    #[test]
    fn test_categorical_membership() {
        let suggester = RandomSuggester::with_seed(42);
        let space = SearchSpace::builder()
            .categorical("g", "n_filters", [16, 32, 64])
            .build()
            .unwrap();

        for _ in 0..100 {
            let config = suggester.suggest(&space, &[]).unwrap();
            let v = config.get_i64("g", "n_filters").unwrap();
            assert!([16, 32, 64].contains(&v));
        }
    }

    #[test]
    fn test_suggestions_validate_against_space() {
        let suggester = RandomSuggester::with_seed(7);
        let space = SearchSpace::builder()
            .uniform("model", "dropout", 0.0, 0.5)
            .log_uniform("training", "lr", 1e-5, 1e-1)
            .categorical("model", "activation", ["relu", "gelu", "swish"])
            .build()
            .unwrap();

        for _ in 0..100 {
            let config = suggester.suggest(&space, &[]).unwrap();
            space.validate_config(&config).unwrap();
        }
    }

    #[test]
    fn test_reproducibility() {
        let a = RandomSuggester::with_seed(42);
        let b = RandomSuggester::with_seed(42);
        let space = SearchSpace::builder()
            .uniform("g", "x", 0.0, 1.0)
            .categorical("g", "c", ["red", "green", "blue"])
            .build()
            .unwrap();

        for _ in 0..10 {
            let ca = a.suggest(&space, &[]).unwrap();
            let cb = b.suggest(&space, &[]).unwrap();
            assert_eq!(ca, cb);
        }
    }
}
