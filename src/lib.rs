#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]

//! Sequential hyperparameter-trial orchestration.
//!
//! `tunable` wires three collaborators together: a declarative [`SearchSpace`],
//! a pluggable suggestion strategy ([`Suggester`]), and a user-supplied
//! evaluation function ([`Objective`]). The [`Tuner`] drives the loop: it asks
//! the suggester for a candidate configuration, evaluates it under an
//! exclusive per-trial scratch scope, records the outcome, and after the trial
//! budget is spent returns a [`TuningResult`] ranked ascending by loss.
//!
//! The loss convention is fixed: **lower is better**. A higher-is-better
//! metric (accuracy, F1, reward) must be negated by the caller before it
//! crosses the [`Objective`] boundary.
//!
//! # Getting Started
//!
//! ```
//! use tunable::prelude::*;
//!
//! # fn main() -> tunable::Result<()> {
//! let space = SearchSpace::builder()
//!     .log_uniform("training", "learning_rate", 1e-5, 1e-1)
//!     .uniform("model", "dropout", 0.0, 0.5)
//!     .categorical("model", "n_filters", [16, 32, 64])
//!     .build()?;
//!
//! let suggester = RandomSuggester::with_seed(42);
//! let tuner = Tuner::new();
//!
//! let result = tuner.run(
//!     &space,
//!     &suggester,
//!     |config: &TrialConfig, _scope: &TrialScope| {
//!         let lr = config.get_f64("training", "learning_rate")?;
//!         let dropout = config.get_f64("model", "dropout")?;
//!         Ok::<_, tunable::Error>((lr.ln() + 7.0).powi(2) + dropout)
//!     },
//!     20,
//! )?;
//!
//! let best = result.best();
//! println!("trial {} had the lowest loss", best.index);
//! # Ok(())
//! # }
//! ```
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`SearchSpace`] | Declare the parameters to tune, grouped by component. |
//! | [`Suggester`] | Strategy producing the next candidate configuration from the trial history. |
//! | [`Objective`] | The black-box evaluation: configuration in, scalar loss out. |
//! | [`Tuner`] | Drive the trial loop, isolate per-trial failures, rank the results. |
//! | [`TuningResult`] | Completed trials ranked ascending by loss; rank 0 is the best. |
//!
//! # Fault isolation
//!
//! A single trial's failure never aborts the run. An objective error, a
//! panic, a non-finite loss, or an exceeded wall-clock budget is recorded in
//! the history as a failed [`TrialRecord`] and the loop moves on. Only a run
//! in which *no* trial completes fails, with [`Error::NoSuccessfulTrials`].
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `serde` | `Serialize`/`Deserialize` on search spaces, configurations, records, and results | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) at key points of the loop | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

mod binding;
mod cancel;
mod config;
mod error;
mod objective;
mod record;
mod result;
mod scope;
mod space;
pub mod suggest;
mod tuner;
mod value;

pub use binding::GroupBinding;
pub use cancel::CancelToken;
pub use config::{GroupValues, TrialConfig};
pub use error::{Error, Result};
pub use objective::Objective;
pub use record::{FailureKind, TrialOutcome, TrialRecord};
pub use result::TuningResult;
pub use scope::TrialScope;
pub use space::{ParamKind, ParameterSpec, SearchSpace, SearchSpaceBuilder};
pub use suggest::{RandomSuggester, Suggester};
pub use tuner::{Tuner, TunerBuilder};
pub use value::ParamValue;

/// Convenient wildcard import for the most common types.
///
/// ```
/// use tunable::prelude::*;
/// ```
pub mod prelude {
    pub use crate::binding::GroupBinding;
    pub use crate::cancel::CancelToken;
    pub use crate::config::{GroupValues, TrialConfig};
    pub use crate::error::{Error, Result};
    pub use crate::objective::Objective;
    pub use crate::record::{FailureKind, TrialOutcome, TrialRecord};
    pub use crate::result::TuningResult;
    pub use crate::scope::TrialScope;
    pub use crate::space::{ParamKind, ParameterSpec, SearchSpace, SearchSpaceBuilder};
    pub use crate::suggest::{RandomSuggester, Suggester};
    pub use crate::tuner::{Tuner, TunerBuilder};
    pub use crate::value::ParamValue;
}
