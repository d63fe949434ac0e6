use std::path::PathBuf;

use crate::value::ParamValue;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when a categorical choice list is empty.
    #[error("parameter '{path}': categorical choices cannot be empty")]
    EmptyChoices {
        /// Full path of the offending parameter.
        path: String,
    },

    /// Returned when a range's lower bound is not below its upper bound.
    #[error("parameter '{path}': invalid bounds: low ({low}) must be less than high ({high})")]
    InvalidBounds {
        /// Full path of the offending parameter.
        path: String,
        /// The lower bound value.
        low: f64,
        /// The upper bound value.
        high: f64,
    },

    /// Returned when log-uniform sampling is declared with a non-positive lower bound.
    #[error("parameter '{path}': low must be positive for log-uniform sampling")]
    InvalidLogBounds {
        /// Full path of the offending parameter.
        path: String,
    },

    /// Returned when two parameters collide on the same path.
    #[error("duplicate parameter path '{path}'")]
    DuplicateParameter {
        /// The colliding path.
        path: String,
    },

    /// Returned when a run is started on a search space with no parameters.
    #[error("search space has no parameters")]
    EmptySearchSpace,

    /// Returned when a configuration lacks a declared parameter.
    #[error("configuration is missing parameter '{path}'")]
    MissingParameter {
        /// Path of the missing parameter.
        path: String,
    },

    /// Returned when a configuration carries a parameter the space never declared.
    #[error("configuration contains undeclared parameter '{path}'")]
    UnknownParameter {
        /// Path of the undeclared parameter.
        path: String,
    },

    /// Returned when a configured value falls outside its declared sampling rule.
    #[error("parameter '{path}': value {value} is outside the declared domain")]
    ValueOutOfDomain {
        /// Path of the offending parameter.
        path: String,
        /// The out-of-domain value.
        value: ParamValue,
    },

    /// Returned by typed accessors when the stored value has a different kind.
    #[error("parameter '{path}': expected a {expected} value")]
    TypeMismatch {
        /// Path of the accessed parameter.
        path: String,
        /// The kind the accessor expected.
        expected: &'static str,
    },

    /// Returned when a configuration group is absent entirely.
    #[error("configuration has no group '{group}'")]
    UnknownGroup {
        /// Name of the missing group.
        group: String,
    },

    /// Returned when a group's keys do not match a factory's declared parameter names.
    #[error(
        "group '{group}' does not match the declared parameter names \
         (missing: {missing:?}, unexpected: {unexpected:?})"
    )]
    BindingMismatch {
        /// Name of the bound group.
        group: String,
        /// Declared names absent from the configuration.
        missing: Vec<String>,
        /// Configuration keys absent from the declaration.
        unexpected: Vec<String>,
    },

    /// Returned by a run in which zero trials completed successfully.
    #[error("no trial completed successfully")]
    NoSuccessfulTrials,

    /// Returned when a per-trial scratch directory cannot be created.
    #[error("failed to allocate scratch directory {path}")]
    Scratch {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying filesystem error.
        #[source]
        source: std::io::Error,
    },

    /// Returned when the per-trial evaluation worker cannot be spawned.
    #[error("failed to spawn evaluation worker")]
    WorkerSpawn(#[source] std::io::Error),
}

pub type Result<T> = core::result::Result<T, Error>;
