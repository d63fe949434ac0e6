//! Search-space declaration and validation.
//!
//! A [`SearchSpace`] maps group names (for example `"model"` and
//! `"training"`) to named [`ParameterSpec`]s. It is built once through
//! [`SearchSpaceBuilder`], validated during [`build`](SearchSpaceBuilder::build),
//! and never mutated afterwards. Groups and parameters are kept in ordered
//! maps so that iterating a space, and therefore sampling from it with a
//! seeded strategy, is deterministic.

use std::collections::BTreeMap;

use crate::config::TrialConfig;
use crate::error::{Error, Result};
use crate::value::ParamValue;

/// Sampling rule for a single parameter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParamKind {
    /// One of a fixed, non-empty list of values.
    Categorical {
        /// The values to choose between.
        choices: Vec<ParamValue>,
    },
    /// A real sampled uniformly from `[low, high]`.
    Uniform {
        /// Lower bound (inclusive).
        low: f64,
        /// Upper bound (inclusive).
        high: f64,
    },
    /// A real sampled uniformly in log space from `[low, high]`.
    LogUniform {
        /// Lower bound (inclusive), must be positive.
        low: f64,
        /// Upper bound (inclusive).
        high: f64,
    },
}

impl ParamKind {
    /// Checks the rule's own consistency. Called once per parameter during
    /// [`SearchSpaceBuilder::build`].
    fn validate(&self, path: &str) -> Result<()> {
        match self {
            Self::Categorical { choices } => {
                if choices.is_empty() {
                    return Err(Error::EmptyChoices {
                        path: path.to_string(),
                    });
                }
            }
            Self::Uniform { low, high } => {
                if low >= high {
                    return Err(Error::InvalidBounds {
                        path: path.to_string(),
                        low: *low,
                        high: *high,
                    });
                }
            }
            Self::LogUniform { low, high } => {
                if low >= high {
                    return Err(Error::InvalidBounds {
                        path: path.to_string(),
                        low: *low,
                        high: *high,
                    });
                }
                if *low <= 0.0 {
                    return Err(Error::InvalidLogBounds {
                        path: path.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Returns `true` if `value` could have been sampled under this rule.
    #[must_use]
    pub fn contains(&self, value: &ParamValue) -> bool {
        match (self, value) {
            (Self::Categorical { choices }, v) => choices.contains(v),
            (Self::Uniform { low, high } | Self::LogUniform { low, high }, ParamValue::Float(v)) => {
                *v >= *low && *v <= *high
            }
            _ => false,
        }
    }
}

/// A named parameter and its sampling rule. Immutable once defined.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParameterSpec {
    name: String,
    kind: ParamKind,
}

impl ParameterSpec {
    /// Returns the parameter's name within its group.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parameter's sampling rule.
    #[must_use]
    pub fn kind(&self) -> &ParamKind {
        &self.kind
    }
}

/// A declarative, immutable description of what to tune.
///
/// # Examples
///
/// ```
/// use tunable::SearchSpace;
///
/// let space = SearchSpace::builder()
///     .log_uniform("training", "learning_rate", 1e-5, 1e-1)
///     .uniform("model", "dropout", 0.0, 0.5)
///     .categorical("model", "activation", ["relu", "gelu"])
///     .build()
///     .unwrap();
///
/// assert_eq!(space.len(), 3);
/// assert!(space.get("model", "dropout").is_some());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchSpace {
    groups: BTreeMap<String, BTreeMap<String, ParameterSpec>>,
}

impl SearchSpace {
    /// Returns a [`SearchSpaceBuilder`] for declaring parameters.
    #[must_use]
    pub fn builder() -> SearchSpaceBuilder {
        SearchSpaceBuilder::new()
    }

    /// Iterates over groups in name order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, ParameterSpec>)> {
        self.groups.iter().map(|(name, params)| (name.as_str(), params))
    }

    /// Returns the spec for `group.name`, if declared.
    #[must_use]
    pub fn get(&self, group: &str, name: &str) -> Option<&ParameterSpec> {
        self.groups.get(group).and_then(|params| params.get(name))
    }

    /// Returns the total number of declared parameters across all groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.values().map(BTreeMap::len).sum()
    }

    /// Returns `true` if no parameters are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Checks that `config` materializes exactly this space: every declared
    /// parameter is present with an in-domain value, and nothing else.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingParameter`], [`Error::UnknownParameter`], or
    /// [`Error::ValueOutOfDomain`] on the first mismatch found.
    pub fn validate_config(&self, config: &TrialConfig) -> Result<()> {
        for (group, params) in &self.groups {
            for (name, spec) in params {
                let path = param_path(group, name);
                match config.get(group, name) {
                    Some(value) if spec.kind.contains(value) => {}
                    Some(value) => {
                        return Err(Error::ValueOutOfDomain {
                            path,
                            value: value.clone(),
                        });
                    }
                    None => return Err(Error::MissingParameter { path }),
                }
            }
        }
        for (group, values) in config.groups() {
            for name in values.keys() {
                if self.get(group, name).is_none() {
                    return Err(Error::UnknownParameter {
                        path: param_path(group, name),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Renders the full path of a parameter for error messages.
pub(crate) fn param_path(group: &str, name: &str) -> String {
    format!("{group}.{name}")
}

/// Builder collecting parameter declarations before validation.
///
/// Declarations are checked in [`build`](Self::build): empty choice lists,
/// inverted bounds, non-positive log-uniform lower bounds, and path
/// collisions all fail construction.
#[derive(Debug, Default)]
pub struct SearchSpaceBuilder {
    entries: Vec<(String, String, ParamKind)>,
}

impl SearchSpaceBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Declares a categorical parameter choosing between `choices`.
    #[must_use]
    pub fn categorical<I, V>(mut self, group: &str, name: &str, choices: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ParamValue>,
    {
        let choices = choices.into_iter().map(Into::into).collect();
        self.entries.push((
            group.to_string(),
            name.to_string(),
            ParamKind::Categorical { choices },
        ));
        self
    }

    /// Declares a real-valued parameter sampled uniformly from `[low, high]`.
    #[must_use]
    pub fn uniform(mut self, group: &str, name: &str, low: f64, high: f64) -> Self {
        self.entries.push((
            group.to_string(),
            name.to_string(),
            ParamKind::Uniform { low, high },
        ));
        self
    }

    /// Declares a real-valued parameter sampled uniformly in log space from
    /// `[low, high]`. Suits scale-free quantities such as learning rates.
    #[must_use]
    pub fn log_uniform(mut self, group: &str, name: &str, low: f64, high: f64) -> Self {
        self.entries.push((
            group.to_string(),
            name.to_string(),
            ParamKind::LogUniform { low, high },
        ));
        self
    }

    /// Validates all declarations and freezes them into a [`SearchSpace`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyChoices`], [`Error::InvalidBounds`],
    /// [`Error::InvalidLogBounds`], or [`Error::DuplicateParameter`] if any
    /// declaration is inconsistent.
    pub fn build(self) -> Result<SearchSpace> {
        let mut groups: BTreeMap<String, BTreeMap<String, ParameterSpec>> = BTreeMap::new();
        for (group, name, kind) in self.entries {
            let path = param_path(&group, &name);
            kind.validate(&path)?;
            let spec = ParameterSpec {
                name: name.clone(),
                kind,
            };
            if groups.entry(group).or_default().insert(name, spec).is_some() {
                return Err(Error::DuplicateParameter { path });
            }
        }
        Ok(SearchSpace { groups })
    }
}
