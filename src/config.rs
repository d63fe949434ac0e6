//! Materialized trial configurations.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::space::param_path;
use crate::value::ParamValue;

/// The sampled values for one group of parameters, keyed by name.
pub type GroupValues = BTreeMap<String, ParamValue>;

/// A concrete configuration: one sampled value per declared parameter path,
/// grouped the same way as the search space that produced it.
///
/// Groups and parameters are ordered maps, so iterating a configuration is
/// deterministic and two configurations with equal contents compare equal.
///
/// # Examples
///
/// ```
/// use tunable::TrialConfig;
///
/// let mut config = TrialConfig::new();
/// config.set("model", "n_filters", 32);
/// config.set("training", "learning_rate", 1e-3);
///
/// assert_eq!(config.get_i64("model", "n_filters").unwrap(), 32);
/// assert_eq!(config.get_f64("training", "learning_rate").unwrap(), 1e-3);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialConfig {
    groups: BTreeMap<String, GroupValues>,
}

impl TrialConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value for `group.name`, replacing any previous value.
    pub fn set(&mut self, group: &str, name: &str, value: impl Into<ParamValue>) {
        self.groups
            .entry(group.to_string())
            .or_default()
            .insert(name.to_string(), value.into());
    }

    /// Returns the raw value for `group.name`, if present.
    #[must_use]
    pub fn get(&self, group: &str, name: &str) -> Option<&ParamValue> {
        self.groups.get(group).and_then(|values| values.get(name))
    }

    /// Returns one group's values, if the group exists.
    #[must_use]
    pub fn group(&self, group: &str) -> Option<&GroupValues> {
        self.groups.get(group)
    }

    /// Iterates over groups in name order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &GroupValues)> {
        self.groups.iter().map(|(name, values)| (name.as_str(), values))
    }

    /// Returns the total number of values across all groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.values().map(BTreeMap::len).sum()
    }

    /// Returns `true` if the configuration holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    fn require(&self, group: &str, name: &str) -> Result<&ParamValue> {
        self.get(group, name).ok_or_else(|| Error::MissingParameter {
            path: param_path(group, name),
        })
    }

    /// Returns `group.name` as a float. Integer values convert.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingParameter`] if absent or
    /// [`Error::TypeMismatch`] if the value is not numeric.
    pub fn get_f64(&self, group: &str, name: &str) -> Result<f64> {
        self.require(group, name)?
            .as_f64()
            .ok_or_else(|| Error::TypeMismatch {
                path: param_path(group, name),
                expected: "float",
            })
    }

    /// Returns `group.name` as an integer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingParameter`] if absent or
    /// [`Error::TypeMismatch`] if the value is not an integer.
    pub fn get_i64(&self, group: &str, name: &str) -> Result<i64> {
        self.require(group, name)?
            .as_i64()
            .ok_or_else(|| Error::TypeMismatch {
                path: param_path(group, name),
                expected: "integer",
            })
    }

    /// Returns `group.name` as a string slice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingParameter`] if absent or
    /// [`Error::TypeMismatch`] if the value is not a string.
    pub fn get_str(&self, group: &str, name: &str) -> Result<&str> {
        self.require(group, name)?
            .as_str()
            .ok_or_else(|| Error::TypeMismatch {
                path: param_path(group, name),
                expected: "string",
            })
    }

    /// Returns `group.name` as a boolean.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingParameter`] if absent or
    /// [`Error::TypeMismatch`] if the value is not a boolean.
    pub fn get_bool(&self, group: &str, name: &str) -> Result<bool> {
        self.require(group, name)?
            .as_bool()
            .ok_or_else(|| Error::TypeMismatch {
                path: param_path(group, name),
                expected: "boolean",
            })
    }
}
