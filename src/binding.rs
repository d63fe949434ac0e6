//! Binding configuration groups to component factories.

use std::collections::BTreeSet;

use crate::config::{GroupValues, TrialConfig};
use crate::error::{Error, Result};

/// The parameter names a component factory expects from one group.
///
/// A factory that builds a component out of sampled parameters declares its
/// parameter names up front. [`bind`](Self::bind) then checks a
/// configuration's group against that declaration at call time: a drifted
/// search space fails with [`Error::BindingMismatch`] listing the missing
/// and unexpected keys, instead of some keys being silently ignored.
///
/// # Examples
///
/// ```
/// use tunable::{GroupBinding, TrialConfig};
///
/// let binding = GroupBinding::new("model", ["n_filters", "dropout"]);
///
/// let mut config = TrialConfig::new();
/// config.set("model", "n_filters", 32);
/// config.set("model", "dropout", 0.1);
///
/// let values = binding.bind(&config).unwrap();
/// assert_eq!(values["n_filters"].as_i64(), Some(32));
///
/// config.set("model", "width", 128);
/// assert!(binding.bind(&config).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct GroupBinding {
    group: String,
    names: BTreeSet<String>,
}

impl GroupBinding {
    /// Declares the parameter names the factory accepts for `group`.
    pub fn new<G, I, N>(group: G, names: I) -> Self
    where
        G: Into<String>,
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        Self {
            group: group.into(),
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the bound group's name.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Checks the configuration's group against the declared names and
    /// returns its values on an exact match.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownGroup`] if the group is absent, or
    /// [`Error::BindingMismatch`] listing the missing and unexpected keys.
    pub fn bind<'c>(&self, config: &'c TrialConfig) -> Result<&'c GroupValues> {
        let values = config.group(&self.group).ok_or_else(|| Error::UnknownGroup {
            group: self.group.clone(),
        })?;
        let missing: Vec<String> = self
            .names
            .iter()
            .filter(|name| !values.contains_key(*name))
            .cloned()
            .collect();
        let unexpected: Vec<String> = values
            .keys()
            .filter(|name| !self.names.contains(*name))
            .cloned()
            .collect();
        if missing.is_empty() && unexpected.is_empty() {
            Ok(values)
        } else {
            Err(Error::BindingMismatch {
                group: self.group.clone(),
                missing,
                unexpected,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_binds() {
        let binding = GroupBinding::new("model", ["n_filters", "dropout"]);
        let mut config = TrialConfig::new();
        config.set("model", "n_filters", 32);
        config.set("model", "dropout", 0.1);

        let values = binding.bind(&config).unwrap();
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_missing_group() {
        let binding = GroupBinding::new("model", ["n_filters"]);
        let config = TrialConfig::new();
        assert!(matches!(
            binding.bind(&config),
            Err(Error::UnknownGroup { .. })
        ));
    }

    #[test]
    fn test_mismatch_lists_both_sides() {
        let binding = GroupBinding::new("model", ["n_filters", "dropout"]);
        let mut config = TrialConfig::new();
        config.set("model", "n_filters", 32);
        config.set("model", "width", 128);

        match binding.bind(&config) {
            Err(Error::BindingMismatch {
                group,
                missing,
                unexpected,
            }) => {
                assert_eq!(group, "model");
                assert_eq!(missing, vec!["dropout".to_string()]);
                assert_eq!(unexpected, vec!["width".to_string()]);
            }
            other => panic!("expected BindingMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_other_groups_ignored() {
        let binding = GroupBinding::new("model", ["dropout"]);
        let mut config = TrialConfig::new();
        config.set("model", "dropout", 0.1);
        config.set("training", "lr", 1e-3);
        assert!(binding.bind(&config).is_ok());
    }
}
