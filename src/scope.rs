//! Per-trial scratch scopes.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Exclusive per-trial working slot handed to the objective.
///
/// When the tuner is configured with a scratch root, each trial gets its own
/// `trial-<index>` directory under it, created on acquisition. No two trials
/// ever share a directory. The scope is released when dropped, which the
/// orchestrator guarantees after evaluation returns, errors, or panics; a
/// trial that outlives its wall-clock budget keeps its scope until the
/// evaluation actually finishes.
///
/// By default the directory is removed on release. Configure
/// [`TunerBuilder::keep_scratch`](crate::TunerBuilder::keep_scratch) to
/// retain artifacts such as checkpoints for later inspection.
#[derive(Debug)]
pub struct TrialScope {
    trial: u64,
    dir: Option<PathBuf>,
    keep: bool,
}

impl TrialScope {
    /// A scope with no scratch directory, used when no scratch root is
    /// configured.
    pub(crate) fn detached(trial: u64) -> Self {
        Self {
            trial,
            dir: None,
            keep: false,
        }
    }

    /// Creates the trial's exclusive directory under `root`.
    pub(crate) fn with_dir(trial: u64, root: &Path, keep: bool) -> Result<Self> {
        let dir = root.join(format!("trial-{trial}"));
        fs::create_dir_all(&dir).map_err(|source| Error::Scratch {
            path: dir.clone(),
            source,
        })?;
        Ok(Self {
            trial,
            dir: Some(dir),
            keep,
        })
    }

    /// Returns the index of the trial this scope belongs to.
    #[must_use]
    pub fn trial(&self) -> u64 {
        self.trial
    }

    /// Returns the trial's scratch directory, if one was configured.
    #[must_use]
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }
}

impl Drop for TrialScope {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        if let Some(dir) = &self.dir {
            // Best effort; a scope release cannot propagate errors.
            let _ = fs::remove_dir_all(dir);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_scope_has_no_dir() {
        let scope = TrialScope::detached(7);
        assert_eq!(scope.trial(), 7);
        assert!(scope.dir().is_none());
    }

    #[test]
    fn test_dir_created_and_removed() {
        let root = tempfile::tempdir().unwrap();
        let dir = {
            let scope = TrialScope::with_dir(0, root.path(), false).unwrap();
            let dir = scope.dir().unwrap().to_path_buf();
            assert!(dir.is_dir());
            assert!(dir.ends_with("trial-0"));
            dir
        };
        assert!(!dir.exists());
    }

    #[test]
    fn test_kept_dir_survives_release() {
        let root = tempfile::tempdir().unwrap();
        let dir = {
            let scope = TrialScope::with_dir(3, root.path(), true).unwrap();
            scope.dir().unwrap().to_path_buf()
        };
        assert!(dir.is_dir());
    }
}
