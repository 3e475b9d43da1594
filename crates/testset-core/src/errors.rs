//! Error types for loading, linting and presenting a test set.
//!
//! Conversion errors live in `testset-legacy`, which wraps this type. The
//! CLI converges everything into `anyhow`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::lint::LintRule;

/// Errors raised while working with a current-format test set tree.
#[derive(Debug, Error)]
pub enum TestSetError {
    /// A required metadata file or directory is absent.
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The metadata file exists but is unparsable, misses a key or has a
    /// value of the wrong type.
    #[error("malformed metadata in {}: {reason}", path.display())]
    MalformedMetadata { path: PathBuf, reason: String },

    /// A lint rule failed.
    #[error("{identity}: {rule}")]
    InvariantViolation { identity: String, rule: LintRule },

    /// The key was never registered by a directory scan.
    #[error("no entry '{key}' in {}", dir.display())]
    NotFound { dir: PathBuf, key: String },

    /// Reading a file or directory failed for a reason other than absence.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing a metadata file failed.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Presenter output could not be written.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl TestSetError {
    /// Map a read failure on `path`, keeping absence distinct from other I/O errors.
    pub(crate) fn from_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::Read { path, source }
        }
    }

    /// The failed lint rule, if this is an invariant violation.
    #[must_use]
    pub const fn lint_rule(&self) -> Option<&LintRule> {
        match self {
            Self::InvariantViolation { rule, .. } => Some(rule),
            _ => None,
        }
    }
}
