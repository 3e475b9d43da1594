//! Conversion error types.

use std::io;
use std::path::PathBuf;

use testset_core::TestSetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    /// Error from the target model: missing file, write failure, ...
    #[error(transparent)]
    Core(#[from] TestSetError),

    /// The legacy question has a type other than `abc`.
    #[error("unsupported question type '{kind}' in {}", path.display())]
    UnsupportedQuestionType { path: PathBuf, kind: String },

    /// The INI config file could not be parsed.
    #[error("{}:{line}: {reason}", path.display())]
    Ini {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// A required INI section or key is absent.
    #[error("missing key '{key}' in section [{section}] of {}", path.display())]
    MissingKey {
        path: PathBuf,
        section: String,
        key: String,
    },

    /// A value that must be an integer is not one.
    #[error("invalid number '{value}' in {}", path.display())]
    InvalidNumber { path: PathBuf, value: String },

    /// A file reference in the config does not name a file.
    #[error("invalid file reference '{value}' in {}", path.display())]
    InvalidReference { path: PathBuf, value: String },

    /// The legacy source is not a directory.
    #[error("not a directory: {}", path.display())]
    InvalidSource { path: PathBuf },

    /// The target already holds data that conversion would overwrite.
    #[error("target already exists: {}", path.display())]
    TargetCollision { path: PathBuf },

    /// A legacy file or directory could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A target directory could not be created.
    #[error("failed to create {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ConvertError {
    /// Map a read failure, keeping absence as the model's `FileNotFound`.
    pub(crate) fn from_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            Self::Core(TestSetError::FileNotFound { path })
        } else {
            Self::Read { path, source }
        }
    }
}
