//! Content index errors

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while scanning and loading content
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Cannot read {path:?}: {source}")]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),
}

impl ContentError {
    pub(crate) fn fs(path: &Path, source: std::io::Error) -> Self {
        ContentError::FileSystem {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn parse(path: &Path, message: impl ToString) -> Self {
        ContentError::Parse {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound(_))
    }
}

pub type Result<T, E = ContentError> = std::result::Result<T, E>;
