//! Error types for archive analysis and comparison.
//!
//! Every failure the library can produce falls into one of three kinds,
//! exposed through [`Error::kind`] so callers can react without matching on
//! message text.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Which side of a comparison an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Old,
    New,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Old => f.pad("old"),
            Side::New => f.pad("new"),
        }
    }
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ArchiveIo,
    ArchiveFormat,
    InvalidComparisonInput,
}

#[derive(Error, Debug)]
pub enum Error {
    /// The archive path is missing, unreadable or permission was denied.
    #[error("cannot read archive {}: {source}", path.display())]
    ArchiveIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a zip-based container or its central directory is corrupt.
    #[error("malformed archive {}: {reason}", path.display())]
    ArchiveFormat { path: PathBuf, reason: String },

    /// One side of a comparison could not be analyzed or is inconsistent.
    #[error("{side} archive is not a valid comparison input")]
    InvalidComparisonInput {
        side: Side,
        #[source]
        source: Box<Error>,
    },

    /// Internal consistency failure of an analysis result.
    #[error("inconsistent analysis of {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ArchiveIo { .. } => ErrorKind::ArchiveIo,
            Error::ArchiveFormat { .. } => ErrorKind::ArchiveFormat,
            Error::InvalidComparisonInput { .. } | Error::Malformed { .. } => {
                ErrorKind::InvalidComparisonInput
            }
        }
    }

    /// Kind of the innermost error, looking through comparison wrappers.
    pub fn root_kind(&self) -> ErrorKind {
        match self {
            Error::InvalidComparisonInput { source, .. } => source.root_kind(),
            other => other.kind(),
        }
    }

    pub(crate) fn comparison_input(side: Side, source: Error) -> Self {
        Error::InvalidComparisonInput {
            side,
            source: Box::new(source),
        }
    }
}
