use std::path::PathBuf;

use polars::error::PolarsError;
use thiserror::Error;

use crate::jurisdiction::Jurisdiction;

#[derive(Debug, Error)]
pub enum LimitDatesError {
    #[error("input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("required columns missing: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("malformed CSV in {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("file I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write progress notice: {0}")]
    Notice(#[source] std::io::Error),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] PolarsError),

    #[error("invalid jurisdiction '{token}': {reason}")]
    InvalidJurisdiction { token: String, reason: &'static str },

    #[error("invalid configuration in {path}: {message}")]
    Config { path: String, message: String },

    #[error("{jurisdiction}: {source}")]
    Jurisdiction {
        jurisdiction: Jurisdiction,
        #[source]
        source: Box<LimitDatesError>,
    },
}

impl LimitDatesError {
    pub(crate) fn for_jurisdiction(self, jurisdiction: &Jurisdiction) -> Self {
        LimitDatesError::Jurisdiction {
            jurisdiction: jurisdiction.clone(),
            source: Box::new(self),
        }
    }

    /// Strips any jurisdiction wrapper and returns the underlying failure.
    pub fn root(&self) -> &LimitDatesError {
        match self {
            LimitDatesError::Jurisdiction { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, LimitDatesError>;
