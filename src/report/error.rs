//! Report-level errors (wraps domain errors and sink failures)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Failure of the output sink, passed through unchanged.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot open output {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for visitors and report entry points.
pub type ReportResult<T> = Result<T, ReportError>;
