//! Domain-level errors (no I/O concerns)

use std::path::PathBuf;
use thiserror::Error;

/// Domain errors represent violations of the model structure.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("model file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("malformed model document: {message}")]
    MalformedDocument { message: String },

    #[error("invalid model: {message}")]
    InvalidModel { message: String },

    #[error("invalid node name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    #[error("duplicate region: {0}")]
    DuplicateRegion(String),

    #[error("a {child} cannot be placed under a {parent}")]
    InvalidHierarchy {
        parent: &'static str,
        child: &'static str,
    },

    #[error("node index no longer present in the model")]
    DanglingNode,

    #[error("period {period} is out of range, model has {periods} periods")]
    PeriodOutOfRange { period: usize, periods: usize },

    #[error("year {year} does not fall on a model period")]
    YearNotInModel { year: i32 },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
