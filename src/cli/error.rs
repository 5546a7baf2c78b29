//! CLI-level errors (wraps report errors)

use thiserror::Error;

use crate::domain::DomainError;
use crate::report::ReportError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Report(#[from] ReportError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),
}

impl From<DomainError> for CliError {
    fn from(e: DomainError) -> Self {
        CliError::Report(ReportError::Domain(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Report(e) => match e {
                ReportError::Io(_) => crate::exitcode::IOERR,
                ReportError::Output { .. } => crate::exitcode::CANTCREAT,
                ReportError::Config { .. } => crate::exitcode::CONFIG,
                ReportError::Domain(DomainError::FileNotFound(_)) => crate::exitcode::NOINPUT,
                ReportError::Domain(
                    DomainError::PeriodOutOfRange { .. } | DomainError::YearNotInModel { .. },
                ) => crate::exitcode::USAGE,
                ReportError::Domain(_) => crate::exitcode::DATAERR,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn given_missing_model_when_mapping_exit_code_then_noinput() {
        let err = CliError::from(DomainError::FileNotFound(PathBuf::from("m.xml")));
        assert_eq!(err.exit_code(), crate::exitcode::NOINPUT);
    }

    #[test]
    fn given_malformed_model_when_mapping_exit_code_then_dataerr() {
        let err = CliError::from(DomainError::MalformedDocument {
            message: "eof".into(),
        });
        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);
    }
}
