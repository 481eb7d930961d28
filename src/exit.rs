//! Exit code logic for the process.
//!
//! Single responsibility: map the outcome of a fetch to the process exit code.

use std::process::ExitCode;

use crate::error::FetchError;

/// Process exit outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessExit {
    /// The response was received and reported (any HTTP status).
    Success,
    /// An argument, configuration, request, or output error occurred.
    Failure,
}

impl ProcessExit {
    /// Numeric exit code for this outcome.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }
}

impl From<ProcessExit> for ExitCode {
    fn from(exit: ProcessExit) -> Self {
        ExitCode::from(exit.code())
    }
}

/// Determines the process exit outcome from the fetch result.
#[must_use]
pub fn determine_exit_outcome(result: &Result<(), FetchError>) -> ProcessExit {
    match result {
        Ok(()) => ProcessExit::Success,
        Err(_) => ProcessExit::Failure,
    }
}
