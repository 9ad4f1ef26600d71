//! Error types for proghost.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.
//! These errors describe failures of the host itself; faults raised by target
//! programs are never represented here (they become `ExecutionOutcome::Failure`).

use crate::exit_codes;
use std::time::Duration;
use thiserror::Error;

/// Main error type for proghost operations.
#[derive(Error, Debug)]
pub enum HostError {
    /// User provided invalid arguments or referenced something that does not exist.
    #[error("{0}")]
    UserError(String),

    /// Configuration could not be read, parsed, or validated.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// The interpreter could not be started or died without reporting.
    #[error("Interpreter failure: {0}")]
    InterpreterError(String),

    /// The interpreter reported something the host could not decode.
    #[error("Protocol error: {0}")]
    ProtocolError(String),

    /// A load or invocation exceeded its time limit and was killed.
    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

impl HostError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            HostError::UserError(_) => exit_codes::USER_ERROR,
            HostError::ConfigError(_) => exit_codes::USER_ERROR,
            HostError::InterpreterError(_) => exit_codes::HOST_FAILURE,
            HostError::ProtocolError(_) => exit_codes::HOST_FAILURE,
            HostError::Timeout(_) => exit_codes::HOST_FAILURE,
        }
    }
}

/// Result type alias for proghost operations.
pub type Result<T> = std::result::Result<T, HostError>;
