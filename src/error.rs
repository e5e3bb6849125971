//! Error taxonomy.
//!
//! Three failure families with different recovery rules:
//!
//! - [`ValidationError`] - recovered locally, surfaced as per-field messages,
//!   never returned as `Err`.
//! - [`SubmissionError`] - recovered locally by reverting to editing and
//!   logging; invisible to the callback contract.
//! - [`EnvironmentError`] - fatal to the operation attempted; propagates to
//!   the caller via `Result`.

use thiserror::Error;

use crate::types::Field;

// =============================================================================
// Validation
// =============================================================================

/// What a validation rule found wrong with a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Required,
    TooShort,
    InvalidFormat,
    Mismatch,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ErrorKind::Required => "required",
            ErrorKind::TooShort => "too short",
            ErrorKind::InvalidFormat => "invalid format",
            ErrorKind::Mismatch => "mismatch",
        })
    }
}

/// A single field-level validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{field}: {kind}")]
pub struct ValidationError {
    pub field: Field,
    pub kind: ErrorKind,
}

// =============================================================================
// Submission
// =============================================================================

/// Failure of the asynchronous registration step.
///
/// There is no external error callback; the controller logs the failure and
/// returns to editing with the draft preserved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("registration failed: {reason}")]
pub struct SubmissionError {
    pub reason: String,
}

impl SubmissionError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Environment
// =============================================================================

/// The host environment could not carry out a container or mount operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvironmentError {
    #[error("container {0:?} could not be created")]
    ContainerCreate(String),
    #[error("container {0:?} does not exist")]
    MissingContainer(String),
}
