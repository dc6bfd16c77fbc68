//! Error types for writer operations.

use thiserror::Error;

/// Errors that can occur while writing events.
///
/// After any error the writer's frame stack is left as it was at the
/// point of failure; callers should treat the writer as finished.
#[derive(Error, Debug)]
pub enum WriteError {
    /// The output sink rejected a write or flush.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `EndElement` arrived with no element open.
    #[error("end element with no open element")]
    Unbalanced,

    /// `EndElement` name differs from the innermost open element
    /// (strict end names only).
    #[error("mismatched end element: expected </{expected}>, found </{found}>")]
    MismatchedEnd { expected: String, found: String },
}

impl WriteError {
    /// Check if this is a structural violation rather than a sink failure.
    pub fn is_structural(&self) -> bool {
        matches!(self, WriteError::Unbalanced | WriteError::MismatchedEnd { .. })
    }
}

pub type Result<T> = std::result::Result<T, WriteError>;
