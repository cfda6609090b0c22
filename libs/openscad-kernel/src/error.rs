//! # Kernel Errors
//!
//! Error types for failed kernel checks.

use std::fmt;
use thiserror::Error;

/// Classification of a kernel failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The caller handed the kernel invalid input.
    Precondition,
    /// The kernel's internal state is inconsistent.
    Assertion,
    /// The failure could not be classified.
    Unclassified,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Precondition => "precondition",
            FailureKind::Assertion => "assertion",
            FailureKind::Unclassified => "unclassified",
        };
        f.write_str(name)
    }
}

/// Errors raised by kernel checks.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KernelError {
    /// Input violated a documented requirement
    #[error("Precondition violated: {message}")]
    Precondition { message: String },

    /// Internal invariant did not hold
    #[error("Assertion failed: {message}")]
    Assertion { message: String },

    /// Failure of unknown origin
    #[error("Unclassified kernel failure: {message}")]
    Unclassified { message: String },
}

impl KernelError {
    /// Creates a precondition error.
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition {
            message: message.into(),
        }
    }

    /// Creates an assertion error.
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion {
            message: message.into(),
        }
    }

    /// Creates an unclassified error.
    pub fn unclassified(message: impl Into<String>) -> Self {
        Self::Unclassified {
            message: message.into(),
        }
    }

    /// Returns the classification of this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Precondition { .. } => FailureKind::Precondition,
            Self::Assertion { .. } => FailureKind::Assertion,
            Self::Unclassified { .. } => FailureKind::Unclassified,
        }
    }

    /// Returns the failure message without the classification prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Precondition { message }
            | Self::Assertion { message }
            | Self::Unclassified { message } => message,
        }
    }
}

/// Result type for kernel operations.
pub type KernelResult<T> = Result<T, KernelError>;
