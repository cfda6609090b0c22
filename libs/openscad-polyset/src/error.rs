//! # PolySet Errors
//!
//! Error types for building polygon sets.

use thiserror::Error;

/// Errors that can occur while filling a [`PolySet`](crate::PolySet).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolySetError {
    /// Face with bad indices or too few corners
    #[error("Invalid face: {message}")]
    InvalidFace { message: String },

    /// Too many vertices
    #[error("Too many vertices: {count} (max: {max})")]
    TooManyVertices { count: usize, max: usize },
}

impl PolySetError {
    /// Creates an invalid face error.
    pub fn invalid_face(message: impl Into<String>) -> Self {
        Self::InvalidFace {
            message: message.into(),
        }
    }
}
