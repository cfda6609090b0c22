//! # Volume Errors
//!
//! Error types for volume operations and boundary conversion.

use openscad_kernel::{FailureKind, KernelError};
use openscad_polyset::PolySetError;
use thiserror::Error;

/// Errors from boolean operations, Minkowski sums and projection.
///
/// Kernel failures pass through unchanged as [`NefError::Kernel`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NefError {
    /// Operands of different dimensions, or a null operand
    #[error("Cannot {operation} a {this}D volume with a {other}D volume")]
    DimensionMismatch {
        operation: &'static str,
        this: u8,
        other: u8,
    },

    /// Operation not defined for this dimension
    #[error("Cannot {operation} a {dim}D volume")]
    UnsupportedDimension { operation: &'static str, dim: u8 },

    /// Projection direction of zero length
    #[error("Projection direction is degenerate")]
    DegenerateDirection,

    /// Failure reported by the kernel
    #[error(transparent)]
    Kernel(#[from] KernelError),

    /// Polygon set rejected the generated geometry
    #[error(transparent)]
    PolySet(#[from] PolySetError),
}

impl NefError {
    /// Creates a dimension mismatch error.
    pub fn dimension_mismatch(operation: &'static str, this: u8, other: u8) -> Self {
        Self::DimensionMismatch {
            operation,
            this,
            other,
        }
    }

    /// Creates an unsupported dimension error.
    pub fn unsupported(operation: &'static str, dim: u8) -> Self {
        Self::UnsupportedDimension { operation, dim }
    }
}

/// Result type for volume operations.
pub type NefResult<T> = Result<T, NefError>;

/// Failure to turn a volume into a polygon set.
///
/// No partial geometry accompanies a conversion error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// The kernel rejected the volume or failed while exporting it
    #[error("Kernel {kind} failure during conversion: {message}")]
    Kernel { kind: FailureKind, message: String },

    /// Exported faces did not fit the polygon set
    #[error("Polygon set rejected converted geometry: {0}")]
    PolySet(#[from] PolySetError),
}

impl ConversionError {
    /// Returns the kernel failure class, if the kernel failed.
    pub fn kernel_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Kernel { kind, .. } => Some(*kind),
            Self::PolySet(_) => None,
        }
    }
}

impl From<KernelError> for ConversionError {
    fn from(err: KernelError) -> Self {
        Self::Kernel {
            kind: err.kind(),
            message: err.message().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_message() {
        let err = NefError::dimension_mismatch("union", 3, 2);
        assert_eq!(err.to_string(), "Cannot union a 3D volume with a 2D volume");
    }

    #[test]
    fn test_kernel_error_is_transparent() {
        let err: NefError = KernelError::assertion("broken links").into();
        assert_eq!(err.to_string(), KernelError::assertion("broken links").to_string());
    }

    #[test]
    fn test_conversion_error_keeps_kind() {
        let err: ConversionError = KernelError::precondition("facet 2 is not planar").into();
        assert_eq!(err.kernel_kind(), Some(FailureKind::Precondition));
        assert!(err.to_string().contains("facet 2 is not planar"));
    }
}
