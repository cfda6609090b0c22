//! # Volume Operations
//!
//! In-place boolean operations and Minkowski sums, dispatched on the
//! dimension of the receiving volume.
//!
//! ## Operand Rules
//!
//! | `self` | `other`            | Result                      |
//! |--------|--------------------|-----------------------------|
//! | null   | anything           | no-op, `self` stays null    |
//! | 2D/3D  | same dimension     | kernel operation            |
//! | 2D/3D  | null or other dim  | `DimensionMismatch`         |
//!
//! Kernel failures are returned unchanged. Unlike boundary conversion,
//! nothing here installs a failure behaviour or traps kernel failures.

use crate::error::{NefError, NefResult};
use crate::volume::NefPolyhedron;
use openscad_kernel::{minkowski2, minkowski_sum_3};
use tracing::debug;

// =============================================================================
// BOOLEAN OPERATORS
// =============================================================================

/// Boolean set operation applied by [`NefPolyhedron::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    Union,
    Intersection,
    Difference,
}

impl BooleanOp {
    /// Verb used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            BooleanOp::Union => "union",
            BooleanOp::Intersection => "intersect",
            BooleanOp::Difference => "subtract",
        }
    }
}

impl NefPolyhedron {
    /// Applies a boolean operation with `other`, replacing `self`.
    ///
    /// # Arguments
    ///
    /// * `op` - Operation to apply
    /// * `other` - Right-hand operand, unchanged
    ///
    /// # Errors
    ///
    /// - `DimensionMismatch` if `self` is not null and `other` is null or
    ///   of another dimension; `self` is left untouched
    /// - `Kernel` if the kernel fails; the failure is not trapped
    ///
    /// # Example
    ///
    /// ```rust
    /// use glam::DVec3;
    /// use openscad_kernel::Nef3;
    /// use openscad_nef::{BooleanOp, NefPolyhedron};
    ///
    /// let mut a = NefPolyhedron::from(Nef3::cuboid(DVec3::ZERO, DVec3::ONE).unwrap());
    /// let b = NefPolyhedron::from(Nef3::cuboid(DVec3::splat(0.5), DVec3::splat(1.5)).unwrap());
    /// a.apply(BooleanOp::Intersection, &b).unwrap();
    /// assert!((a.as_nef3().unwrap().volume() - 0.125).abs() < 1e-6);
    /// ```
    pub fn apply(&mut self, op: BooleanOp, other: &NefPolyhedron) -> NefResult<&mut Self> {
        match (&mut *self, other) {
            (Self::Null, _) => {
                debug!(op = op.name(), "Boolean on null volume ignored");
            }
            (Self::Nef2(this), Self::Nef2(other)) => match op {
                BooleanOp::Union => this.join(other),
                BooleanOp::Intersection => this.intersect(other),
                BooleanOp::Difference => this.difference(other),
            },
            (Self::Nef3(this), Self::Nef3(other)) => match op {
                BooleanOp::Union => this.join(other)?,
                BooleanOp::Intersection => this.intersect(other)?,
                BooleanOp::Difference => this.difference(other)?,
            },
            (this, other) => {
                return Err(NefError::dimension_mismatch(op.name(), this.dim(), other.dim()));
            }
        }
        Ok(self)
    }

    /// Replaces `self` with its union with `other`.
    ///
    /// See [`NefPolyhedron::apply`] for operand rules and errors.
    pub fn union_with(&mut self, other: &NefPolyhedron) -> NefResult<&mut Self> {
        self.apply(BooleanOp::Union, other)
    }

    /// Replaces `self` with its intersection with `other`.
    ///
    /// See [`NefPolyhedron::apply`] for operand rules and errors.
    pub fn intersect_with(&mut self, other: &NefPolyhedron) -> NefResult<&mut Self> {
        self.apply(BooleanOp::Intersection, other)
    }

    /// Removes `other` from `self`.
    ///
    /// See [`NefPolyhedron::apply`] for operand rules and errors.
    pub fn difference_with(&mut self, other: &NefPolyhedron) -> NefResult<&mut Self> {
        self.apply(BooleanOp::Difference, other)
    }

    // =========================================================================
    // MINKOWSKI SUM
    // =========================================================================

    /// Replaces `self` with its Minkowski sum with `other`.
    ///
    /// Planar regions are summed by triangulating into convex pieces and
    /// unioning the hulls of pairwise vertex sums. Solids are first split
    /// into convex pieces along the planes of reflex facets, then summed
    /// the same way with a 3D hull.
    ///
    /// # Errors
    ///
    /// Same operand rules as [`NefPolyhedron::apply`]. Kernel failures
    /// propagate unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glam::DVec2;
    /// use openscad_kernel::Nef2;
    /// use openscad_nef::NefPolyhedron;
    ///
    /// let mut square = NefPolyhedron::from(Nef2::square(DVec2::ONE, false));
    /// let disk = NefPolyhedron::from(Nef2::circle(0.25, 16));
    /// square.minkowski(&disk).unwrap();
    /// assert!(square.as_nef2().unwrap().area() > 1.0);
    /// ```
    pub fn minkowski(&mut self, other: &NefPolyhedron) -> NefResult<&mut Self> {
        match (&mut *self, other) {
            (Self::Null, _) => {
                debug!("Minkowski sum on null volume ignored");
            }
            (Self::Nef2(this), Self::Nef2(other)) => {
                *this = minkowski2(this, other)?;
            }
            (Self::Nef3(this), Self::Nef3(other)) => {
                *this = minkowski_sum_3(this, other)?;
            }
            (this, other) => {
                return Err(NefError::dimension_mismatch("minkowski", this.dim(), other.dim()));
            }
        }
        Ok(self)
    }
}
