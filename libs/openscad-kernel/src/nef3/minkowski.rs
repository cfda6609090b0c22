//! # Solid Minkowski Sum
//!
//! Convex pieces of both operands are summed pairwise (hull of all vertex
//! sums) and the piece sums are unioned.

use super::Nef3;
use crate::error::KernelResult;
use crate::hull::convex_hull;
use glam::DVec3;
use tracing::debug;

/// Computes the Minkowski sum of two solids.
///
/// # Arguments
///
/// * `a` - First operand
/// * `b` - Second operand
///
/// # Returns
///
/// The solid `{ p + q | p ∈ a, q ∈ b }`. Empty when either operand is
/// empty.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use openscad_kernel::{minkowski_sum_3, Nef3};
///
/// let a = Nef3::cuboid(DVec3::ZERO, DVec3::ONE).unwrap();
/// let b = Nef3::cuboid(DVec3::ZERO, DVec3::splat(0.5)).unwrap();
/// let sum = minkowski_sum_3(&a, &b).unwrap();
/// assert!((sum.volume() - 3.375).abs() < 1e-6);
/// ```
pub fn minkowski_sum_3(a: &Nef3, b: &Nef3) -> KernelResult<Nef3> {
    if a.is_empty() || b.is_empty() {
        return Ok(Nef3::empty());
    }

    let pieces_a = a.convex_decomposition()?;
    let pieces_b = b.convex_decomposition()?;
    debug!(
        pieces_a = pieces_a.len(),
        pieces_b = pieces_b.len(),
        "Solid Minkowski sum"
    );

    let mut result = Nef3::empty();
    for piece_a in &pieces_a {
        for piece_b in &pieces_b {
            let sums: Vec<DVec3> = piece_a
                .vertices
                .iter()
                .flat_map(|p| piece_b.vertices.iter().map(move |q| *p + *q))
                .collect();
            let hull = convex_hull(&sums)?;
            if hull.is_empty() {
                continue;
            }
            result.join(&Nef3::from_kernel_polyhedron(&hull)?)?;
        }
    }
    Ok(result)
}
