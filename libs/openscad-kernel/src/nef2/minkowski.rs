//! # Planar Minkowski Sum
//!
//! Both operands are split into convex pieces (each polygon as is when it
//! is convex and hole-free, otherwise its ear-clipped triangles). The sum
//! of two convex pieces is the convex hull of their pairwise vertex sums,
//! and the result is the union of all piece sums.

use super::{ring_points, Nef2};
use crate::error::KernelResult;
use crate::failure;
use crate::predicates::is_convex_contour;
use geo::{ConvexHull, MultiPoint, MultiPolygon, Point, TriangulateEarcut};
use glam::DVec2;
use tracing::debug;

/// Computes the Minkowski sum of two planar regions.
///
/// # Arguments
///
/// * `a` - First operand
/// * `b` - Second operand
///
/// # Returns
///
/// The region `{ p + q | p ∈ a, q ∈ b }`. Empty when either operand is
/// empty.
///
/// # Example
///
/// ```rust
/// use glam::DVec2;
/// use openscad_kernel::{minkowski2, Nef2};
///
/// let square = Nef2::square(DVec2::ONE, false);
/// let disk = Nef2::circle(0.5, 32);
/// let sum = minkowski2(&square, &disk).unwrap();
/// let (min, max) = sum.bounding_box().unwrap();
/// assert!(min.x < 0.0 && max.x > 1.0);
/// ```
pub fn minkowski2(a: &Nef2, b: &Nef2) -> KernelResult<Nef2> {
    if a.is_empty() || b.is_empty() {
        return Ok(Nef2::empty());
    }

    let pieces_a = convex_pieces(a)?;
    let pieces_b = convex_pieces(b)?;
    debug!(
        pieces_a = pieces_a.len(),
        pieces_b = pieces_b.len(),
        "Planar Minkowski sum"
    );

    let mut result = Nef2::empty();
    for piece_a in &pieces_a {
        for piece_b in &pieces_b {
            result.join(&convex_sum(piece_a, piece_b));
        }
    }
    Ok(result)
}

/// Splits a region into convex pieces.
fn convex_pieces(nef: &Nef2) -> KernelResult<Vec<Vec<DVec2>>> {
    let mut pieces = Vec::new();
    for polygon in nef.as_multi_polygon().iter() {
        let exterior = ring_points(polygon.exterior());
        if polygon.interiors().is_empty() && is_convex_contour(&exterior) {
            pieces.push(exterior);
            continue;
        }
        for triangle in polygon.earcut_triangles() {
            pieces.push(
                triangle
                    .to_array()
                    .iter()
                    .map(|c| DVec2::new(c.x, c.y))
                    .collect(),
            );
        }
    }

    failure::assertion(!pieces.is_empty(), || {
        "convex decomposition of a non-empty region produced no pieces".to_string()
    })?;
    Ok(pieces)
}

/// Sums two convex pieces.
fn convex_sum(a: &[DVec2], b: &[DVec2]) -> Nef2 {
    let points: Vec<Point<f64>> = a
        .iter()
        .flat_map(|p| b.iter().map(move |q| Point::new(p.x + q.x, p.y + q.y)))
        .collect();
    let hull = MultiPoint::new(points).convex_hull();
    Nef2::from_polygons(MultiPolygon::new(vec![hull]))
}
