//! # Convex Decomposition
//!
//! Splits a solid into convex pieces by cutting along the plane of a
//! reflex facet (one with part of the solid in front of it) until every
//! piece lies behind all of its own facet planes.

use super::plane::Plane;
use super::polygon::plane_basis;
use super::Nef3;
use crate::error::KernelResult;
use crate::failure;
use config::constants::{EPSILON, MAX_DECOMPOSITION_DEPTH, PLANE_EPSILON};
use glam::DVec3;
use tracing::debug;

impl Nef3 {
    /// Returns true if every vertex lies on or behind every facet plane.
    pub fn is_convex(&self) -> bool {
        !self.is_empty() && self.reflex_plane().is_none()
    }

    /// Splits the solid into convex pieces whose union is the solid.
    ///
    /// # Errors
    ///
    /// Assertion failure if cutting does not converge within
    /// [`MAX_DECOMPOSITION_DEPTH`] levels. Under `Continue` the unfinished
    /// piece is returned as it is.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glam::DVec3;
    /// use openscad_kernel::Nef3;
    ///
    /// let mut l_shape = Nef3::cuboid(DVec3::ZERO, DVec3::new(2.0, 1.0, 1.0)).unwrap();
    /// l_shape.join(&Nef3::cuboid(DVec3::ZERO, DVec3::new(1.0, 2.0, 1.0)).unwrap()).unwrap();
    /// let pieces = l_shape.convex_decomposition().unwrap();
    /// assert!(pieces.len() >= 2);
    /// assert!(pieces.iter().all(|piece| piece.is_convex()));
    /// ```
    pub fn convex_decomposition(&self) -> KernelResult<Vec<Nef3>> {
        let mut pieces = Vec::new();
        let mut stack = vec![(self.clone(), 0usize)];

        while let Some((piece, depth)) = stack.pop() {
            if piece.is_empty() || piece.volume() <= EPSILON {
                continue;
            }
            let Some(plane) = piece.reflex_plane() else {
                pieces.push(piece);
                continue;
            };

            failure::assertion(depth < MAX_DECOMPOSITION_DEPTH, || {
                format!("convex decomposition did not converge after {depth} cuts")
            })?;
            if depth >= MAX_DECOMPOSITION_DEPTH {
                pieces.push(piece);
                continue;
            }

            let (behind, in_front) = piece.split_by_plane(&plane)?;
            stack.push((behind, depth + 1));
            stack.push((in_front, depth + 1));
        }

        debug!(pieces = pieces.len(), "Convex decomposition");
        Ok(pieces)
    }

    /// Plane of the first facet with some vertex strictly in front of it.
    fn reflex_plane(&self) -> Option<Plane> {
        self.facets.iter().find_map(|facet| {
            let plane = Plane::new(facet.normal, facet.offset);
            self.vertices
                .iter()
                .any(|v| plane.signed_distance(*v) > PLANE_EPSILON)
                .then_some(plane)
        })
    }

    /// Returns the parts of the solid behind and in front of `plane`.
    fn split_by_plane(&self, plane: &Plane) -> KernelResult<(Nef3, Nef3)> {
        let Some((min, max)) = self.bounding_box() else {
            return Ok((Nef3::empty(), Nef3::empty()));
        };
        let extent = (max - min).length() + 1.0;
        let center = (min + max) / 2.0;
        let anchor = center - plane.normal() * plane.signed_distance(center);

        let mut behind = self.clone();
        behind.intersect(&half_space(anchor, plane.normal(), extent, false)?)?;
        let mut in_front = self.clone();
        in_front.intersect(&half_space(anchor, plane.normal(), extent, true)?)?;
        Ok((behind, in_front))
    }
}

/// A box covering one side of the plane through `anchor` with normal
/// `normal`, large enough to contain anything within `extent` of `anchor`.
fn half_space(anchor: DVec3, normal: DVec3, extent: f64, front: bool) -> KernelResult<Nef3> {
    let (u, v) = plane_basis(normal);
    let (near, far) = if front { (0.0, 2.0 * extent) } else { (-2.0 * extent, 0.0) };
    let local_min = DVec3::new(-2.0 * extent, -2.0 * extent, near);
    let local_max = DVec3::new(2.0 * extent, 2.0 * extent, far);

    // (u, v, normal) is right-handed, so the box keeps its outward winding
    let to_world = |p: DVec3| anchor + u * p.x + v * p.y + normal * p.z;
    let polygons: Vec<Vec<DVec3>> = super::cuboid_polygons(local_min, local_max)
        .into_iter()
        .map(|face| face.into_iter().map(to_world).collect())
        .collect();
    Nef3::from_kernel_polygons(&polygons)
}
