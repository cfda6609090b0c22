//! # Projection
//!
//! Flattens a solid onto the plane orthogonal to a direction.
//!
//! ## Algorithm
//!
//! Every boundary facet is seen from both sides. A side whose normal
//! points along the projection direction contributes its outline,
//! expressed in a right-handed basis of the target plane, to a running
//! union. Sides facing away or edge-on are skipped. Each point of the
//! shadow lies under at least one facet side facing the direction, so
//! the union covers the whole shadow and does not depend on the order
//! in which sides are visited.

use crate::error::{NefError, NefResult};
use crate::volume::NefPolyhedron;
use config::constants::{AREA_EPSILON, EPSILON};
use glam::{DVec2, DVec3};
use openscad_kernel::predicates::signed_area;
use openscad_kernel::{Halffacet, Nef2};
use tracing::debug;

// =============================================================================
// PROJECTOR
// =============================================================================

/// Accumulates the shadow of visited half-facets.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use openscad_kernel::Nef3;
/// use openscad_nef::Projector;
///
/// let cube = Nef3::cuboid(DVec3::ZERO, DVec3::ONE).unwrap();
/// let mut projector = Projector::default();
/// for facet in cube.halffacets() {
///     projector.visit(facet).unwrap();
/// }
/// assert!((projector.into_nef2().area() - 1.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct Projector {
    up: DVec3,
    u: DVec3,
    v: DVec3,
    accumulated: Nef2,
}

impl Default for Projector {
    /// Projects along +Z onto the XY plane.
    fn default() -> Self {
        Self {
            up: DVec3::Z,
            u: DVec3::X,
            v: DVec3::Y,
            accumulated: Nef2::empty(),
        }
    }
}

impl Projector {
    /// Creates a projector along `up`.
    ///
    /// The plane frame is fixed by `up`: the first axis is the world axis
    /// least aligned with `up` (X before Y before Z on ties) made
    /// orthogonal to it, the second axis is `up × u`. Along +Z this is the
    /// XY plane; along -Z the second axis is -Y; along +X the frame is
    /// (Y, Z).
    ///
    /// # Errors
    ///
    /// `DegenerateDirection` if `up` has no usable length.
    pub fn with_up(up: DVec3) -> NefResult<Self> {
        let up = up.try_normalize().ok_or(NefError::DegenerateDirection)?;
        let axis = [DVec3::X, DVec3::Y, DVec3::Z]
            .into_iter()
            .min_by(|a, b| a.dot(up).abs().total_cmp(&b.dot(up).abs()))
            .unwrap_or(DVec3::X);
        let u = (axis - up * up.dot(axis)).normalize();
        let v = up.cross(u);
        Ok(Self {
            up,
            u,
            v,
            accumulated: Nef2::empty(),
        })
    }

    /// Unit projection direction.
    pub fn up(&self) -> DVec3 {
        self.up
    }

    /// Adds the outline of one half-facet if it faces the direction.
    ///
    /// # Errors
    ///
    /// Kernel failures while building the outline region propagate.
    pub fn visit(&mut self, facet: Halffacet<'_>) -> NefResult<()> {
        if facet.normal().dot(self.up) <= EPSILON {
            return Ok(());
        }

        let contour: Vec<DVec2> = facet
            .halfedges()
            .iter()
            .map(|edge| self.to_plane(edge.target()))
            .collect();
        if signed_area(&contour).abs() <= AREA_EPSILON {
            return Ok(());
        }

        self.accumulated.join(&Nef2::from_contour(&contour)?);
        Ok(())
    }

    /// Shadow of the half-facets visited so far.
    pub fn accumulated(&self) -> &Nef2 {
        &self.accumulated
    }

    pub fn into_nef2(self) -> Nef2 {
        self.accumulated
    }

    fn to_plane(&self, point: DVec3) -> DVec2 {
        DVec2::new(point.dot(self.u), point.dot(self.v))
    }
}

// =============================================================================
// VOLUME PROJECTION
// =============================================================================

impl NefPolyhedron {
    /// Projects a solid along `up` into a planar volume.
    ///
    /// The result lives in the plane orthogonal to `up`, in the frame
    /// described on [`Projector::with_up`]. For `up` = +Z the plane
    /// coordinates are the X and Y coordinates.
    ///
    /// # Returns
    ///
    /// The null volume for a null input, otherwise a 2D volume.
    ///
    /// # Errors
    ///
    /// - `UnsupportedDimension` for planar volumes
    /// - `DegenerateDirection` for a zero-length `up`
    /// - Kernel failures propagate unchanged
    pub fn project(&self, up: DVec3) -> NefResult<NefPolyhedron> {
        let nef = match self {
            Self::Null => return Ok(Self::Null),
            Self::Nef2(_) => return Err(NefError::unsupported("project", 2)),
            Self::Nef3(nef) => nef,
        };

        let mut projector = Projector::with_up(up)?;
        nef.halffacets().try_for_each(|facet| projector.visit(facet))?;

        let shadow = projector.into_nef2();
        debug!(area = shadow.area(), "Projected 3D volume");
        Ok(Self::Nef2(shadow))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use openscad_kernel::Nef3;

    fn cube() -> Nef3 {
        Nef3::cuboid(DVec3::ZERO, DVec3::ONE).unwrap()
    }

    #[test]
    fn test_cube_shadow_is_unit_square() {
        let shadow = NefPolyhedron::from(cube()).project(DVec3::Z).unwrap();
        let nef = shadow.as_nef2().unwrap();
        assert_relative_eq!(nef.area(), 1.0, epsilon = 1e-6);
        let (min, max) = nef.bounding_box().unwrap();
        assert!(min.abs_diff_eq(DVec2::ZERO, 1e-6));
        assert!(max.abs_diff_eq(DVec2::ONE, 1e-6));
    }

    #[test]
    fn test_only_facing_sides_contribute() {
        let cube = cube();
        let mut projector = Projector::default();
        for facet in cube.halffacets().filter(|f| f.normal().dot(DVec3::Z) < 0.5) {
            projector.visit(facet).unwrap();
        }
        assert!(projector.accumulated().is_empty());
    }

    #[test]
    fn test_diagonal_shadow_is_hexagon() {
        let shadow = NefPolyhedron::from(cube()).project(DVec3::ONE).unwrap();
        assert_relative_eq!(shadow.as_nef2().unwrap().area(), 3.0_f64.sqrt(), epsilon = 1e-6);
    }

    #[test]
    fn test_basis_is_right_handed() {
        let projector = Projector::with_up(DVec3::new(0.0, 2.0, 0.0)).unwrap();
        assert!(projector.up().abs_diff_eq(DVec3::Y, 1e-12));
        assert!(projector.u.cross(projector.v).abs_diff_eq(DVec3::Y, 1e-12));
    }

    #[test]
    fn test_frame_is_fixed_by_direction() {
        let z = Projector::with_up(DVec3::Z).unwrap();
        assert_eq!((z.u, z.v), (DVec3::X, DVec3::Y));
        let down = Projector::with_up(-DVec3::Z).unwrap();
        assert_eq!((down.u, down.v), (DVec3::X, -DVec3::Y));
        let x = Projector::with_up(DVec3::X).unwrap();
        assert_eq!((x.u, x.v), (DVec3::Y, DVec3::Z));
    }

    #[test]
    fn test_shadow_from_below() {
        let shadow = NefPolyhedron::from(cube()).project(-DVec3::Z).unwrap();
        let (min, max) = shadow.as_nef2().unwrap().bounding_box().unwrap();
        assert!(min.abs_diff_eq(DVec2::new(0.0, -1.0), 1e-6));
        assert!(max.abs_diff_eq(DVec2::new(1.0, 0.0), 1e-6));
    }

    #[test]
    fn test_degenerate_direction() {
        let err = NefPolyhedron::from(cube()).project(DVec3::ZERO).unwrap_err();
        assert_eq!(err, NefError::DegenerateDirection);
    }

    #[test]
    fn test_planar_input_is_rejected() {
        let square = NefPolyhedron::from(Nef2::square(DVec2::ONE, false));
        let err = square.project(DVec3::Z).unwrap_err();
        assert_eq!(err, NefError::unsupported("project", 2));
    }

    #[test]
    fn test_null_projects_to_null() {
        assert!(NefPolyhedron::Null.project(DVec3::Z).unwrap().is_null());
    }
}
