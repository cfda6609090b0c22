//! # Planes
//!
//! Oriented planes with point classification for BSP clipping.

use config::constants::{AREA_EPSILON, PLANE_EPSILON};
use glam::DVec3;

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Position of a point relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Classification {
    /// On the plane, within [`PLANE_EPSILON`].
    Coplanar,
    /// On the side the normal points to.
    Front,
    /// On the side opposite the normal.
    Back,
}

// =============================================================================
// PLANE
// =============================================================================

/// An oriented plane `normal · p = w`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: DVec3,
    w: f64,
}

impl Plane {
    /// Creates a plane from a unit normal and offset.
    pub fn new(normal: DVec3, w: f64) -> Self {
        Self { normal, w }
    }

    /// Fits a plane through a polygon using Newell's method.
    ///
    /// # Returns
    ///
    /// `None` when the polygon has (almost) no area.
    pub fn from_points(points: &[DVec3]) -> Option<Self> {
        let normal = newell_normal(points);
        let length = normal.length();
        if length <= AREA_EPSILON {
            return None;
        }
        let normal = normal / length;
        let centroid = points.iter().copied().sum::<DVec3>() / points.len() as f64;
        Some(Self {
            normal,
            w: normal.dot(centroid),
        })
    }

    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    pub fn w(&self) -> f64 {
        self.w
    }

    /// Returns the plane facing the other way.
    pub fn flip(&self) -> Self {
        Self {
            normal: -self.normal,
            w: -self.w,
        }
    }

    /// Signed distance of `point`; positive in front.
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.w
    }

    pub(crate) fn classify_point(&self, point: DVec3) -> Classification {
        let distance = self.signed_distance(point);
        if distance > PLANE_EPSILON {
            Classification::Front
        } else if distance < -PLANE_EPSILON {
            Classification::Back
        } else {
            Classification::Coplanar
        }
    }
}

/// Newell normal of a polygon; its length is twice the polygon area.
pub(crate) fn newell_normal(points: &[DVec3]) -> DVec3 {
    let n = points.len();
    let mut normal = DVec3::ZERO;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        normal.x += (a.y - b.y) * (a.z + b.z);
        normal.y += (a.z - b.z) * (a.x + b.x);
        normal.z += (a.x - b.x) * (a.y + b.y);
    }
    normal
}
