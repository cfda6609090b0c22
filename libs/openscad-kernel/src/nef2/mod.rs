//! # Planar Regions
//!
//! Regularized 2D point sets bounded by polygonal rings.
//!
//! A [`Nef2`] holds a set of disjoint polygons with holes. Every
//! constructor and boolean operation normalizes the stored polygons so
//! that exteriors run counter-clockwise, holes run clockwise and
//! overlapping input collapses into a single region.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec2;
//! use openscad_kernel::Nef2;
//!
//! let mut a = Nef2::square(DVec2::new(2.0, 2.0), false);
//! let b = Nef2::square(DVec2::new(1.0, 1.0), false);
//! a.difference(&b);
//! assert!((a.area() - 3.0).abs() < 1e-6);
//! ```

mod minkowski;

#[cfg(test)]
mod tests;

pub use minkowski::minkowski2;

use crate::error::KernelResult;
use crate::failure;
use crate::predicates::is_simple_polygon;
use geo::{Area, BooleanOps, BoundingRect, Coord, LineString, MultiPolygon, Polygon};
use glam::DVec2;

// =============================================================================
// NEF2
// =============================================================================

/// A regularized planar region.
#[derive(Debug, Clone, PartialEq)]
pub struct Nef2 {
    polygons: MultiPolygon<f64>,
}

impl Default for Nef2 {
    fn default() -> Self {
        Self::empty()
    }
}

impl Nef2 {
    /// Creates the empty region.
    pub fn empty() -> Self {
        Self {
            polygons: MultiPolygon::new(Vec::new()),
        }
    }

    /// Creates a region bounded by a single contour.
    ///
    /// # Arguments
    ///
    /// * `points` - Contour vertices, either winding
    ///
    /// # Errors
    ///
    /// Precondition failure if the contour has fewer than three vertices
    /// or is not a simple polygon. Under `Continue` the contour is used
    /// as given and self-overlaps are resolved by the boolean engine.
    pub fn from_contour(points: &[DVec2]) -> KernelResult<Self> {
        failure::precondition(points.len() >= 3, || {
            format!("contour needs at least 3 vertices, got {}", points.len())
        })?;
        failure::precondition(is_simple_polygon(points), || {
            "contour does not bound a simple polygon".to_string()
        })?;

        if points.len() < 3 {
            return Ok(Self::empty());
        }
        let polygon = Polygon::new(ring(points), Vec::new());
        Ok(Self::from_polygons(MultiPolygon::new(vec![polygon])))
    }

    /// Creates a region from raw polygons, normalizing overlaps and
    /// ring orientation.
    pub fn from_polygons(polygons: MultiPolygon<f64>) -> Self {
        Self {
            polygons: polygons.union(&MultiPolygon::new(Vec::new())),
        }
    }

    /// Creates an axis-aligned rectangle.
    ///
    /// # Arguments
    ///
    /// * `size` - Extent along X and Y
    /// * `center` - Center on the origin instead of spanning `[0, size]`
    pub fn square(size: DVec2, center: bool) -> Self {
        let min = if center { -size / 2.0 } else { DVec2::ZERO };
        let max = min + size;
        let points = [
            min,
            DVec2::new(max.x, min.y),
            max,
            DVec2::new(min.x, max.y),
        ];
        Self::from_polygons(MultiPolygon::new(vec![Polygon::new(ring(&points), Vec::new())]))
    }

    /// Creates a regular polygon approximating a circle.
    ///
    /// # Arguments
    ///
    /// * `radius` - Circumradius
    /// * `segments` - Number of vertices (at least 3 are used)
    pub fn circle(radius: f64, segments: usize) -> Self {
        let segments = segments.max(3);
        let points: Vec<DVec2> = (0..segments)
            .map(|i| {
                let angle = std::f64::consts::TAU * i as f64 / segments as f64;
                DVec2::new(radius * angle.cos(), radius * angle.sin())
            })
            .collect();
        Self::from_polygons(MultiPolygon::new(vec![Polygon::new(ring(&points), Vec::new())]))
    }

    // =========================================================================
    // BOOLEAN OPERATIONS
    // =========================================================================

    /// Replaces this region with its union with `other`.
    pub fn join(&mut self, other: &Nef2) {
        self.polygons = self.polygons.union(&other.polygons);
    }

    /// Replaces this region with its intersection with `other`.
    pub fn intersect(&mut self, other: &Nef2) {
        self.polygons = self.polygons.intersection(&other.polygons);
    }

    /// Removes `other` from this region.
    pub fn difference(&mut self, other: &Nef2) {
        self.polygons = self.polygons.difference(&other.polygons);
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Returns true if the region contains no area.
    pub fn is_empty(&self) -> bool {
        self.polygons.0.is_empty()
    }

    /// Returns the enclosed area.
    pub fn area(&self) -> f64 {
        self.polygons.unsigned_area()
    }

    /// Returns the axis-aligned bounding box as `(min, max)`.
    pub fn bounding_box(&self) -> Option<(DVec2, DVec2)> {
        self.polygons.bounding_rect().map(|rect| {
            let (min, max) = (rect.min(), rect.max());
            (DVec2::new(min.x, min.y), DVec2::new(max.x, max.y))
        })
    }

    /// Returns true if both regions cover the same points, up to
    /// `tolerance` of symmetric-difference area.
    pub fn is_equivalent(&self, other: &Nef2, tolerance: f64) -> bool {
        self.polygons.xor(&other.polygons).unsigned_area() <= tolerance
    }

    /// Returns the underlying polygons.
    pub fn as_multi_polygon(&self) -> &MultiPolygon<f64> {
        &self.polygons
    }

    /// Returns every boundary ring, exteriors before the holes they contain.
    pub fn rings(&self) -> Vec<Ring> {
        let mut rings = Vec::new();
        for polygon in self.polygons.iter() {
            rings.push(Ring {
                points: ring_points(polygon.exterior()),
                is_hole: false,
            });
            for interior in polygon.interiors() {
                rings.push(Ring {
                    points: ring_points(interior),
                    is_hole: true,
                });
            }
        }
        rings
    }

    /// Returns element counts of the boundary structure.
    ///
    /// Every ring vertex starts one edge, each edge has two half-edges and
    /// the faces are the bounded polygons, their holes and the single
    /// unbounded face.
    pub fn explorer(&self) -> Explorer {
        let mut edges = 0;
        let mut faces = 1;
        for polygon in self.polygons.iter() {
            edges += ring_len(polygon.exterior());
            edges += polygon.interiors().iter().map(ring_len).sum::<usize>();
            faces += 1 + polygon.interiors().len();
        }
        Explorer {
            vertices: edges,
            halfedges: edges * 2,
            edges,
            faces,
        }
    }
}

// =============================================================================
// RINGS
// =============================================================================

/// A closed boundary ring of a planar region.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    /// Vertices without the closing duplicate.
    pub points: Vec<DVec2>,
    /// True for hole boundaries (clockwise).
    pub is_hole: bool,
}

/// Element counts of a planar region's boundary structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Explorer {
    vertices: usize,
    halfedges: usize,
    edges: usize,
    faces: usize,
}

impl Explorer {
    pub fn number_of_vertices(&self) -> usize {
        self.vertices
    }

    pub fn number_of_halfedges(&self) -> usize {
        self.halfedges
    }

    pub fn number_of_edges(&self) -> usize {
        self.edges
    }

    pub fn number_of_faces(&self) -> usize {
        self.faces
    }
}

fn ring(points: &[DVec2]) -> LineString<f64> {
    LineString::from(
        points
            .iter()
            .map(|p| Coord { x: p.x, y: p.y })
            .collect::<Vec<_>>(),
    )
}

fn ring_points(ring: &LineString<f64>) -> Vec<DVec2> {
    let n = ring_len(ring);
    ring.0[..n].iter().map(|c| DVec2::new(c.x, c.y)).collect()
}

fn ring_len(ring: &LineString<f64>) -> usize {
    let n = ring.0.len();
    if n > 1 && ring.is_closed() {
        n - 1
    } else {
        n
    }
}
