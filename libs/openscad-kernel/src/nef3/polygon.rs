//! # Polygon for BSP Operations
//!
//! Convex polygon with its supporting plane and plane splitting.

use super::plane::{Classification, Plane};
use config::constants::PLANE_EPSILON;
use geo::{Coord, LineString, TriangulateEarcut};
use glam::DVec3;

// =============================================================================
// SPLIT RESULT
// =============================================================================

/// Outcome of splitting a polygon by a plane.
#[derive(Debug)]
pub(crate) enum Split {
    /// On the plane, facing the same way.
    CoplanarFront(Polygon),
    /// On the plane, facing the other way.
    CoplanarBack(Polygon),
    Front(Polygon),
    Back(Polygon),
    /// Cut in two; either piece may vanish when it degenerates.
    Spanning {
        front: Option<Polygon>,
        back: Option<Polygon>,
    },
}

// =============================================================================
// POLYGON
// =============================================================================

/// A convex polygon with associated plane.
#[derive(Debug, Clone)]
pub(crate) struct Polygon {
    /// Vertices in counter-clockwise order seen from the front.
    vertices: Vec<DVec3>,
    plane: Plane,
}

impl Polygon {
    /// Creates a polygon, fitting its plane.
    ///
    /// Returns `None` for fewer than three vertices or zero area.
    pub fn new(vertices: Vec<DVec3>) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }
        let plane = Plane::from_points(&vertices)?;
        Some(Self { vertices, plane })
    }

    /// Converts a facet boundary into convex polygons.
    ///
    /// Convex facets pass through unchanged; others are ear-clipped in
    /// their own plane.
    pub fn from_facet(points: Vec<DVec3>, normal: DVec3) -> Vec<Polygon> {
        if is_convex(&points, normal) {
            return Self::new(points).into_iter().collect();
        }

        let (u, v) = plane_basis(normal);
        let ring: Vec<Coord<f64>> = points
            .iter()
            .map(|p| Coord {
                x: p.dot(u),
                y: p.dot(v),
            })
            .collect();
        let triangulation = geo::Polygon::new(LineString::from(ring), Vec::new()).earcut_triangles_raw();

        triangulation
            .triangle_indices
            .chunks_exact(3)
            .filter_map(|tri| {
                let corners: Vec<DVec3> = tri.iter().filter_map(|&i| points.get(i).copied()).collect();
                let polygon = Self::new(corners)?;
                // earcut does not promise a winding
                if polygon.plane.normal().dot(normal) < 0.0 {
                    Some(polygon.flipped())
                } else {
                    Some(polygon)
                }
            })
            .collect()
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    pub fn into_vertices(self) -> Vec<DVec3> {
        self.vertices
    }

    /// Reverses winding and plane in place.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.plane = self.plane.flip();
    }

    fn flipped(mut self) -> Self {
        self.flip();
        self
    }

    /// Splits this polygon by a plane.
    pub fn split(self, plane: &Plane) -> Split {
        let types: Vec<Classification> = self
            .vertices
            .iter()
            .map(|v| plane.classify_point(*v))
            .collect();
        let has_front = types.contains(&Classification::Front);
        let has_back = types.contains(&Classification::Back);

        match (has_front, has_back) {
            (false, false) => {
                if self.plane.normal().dot(plane.normal()) > 0.0 {
                    Split::CoplanarFront(self)
                } else {
                    Split::CoplanarBack(self)
                }
            }
            (true, false) => Split::Front(self),
            (false, true) => Split::Back(self),
            (true, true) => {
                let n = self.vertices.len();
                let mut front = Vec::with_capacity(n + 1);
                let mut back = Vec::with_capacity(n + 1);

                for i in 0..n {
                    let j = (i + 1) % n;
                    let (vi, vj) = (self.vertices[i], self.vertices[j]);
                    let (ti, tj) = (types[i], types[j]);

                    if ti != Classification::Back {
                        front.push(vi);
                    }
                    if ti != Classification::Front {
                        back.push(vi);
                    }

                    let crosses = matches!(
                        (ti, tj),
                        (Classification::Front, Classification::Back)
                            | (Classification::Back, Classification::Front)
                    );
                    if crosses {
                        let di = plane.signed_distance(vi);
                        let dj = plane.signed_distance(vj);
                        let intersection = vi.lerp(vj, di / (di - dj));
                        front.push(intersection);
                        back.push(intersection);
                    }
                }

                let plane = self.plane;
                Split::Spanning {
                    front: (front.len() >= 3).then(|| Polygon { vertices: front, plane }),
                    back: (back.len() >= 3).then(|| Polygon { vertices: back, plane }),
                }
            }
        }
    }
}

/// Returns true if every corner turns the same way about `normal`.
fn is_convex(points: &[DVec3], normal: DVec3) -> bool {
    let n = points.len();
    (0..n).all(|i| {
        let a = points[i];
        let b = points[(i + 1) % n];
        let c = points[(i + 2) % n];
        (b - a).cross(c - b).dot(normal) >= -PLANE_EPSILON
    })
}

/// Orthonormal basis `(u, v)` of the plane with normal `normal`,
/// right-handed so that `u × v = normal`.
pub(crate) fn plane_basis(normal: DVec3) -> (DVec3, DVec3) {
    let normal = normal.normalize_or_zero();
    let u = normal.any_orthonormal_vector();
    (u, normal.cross(u))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn triangle(z: f64) -> Polygon {
        Polygon::new(vec![
            DVec3::new(0.0, 0.0, z),
            DVec3::new(1.0, 0.0, z),
            DVec3::new(0.0, 1.0, z),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_rejects_degenerate() {
        assert!(Polygon::new(vec![DVec3::ZERO, DVec3::X]).is_none());
        assert!(Polygon::new(vec![DVec3::ZERO, DVec3::X, DVec3::new(2.0, 0.0, 0.0)]).is_none());
    }

    #[test]
    fn test_flip() {
        let mut poly = triangle(0.0);
        let first = poly.clone().into_vertices()[0];
        poly.flip();
        assert_relative_eq!(poly.plane().normal().z, -1.0);
        assert_eq!(poly.into_vertices()[2], first);
    }

    #[test]
    fn test_split_front_back() {
        let plane = Plane::new(DVec3::Z, 0.0);
        assert!(matches!(triangle(1.0).split(&plane), Split::Front(_)));
        assert!(matches!(triangle(-1.0).split(&plane), Split::Back(_)));
    }

    #[test]
    fn test_split_coplanar() {
        let up = Plane::new(DVec3::Z, 0.0);
        assert!(matches!(triangle(0.0).split(&up), Split::CoplanarFront(_)));
        assert!(matches!(triangle(0.0).split(&up.flip()), Split::CoplanarBack(_)));
    }

    #[test]
    fn test_split_spanning() {
        let plane = Plane::new(DVec3::X, 0.25);
        let Split::Spanning { front, back } = triangle(0.0).split(&plane) else {
            panic!("triangle should span the plane");
        };
        let front = front.unwrap();
        let back = back.unwrap();
        assert!(front.into_vertices().iter().all(|v| v.x >= 0.25 - 1e-12));
        assert!(back.into_vertices().iter().all(|v| v.x <= 0.25 + 1e-12));
    }

    #[test]
    fn test_from_facet_convex_passthrough() {
        let square = vec![DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y];
        assert_eq!(Polygon::from_facet(square, DVec3::Z).len(), 1);
    }

    #[test]
    fn test_from_facet_concave_is_triangulated() {
        let l_shape = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(2.0, 0.0, 0.0),
            DVec3::new(2.0, 1.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(1.0, 2.0, 0.0),
            DVec3::new(0.0, 2.0, 0.0),
        ];
        let pieces = Polygon::from_facet(l_shape, DVec3::Z);
        assert_eq!(pieces.len(), 4);
        assert!(pieces.iter().all(|p| p.plane().normal().z > 0.0));
    }

    #[test]
    fn test_plane_basis_is_right_handed() {
        let normal = DVec3::new(1.0, 2.0, 3.0).normalize();
        let (u, v) = plane_basis(normal);
        assert_relative_eq!(u.cross(v).dot(normal), 1.0, epsilon = 1e-12);
        assert_relative_eq!(u.dot(normal), 0.0, epsilon = 1e-12);
    }
}
