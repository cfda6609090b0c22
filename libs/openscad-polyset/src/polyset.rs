//! # PolySet Data Structure
//!
//! Indexed polygon faces for 3D geometry plus border outlines for 2D
//! geometry.

use crate::error::PolySetError;
use config::constants::{MAX_VERTICES, VERTEX_MERGE_EPSILON};
use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

/// A set of polygons with shared vertices.
///
/// 3D geometry uses the faces only. 2D geometry additionally carries its
/// outline rings as borders, with faces covering the interior at z = 0.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use openscad_polyset::PolySet;
///
/// let mut polyset = PolySet::new();
/// polyset.append_polygon(&[DVec3::ZERO, DVec3::X, DVec3::Y]).unwrap();
/// assert_eq!(polyset.vertex_count(), 3);
/// assert_eq!(polyset.face_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolySet {
    /// Vertex positions
    vertices: Vec<DVec3>,
    /// Faces as vertex index cycles, counter-clockwise seen from outside
    faces: Vec<Vec<u32>>,
    /// Closed outline rings of 2D geometry
    borders: Vec<Vec<DVec2>>,
    /// True when the geometry is planar
    is_2d: bool,
}

impl PolySet {
    /// Creates an empty polyset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a polyset with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
            ..Self::default()
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns the number of border rings.
    #[inline]
    pub fn border_count(&self) -> usize {
        self.borders.len()
    }

    /// Returns true if the polyset holds no faces and no borders.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty() && self.borders.is_empty()
    }

    #[inline]
    pub fn is_2d(&self) -> bool {
        self.is_2d
    }

    pub fn set_2d(&mut self, is_2d: bool) {
        self.is_2d = is_2d;
    }

    /// Fails if adding `additional` vertices would exceed [`MAX_VERTICES`].
    pub fn reserve_vertices(&mut self, additional: usize) -> Result<(), PolySetError> {
        let count = self.vertices.len() + additional;
        if count > MAX_VERTICES {
            return Err(PolySetError::TooManyVertices {
                count,
                max: MAX_VERTICES,
            });
        }
        self.vertices.reserve(additional);
        Ok(())
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Adds a face by vertex indices.
    ///
    /// # Errors
    ///
    /// Fails for fewer than three corners or an index without a vertex.
    pub fn add_face(&mut self, indices: Vec<u32>) -> Result<(), PolySetError> {
        if indices.len() < 3 {
            return Err(PolySetError::invalid_face(format!(
                "face needs at least 3 corners, got {}",
                indices.len()
            )));
        }
        let vertex_count = self.vertices.len();
        if let Some(bad) = indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(PolySetError::invalid_face(format!(
                "vertex index {bad} out of range ({vertex_count} vertices)"
            )));
        }
        self.faces.push(indices);
        Ok(())
    }

    /// Adds a face together with its own copies of the corner vertices.
    pub fn append_polygon(&mut self, corners: &[DVec3]) -> Result<(), PolySetError> {
        self.reserve_vertices(corners.len())?;
        let indices = corners.iter().map(|c| self.add_vertex(*c)).collect();
        self.add_face(indices)
    }

    /// Adds an outline ring.
    pub fn add_border(&mut self, ring: Vec<DVec2>) {
        self.borders.push(ring);
    }

    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    #[inline]
    pub fn faces(&self) -> &[Vec<u32>] {
        &self.faces
    }

    #[inline]
    pub fn borders(&self) -> &[Vec<DVec2>] {
        &self.borders
    }

    /// Corner positions of one face.
    pub fn face_points(&self, face: usize) -> Vec<DVec3> {
        self.faces[face]
            .iter()
            .map(|&i| self.vertices[i as usize])
            .collect()
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let Some(&first) = self.vertices.first() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };
        self.vertices[1..]
            .iter()
            .fold((first, first), |(min, max), v| (min.min(*v), max.max(*v)))
    }

    /// Validates the polyset for correctness.
    ///
    /// Checks:
    /// - All face indices are valid
    /// - No face repeats a corner
    /// - No face has (almost) zero area
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertices.len();
        self.faces.iter().all(|face| {
            if face.len() < 3 || face.iter().any(|&i| i as usize >= vertex_count) {
                return false;
            }
            let mut sorted = face.clone();
            sorted.sort_unstable();
            sorted.dedup();
            if sorted.len() != face.len() {
                return false;
            }
            let origin = self.vertices[face[0] as usize];
            let twice_area: DVec3 = face[1..]
                .windows(2)
                .map(|pair| {
                    (self.vertices[pair[0] as usize] - origin)
                        .cross(self.vertices[pair[1] as usize] - origin)
                })
                .sum();
            twice_area.length() >= VERTEX_MERGE_EPSILON
        })
    }

    /// Fan-triangulates every face.
    ///
    /// Exact for the convex faces produced by the kernel and tessellation.
    pub fn triangles(&self) -> Vec<[u32; 3]> {
        self.faces
            .iter()
            .flat_map(|face| face[1..].windows(2).map(move |pair| [face[0], pair[0], pair[1]]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> PolySet {
        let mut polyset = PolySet::new();
        polyset
            .append_polygon(&[DVec3::ZERO, DVec3::X, DVec3::Y])
            .unwrap();
        polyset
    }

    #[test]
    fn test_polyset_new() {
        let polyset = PolySet::new();
        assert!(polyset.is_empty());
        assert!(!polyset.is_2d());
        assert_eq!(polyset.vertex_count(), 0);
        assert_eq!(polyset.face_count(), 0);
    }

    #[test]
    fn test_add_face_checks_indices() {
        let mut polyset = PolySet::new();
        polyset.add_vertex(DVec3::ZERO);
        let err = polyset.add_face(vec![0, 1, 2]).unwrap_err();
        assert!(matches!(err, PolySetError::InvalidFace { .. }));
    }

    #[test]
    fn test_add_face_needs_three_corners() {
        let mut polyset = unit_triangle();
        assert!(polyset.add_face(vec![0, 1]).is_err());
    }

    #[test]
    fn test_borders_make_polyset_non_empty() {
        let mut polyset = PolySet::new();
        polyset.add_border(vec![DVec2::ZERO, DVec2::X, DVec2::Y]);
        assert!(!polyset.is_empty());
        assert_eq!(polyset.border_count(), 1);
    }

    #[test]
    fn test_bounding_box() {
        let mut polyset = PolySet::new();
        polyset.add_vertex(DVec3::new(-1.0, -2.0, -3.0));
        polyset.add_vertex(DVec3::new(4.0, 5.0, 6.0));
        let (min, max) = polyset.bounding_box();
        assert_eq!(min, DVec3::new(-1.0, -2.0, -3.0));
        assert_eq!(max, DVec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_validate() {
        assert!(unit_triangle().validate());

        let mut repeated = unit_triangle();
        repeated.add_face(vec![0, 1, 1]).unwrap();
        assert!(!repeated.validate());

        let mut flat = PolySet::new();
        flat.append_polygon(&[DVec3::ZERO, DVec3::X, DVec3::new(2.0, 0.0, 0.0)])
            .unwrap();
        assert!(!flat.validate());
    }

    #[test]
    fn test_triangles_fan() {
        let mut polyset = PolySet::new();
        polyset
            .append_polygon(&[DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y])
            .unwrap();
        assert_eq!(polyset.triangles(), vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn test_reserve_vertices_limit() {
        let mut polyset = PolySet::new();
        let err = polyset.reserve_vertices(MAX_VERTICES + 1).unwrap_err();
        assert!(matches!(err, PolySetError::TooManyVertices { .. }));
    }

    #[test]
    fn test_serde_keeps_borders_and_flag() {
        let mut polyset = unit_triangle();
        polyset.set_2d(true);
        polyset.add_border(vec![DVec2::ZERO, DVec2::X, DVec2::Y]);
        let json = serde_json::to_string(&polyset).unwrap();
        let restored: PolySet = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, polyset);
    }
}
