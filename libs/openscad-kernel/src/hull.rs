//! # Convex Hull
//!
//! 3D convex hull using the QuickHull algorithm (Barber, Dobkin and
//! Huhdanpaa).
//!
//! ## Algorithm Steps
//!
//! 1. Find extreme points on each axis
//! 2. Build an initial tetrahedron from 4 non-coplanar points
//! 3. Assign remaining points to faces they're outside of
//! 4. For each face with outside points:
//!    a. Find farthest point
//!    b. Find horizon edges (boundary of visible faces)
//!    c. Create new faces from horizon to farthest point
//!    d. Reassign outside points to new faces
//! 5. Repeat until no faces have outside points

use crate::error::KernelResult;
use crate::failure;
use crate::polyhedron::Polyhedron;
use config::constants::{approx_zero, EPSILON};
use glam::DVec3;
use std::collections::HashMap;

/// Computes the convex hull of a point set.
///
/// # Arguments
///
/// * `points` - Points to wrap (at least 4 non-coplanar)
///
/// # Returns
///
/// A triangulated polyhedron with outward-facing facets. Empty when the
/// points are degenerate and the failure behaviour lets the call continue.
///
/// # Errors
///
/// Precondition failure for fewer than four distinct points or points
/// without volume.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use openscad_kernel::hull::convex_hull;
///
/// let points = [DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z];
/// let hull = convex_hull(&points).unwrap();
/// assert_eq!(hull.size_of_facets(), 4);
/// ```
pub fn convex_hull(points: &[DVec3]) -> KernelResult<Polyhedron> {
    let unique = remove_duplicates(points);
    failure::precondition(unique.len() >= 4, || {
        format!("convex hull needs at least 4 distinct points, got {}", unique.len())
    })?;
    if unique.len() < 4 {
        return Ok(Polyhedron::new());
    }

    let Some(faces) = initial_simplex(&unique)? else {
        return Ok(Polyhedron::new());
    };
    let faces = expand(faces, &unique);
    Ok(faces_to_polyhedron(&faces, &unique))
}

/// A triangular hull face.
#[derive(Debug, Clone)]
struct HullFace {
    vertices: [usize; 3],
    normal: DVec3,
    distance: f64,
    /// Indices of points in front of this face
    outside: Vec<usize>,
}

impl HullFace {
    fn new(vertices: [usize; 3], points: &[DVec3]) -> Self {
        let [a, b, c] = vertices.map(|i| points[i]);
        let normal = (b - a).cross(c - a).normalize_or_zero();
        Self {
            vertices,
            normal,
            distance: normal.dot(a),
            outside: Vec::new(),
        }
    }

    /// Creates the face wound so that `interior` lies behind it.
    fn facing_away(vertices: [usize; 3], interior: DVec3, points: &[DVec3]) -> Self {
        let face = Self::new(vertices, points);
        if face.signed_distance(interior) > 0.0 {
            let [a, b, c] = vertices;
            Self::new([a, c, b], points)
        } else {
            face
        }
    }

    fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.distance
    }

    fn is_outside(&self, point: DVec3) -> bool {
        self.signed_distance(point) > EPSILON
    }

    fn farthest(&self, points: &[DVec3]) -> Option<usize> {
        self.outside.iter().copied().max_by(|&a, &b| {
            self.signed_distance(points[a])
                .total_cmp(&self.signed_distance(points[b]))
        })
    }

    fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.vertices;
        [(a, b), (b, c), (c, a)]
    }
}

fn remove_duplicates(points: &[DVec3]) -> Vec<DVec3> {
    let mut unique: Vec<DVec3> = Vec::with_capacity(points.len());
    for p in points {
        if !unique.iter().any(|u| approx_zero(u.distance(*p))) {
            unique.push(*p);
        }
    }
    unique
}

/// Builds the starting tetrahedron and distributes the other points.
fn initial_simplex(points: &[DVec3]) -> KernelResult<Option<Vec<HullFace>>> {
    let mut extremes = [0usize; 6];
    for (i, p) in points.iter().enumerate() {
        for axis in 0..3 {
            if p[axis] < points[extremes[axis * 2]][axis] {
                extremes[axis * 2] = i;
            }
            if p[axis] > points[extremes[axis * 2 + 1]][axis] {
                extremes[axis * 2 + 1] = i;
            }
        }
    }

    let mut p0 = extremes[0];
    let mut p1 = extremes[1];
    let mut widest = 0.0;
    for (k, &a) in extremes.iter().enumerate() {
        for &b in &extremes[k + 1..] {
            let d = points[a].distance_squared(points[b]);
            if d > widest {
                (p0, p1, widest) = (a, b, d);
            }
        }
    }

    let axis = (points[p1] - points[p0]).normalize_or_zero();
    let p2 = farthest_by(points, &[p0, p1], |p| {
        let v = p - points[p0];
        (v - axis * v.dot(axis)).length()
    });
    failure::precondition(p2.is_some(), || "hull points are collinear".to_string())?;
    let Some(p2) = p2 else {
        return Ok(None);
    };

    let normal = (points[p1] - points[p0]).cross(points[p2] - points[p0]).normalize_or_zero();
    let p3 = farthest_by(points, &[p0, p1, p2], |p| normal.dot(p - points[p0]).abs());
    failure::precondition(p3.is_some(), || "hull points are coplanar".to_string())?;
    let Some(p3) = p3 else {
        return Ok(None);
    };

    let centroid = (points[p0] + points[p1] + points[p2] + points[p3]) / 4.0;
    let mut faces = vec![
        HullFace::facing_away([p0, p1, p2], centroid, points),
        HullFace::facing_away([p0, p2, p3], centroid, points),
        HullFace::facing_away([p0, p3, p1], centroid, points),
        HullFace::facing_away([p1, p3, p2], centroid, points),
    ];

    let corners = [p0, p1, p2, p3];
    let rest: Vec<usize> = (0..points.len()).filter(|i| !corners.contains(i)).collect();
    assign(&mut faces, &rest, points);
    Ok(Some(faces))
}

/// Returns the index maximizing `measure`, skipping `exclude`, when the
/// maximum exceeds [`EPSILON`].
fn farthest_by(points: &[DVec3], exclude: &[usize], measure: impl Fn(DVec3) -> f64) -> Option<usize> {
    let mut best = None;
    let mut best_value = EPSILON;
    for (i, p) in points.iter().enumerate() {
        if exclude.contains(&i) {
            continue;
        }
        let value = measure(*p);
        if value > best_value {
            best_value = value;
            best = Some(i);
        }
    }
    best
}

fn assign(faces: &mut [HullFace], candidates: &[usize], points: &[DVec3]) {
    for &idx in candidates {
        if let Some(face) = faces.iter_mut().find(|f| f.is_outside(points[idx])) {
            face.outside.push(idx);
        }
    }
}

/// Grows the hull until no point lies outside any face.
fn expand(mut faces: Vec<HullFace>, points: &[DVec3]) -> Vec<HullFace> {
    // Each round fixes one point on the hull
    for _ in 0..points.len() {
        let Some(apex) = faces.iter().find_map(|f| f.farthest(points)) else {
            break;
        };
        let apex_point = points[apex];

        let (visible, kept): (Vec<HullFace>, Vec<HullFace>) =
            faces.into_iter().partition(|f| f.is_outside(apex_point));
        faces = kept;

        // Horizon edges belong to exactly one visible face
        let mut edge_count: HashMap<(usize, usize), usize> = HashMap::new();
        for face in &visible {
            for (a, b) in face.edges() {
                *edge_count.entry((a.min(b), a.max(b))).or_insert(0) += 1;
            }
        }

        let interior = hull_interior(&faces, &visible, points);
        let first_new = faces.len();
        for face in &visible {
            for (a, b) in face.edges() {
                if edge_count[&(a.min(b), a.max(b))] == 1 {
                    faces.push(HullFace::facing_away([a, b, apex], interior, points));
                }
            }
        }

        let orphans: Vec<usize> = visible
            .into_iter()
            .flat_map(|f| f.outside)
            .filter(|&p| p != apex)
            .collect();
        assign(&mut faces[first_new..], &orphans, points);
    }
    faces
}

/// A point strictly inside the current hull.
fn hull_interior(kept: &[HullFace], visible: &[HullFace], points: &[DVec3]) -> DVec3 {
    let mut seen = vec![false; points.len()];
    let mut sum = DVec3::ZERO;
    let mut count = 0;
    for face in kept.iter().chain(visible) {
        for &v in &face.vertices {
            if !seen[v] {
                seen[v] = true;
                sum += points[v];
                count += 1;
            }
        }
    }
    if count > 0 {
        sum / count as f64
    } else {
        DVec3::ZERO
    }
}

fn faces_to_polyhedron(faces: &[HullFace], points: &[DVec3]) -> Polyhedron {
    let mut remap: Vec<Option<usize>> = vec![None; points.len()];
    let mut polyhedron = Polyhedron::with_capacity(points.len(), faces.len());
    for face in faces {
        let indices = face
            .vertices
            .iter()
            .map(|&v| *remap[v].get_or_insert_with(|| polyhedron.add_vertex(points[v])))
            .collect();
        polyhedron.add_facet(indices);
    }
    polyhedron
}
