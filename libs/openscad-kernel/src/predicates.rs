//! # Planar Predicates
//!
//! Orientation and simplicity tests for 2D contours, built on the
//! adaptive-precision predicates from `robust`.

use config::constants::AREA_EPSILON;
use glam::DVec2;
use robust::{orient2d, Coord};

/// Orientation of `c` relative to the directed line `a -> b`.
///
/// Positive when the triple turns counter-clockwise, negative when it
/// turns clockwise and exactly zero when the points are collinear.
pub fn orientation(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    orient2d(coord(a), coord(b), coord(c))
}

fn coord(p: DVec2) -> Coord<f64> {
    Coord { x: p.x, y: p.y }
}

/// Signed area of a contour (shoelace formula).
///
/// Positive for counter-clockwise contours.
pub fn signed_area(points: &[DVec2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();
    twice * 0.5
}

/// Returns true if the contour bounds a simple polygon.
///
/// A simple polygon has at least three vertices, non-zero area and no
/// edge touching another edge except its neighbours at shared vertices.
/// Collinear neighbours are accepted as long as the boundary does not
/// double back on itself.
///
/// # Example
///
/// ```rust
/// use glam::DVec2;
/// use openscad_kernel::predicates::is_simple_polygon;
///
/// let square = [DVec2::ZERO, DVec2::X, DVec2::ONE, DVec2::Y];
/// assert!(is_simple_polygon(&square));
///
/// let bowtie = [DVec2::ZERO, DVec2::ONE, DVec2::X, DVec2::Y];
/// assert!(!is_simple_polygon(&bowtie));
/// ```
pub fn is_simple_polygon(points: &[DVec2]) -> bool {
    let n = points.len();
    if n < 3 || signed_area(points).abs() <= AREA_EPSILON {
        return false;
    }

    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let c = points[(i + 2) % n];
        if a == b {
            return false;
        }
        // Neighbouring edges may only meet at their shared vertex
        if orientation(a, b, c) == 0.0 && (b - a).dot(c - b) < 0.0 {
            return false;
        }
    }

    for i in 0..n {
        let (p1, p2) = (points[i], points[(i + 1) % n]);
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let (q1, q2) = (points[j], points[(j + 1) % n]);
            if segments_intersect(p1, p2, q1, q2) {
                return false;
            }
        }
    }

    true
}

/// Returns true if the closed segments `p1p2` and `q1q2` share a point.
pub fn segments_intersect(p1: DVec2, p2: DVec2, q1: DVec2, q2: DVec2) -> bool {
    let d1 = orientation(q1, q2, p1);
    let d2 = orientation(q1, q2, p2);
    let d3 = orientation(p1, p2, q1);
    let d4 = orientation(p1, p2, q2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_segment(q1, q2, p1))
        || (d2 == 0.0 && on_segment(q1, q2, p2))
        || (d3 == 0.0 && on_segment(p1, p2, q1))
        || (d4 == 0.0 && on_segment(p1, p2, q2))
}

/// Returns true if `p`, known to be collinear with `a` and `b`, lies
/// between them.
fn on_segment(a: DVec2, b: DVec2, p: DVec2) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Returns true if the contour turns the same way at every vertex.
///
/// Collinear vertices are ignored.
pub fn is_convex_contour(points: &[DVec2]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut sign = 0.0_f64;
    for i in 0..n {
        let turn = orientation(points[i], points[(i + 1) % n], points[(i + 2) % n]);
        if turn == 0.0 {
            continue;
        }
        if sign == 0.0 {
            sign = turn.signum();
        } else if turn.signum() != sign {
            return false;
        }
    }
    sign != 0.0
}
