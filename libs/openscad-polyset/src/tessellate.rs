//! # Profile Tessellation
//!
//! Fills the closed contours of a [`Profile`] with triangles.
//!
//! ## Algorithm
//!
//! 1. Nesting depth of each closed contour = number of contours enclosing it
//! 2. Even depth contours are outlines, odd depth contours are holes of
//!    the outline directly enclosing them
//! 3. Each outline with its holes is ear-clipped
//! 4. Triangles are wound to face up (+Z) or down (-Z)

use crate::error::PolySetError;
use crate::polyset::PolySet;
use crate::profile::{Contour, Profile};
use config::constants::AREA_EPSILON;
use geo::{Coord, LineString, Polygon, TriangulateEarcut};
use glam::{DVec2, DVec3};
use tracing::debug;

/// Tessellates the closed contours of a profile into a polyset.
///
/// # Arguments
///
/// * `polyset` - Receives vertices and triangle faces
/// * `profile` - Contours to fill; open contours are ignored
/// * `z` - Height of the generated vertices
/// * `up` - Wind triangles counter-clockwise seen from +Z
///
/// # Returns
///
/// The number of triangles added.
///
/// # Example
///
/// ```rust
/// use glam::DVec2;
/// use openscad_polyset::{tessellate, Contour, PolySet, Profile};
///
/// let outer = Contour::closed(vec![
///     DVec2::new(0.0, 0.0), DVec2::new(4.0, 0.0),
///     DVec2::new(4.0, 4.0), DVec2::new(0.0, 4.0),
/// ]);
/// let hole = Contour::closed(vec![
///     DVec2::new(1.0, 1.0), DVec2::new(3.0, 1.0),
///     DVec2::new(3.0, 3.0), DVec2::new(1.0, 3.0),
/// ]);
/// let profile: Profile = [outer, hole].into_iter().collect();
///
/// let mut polyset = PolySet::new();
/// let triangles = tessellate(&mut polyset, &profile, 0.0, true).unwrap();
/// assert_eq!(triangles, 8);
/// ```
pub fn tessellate(
    polyset: &mut PolySet,
    profile: &Profile,
    z: f64,
    up: bool,
) -> Result<usize, PolySetError> {
    let contours: Vec<&Contour> = profile
        .contours()
        .iter()
        .filter(|c| c.closed && c.len() >= 3 && c.signed_area().abs() > AREA_EPSILON)
        .collect();

    let depth: Vec<usize> = (0..contours.len())
        .map(|i| {
            (0..contours.len())
                .filter(|&j| j != i && encloses(contours[j], contours[i]))
                .count()
        })
        .collect();

    let mut triangles = 0;
    for (i, outline) in contours.iter().enumerate() {
        if depth[i] % 2 != 0 {
            continue;
        }
        let holes: Vec<LineString<f64>> = (0..contours.len())
            .filter(|&j| depth[j] == depth[i] + 1 && encloses(outline, contours[j]))
            .map(|j| line_string(contours[j]))
            .collect();

        let raw = Polygon::new(line_string(outline), holes).earcut_triangles_raw();
        let corners: Vec<DVec2> = raw
            .vertices
            .chunks_exact(2)
            .map(|xy| DVec2::new(xy[0], xy[1]))
            .collect();

        polyset.reserve_vertices(corners.len())?;
        let base = polyset.vertex_count() as u32;
        for corner in &corners {
            polyset.add_vertex(DVec3::new(corner.x, corner.y, z));
        }

        for tri in raw.triangle_indices.chunks_exact(3) {
            let (a, b, c) = (tri[0], tri[1], tri[2]);
            let turn = (corners[b] - corners[a]).perp_dot(corners[c] - corners[a]);
            if turn.abs() <= AREA_EPSILON {
                continue;
            }
            let face = if (turn > 0.0) == up { [a, b, c] } else { [a, c, b] };
            polyset.add_face(face.iter().map(|&k| base + k as u32).collect())?;
            triangles += 1;
        }
    }

    debug!(contours = contours.len(), triangles, "Tessellated profile");
    Ok(triangles)
}

/// Copies the closed contours of a profile into the polyset's borders.
///
/// # Returns
///
/// The number of borders added.
pub fn border_to_polyset(polyset: &mut PolySet, profile: &Profile) -> usize {
    let mut added = 0;
    for contour in profile.contours().iter().filter(|c| c.closed && c.len() >= 3) {
        polyset.add_border(contour.points.clone());
        added += 1;
    }
    added
}

/// Returns true if `inner` lies inside `outer`.
fn encloses(outer: &Contour, inner: &Contour) -> bool {
    // Probe with a vertex off the outer boundary when one exists
    let probe = inner
        .points
        .iter()
        .copied()
        .find(|p| !outer.points.contains(p))
        .unwrap_or_else(|| (inner.points[0] + inner.points[1]) / 2.0);
    outer.contains_point(probe)
}

fn line_string(contour: &Contour) -> LineString<f64> {
    LineString::from(
        contour
            .points
            .iter()
            .map(|p| Coord { x: p.x, y: p.y })
            .collect::<Vec<_>>(),
    )
}
