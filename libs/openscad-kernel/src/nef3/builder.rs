//! # Half-Edge Builder
//!
//! Turns a polygon soup into a [`Nef3`] half-edge surface.
//!
//! ## Steps
//!
//! 1. Weld vertices closer than [`VERTEX_MERGE_EPSILON`]
//! 2. Drop repeated corners and check each facet
//! 3. Split edges at vertices lying on them (T-junctions)
//! 4. Compact the vertex list to the vertices in use
//! 5. Link half-edge cycles and pair opposite half-edges as twins

use super::plane::newell_normal;
use super::{Facet, HalfEdge, Nef3, NO_INDEX};
use crate::error::KernelResult;
use crate::failure;
use config::constants::{AREA_EPSILON, PLANE_EPSILON, VERTEX_MERGE_EPSILON};
use glam::DVec3;
use std::collections::HashMap;
use tracing::debug;

/// How strictly the input polygons are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BuildMode {
    /// Caller input: degenerate or non-planar facets and open boundaries
    /// are precondition failures.
    Strict,
    /// Kernel output: slivers are silently dropped.
    Lenient,
}

pub(crate) fn build(polygons: &[Vec<DVec3>], mode: BuildMode) -> KernelResult<Nef3> {
    let mut welder = VertexWelder::default();
    let mut loops: Vec<Vec<u32>> = Vec::with_capacity(polygons.len());
    let mut dropped = 0usize;

    for (index, polygon) in polygons.iter().enumerate() {
        let mut corners: Vec<u32> = polygon.iter().map(|p| welder.insert(*p)).collect();
        corners.dedup();
        while corners.len() > 1 && corners.first() == corners.last() {
            corners.pop();
        }

        let points = welder.points(&corners);
        let degenerate = corners.len() < 3 || newell_normal(&points).length() <= AREA_EPSILON;

        if mode == BuildMode::Strict {
            failure::precondition(!degenerate, || format!("facet {index} is degenerate"))?;
            failure::precondition(degenerate || is_planar(&points), || {
                format!("facet {index} is not planar")
            })?;
        }
        if degenerate {
            dropped += 1;
            continue;
        }
        loops.push(corners);
    }

    let split = split_t_junctions(&mut loops, &welder.positions);
    let (vertices, loops) = compact(welder.positions, loops);
    let nef = link(vertices, &loops);

    debug!(
        facets = nef.facets.len(),
        vertices = nef.vertices.len(),
        dropped,
        split,
        "Built half-edge solid"
    );

    failure::assertion(nef.is_valid(), || "built half-edge structure is inconsistent".to_string())?;
    if mode == BuildMode::Strict {
        failure::precondition(nef.is_simple(), || {
            "polygons do not bound a closed volume".to_string()
        })?;
    }
    Ok(nef)
}

// =============================================================================
// WELDING
// =============================================================================

/// Grid-hashed vertex welder.
#[derive(Default)]
struct VertexWelder {
    positions: Vec<DVec3>,
    grid: HashMap<[i64; 3], Vec<u32>>,
}

impl VertexWelder {
    const CELL: f64 = VERTEX_MERGE_EPSILON * 2.0;

    fn insert(&mut self, point: DVec3) -> u32 {
        let cell = Self::cell(point);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let key = [cell[0] + dx, cell[1] + dy, cell[2] + dz];
                    let Some(bucket) = self.grid.get(&key) else {
                        continue;
                    };
                    if let Some(&found) = bucket
                        .iter()
                        .find(|&&i| self.positions[i as usize].distance(point) < VERTEX_MERGE_EPSILON)
                    {
                        return found;
                    }
                }
            }
        }

        let index = self.positions.len() as u32;
        self.positions.push(point);
        self.grid.entry(cell).or_default().push(index);
        index
    }

    fn points(&self, indices: &[u32]) -> Vec<DVec3> {
        indices.iter().map(|&i| self.positions[i as usize]).collect()
    }

    fn cell(point: DVec3) -> [i64; 3] {
        let scaled = (point / Self::CELL).floor();
        [scaled.x as i64, scaled.y as i64, scaled.z as i64]
    }
}

fn is_planar(points: &[DVec3]) -> bool {
    let normal = newell_normal(points).normalize_or_zero();
    let centroid = points.iter().copied().sum::<DVec3>() / points.len() as f64;
    let offset = normal.dot(centroid);
    points
        .iter()
        .all(|p| (normal.dot(*p) - offset).abs() <= PLANE_EPSILON)
}

// =============================================================================
// T-JUNCTIONS
// =============================================================================

/// Inserts every vertex lying strictly inside an edge into that edge.
///
/// # Returns
///
/// The number of inserted corners.
fn split_t_junctions(loops: &mut [Vec<u32>], positions: &[DVec3]) -> usize {
    let mut used: Vec<u32> = loops.iter().flatten().copied().collect();
    used.sort_unstable();
    used.dedup();

    let mut inserted = 0;
    for corners in loops.iter_mut() {
        let n = corners.len();
        let mut split = Vec::with_capacity(n);
        for i in 0..n {
            let (a, b) = (corners[i], corners[(i + 1) % n]);
            split.push(a);

            let (pa, pb) = (positions[a as usize], positions[b as usize]);
            let edge = pb - pa;
            let length_squared = edge.length_squared();
            let lo = pa.min(pb) - DVec3::splat(VERTEX_MERGE_EPSILON);
            let hi = pa.max(pb) + DVec3::splat(VERTEX_MERGE_EPSILON);

            let mut on_edge: Vec<(f64, u32)> = used
                .iter()
                .filter(|&&c| c != a && c != b)
                .filter_map(|&c| {
                    let pc = positions[c as usize];
                    if pc.cmplt(lo).any() || pc.cmpgt(hi).any() {
                        return None;
                    }
                    let t = (pc - pa).dot(edge) / length_squared;
                    if t <= 0.0 || t >= 1.0 {
                        return None;
                    }
                    ((pa + edge * t).distance(pc) < VERTEX_MERGE_EPSILON).then_some((t, c))
                })
                .collect();
            on_edge.sort_by(|x, y| x.0.total_cmp(&y.0));
            inserted += on_edge.len();
            split.extend(on_edge.into_iter().map(|(_, c)| c));
        }
        *corners = split;
    }
    inserted
}

// =============================================================================
// LINKING
// =============================================================================

/// Keeps only referenced vertices, renumbering the loops.
fn compact(positions: Vec<DVec3>, loops: Vec<Vec<u32>>) -> (Vec<DVec3>, Vec<Vec<u32>>) {
    let mut remap = vec![NO_INDEX; positions.len()];
    let mut vertices = Vec::new();
    let loops = loops
        .into_iter()
        .map(|corners| {
            corners
                .into_iter()
                .map(|old| {
                    let slot = &mut remap[old as usize];
                    if *slot == NO_INDEX {
                        *slot = vertices.len() as u32;
                        vertices.push(positions[old as usize]);
                    }
                    *slot
                })
                .collect()
        })
        .collect();
    (vertices, loops)
}

fn link(vertices: Vec<DVec3>, loops: &[Vec<u32>]) -> Nef3 {
    let total: usize = loops.iter().map(Vec::len).sum();
    let mut halfedges = Vec::with_capacity(total);
    let mut facets = Vec::with_capacity(loops.len());

    for (facet, corners) in loops.iter().enumerate() {
        let base = halfedges.len() as u32;
        let n = corners.len() as u32;
        for i in 0..n {
            halfedges.push(HalfEdge {
                source: corners[i as usize],
                target: corners[((i + 1) % n) as usize],
                next: base + (i + 1) % n,
                twin: NO_INDEX,
                facet: facet as u32,
            });
        }

        let points: Vec<DVec3> = corners.iter().map(|&v| vertices[v as usize]).collect();
        let normal = newell_normal(&points).normalize_or_zero();
        let centroid = points.iter().copied().sum::<DVec3>() / points.len() as f64;
        facets.push(Facet {
            first_halfedge: base,
            normal,
            offset: normal.dot(centroid),
        });
    }

    // First half-edge per directed edge wins; duplicates stay unpaired
    let mut directed: HashMap<(u32, u32), u32> = HashMap::with_capacity(halfedges.len());
    for (index, he) in halfedges.iter().enumerate() {
        directed.entry((he.source, he.target)).or_insert(index as u32);
    }
    for index in 0..halfedges.len() {
        let he = halfedges[index];
        if directed.get(&(he.source, he.target)) != Some(&(index as u32)) {
            continue;
        }
        if let Some(&twin) = directed.get(&(he.target, he.source)) {
            halfedges[index].twin = twin;
        }
    }

    Nef3 {
        vertices,
        halfedges,
        facets,
    }
}
