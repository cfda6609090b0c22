//! # Half-Edge Solids
//!
//! Regularized 3D volumes stored as a closed half-edge surface.
//!
//! ## Data Structure
//!
//! Each facet owns one boundary cycle of half-edges linked through
//! `next`. Every half-edge of a closed 2-manifold boundary has a `twin`
//! running the opposite way on the neighbouring facet. A half-edge
//! without a twin marks an open or non-manifold boundary.
//!
//! ```text
//!         target
//!           ▲ │
//!   halfedge│ │twin
//!           │ ▼
//!         source
//! ```
//!
//! ## Boolean Operations
//!
//! Booleans run on the facet polygons through a BSP tree (csg.js
//! scheme), then the clipped polygons are welded back into a half-edge
//! surface. T-junctions left by clipping are split so that neighbouring
//! facets share their edges.

mod boolean;
mod bsp;
mod builder;
mod convert;
mod decomposition;
mod facet;
mod minkowski;
mod plane;
mod polygon;


pub use convert::PolyhedronConversion;
pub use facet::{HalfedgeRef, Halffacet, Orientation};
pub use minkowski::minkowski_sum_3;
pub use plane::Plane;

use crate::error::KernelResult;
use crate::failure;
use builder::BuildMode;
use glam::DVec3;
use polygon::Polygon;

/// Marker for an absent half-edge link.
pub const NO_INDEX: u32 = u32::MAX;

// =============================================================================
// ELEMENTS
// =============================================================================

/// A directed boundary edge of one facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfEdge {
    /// Vertex the edge leaves.
    pub source: u32,
    /// Vertex the edge reaches.
    pub target: u32,
    /// Following half-edge on the same facet cycle.
    pub next: u32,
    /// Opposite half-edge, or [`NO_INDEX`].
    pub twin: u32,
    /// Owning facet.
    pub facet: u32,
}

impl HalfEdge {
    /// Returns true if the edge is shared with a neighbouring facet.
    pub fn has_twin(&self) -> bool {
        self.twin != NO_INDEX
    }
}

/// A planar boundary facet with outward normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Facet {
    /// Any half-edge of the facet's boundary cycle.
    pub first_halfedge: u32,
    /// Unit outward normal.
    pub normal: DVec3,
    /// Plane offset along the normal.
    pub offset: f64,
}

// =============================================================================
// NEF3
// =============================================================================

/// A regularized solid bounded by planar facets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Nef3 {
    vertices: Vec<DVec3>,
    halfedges: Vec<HalfEdge>,
    facets: Vec<Facet>,
}

impl Nef3 {
    /// Creates the empty solid.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a solid from boundary polygons.
    ///
    /// Polygons must be planar, wound counter-clockwise seen from outside
    /// and together bound a closed volume. Nearly coincident vertices are
    /// welded.
    ///
    /// # Errors
    ///
    /// Precondition failure for degenerate or non-planar polygons and for
    /// polygon sets with open boundary edges.
    pub fn from_polygons(polygons: &[Vec<DVec3>]) -> KernelResult<Self> {
        builder::build(polygons, BuildMode::Strict)
    }

    /// Creates an axis-aligned box.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glam::DVec3;
    /// use openscad_kernel::Nef3;
    ///
    /// let cube = Nef3::cuboid(DVec3::ZERO, DVec3::ONE).unwrap();
    /// assert_eq!(cube.number_of_facets(), 6);
    /// assert!(cube.is_simple());
    /// ```
    pub fn cuboid(min: DVec3, max: DVec3) -> KernelResult<Self> {
        failure::precondition(min.cmplt(max).all(), || {
            format!("cuboid bounds are inverted or flat: {min} .. {max}")
        })?;
        Self::from_polygons(&cuboid_polygons(min, max))
    }

    /// Rebuilds a solid from polygons produced by the kernel itself.
    ///
    /// Slivers are dropped instead of being reported.
    pub(crate) fn from_kernel_polygons(polygons: &[Vec<DVec3>]) -> KernelResult<Self> {
        builder::build(polygons, BuildMode::Lenient)
    }

    // =========================================================================
    // BOOLEAN OPERATIONS
    // =========================================================================

    /// Replaces this solid with its union with `other`.
    pub fn join(&mut self, other: &Nef3) -> KernelResult<()> {
        self.apply(other, boolean::union)
    }

    /// Replaces this solid with its intersection with `other`.
    pub fn intersect(&mut self, other: &Nef3) -> KernelResult<()> {
        self.apply(other, boolean::intersection)
    }

    /// Removes `other` from this solid.
    pub fn difference(&mut self, other: &Nef3) -> KernelResult<()> {
        self.apply(other, boolean::difference)
    }

    fn apply(
        &mut self,
        other: &Nef3,
        op: fn(Vec<Polygon>, Vec<Polygon>) -> Vec<Polygon>,
    ) -> KernelResult<()> {
        let clipped = op(self.bsp_polygons(), other.bsp_polygons());
        let polygons: Vec<Vec<DVec3>> = clipped.into_iter().map(Polygon::into_vertices).collect();
        *self = Self::from_kernel_polygons(&polygons)?;
        Ok(())
    }

    fn bsp_polygons(&self) -> Vec<Polygon> {
        (0..self.facets.len())
            .flat_map(|facet| Polygon::from_facet(self.facet_points(facet), self.facets[facet].normal))
            .collect()
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    pub fn halfedges(&self) -> &[HalfEdge] {
        &self.halfedges
    }

    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    pub fn number_of_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn number_of_halfedges(&self) -> usize {
        self.halfedges.len()
    }

    /// Number of undirected edges; boundary half-edges count once.
    pub fn number_of_edges(&self) -> usize {
        let paired = self.halfedges.iter().filter(|h| h.has_twin()).count();
        paired / 2 + (self.halfedges.len() - paired)
    }

    pub fn number_of_facets(&self) -> usize {
        self.facets.len()
    }

    /// Returns true if the solid has no boundary.
    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    // =========================================================================
    // FACET CYCLES
    // =========================================================================

    /// Half-edge indices around a facet, starting at its first half-edge.
    pub(crate) fn facet_cycle(&self, facet: usize) -> Vec<u32> {
        let count = self.halfedges.len();
        let start = self.facets[facet].first_halfedge;
        let mut cycle = Vec::new();
        let mut current = start;
        while (current as usize) < count && cycle.len() < count {
            cycle.push(current);
            current = self.halfedges[current as usize].next;
            if current == start {
                break;
            }
        }
        cycle
    }

    /// Vertex indices around a facet.
    pub(crate) fn facet_vertices(&self, facet: usize) -> Vec<u32> {
        self.facet_cycle(facet)
            .into_iter()
            .map(|h| self.halfedges[h as usize].source)
            .collect()
    }

    /// Vertex positions around a facet.
    pub(crate) fn facet_points(&self, facet: usize) -> Vec<DVec3> {
        self.facet_vertices(facet)
            .into_iter()
            .map(|v| self.vertices[v as usize])
            .collect()
    }

    // =========================================================================
    // VALIDITY
    // =========================================================================

    /// Returns true if all links are in range and mutually consistent.
    ///
    /// Checks that cycles close, consecutive half-edges meet at a vertex,
    /// twins point back at each other with swapped endpoints and every
    /// half-edge sits on exactly one facet cycle.
    pub fn is_valid(&self) -> bool {
        let vertex_count = self.vertices.len() as u32;
        let halfedge_count = self.halfedges.len() as u32;
        let facet_count = self.facets.len() as u32;

        for (index, he) in self.halfedges.iter().enumerate() {
            if he.source >= vertex_count
                || he.target >= vertex_count
                || he.next >= halfedge_count
                || he.facet >= facet_count
                || he.source == he.target
            {
                return false;
            }
            let next = &self.halfedges[he.next as usize];
            if next.source != he.target || next.facet != he.facet {
                return false;
            }
            if he.has_twin() {
                let Some(twin) = self.halfedges.get(he.twin as usize) else {
                    return false;
                };
                if twin.twin as usize != index || twin.source != he.target || twin.target != he.source
                {
                    return false;
                }
            }
        }

        let mut visited = 0;
        for (index, facet) in self.facets.iter().enumerate() {
            let Some(first) = self.halfedges.get(facet.first_halfedge as usize) else {
                return false;
            };
            if first.facet as usize != index {
                return false;
            }
            let cycle = self.facet_cycle(index);
            let closes = cycle
                .last()
                .is_some_and(|&last| self.halfedges[last as usize].next == facet.first_halfedge);
            if cycle.len() < 3 || !closes {
                return false;
            }
            visited += cycle.len();
        }
        visited == self.halfedges.len()
    }

    /// Returns true if the boundary is a valid closed 2-manifold.
    pub fn is_simple(&self) -> bool {
        self.is_valid() && self.halfedges.iter().all(HalfEdge::has_twin)
    }

    // =========================================================================
    // MEASURES
    // =========================================================================

    /// Returns the axis-aligned bounding box as `(min, max)`.
    pub fn bounding_box(&self) -> Option<(DVec3, DVec3)> {
        let first = *self.vertices.first()?;
        Some(
            self.vertices
                .iter()
                .fold((first, first), |(min, max), v| (min.min(*v), max.max(*v))),
        )
    }

    /// Returns the enclosed volume (divergence theorem over facet fans).
    pub fn volume(&self) -> f64 {
        let mut six_volume = 0.0;
        for facet in 0..self.facets.len() {
            let points = self.facet_points(facet);
            let Some(&origin) = points.first() else {
                continue;
            };
            for pair in points[1..].windows(2) {
                six_volume += origin.dot(pair[0].cross(pair[1]));
            }
        }
        six_volume / 6.0
    }

    /// Returns the number of bytes held by this solid.
    pub fn bytes(&self) -> usize {
        std::mem::size_of::<Self>()
            + self.vertices.len() * std::mem::size_of::<DVec3>()
            + self.halfedges.len() * std::mem::size_of::<HalfEdge>()
            + self.facets.len() * std::mem::size_of::<Facet>()
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Outward-wound faces of an axis-aligned box.
pub(crate) fn cuboid_polygons(min: DVec3, max: DVec3) -> Vec<Vec<DVec3>> {
    let corner = |x: bool, y: bool, z: bool| {
        DVec3::new(
            if x { max.x } else { min.x },
            if y { max.y } else { min.y },
            if z { max.z } else { min.z },
        )
    };
    vec![
        // bottom (-Z)
        vec![corner(false, false, false), corner(false, true, false), corner(true, true, false), corner(true, false, false)],
        // top (+Z)
        vec![corner(false, false, true), corner(true, false, true), corner(true, true, true), corner(false, true, true)],
        // front (-Y)
        vec![corner(false, false, false), corner(true, false, false), corner(true, false, true), corner(false, false, true)],
        // back (+Y)
        vec![corner(false, true, false), corner(false, true, true), corner(true, true, true), corner(true, true, false)],
        // left (-X)
        vec![corner(false, false, false), corner(false, false, true), corner(false, true, true), corner(false, true, false)],
        // right (+X)
        vec![corner(true, false, false), corner(true, true, false), corner(true, true, true), corner(true, false, true)],
    ]
}
