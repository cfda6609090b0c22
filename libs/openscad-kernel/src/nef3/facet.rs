//! # Half-Facets
//!
//! Every facet has two sides. The outward side keeps the stored winding
//! and normal; the inward side walks the cycle backwards with swapped
//! half-edge endpoints and a negated normal.

use super::Nef3;
use glam::DVec3;

/// Which side of a facet a [`Halffacet`] views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Outward,
    Inward,
}

/// One side of a boundary facet.
#[derive(Clone, Copy)]
pub struct Halffacet<'a> {
    nef: &'a Nef3,
    facet: usize,
    orientation: Orientation,
}

impl std::fmt::Debug for Halffacet<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Halffacet")
            .field("facet", &self.facet)
            .field("orientation", &self.orientation)
            .finish()
    }
}

impl<'a> Halffacet<'a> {
    /// Index of the underlying facet.
    pub fn facet_index(&self) -> usize {
        self.facet
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Unit normal pointing away from this side.
    pub fn normal(&self) -> DVec3 {
        let normal = self.nef.facets[self.facet].normal;
        match self.orientation {
            Orientation::Outward => normal,
            Orientation::Inward => -normal,
        }
    }

    /// The other side of the same facet.
    pub fn twin(&self) -> Halffacet<'a> {
        let orientation = match self.orientation {
            Orientation::Outward => Orientation::Inward,
            Orientation::Inward => Orientation::Outward,
        };
        Halffacet {
            orientation,
            ..*self
        }
    }

    /// Boundary half-edges in cycle order for this side.
    ///
    /// Consecutive half-edges meet: each `target()` is the next `source()`.
    pub fn halfedges(&self) -> Vec<HalfedgeRef<'a>> {
        let vertices = self.nef.vertices.as_slice();
        let cycle = self.nef.facet_cycle(self.facet);
        let edges = cycle.iter().map(|&h| &self.nef.halfedges[h as usize]);
        match self.orientation {
            Orientation::Outward => edges
                .map(|he| HalfedgeRef {
                    vertices,
                    source: he.source,
                    target: he.target,
                })
                .collect(),
            Orientation::Inward => edges
                .rev()
                .map(|he| HalfedgeRef {
                    vertices,
                    source: he.target,
                    target: he.source,
                })
                .collect(),
        }
    }
}

/// A directed boundary edge seen from one side of a facet.
#[derive(Debug, Clone, Copy)]
pub struct HalfedgeRef<'a> {
    vertices: &'a [DVec3],
    source: u32,
    target: u32,
}

impl HalfedgeRef<'_> {
    pub fn source(&self) -> DVec3 {
        self.vertices[self.source as usize]
    }

    pub fn target(&self) -> DVec3 {
        self.vertices[self.target as usize]
    }

    pub fn source_index(&self) -> usize {
        self.source as usize
    }

    pub fn target_index(&self) -> usize {
        self.target as usize
    }
}

impl Nef3 {
    /// Iterates over both sides of every facet.
    ///
    /// Each facet yields its outward side followed by its inward side.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glam::DVec3;
    /// use openscad_kernel::Nef3;
    ///
    /// let cube = Nef3::cuboid(DVec3::ZERO, DVec3::ONE).unwrap();
    /// let upward = cube
    ///     .halffacets()
    ///     .filter(|facet| facet.normal().dot(DVec3::Z) > 0.5)
    ///     .count();
    /// // top outward and bottom inward
    /// assert_eq!(upward, 2);
    /// ```
    pub fn halffacets(&self) -> impl Iterator<Item = Halffacet<'_>> + '_ {
        (0..self.facets.len()).flat_map(move |facet| {
            [Orientation::Outward, Orientation::Inward]
                .into_iter()
                .map(move |orientation| Halffacet {
                    nef: self,
                    facet,
                    orientation,
                })
        })
    }
}
