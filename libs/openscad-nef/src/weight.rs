//! # Weight Estimate
//!
//! Rough memory footprint of a volume, used by schedulers to order
//! operations. Only the relative ordering of weights is meaningful.

use crate::volume::NefPolyhedron;
use config::constants::{NEF2_BASE_SIZE, NEF2_FACE_SIZE, NEF2_HALFEDGE_SIZE, NEF2_VERTEX_SIZE};
use std::mem::size_of;

impl NefPolyhedron {
    /// Estimates the size of the volume in bytes.
    ///
    /// # Returns
    ///
    /// - 0 for the null volume
    /// - For planar regions: container size, a fixed payload overhead and
    ///   per-element sizes for vertices, half-edges and edges
    /// - For solids: container size plus the solid's own byte count
    ///
    /// A planar union can weigh less than its operands when the boolean
    /// engine merges away boundary vertices, e.g. an L shape joined with
    /// the square filling its notch. Solid weights do not shrink that way.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glam::DVec3;
    /// use openscad_kernel::Nef3;
    /// use openscad_nef::NefPolyhedron;
    ///
    /// assert_eq!(NefPolyhedron::Null.weight(), 0);
    /// let cube = NefPolyhedron::from(Nef3::cuboid(DVec3::ZERO, DVec3::ONE).unwrap());
    /// assert!(cube.weight() > 0);
    /// ```
    pub fn weight(&self) -> usize {
        match self {
            Self::Null => 0,
            Self::Nef2(nef) => {
                let explorer = nef.explorer();
                size_of::<Self>()
                    + NEF2_BASE_SIZE
                    + explorer.number_of_vertices() * NEF2_VERTEX_SIZE
                    + explorer.number_of_halfedges() * NEF2_HALFEDGE_SIZE
                    // Scaled by edges, not faces
                    + explorer.number_of_edges() * NEF2_FACE_SIZE
            }
            Self::Nef3(nef) => size_of::<Self>() + nef.bytes(),
        }
    }
}
