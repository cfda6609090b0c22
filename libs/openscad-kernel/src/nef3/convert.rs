//! # Polyhedron Conversion
//!
//! Moves solids between the half-edge form and plain indexed facets.

use super::Nef3;
use crate::error::KernelResult;
use crate::failure;
use crate::polyhedron::Polyhedron;
use config::constants::PLANE_EPSILON;

/// Result of exporting a solid as a polyhedron.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyhedronConversion {
    pub polyhedron: Polyhedron,
    /// True when the boundary is not a closed 2-manifold, so downstream
    /// consumers may see holes or dangling faces.
    pub corrupted: bool,
}

impl Nef3 {
    /// Creates a solid from an indexed polyhedron.
    ///
    /// Same requirements as [`Nef3::from_polygons`].
    pub fn from_polyhedron(polyhedron: &Polyhedron) -> KernelResult<Self> {
        Self::from_polygons(&polyhedron.facet_points())
    }

    /// Exports the boundary as an indexed polyhedron.
    ///
    /// # Errors
    ///
    /// - Assertion failure if the half-edge links are inconsistent
    /// - Precondition failure for facets with fewer than three corners or
    ///   corners off the facet plane
    ///
    /// Under `Continue` the offending facets are exported as they are.
    pub fn convert_to_polyhedron(&self) -> KernelResult<PolyhedronConversion> {
        failure::assertion(self.is_valid(), || {
            "half-edge structure is inconsistent".to_string()
        })?;

        let mut polyhedron = Polyhedron::with_capacity(self.vertices.len(), self.facets.len());
        for vertex in &self.vertices {
            polyhedron.add_vertex(*vertex);
        }

        for (index, facet) in self.facets.iter().enumerate() {
            let corners = self.facet_vertices(index);
            failure::precondition(corners.len() >= 3, || {
                format!("facet {index} has only {} corners", corners.len())
            })?;
            let off_plane = corners
                .iter()
                .map(|&v| (facet.normal.dot(self.vertices[v as usize]) - facet.offset).abs())
                .fold(0.0_f64, f64::max);
            failure::precondition(off_plane <= PLANE_EPSILON, || {
                format!("facet {index} is not planar (deviation {off_plane:e})")
            })?;
            polyhedron.add_facet(corners.into_iter().map(|v| v as usize).collect());
        }

        Ok(PolyhedronConversion {
            polyhedron,
            corrupted: !self.is_simple(),
        })
    }

    /// Builds a solid from kernel-generated facets, such as hull output.
    pub(crate) fn from_kernel_polyhedron(polyhedron: &Polyhedron) -> KernelResult<Self> {
        Self::from_kernel_polygons(&polyhedron.facet_points())
    }
}
