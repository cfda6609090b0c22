//! # Polyhedron
//!
//! Indexed facet list exchanged between the half-edge kernel and
//! consumers that only need geometry.

use glam::DVec3;

/// Vertices plus facets given as vertex index cycles.
///
/// Facets are wound counter-clockwise seen from outside.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyhedron {
    vertices: Vec<DVec3>,
    facets: Vec<Vec<usize>>,
}

impl Polyhedron {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, facets: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            facets: Vec::with_capacity(facets),
        }
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> usize {
        self.vertices.push(position);
        self.vertices.len() - 1
    }

    /// Adds a facet given by vertex indices.
    pub fn add_facet(&mut self, indices: Vec<usize>) {
        self.facets.push(indices);
    }

    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    pub fn facets(&self) -> &[Vec<usize>] {
        &self.facets
    }

    pub fn size_of_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn size_of_facets(&self) -> usize {
        self.facets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    /// Facet corner positions; out-of-range indices are skipped.
    pub fn facet_points(&self) -> Vec<Vec<DVec3>> {
        self.facets
            .iter()
            .map(|facet| facet.iter().filter_map(|&i| self.vertices.get(i).copied()).collect())
            .collect()
    }
}
