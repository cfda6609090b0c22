//! # Solid Boolean Operations
//!
//! Polygon-level booleans on BSP trees, following csg.js:
//! - Union: A.clipTo(B); B.clipTo(A); B.invert(); B.clipTo(A); B.invert(); combine
//! - Difference: A.invert(); A.clipTo(B); B.clipTo(A); B.invert(); B.clipTo(A); B.invert(); combine; invert
//! - Intersection: A.invert(); B.clipTo(A); B.invert(); A.clipTo(B); B.clipTo(A); combine; invert

use super::bsp::BspNode;
use super::polygon::Polygon;

/// Boundary polygons of `a ∪ b`.
pub(crate) fn union(a: Vec<Polygon>, b: Vec<Polygon>) -> Vec<Polygon> {
    if a.is_empty() {
        return b;
    }
    if b.is_empty() {
        return a;
    }

    let mut bsp_a = BspNode::new(a);
    let mut bsp_b = BspNode::new(b);

    bsp_a.clip_to(&bsp_b);
    bsp_b.clip_to(&bsp_a);
    // Drop B's faces that are coplanar with A's
    bsp_b.invert();
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();

    let mut result = bsp_a.all_polygons();
    result.extend(bsp_b.all_polygons());
    result
}

/// Boundary polygons of `a \ b`.
pub(crate) fn difference(a: Vec<Polygon>, b: Vec<Polygon>) -> Vec<Polygon> {
    if a.is_empty() {
        return Vec::new();
    }
    if b.is_empty() {
        return a;
    }

    let mut bsp_a = BspNode::new(a);
    let mut bsp_b = BspNode::new(b);

    // A - B = ~(~A | B)
    bsp_a.invert();
    bsp_a.clip_to(&bsp_b);
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();

    let mut result = bsp_a.all_polygons();
    result.extend(bsp_b.all_polygons());
    flip_all(result)
}

/// Boundary polygons of `a ∩ b`.
pub(crate) fn intersection(a: Vec<Polygon>, b: Vec<Polygon>) -> Vec<Polygon> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let mut bsp_a = BspNode::new(a);
    let mut bsp_b = BspNode::new(b);

    // A & B = ~(~A | ~B)
    bsp_a.invert();
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();
    bsp_a.clip_to(&bsp_b);
    bsp_b.clip_to(&bsp_a);

    let mut result = bsp_a.all_polygons();
    result.extend(bsp_b.all_polygons());
    flip_all(result)
}

fn flip_all(mut polygons: Vec<Polygon>) -> Vec<Polygon> {
    for polygon in &mut polygons {
        polygon.flip();
    }
    polygons
}
