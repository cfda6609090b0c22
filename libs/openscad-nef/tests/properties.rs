//! # Volume Property Tests
//!
//! Dimension, boolean, copy and weight laws over null, 2D and 3D volumes.

use approx::assert_relative_eq;
use glam::{DVec2, DVec3};
use openscad_kernel::{Nef2, Nef3};
use openscad_nef::{NefError, NefPolyhedron};

// =============================================================================
// FIXTURES
// =============================================================================

fn cube_at(x: f64) -> NefPolyhedron {
    let min = DVec3::new(x, 0.0, 0.0);
    NefPolyhedron::from(Nef3::cuboid(min, min + DVec3::ONE).unwrap())
}

fn square_at(x: f64) -> NefPolyhedron {
    let contour = [
        DVec2::new(x, 0.0),
        DVec2::new(x + 1.0, 0.0),
        DVec2::new(x + 1.0, 1.0),
        DVec2::new(x, 1.0),
    ];
    NefPolyhedron::from(Nef2::from_contour(&contour).unwrap())
}

fn volumes() -> Vec<NefPolyhedron> {
    vec![NefPolyhedron::Null, square_at(0.0), cube_at(0.0)]
}

fn volume3(volume: &NefPolyhedron) -> f64 {
    volume.as_nef3().unwrap().volume()
}

fn area2(volume: &NefPolyhedron) -> f64 {
    volume.as_nef2().unwrap().area()
}

// =============================================================================
// DIMENSION
// =============================================================================

#[test]
fn test_null_iff_dimension_zero() {
    for volume in volumes() {
        assert_eq!(volume.is_null(), volume.dim() == 0);
    }
}

#[test]
fn test_booleans_keep_dimension() {
    for (a, b) in [(square_at(0.0), square_at(0.5)), (cube_at(0.0), cube_at(0.5))] {
        let dim = a.dim();
        let mut union = a.copy();
        union.union_with(&b).unwrap();
        let mut intersection = a.copy();
        intersection.intersect_with(&b).unwrap();
        let mut difference = a.copy();
        difference.difference_with(&b).unwrap();
        assert_eq!(union.dim(), dim);
        assert_eq!(intersection.dim(), dim);
        assert_eq!(difference.dim(), dim);
    }
}

// =============================================================================
// BOOLEAN LAWS
// =============================================================================

#[test]
fn test_idempotence_3d() {
    let a = cube_at(0.0);
    let mut union = a.copy();
    union.union_with(&a).unwrap();
    let mut intersection = a.copy();
    intersection.intersect_with(&a).unwrap();
    assert_relative_eq!(volume3(&union), 1.0, epsilon = 1e-6);
    assert_relative_eq!(volume3(&intersection), 1.0, epsilon = 1e-6);
}

#[test]
fn test_idempotence_2d() {
    let a = square_at(0.0);
    let mut union = a.copy();
    union.union_with(&a).unwrap();
    let mut intersection = a.copy();
    intersection.intersect_with(&a).unwrap();
    let original = a.as_nef2().unwrap();
    assert!(union.as_nef2().unwrap().is_equivalent(original, 1e-6));
    assert!(intersection.as_nef2().unwrap().is_equivalent(original, 1e-6));
}

#[test]
fn test_commutativity() {
    let (a, b) = (cube_at(0.0), cube_at(0.5));

    let mut ab = a.copy();
    ab.union_with(&b).unwrap();
    let mut ba = b.copy();
    ba.union_with(&a).unwrap();
    assert_relative_eq!(volume3(&ab), volume3(&ba), epsilon = 1e-6);
    let (ab_min, ab_max) = ab.as_nef3().unwrap().bounding_box().unwrap();
    let (ba_min, ba_max) = ba.as_nef3().unwrap().bounding_box().unwrap();
    assert!(ab_min.abs_diff_eq(ba_min, 1e-9));
    assert!(ab_max.abs_diff_eq(ba_max, 1e-9));

    let mut ab = a.copy();
    ab.intersect_with(&b).unwrap();
    let mut ba = b.copy();
    ba.intersect_with(&a).unwrap();
    assert_relative_eq!(volume3(&ab), 0.5, epsilon = 1e-6);
    assert_relative_eq!(volume3(&ba), 0.5, epsilon = 1e-6);
}

#[test]
fn test_difference_is_not_symmetric() {
    let a = NefPolyhedron::from(Nef2::square(DVec2::splat(2.0), false));
    let b = square_at(0.0);

    let mut ab = a.copy();
    ab.difference_with(&b).unwrap();
    let mut ba = b.copy();
    ba.difference_with(&a).unwrap();
    assert_relative_eq!(area2(&ab), 3.0, epsilon = 1e-6);
    assert!(ba.as_nef2().unwrap().is_empty());
}

#[test]
fn test_mismatched_operands_fail_loudly() {
    let mut solid = cube_at(0.0);
    let before = solid.copy();
    for other in [NefPolyhedron::Null, square_at(0.0)] {
        let err = solid.union_with(&other).unwrap_err();
        assert_eq!(err, NefError::dimension_mismatch("union", 3, other.dim()));
        let err = solid.difference_with(&other).unwrap_err();
        assert!(matches!(err, NefError::DimensionMismatch { this: 3, .. }));
    }
    assert_eq!(solid, before);
}

// =============================================================================
// COPY
// =============================================================================

#[test]
fn test_copy_is_independent() {
    let original = cube_at(0.0);
    let mut copy = original.copy();
    copy.union_with(&cube_at(0.5)).unwrap();
    assert_relative_eq!(volume3(&original), 1.0, epsilon = 1e-9);
    assert_relative_eq!(volume3(&copy), 1.5, epsilon = 1e-6);

    let mut original = square_at(0.0);
    let copy = original.copy();
    original.union_with(&square_at(0.5)).unwrap();
    assert_relative_eq!(area2(&copy), 1.0, epsilon = 1e-6);
}

// =============================================================================
// WEIGHT
// =============================================================================

#[test]
fn test_weight_positive_unless_null() {
    for volume in volumes() {
        assert_eq!(volume.weight() == 0, volume.is_null());
    }
}

#[test]
fn test_weight_grows_with_overlapping_union() {
    let a = cube_at(0.0);
    let b = cube_at(0.5);
    let mut union = a.copy();
    union.union_with(&b).unwrap();
    assert!(union.weight() > a.weight());
    assert!(union.weight() > b.weight());
}

#[test]
fn test_weight_grows_with_disjoint_2d_union() {
    let a = square_at(0.0);
    let mut union = a.copy();
    union.union_with(&square_at(3.0)).unwrap();
    assert!(union.weight() > a.weight());
}

// =============================================================================
// MINKOWSKI
// =============================================================================

#[test]
fn test_square_plus_disk_contains_square() {
    let mut sum = square_at(0.0);
    sum.minkowski(&NefPolyhedron::from(Nef2::circle(0.1, 12))).unwrap();
    let (min, max) = sum.as_nef2().unwrap().bounding_box().unwrap();
    assert!(min.x < 0.0 && min.y < 0.0);
    assert!(max.x > 1.0 && max.y > 1.0);
}

#[test]
fn test_minkowski_keeps_dimension() {
    let mut sum = cube_at(0.0);
    sum.minkowski(&cube_at(0.0)).unwrap();
    assert_eq!(sum.dim(), 3);
    assert_relative_eq!(volume3(&sum), 8.0, epsilon = 1e-6);
}
