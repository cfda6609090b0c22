//! # Planar Region Tests

use super::*;
use crate::error::FailureKind;
use crate::failure::{FailureBehaviour, FailureBehaviourGuard};
use approx::assert_relative_eq;

fn unit_square() -> Nef2 {
    Nef2::square(DVec2::ONE, false)
}

fn shifted_square(dx: f64) -> Nef2 {
    let points = [
        DVec2::new(dx, 0.0),
        DVec2::new(dx + 1.0, 0.0),
        DVec2::new(dx + 1.0, 1.0),
        DVec2::new(dx, 1.0),
    ];
    Nef2::from_contour(&points).unwrap()
}

// =============================================================================
// CONSTRUCTION TESTS
// =============================================================================

#[test]
fn test_empty_region() {
    let nef = Nef2::empty();
    assert!(nef.is_empty());
    assert_eq!(nef.area(), 0.0);
    assert!(nef.bounding_box().is_none());
    assert_eq!(Nef2::default(), nef);
}

#[test]
fn test_from_contour_either_winding() {
    let ccw = [DVec2::ZERO, DVec2::X, DVec2::ONE, DVec2::Y];
    let cw = [DVec2::ZERO, DVec2::Y, DVec2::ONE, DVec2::X];
    let a = Nef2::from_contour(&ccw).unwrap();
    let b = Nef2::from_contour(&cw).unwrap();
    assert_relative_eq!(a.area(), 1.0, epsilon = 1e-6);
    assert!(a.is_equivalent(&b, 1e-6));
}

#[test]
fn test_from_contour_too_few_points() {
    let err = Nef2::from_contour(&[DVec2::ZERO, DVec2::X]).unwrap_err();
    assert_eq!(err.kind(), FailureKind::Precondition);
}

#[test]
fn test_from_contour_self_intersecting() {
    let bowtie = [
        DVec2::new(0.0, 0.0),
        DVec2::new(2.0, 2.0),
        DVec2::new(2.0, 0.0),
        DVec2::new(0.0, 2.0),
    ];
    let err = Nef2::from_contour(&bowtie).unwrap_err();
    assert_eq!(err.kind(), FailureKind::Precondition);
}

#[test]
fn test_from_contour_continue_keeps_going() {
    let _guard = FailureBehaviourGuard::install(FailureBehaviour::Continue);
    let nef = Nef2::from_contour(&[DVec2::ZERO, DVec2::X]).unwrap();
    assert!(nef.is_empty());
}

#[test]
fn test_circle_segments() {
    let circle = Nef2::circle(1.0, 6);
    assert_eq!(circle.explorer().number_of_vertices(), 6);
    let tiny = Nef2::circle(1.0, 1);
    assert_eq!(tiny.explorer().number_of_vertices(), 3);
}

#[test]
fn test_centered_square() {
    let nef = Nef2::square(DVec2::new(2.0, 4.0), true);
    let (min, max) = nef.bounding_box().unwrap();
    assert!(min.abs_diff_eq(DVec2::new(-1.0, -2.0), 1e-6));
    assert!(max.abs_diff_eq(DVec2::new(1.0, 2.0), 1e-6));
}

// =============================================================================
// BOOLEAN TESTS
// =============================================================================

#[test]
fn test_union_overlapping() {
    let mut nef = unit_square();
    nef.join(&shifted_square(0.5));
    assert_relative_eq!(nef.area(), 1.5, epsilon = 1e-6);
    assert_eq!(nef.rings().len(), 1);
}

#[test]
fn test_union_is_idempotent() {
    let mut nef = unit_square();
    nef.join(&unit_square());
    assert!(nef.is_equivalent(&unit_square(), 1e-6));
}

#[test]
fn test_intersection() {
    let mut nef = unit_square();
    nef.intersect(&shifted_square(0.5));
    assert_relative_eq!(nef.area(), 0.5, epsilon = 1e-6);
}

#[test]
fn test_intersection_is_idempotent() {
    let mut nef = unit_square();
    nef.intersect(&unit_square());
    assert!(nef.is_equivalent(&unit_square(), 1e-6));
}

#[test]
fn test_difference_with_self_is_empty() {
    let mut nef = unit_square();
    nef.difference(&unit_square());
    assert!(nef.area() < 1e-6);
}

#[test]
fn test_difference_creates_hole() {
    let mut nef = Nef2::square(DVec2::splat(4.0), true);
    nef.difference(&unit_square());
    assert_relative_eq!(nef.area(), 15.0, epsilon = 1e-6);
    let rings = nef.rings();
    assert_eq!(rings.len(), 2);
    assert_eq!(rings.iter().filter(|r| r.is_hole).count(), 1);
}

// =============================================================================
// EXPLORER TESTS
// =============================================================================

#[test]
fn test_explorer_square() {
    let explorer = unit_square().explorer();
    assert_eq!(explorer.number_of_vertices(), 4);
    assert_eq!(explorer.number_of_edges(), 4);
    assert_eq!(explorer.number_of_halfedges(), 8);
    assert_eq!(explorer.number_of_faces(), 2);
}

#[test]
fn test_explorer_with_hole() {
    let mut nef = Nef2::square(DVec2::splat(4.0), true);
    nef.difference(&unit_square());
    let explorer = nef.explorer();
    assert_eq!(explorer.number_of_vertices(), 8);
    assert_eq!(explorer.number_of_faces(), 3);
}

#[test]
fn test_explorer_empty() {
    let explorer = Nef2::empty().explorer();
    assert_eq!(explorer.number_of_vertices(), 0);
    assert_eq!(explorer.number_of_faces(), 1);
}

// =============================================================================
// MINKOWSKI TESTS
// =============================================================================

#[test]
fn test_minkowski_square_disk_bounds() {
    let disk = Nef2::circle(0.25, 16);
    let sum = minkowski2(&unit_square(), &disk).unwrap();
    let (min, max) = sum.bounding_box().unwrap();
    assert_relative_eq!(min.x, -0.25, epsilon = 1e-6);
    assert_relative_eq!(max.x, 1.25, epsilon = 1e-6);
    assert!(min.y < 0.0 && max.y > 1.0);
    assert!(sum.area() > 1.0);
}

#[test]
fn test_minkowski_with_empty() {
    let sum = minkowski2(&unit_square(), &Nef2::empty()).unwrap();
    assert!(sum.is_empty());
}

#[test]
fn test_minkowski_concave_operand() {
    // L-shape: three unit cells
    let l_shape = Nef2::from_contour(&[
        DVec2::new(0.0, 0.0),
        DVec2::new(2.0, 0.0),
        DVec2::new(2.0, 1.0),
        DVec2::new(1.0, 1.0),
        DVec2::new(1.0, 2.0),
        DVec2::new(0.0, 2.0),
    ])
    .unwrap();
    let tiny = Nef2::square(DVec2::splat(0.1), false);
    let sum = minkowski2(&l_shape, &tiny).unwrap();
    let (min, max) = sum.bounding_box().unwrap();
    assert_relative_eq!(min.x, 0.0, epsilon = 1e-6);
    assert_relative_eq!(max.x, 2.1, epsilon = 1e-6);
    assert_relative_eq!(max.y, 2.1, epsilon = 1e-6);
    // The notch stays mostly open
    assert!(sum.area() < 4.0);
    assert!(sum.area() > 3.0);
}
