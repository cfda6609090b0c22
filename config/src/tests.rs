//! # Tests for Config Constants
//!
//! Unit tests verifying the correctness of configuration constants
//! and helper functions.

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_epsilon_is_positive() {
    assert!(EPSILON > 0.0, "EPSILON must be positive");
}

#[test]
fn test_epsilon_is_small() {
    assert!(EPSILON < 1e-6, "EPSILON should be small for precision");
}

#[test]
fn test_vertex_merge_epsilon_larger_than_epsilon() {
    assert!(
        VERTEX_MERGE_EPSILON >= EPSILON,
        "VERTEX_MERGE_EPSILON should be >= EPSILON"
    );
}

#[test]
fn test_plane_epsilon_larger_than_merge_epsilon() {
    // Welded vertices must classify as coplanar with their own facet
    assert!(PLANE_EPSILON > VERTEX_MERGE_EPSILON);
}

#[test]
fn test_area_epsilon_is_tiny() {
    assert!(AREA_EPSILON > 0.0);
    assert!(AREA_EPSILON < EPSILON);
}

// =============================================================================
// WEIGHT TESTS
// =============================================================================

#[test]
fn test_weight_sizes_are_positive() {
    assert!(NEF2_BASE_SIZE > 0);
    assert!(NEF2_VERTEX_SIZE > 0);
    assert!(NEF2_HALFEDGE_SIZE > 0);
    assert!(NEF2_FACE_SIZE > 0);
}

// =============================================================================
// APPROX_ZERO TESTS
// =============================================================================

#[test]
fn test_approx_zero_exact_zero() {
    assert!(approx_zero(0.0));
}

#[test]
fn test_approx_zero_within_epsilon() {
    let small = EPSILON / 2.0;
    assert!(approx_zero(small));
    assert!(approx_zero(-small));
}

#[test]
fn test_approx_zero_non_zero_values() {
    assert!(!approx_zero(1.0));
    assert!(!approx_zero(-1.0));
    assert!(!approx_zero(0.1));
}

// =============================================================================
// LIMIT TESTS
// =============================================================================

#[test]
fn test_max_decomposition_depth_reasonable() {
    assert!(MAX_DECOMPOSITION_DEPTH >= 8);
    assert!(MAX_DECOMPOSITION_DEPTH <= 1024);
}

#[test]
fn test_max_vertices_reasonable() {
    assert!(MAX_VERTICES >= 1_000_000);
}
