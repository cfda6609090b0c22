//! # Configuration Constants
//!
//! Centralized constants for the Nef volume pipeline. Geometry tolerances,
//! cost-estimate element sizes and safety limits are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Weight**: Per-element sizes used by the volume cost estimate
//! - **Limits**: Maximum values for safety bounds

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// Used for determining if two floating-point values are "equal" within
/// numerical tolerance.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Epsilon for vertex welding.
///
/// Slightly larger tolerance used when merging nearly-identical vertices
/// after boolean operations split polygons.
///
/// # Example
///
/// ```rust
/// use config::constants::VERTEX_MERGE_EPSILON;
///
/// fn vertices_should_merge(v1: [f64; 3], v2: [f64; 3]) -> bool {
///     let dx = v1[0] - v2[0];
///     let dy = v1[1] - v2[1];
///     let dz = v1[2] - v2[2];
///     (dx * dx + dy * dy + dz * dz).sqrt() < VERTEX_MERGE_EPSILON
/// }
///
/// assert!(vertices_should_merge([0.0; 3], [1e-9, 0.0, 0.0]));
/// ```
pub const VERTEX_MERGE_EPSILON: f64 = 1e-8;

/// Thickness of a plane when classifying points during BSP clipping.
///
/// Points closer than this to a splitting plane are treated as coplanar.
///
/// # Example
///
/// ```rust
/// use config::constants::{PLANE_EPSILON, VERTEX_MERGE_EPSILON};
///
/// assert!(PLANE_EPSILON > VERTEX_MERGE_EPSILON);
/// ```
pub const PLANE_EPSILON: f64 = 1e-5;

/// Smallest area considered non-empty for 2D regions and facets.
///
/// # Example
///
/// ```rust
/// use config::constants::AREA_EPSILON;
///
/// let sliver_area = 1e-14;
/// assert!(sliver_area < AREA_EPSILON);
/// ```
pub const AREA_EPSILON: f64 = 1e-12;

// =============================================================================
// WEIGHT CONSTANTS
// =============================================================================

/// Fixed per-volume overhead of a 2D payload, in bytes.
///
/// # Example
///
/// ```rust
/// use config::constants::NEF2_BASE_SIZE;
///
/// assert!(NEF2_BASE_SIZE > 0);
/// ```
pub const NEF2_BASE_SIZE: usize = 64;

/// Estimated size of one vertex record in a 2D payload.
pub const NEF2_VERTEX_SIZE: usize = 40;

/// Estimated size of one half-edge record in a 2D payload.
pub const NEF2_HALFEDGE_SIZE: usize = 56;

/// Estimated size of one face record in a 2D payload.
///
/// Multiplied by the edge count, not the face count. The estimate is a
/// relative ordering signal only.
pub const NEF2_FACE_SIZE: usize = 48;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum depth of plane cuts when decomposing a polyhedron into convex
/// pieces.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_DECOMPOSITION_DEPTH;
///
/// let current_depth = 12;
/// assert!(current_depth < MAX_DECOMPOSITION_DEPTH);
/// ```
pub const MAX_DECOMPOSITION_DEPTH: usize = 64;

/// Maximum number of vertices in a single polyset.
///
/// Safety limit to prevent memory exhaustion from extremely complex models.
pub const MAX_VERTICES: usize = 10_000_000;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}
