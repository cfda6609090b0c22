//! # Config Crate
//!
//! Centralized configuration constants for the Nef volume pipeline.
//! All tolerances and tunable parameters are defined here to ensure
//! consistency between the kernel, the polyset and the volume crates.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EPSILON, VERTEX_MERGE_EPSILON};
//!
//! // Use EPSILON for floating-point comparisons
//! let value: f64 = 0.00000000001; // 1e-11, smaller than EPSILON (1e-10)
//! let is_zero = value.abs() < EPSILON;
//! assert!(is_zero);
//!
//! // Vertex welding is looser than plain comparisons
//! assert!(VERTEX_MERGE_EPSILON > EPSILON);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **No Runtime State**: Only compile-time values live here

pub mod constants;

#[cfg(test)]
mod tests;
