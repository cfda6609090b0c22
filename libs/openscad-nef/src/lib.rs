//! # OpenSCAD Nef
//!
//! Dimension-tagged volumes for CSG evaluation.
//!
//! ## Architecture
//!
//! ```text
//!                 NefPolyhedron
//!          ┌───────────┼───────────┐
//!        Null       Nef2 (2D)   Nef3 (3D)
//!                      │           │
//!     union / intersect / difference / minkowski (in place)
//!                      │           │
//!          convert_to_polyset      project ──▶ Nef2
//!                      ▼
//!                   PolySet
//! ```
//!
//! ## Error Handling
//!
//! Boolean operations, Minkowski sums and projection return kernel
//! failures unchanged inside [`NefError`]. Boundary conversion is the only
//! operation that traps kernel failures; it reports them as
//! [`ConversionError`] and restores the caller's failure behaviour.
//!
//! ## Usage
//!
//! ```rust
//! use glam::DVec3;
//! use openscad_kernel::Nef3;
//! use openscad_nef::NefPolyhedron;
//!
//! let mut a = NefPolyhedron::from(Nef3::cuboid(DVec3::ZERO, DVec3::ONE).unwrap());
//! let b = NefPolyhedron::from(
//!     Nef3::cuboid(DVec3::new(0.5, 0.0, 0.0), DVec3::new(1.5, 1.0, 1.0)).unwrap(),
//! );
//! let before = a.weight();
//! a.union_with(&b).unwrap();
//! assert!(a.weight() > before);
//!
//! let polyset = a.convert_to_polyset().unwrap();
//! assert!(!polyset.is_empty());
//! ```

pub mod convert;
pub mod error;
pub mod ops;
pub mod projection;
pub mod volume;
pub mod weight;

pub use error::{ConversionError, NefError, NefResult};
pub use ops::BooleanOp;
pub use projection::Projector;
pub use volume::NefPolyhedron;
