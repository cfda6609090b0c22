//! # OpenSCAD PolySet
//!
//! Explicit polygon geometry produced from kernel volumes.
//!
//! ## Architecture
//!
//! ```text
//! Profile (2D contours) ──tessellate──▶ PolySet faces
//!                       └─border_to_polyset─▶ PolySet borders
//! Polyhedron facets ─────────────────────▶ PolySet faces
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use glam::DVec2;
//! use openscad_polyset::{tessellate, Contour, PolySet, Profile};
//!
//! let mut profile = Profile::new();
//! profile.push(Contour::closed(vec![DVec2::ZERO, DVec2::X, DVec2::ONE, DVec2::Y]));
//!
//! let mut polyset = PolySet::new();
//! let triangles = tessellate(&mut polyset, &profile, 0.0, true).unwrap();
//! assert_eq!(triangles, 2);
//! ```

pub mod error;
pub mod polyset;
pub mod profile;
pub mod tessellate;

pub use error::PolySetError;
pub use polyset::PolySet;
pub use profile::{Contour, Profile};
pub use tessellate::{border_to_polyset, tessellate};
