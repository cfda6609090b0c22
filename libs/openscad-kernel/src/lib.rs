//! # OpenSCAD Kernel
//!
//! Regularized volume kernel backing the Nef volume pipeline.
//!
//! ## Architecture
//!
//! ```text
//! Nef2 (planar region)     Nef3 (half-edge solid)
//!   │  geo boolean ops       │  BSP boolean ops
//!   │  earcut + hull         │  convex decomposition + quickhull
//!   ▼                        ▼
//! minkowski2             minkowski_sum_3
//!                            │
//!                            ▼
//!                       Polyhedron (indexed facets)
//! ```
//!
//! ## Failure Handling
//!
//! Kernel checks are classified as preconditions (bad input) or
//! assertions (broken internal state). What happens when a check fails
//! is decided by the thread's [`FailureBehaviour`]:
//!
//! - `Raise` (default): the check returns a [`KernelError`]
//! - `Continue`: the failure is logged and the operation carries on
//! - `Abort`: the failure is logged and the process aborts
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use openscad_kernel::Nef3;
//!
//! let mut a = Nef3::cuboid(DVec3::ZERO, DVec3::ONE).unwrap();
//! let b = Nef3::cuboid(DVec3::new(0.5, 0.0, 0.0), DVec3::new(1.5, 1.0, 1.0)).unwrap();
//! a.join(&b).unwrap();
//! assert!((a.volume() - 1.5).abs() < 1e-6);
//! ```

pub mod error;
pub mod failure;
pub mod hull;
pub mod nef2;
pub mod nef3;
pub mod polyhedron;
pub mod predicates;

pub use error::{FailureKind, KernelError, KernelResult};
pub use failure::{failure_behaviour, set_failure_behaviour, FailureBehaviour, FailureBehaviourGuard};
pub use nef2::{minkowski2, Explorer, Nef2, Ring};
pub use nef3::{minkowski_sum_3, HalfedgeRef, Halffacet, Nef3, Orientation, PolyhedronConversion};
pub use polyhedron::Polyhedron;
