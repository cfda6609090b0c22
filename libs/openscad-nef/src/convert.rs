//! # Boundary Conversion
//!
//! Turns volumes into polygon sets and back.
//!
//! ## Failure Handling
//!
//! Exporting a solid is the one place where kernel failures are trapped.
//! The thread's failure behaviour is switched to `Raise` for the duration
//! of the export and restored afterwards, whichever way the export ends.
//! Precondition violations, assertion failures and panics out of the
//! kernel are each logged once at error level and returned as a
//! [`ConversionError`]. A boundary that is exported but not a closed
//! 2-manifold is logged at warn level and returned as usual.

use crate::error::{ConversionError, NefError, NefResult};
use crate::volume::NefPolyhedron;
use glam::DVec3;
use openscad_kernel::{
    FailureBehaviour, FailureBehaviourGuard, KernelError, KernelResult, Nef2, Nef3, Polyhedron,
};
use openscad_polyset::{border_to_polyset, tessellate, Contour, PolySet, PolySetError, Profile};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, error, warn};

impl NefPolyhedron {
    // =========================================================================
    // VOLUME TO POLYSET
    // =========================================================================

    /// Converts the volume into an explicit polygon set.
    ///
    /// # Returns
    ///
    /// - Null: an empty polygon set
    /// - 2D: the region's triangles facing +Z at z = 0 plus its boundary
    ///   rings as borders, flagged 2D
    /// - 3D: one face per boundary facet
    ///
    /// # Errors
    ///
    /// `ConversionError::Kernel` when the kernel fails while exporting a
    /// solid, and `ConversionError::PolySet` when the generated geometry
    /// exceeds polygon set limits. No partial mesh is returned.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glam::DVec3;
    /// use openscad_kernel::Nef3;
    /// use openscad_nef::NefPolyhedron;
    ///
    /// let cube = NefPolyhedron::from(Nef3::cuboid(DVec3::ZERO, DVec3::ONE).unwrap());
    /// let polyset = cube.convert_to_polyset().unwrap();
    /// assert_eq!(polyset.vertex_count(), 8);
    /// assert_eq!(polyset.face_count(), 6);
    /// ```
    pub fn convert_to_polyset(&self) -> Result<PolySet, ConversionError> {
        match self {
            Self::Null => Ok(PolySet::new()),
            Self::Nef2(nef) => planar_to_polyset(nef),
            Self::Nef3(nef) => solid_to_polyset(nef),
        }
    }

    /// Returns the boundary rings of a planar volume as closed contours.
    ///
    /// Exteriors precede the holes they contain. The null volume gives an
    /// empty profile.
    ///
    /// # Errors
    ///
    /// `UnsupportedDimension` for solids.
    pub fn convert_to_profile(&self) -> NefResult<Profile> {
        match self {
            Self::Null => Ok(Profile::new()),
            Self::Nef2(nef) => Ok(planar_profile(nef)),
            Self::Nef3(_) => Err(NefError::unsupported("convert to profile", 3)),
        }
    }

    // =========================================================================
    // POLYSET TO VOLUME
    // =========================================================================

    /// Builds a volume from a polygon set.
    ///
    /// 2D polygon sets are rebuilt from their borders with even-odd
    /// nesting, so a border inside another one becomes a hole. 3D polygon
    /// sets must bound a closed solid. An empty polygon set gives the
    /// null volume.
    ///
    /// # Errors
    ///
    /// Kernel failures for borders or faces the kernel rejects.
    pub fn from_polyset(polyset: &PolySet) -> NefResult<Self> {
        if polyset.is_empty() {
            return Ok(Self::Null);
        }

        if polyset.is_2d() {
            let mut region = Nef2::empty();
            for border in polyset.borders() {
                let ring = Nef2::from_contour(border)?;
                let mut overlap = region.clone();
                overlap.intersect(&ring);
                region.join(&ring);
                region.difference(&overlap);
            }
            return Ok(Self::Nef2(region));
        }

        let polygons: Vec<Vec<DVec3>> = (0..polyset.face_count())
            .map(|face| polyset.face_points(face))
            .collect();
        Ok(Self::Nef3(Nef3::from_polygons(&polygons)?))
    }
}

// =============================================================================
// CONVERSION HELPERS
// =============================================================================

fn planar_profile(nef: &Nef2) -> Profile {
    nef.rings()
        .into_iter()
        .map(|ring| Contour::closed(ring.points))
        .collect()
}

fn planar_to_polyset(nef: &Nef2) -> Result<PolySet, ConversionError> {
    let profile = planar_profile(nef);
    let mut polyset = PolySet::new();
    polyset.set_2d(true);
    let triangles = tessellate(&mut polyset, &profile, 0.0, true)?;
    let borders = border_to_polyset(&mut polyset, &profile);
    debug!(triangles, borders, "Converted 2D volume");
    Ok(polyset)
}

fn solid_to_polyset(nef: &Nef3) -> Result<PolySet, ConversionError> {
    debug!(
        valid = nef.is_valid(),
        simple = nef.is_simple(),
        facets = nef.number_of_facets(),
        "Converting 3D volume"
    );

    let conversion = trapped(|| nef.convert_to_polyhedron())?;

    if conversion.corrupted {
        warn!(
            facets = conversion.polyhedron.size_of_facets(),
            "Converted 3D volume is not a closed 2-manifold"
        );
    }

    let polyset = polyhedron_to_polyset(&conversion.polyhedron)?;
    debug!(
        vertices = polyset.vertex_count(),
        faces = polyset.face_count(),
        "Converted 3D volume"
    );
    Ok(polyset)
}

/// Runs a kernel call with failures raised and panics caught.
///
/// The thread's failure behaviour is `Raise` while `f` runs and is put
/// back afterwards. A failure is logged once at error level.
fn trapped<T>(f: impl FnOnce() -> KernelResult<T>) -> Result<T, ConversionError> {
    let outcome = {
        let _guard = FailureBehaviourGuard::install(FailureBehaviour::Raise);
        panic::catch_unwind(AssertUnwindSafe(f))
            .unwrap_or_else(|payload| Err(KernelError::unclassified(panic_message(payload))))
    };
    outcome.map_err(|err| {
        error!(kind = %err.kind(), message = err.message(), "3D volume conversion failed");
        ConversionError::from(err)
    })
}

/// Copies an exported polyhedron into a polygon set.
///
/// A rejection is logged once at error level, like kernel failures.
fn polyhedron_to_polyset(polyhedron: &Polyhedron) -> Result<PolySet, ConversionError> {
    fill_polyset(polyhedron).map_err(|err| {
        error!(%err, "Converted 3D volume does not fit a polygon set");
        ConversionError::from(err)
    })
}

fn fill_polyset(polyhedron: &Polyhedron) -> Result<PolySet, PolySetError> {
    let mut polyset = PolySet::with_capacity(0, polyhedron.size_of_facets());
    polyset.reserve_vertices(polyhedron.size_of_vertices())?;
    for vertex in polyhedron.vertices() {
        polyset.add_vertex(*vertex);
    }
    for facet in polyhedron.facets() {
        polyset.add_face(facet.iter().map(|&v| v as u32).collect())?;
    }
    Ok(polyset)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "kernel panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openscad_kernel::{failure_behaviour, FailureKind};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing::span::{Attributes, Id, Record};
    use tracing::{Event, Level, Metadata, Subscriber};

    /// Counts error events.
    struct ErrorCounter {
        count: Arc<AtomicUsize>,
    }

    impl Subscriber for ErrorCounter {
        fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
            true
        }

        fn new_span(&self, _span: &Attributes<'_>) -> Id {
            Id::from_u64(1)
        }

        fn record(&self, _span: &Id, _values: &Record<'_>) {}

        fn record_follows_from(&self, _span: &Id, _follows: &Id) {}

        fn event(&self, event: &Event<'_>) {
            if *event.metadata().level() == Level::ERROR {
                self.count.fetch_add(1, Ordering::SeqCst);
            }
        }

        fn enter(&self, _span: &Id) {}

        fn exit(&self, _span: &Id) {}
    }

    /// Runs `f` under `Continue` and returns its result, the number of
    /// errors it logged and the behaviour left installed afterwards.
    fn run_under_continue<T>(f: impl FnOnce() -> T) -> (T, usize, FailureBehaviour) {
        let count = Arc::new(AtomicUsize::new(0));
        let subscriber = ErrorCounter {
            count: Arc::clone(&count),
        };
        let _guard = FailureBehaviourGuard::install(FailureBehaviour::Continue);
        let result = tracing::subscriber::with_default(subscriber, f);
        (result, count.load(Ordering::SeqCst), failure_behaviour())
    }

    #[test]
    fn test_trapped_success() {
        let (result, errors, after) = run_under_continue(|| {
            trapped(|| {
                assert_eq!(failure_behaviour(), FailureBehaviour::Raise);
                Ok(7)
            })
        });
        assert_eq!(result, Ok(7));
        assert_eq!(errors, 0);
        assert_eq!(after, FailureBehaviour::Continue);
    }

    #[test]
    fn test_trapped_assertion() {
        let (result, errors, after) = run_under_continue(|| {
            trapped::<()>(|| Err(KernelError::assertion("next link leaves the facet")))
        });
        let err = result.unwrap_err();
        assert_eq!(err.kernel_kind(), Some(FailureKind::Assertion));
        assert!(err.to_string().contains("next link leaves the facet"));
        assert_eq!(errors, 1);
        assert_eq!(after, FailureBehaviour::Continue);
    }

    #[test]
    fn test_trapped_panic_is_unclassified() {
        let (result, errors, after) = run_under_continue(|| {
            trapped::<()>(|| panic!("facet cycle does not close"))
        });
        let err = result.unwrap_err();
        assert_eq!(err.kernel_kind(), Some(FailureKind::Unclassified));
        assert!(err.to_string().contains("facet cycle does not close"));
        assert_eq!(errors, 1);
        assert_eq!(after, FailureBehaviour::Continue);
    }

    #[test]
    fn test_polyset_rejection_is_logged() {
        let mut polyhedron = Polyhedron::new();
        polyhedron.add_vertex(DVec3::ZERO);
        polyhedron.add_facet(vec![0, 1, 2]);
        let (result, errors, _) = run_under_continue(|| polyhedron_to_polyset(&polyhedron));
        assert!(matches!(result, Err(ConversionError::PolySet(_))));
        assert_eq!(errors, 1);
    }
}
