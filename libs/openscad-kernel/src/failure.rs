//! # Failure Behaviour
//!
//! Per-thread policy deciding what a failed kernel check does.
//!
//! ## Usage
//!
//! ```rust
//! use openscad_kernel::{failure_behaviour, FailureBehaviour, FailureBehaviourGuard};
//!
//! assert_eq!(failure_behaviour(), FailureBehaviour::Raise);
//! {
//!     let _guard = FailureBehaviourGuard::install(FailureBehaviour::Continue);
//!     assert_eq!(failure_behaviour(), FailureBehaviour::Continue);
//! }
//! assert_eq!(failure_behaviour(), FailureBehaviour::Raise);
//! ```
//!
//! ## Thread Scope
//!
//! The behaviour lives in a thread-local slot. Installing a behaviour on
//! one thread never changes what checks do on another.

use crate::error::{KernelError, KernelResult};
use std::cell::Cell;
use tracing::{error, warn};

// =============================================================================
// BEHAVIOUR
// =============================================================================

/// What a failed kernel check does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureBehaviour {
    /// Log the failure and abort the process.
    Abort,
    /// Return the failure to the caller.
    #[default]
    Raise,
    /// Log the failure and carry on.
    Continue,
}

thread_local! {
    static BEHAVIOUR: Cell<FailureBehaviour> = const { Cell::new(FailureBehaviour::Raise) };
}

/// Returns the failure behaviour installed on this thread.
pub fn failure_behaviour() -> FailureBehaviour {
    BEHAVIOUR.with(Cell::get)
}

/// Installs a failure behaviour on this thread.
///
/// # Returns
///
/// The behaviour that was installed before.
pub fn set_failure_behaviour(behaviour: FailureBehaviour) -> FailureBehaviour {
    BEHAVIOUR.with(|slot| slot.replace(behaviour))
}

// =============================================================================
// GUARD
// =============================================================================

/// Scoped failure behaviour.
///
/// Installs a behaviour on creation and puts the previous one back when
/// dropped, including during unwinding.
///
/// # Example
///
/// ```rust
/// use openscad_kernel::{failure_behaviour, FailureBehaviour, FailureBehaviourGuard};
///
/// let guard = FailureBehaviourGuard::install(FailureBehaviour::Abort);
/// assert_eq!(guard.previous(), FailureBehaviour::Raise);
/// drop(guard);
/// assert_eq!(failure_behaviour(), FailureBehaviour::Raise);
/// ```
#[derive(Debug)]
#[must_use = "the previous behaviour is restored as soon as the guard is dropped"]
pub struct FailureBehaviourGuard {
    previous: FailureBehaviour,
}

impl FailureBehaviourGuard {
    /// Installs `behaviour` until the guard is dropped.
    pub fn install(behaviour: FailureBehaviour) -> Self {
        Self {
            previous: set_failure_behaviour(behaviour),
        }
    }

    /// Returns the behaviour that will be restored.
    pub fn previous(&self) -> FailureBehaviour {
        self.previous
    }
}

impl Drop for FailureBehaviourGuard {
    fn drop(&mut self) {
        set_failure_behaviour(self.previous);
    }
}

// =============================================================================
// CHECKS
// =============================================================================

/// Checks a requirement on kernel input.
pub(crate) fn precondition(holds: bool, message: impl FnOnce() -> String) -> KernelResult<()> {
    if holds {
        return Ok(());
    }
    report(KernelError::precondition(message()))
}

/// Checks an internal kernel invariant.
pub(crate) fn assertion(holds: bool, message: impl FnOnce() -> String) -> KernelResult<()> {
    if holds {
        return Ok(());
    }
    report(KernelError::assertion(message()))
}

/// Routes a failed check according to the installed behaviour.
fn report(err: KernelError) -> KernelResult<()> {
    match failure_behaviour() {
        FailureBehaviour::Raise => Err(err),
        FailureBehaviour::Continue => {
            warn!(kind = %err.kind(), "{err}; continuing");
            Ok(())
        }
        FailureBehaviour::Abort => {
            error!(kind = %err.kind(), "{err}; aborting");
            std::process::abort()
        }
    }
}
