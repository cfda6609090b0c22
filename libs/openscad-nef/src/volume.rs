//! # Dual-Dimension Volume
//!
//! A volume is null, a planar region or a solid. The payload always
//! matches the dimension because the enum cannot express anything else.

use openscad_kernel::{Nef2, Nef3};

/// A null, 2D or 3D volume.
///
/// The type has no `Clone` impl. [`NefPolyhedron::copy`] is the explicit
/// way to obtain an independent instance.
///
/// # Example
///
/// ```rust
/// use glam::DVec2;
/// use openscad_kernel::Nef2;
/// use openscad_nef::NefPolyhedron;
///
/// let null = NefPolyhedron::from_nef2(None);
/// assert!(null.is_null());
///
/// let square = NefPolyhedron::from(Nef2::square(DVec2::ONE, false));
/// assert_eq!(square.dim(), 2);
/// ```
#[derive(Debug, Default, PartialEq)]
pub enum NefPolyhedron {
    /// No payload; dimension 0.
    #[default]
    Null,
    /// Planar region; dimension 2.
    Nef2(Nef2),
    /// Solid; dimension 3.
    Nef3(Nef3),
}

impl NefPolyhedron {
    /// Wraps an optional planar region. `None` gives the null volume.
    pub fn from_nef2(payload: Option<Nef2>) -> Self {
        payload.map_or(Self::Null, Self::Nef2)
    }

    /// Wraps an optional solid. `None` gives the null volume.
    pub fn from_nef3(payload: Option<Nef3>) -> Self {
        payload.map_or(Self::Null, Self::Nef3)
    }

    /// Returns 0 for null, 2 for planar regions and 3 for solids.
    pub fn dim(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Nef2(_) => 2,
            Self::Nef3(_) => 3,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the planar payload, if any.
    pub fn as_nef2(&self) -> Option<&Nef2> {
        match self {
            Self::Nef2(nef) => Some(nef),
            _ => None,
        }
    }

    /// Returns the solid payload, if any.
    pub fn as_nef3(&self) -> Option<&Nef3> {
        match self {
            Self::Nef3(nef) => Some(nef),
            _ => None,
        }
    }

    /// Returns a deep copy sharing no state with `self`.
    pub fn copy(&self) -> Self {
        match self {
            Self::Null => Self::Null,
            Self::Nef2(nef) => Self::Nef2(nef.clone()),
            Self::Nef3(nef) => Self::Nef3(nef.clone()),
        }
    }
}

impl From<Nef2> for NefPolyhedron {
    fn from(nef: Nef2) -> Self {
        Self::Nef2(nef)
    }
}

impl From<Nef3> for NefPolyhedron {
    fn from(nef: Nef3) -> Self {
        Self::Nef3(nef)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{DVec2, DVec3};

    #[test]
    fn test_absent_payload_is_null() {
        assert!(NefPolyhedron::from_nef2(None).is_null());
        assert!(NefPolyhedron::from_nef3(None).is_null());
        assert_eq!(NefPolyhedron::default(), NefPolyhedron::Null);
    }

    #[test]
    fn test_dimension_follows_payload() {
        let planar = NefPolyhedron::from_nef2(Some(Nef2::square(DVec2::ONE, false)));
        let solid = NefPolyhedron::from_nef3(Some(Nef3::cuboid(DVec3::ZERO, DVec3::ONE).unwrap()));
        assert_eq!(planar.dim(), 2);
        assert_eq!(solid.dim(), 3);
        assert!(planar.as_nef2().is_some());
        assert!(planar.as_nef3().is_none());
        assert!(solid.as_nef3().is_some());
    }

    #[test]
    fn test_empty_payload_is_not_null() {
        let empty = NefPolyhedron::from(Nef3::empty());
        assert!(!empty.is_null());
        assert_eq!(empty.dim(), 3);
    }

    #[test]
    fn test_copy_is_equal() {
        let solid = NefPolyhedron::from(Nef3::cuboid(DVec3::ZERO, DVec3::ONE).unwrap());
        assert_eq!(solid.copy(), solid);
        assert!(NefPolyhedron::Null.copy().is_null());
    }
}
