//! # Profiles
//!
//! Planar outlines made of contours, the intermediate form between a 2D
//! region and its polyset.

use glam::DVec2;

/// A polyline in the plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    /// Vertices without a closing duplicate
    pub points: Vec<DVec2>,
    /// True if the last point connects back to the first
    pub closed: bool,
}

impl Contour {
    /// Creates a closed contour.
    pub fn closed(points: Vec<DVec2>) -> Self {
        Self {
            points,
            closed: true,
        }
    }

    /// Creates an open contour.
    pub fn open(points: Vec<DVec2>) -> Self {
        Self {
            points,
            closed: false,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Signed enclosed area; positive for counter-clockwise contours.
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let twice: f64 = (0..n)
            .map(|i| self.points[i].perp_dot(self.points[(i + 1) % n]))
            .sum();
        twice * 0.5
    }

    /// Even-odd point containment test.
    ///
    /// Points exactly on the boundary may go either way.
    pub fn contains_point(&self, point: DVec2) -> bool {
        let n = self.points.len();
        let mut inside = false;
        let mut j = n.wrapping_sub(1);
        for i in 0..n {
            let (a, b) = (self.points[i], self.points[j]);
            if (a.y > point.y) != (b.y > point.y)
                && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}

/// An ordered collection of contours.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    contours: Vec<Contour>,
}

impl Profile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, contour: Contour) {
        self.contours.push(contour);
    }

    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    pub fn len(&self) -> usize {
        self.contours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    /// Axis-aligned bounds of all contour points as `(min, max)`.
    pub fn bounding_box(&self) -> Option<(DVec2, DVec2)> {
        let mut points = self.contours.iter().flat_map(|c| c.points.iter().copied());
        let first = points.next()?;
        Some(points.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }
}

impl FromIterator<Contour> for Profile {
    fn from_iter<I: IntoIterator<Item = Contour>>(iter: I) -> Self {
        Self {
            contours: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(offset: f64, size: f64) -> Contour {
        Contour::closed(vec![
            DVec2::new(offset, offset),
            DVec2::new(offset + size, offset),
            DVec2::new(offset + size, offset + size),
            DVec2::new(offset, offset + size),
        ])
    }

    #[test]
    fn test_signed_area() {
        assert_eq!(square(0.0, 2.0).signed_area(), 4.0);
        let mut reversed = square(0.0, 2.0);
        reversed.points.reverse();
        assert_eq!(reversed.signed_area(), -4.0);
        assert_eq!(Contour::open(vec![DVec2::ZERO, DVec2::X]).signed_area(), 0.0);
    }

    #[test]
    fn test_contains_point() {
        let contour = square(0.0, 2.0);
        assert!(contour.contains_point(DVec2::splat(1.0)));
        assert!(!contour.contains_point(DVec2::splat(3.0)));
        assert!(!Contour::closed(Vec::new()).contains_point(DVec2::ZERO));
    }

    #[test]
    fn test_profile_bounding_box() {
        let profile: Profile = [square(0.0, 1.0), square(2.0, 1.0)].into_iter().collect();
        assert_eq!(profile.len(), 2);
        assert_eq!(profile.bounding_box(), Some((DVec2::ZERO, DVec2::splat(3.0))));
        assert_eq!(Profile::new().bounding_box(), None);
    }
}
