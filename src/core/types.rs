use glam::DVec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[must_use]
    pub fn aspect_ratio(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// Axis-aligned bounding box in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: DVec3,
    pub max: DVec3,
}

impl Bounds {
    #[must_use]
    pub const fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Tightest box around `points`. `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = DVec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bounds = Self::new(first, first);
        for point in points {
            bounds.min = bounds.min.min(point);
            bounds.max = bounds.max.max(point);
        }
        Some(bounds)
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.min.x <= self.max.x
            && self.min.y <= self.max.y
            && self.min.z <= self.max.z
    }

    #[must_use]
    pub fn merged(self, other: Self) -> Self {
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }

    #[must_use]
    pub fn center(self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    #[must_use]
    pub fn diagonal(self) -> f64 {
        (self.max - self.min).length()
    }

    /// Corner order: x varies fastest, then y, then z.
    #[must_use]
    pub fn corners(self) -> [DVec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            DVec3::new(lo.x, lo.y, lo.z),
            DVec3::new(hi.x, lo.y, lo.z),
            DVec3::new(lo.x, hi.y, lo.z),
            DVec3::new(hi.x, hi.y, lo.z),
            DVec3::new(lo.x, lo.y, hi.z),
            DVec3::new(hi.x, lo.y, hi.z),
            DVec3::new(lo.x, hi.y, hi.z),
            DVec3::new(hi.x, hi.y, hi.z),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_from_points_covers_extremes() {
        let bounds = Bounds::from_points([
            DVec3::new(1.0, -2.0, 0.5),
            DVec3::new(-1.0, 4.0, 0.0),
            DVec3::new(0.0, 0.0, 3.0),
        ])
        .expect("non-empty");

        assert_eq!(bounds.min, DVec3::new(-1.0, -2.0, 0.0));
        assert_eq!(bounds.max, DVec3::new(1.0, 4.0, 3.0));
        assert!(bounds.is_valid());
    }

    #[test]
    fn bounds_from_no_points_is_none() {
        assert!(Bounds::from_points([]).is_none());
    }

    #[test]
    fn merged_bounds_contain_both_inputs() {
        let a = Bounds::new(DVec3::ZERO, DVec3::ONE);
        let b = Bounds::new(DVec3::splat(-2.0), DVec3::splat(-1.0));
        let merged = a.merged(b);
        assert_eq!(merged.min, DVec3::splat(-2.0));
        assert_eq!(merged.max, DVec3::ONE);
    }

    #[test]
    fn diagonal_of_unit_cube() {
        let bounds = Bounds::new(DVec3::ZERO, DVec3::ONE);
        assert!((bounds.diagonal() - 3.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(bounds.center(), DVec3::splat(0.5));
    }
}
