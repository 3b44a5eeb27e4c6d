//! World-space axis-aligned bounding boxes.

use crate::math::{Vect, component_max, component_min};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box.
///
/// Shapes return one from their world-space update; the broad phase that
/// consumes it lives outside this workspace.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Minimum corner.
    pub lower: Vect,
    /// Maximum corner.
    pub upper: Vect,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

impl Aabb {
    /// Create an AABB from its corners.
    #[must_use]
    pub const fn new(lower: Vect, upper: Vect) -> Self {
        Self { lower, upper }
    }

    /// Create an AABB centered at a point with the given half-extents.
    #[must_use]
    pub fn from_center(center: Vect, half_extents: Vect) -> Self {
        Self {
            lower: center - half_extents,
            upper: center + half_extents,
        }
    }

    /// An inverted, infinitely large box that contains nothing.
    ///
    /// Folding points into it with [`include`](Self::include) yields their tight bounds.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            lower: Vect::new(f64::INFINITY, f64::INFINITY),
            upper: Vect::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Whether the box encloses no point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lower.x > self.upper.x || self.lower.y > self.upper.y
    }

    /// Grow the box to include `point`.
    #[must_use]
    pub fn include(&self, point: Vect) -> Self {
        Self {
            lower: component_min(self.lower, point),
            upper: component_max(self.upper, point),
        }
    }

    /// Smallest box enclosing both boxes.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            lower: component_min(self.lower, other.lower),
            upper: component_max(self.upper, other.upper),
        }
    }

    /// Check if this AABB overlaps with another AABB.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.lower.x <= other.upper.x
            && self.upper.x >= other.lower.x
            && self.lower.y <= other.upper.y
            && self.upper.y >= other.lower.y
    }

    /// Check if a point lies inside or on the boundary.
    #[must_use]
    pub fn contains_point(&self, point: Vect) -> bool {
        point.x >= self.lower.x
            && point.x <= self.upper.x
            && point.y >= self.lower.y
            && point.y <= self.upper.y
    }

    /// Expand this AABB by a margin on all sides.
    #[must_use]
    pub fn expanded(&self, margin: f64) -> Self {
        let m = Vect::new(margin, margin);
        Self {
            lower: self.lower - m,
            upper: self.upper + m,
        }
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Vect {
        (self.lower + self.upper) * 0.5
    }

    /// Full size along each axis.
    #[must_use]
    pub fn extents(&self) -> Vect {
        self.upper - self.lower
    }

    /// Half-extents along each axis.
    #[must_use]
    pub fn half_extents(&self) -> Vect {
        (self.upper - self.lower) * 0.5
    }

    /// Area of the box (zero for an empty box).
    #[must_use]
    pub fn area(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let size = self.extents();
        size.x * size.y
    }
}
