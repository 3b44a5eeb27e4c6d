//! Circle geometry.

use planar_types::{Aabb, Transform, Vect};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A solid circle offset from its body's origin.
///
/// `center` and `radius` are body-local; changes to them take effect at the
/// next [`update`](Self::update).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Circle {
    /// Center in body-local coordinates.
    pub center: Vect,
    /// Radius.
    pub radius: f64,
    world_center: Vect,
}

impl Circle {
    /// Create a circle with the given local center and radius.
    #[must_use]
    pub fn new(center: Vect, radius: f64) -> Self {
        Self {
            center,
            radius,
            world_center: center,
        }
    }

    /// World-space center as of the last update.
    #[must_use]
    pub fn world_center(&self) -> Vect {
        self.world_center
    }

    /// Moment of inertia about the body origin for the given mass.
    ///
    /// Solid disk plus the parallel-axis term for the local offset.
    #[must_use]
    pub fn moment(&self, mass: f64) -> f64 {
        mass * 0.5 * self.radius * self.radius + mass * self.center.norm_squared()
    }

    /// Area of the disk.
    #[must_use]
    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }

    /// Recompute the world center and return the bounding box.
    pub fn update(&mut self, xf: &Transform) -> Aabb {
        self.world_center = xf.transform_point(self.center);
        Aabb::from_center(self.world_center, Vect::new(self.radius, self.radius))
    }

    /// Whether a world point lies inside or on the circle.
    #[must_use]
    pub fn test_point(&self, point: Vect) -> bool {
        (point - self.world_center).norm_squared() <= self.radius * self.radius
    }
}
