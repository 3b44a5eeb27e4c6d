//! Thick line segment geometry.

use planar_types::math::{component_max, component_min, normalize_or_zero, perp};
use planar_types::{Aabb, Transform, Vect};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A line segment from `a` to `b` swept by `radius` (a capsule).
///
/// Endpoints and radius are body-local; changes take effect at the next
/// [`update`](Self::update).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Segment {
    /// Start point.
    pub a: Vect,
    /// End point.
    pub b: Vect,
    /// Thickness radius.
    pub radius: f64,
    n: Vect,
    world_a: Vect,
    world_b: Vect,
    world_n: Vect,
    a_tangent: Vect,
    b_tangent: Vect,
}

impl Segment {
    /// Create a segment between two local points.
    #[must_use]
    pub fn new(a: Vect, b: Vect, radius: f64) -> Self {
        let n = normalize_or_zero(perp(b - a));
        Self {
            a,
            b,
            radius,
            n,
            world_a: a,
            world_b: b,
            world_n: n,
            a_tangent: Vect::zeros(),
            b_tangent: Vect::zeros(),
        }
    }

    /// Local unit normal (left of the `a → b` direction).
    #[must_use]
    pub fn normal(&self) -> Vect {
        self.n
    }

    /// World-space endpoints as of the last update.
    #[must_use]
    pub fn world_endpoints(&self) -> (Vect, Vect) {
        (self.world_a, self.world_b)
    }

    /// World-space normal as of the last update.
    #[must_use]
    pub fn world_normal(&self) -> Vect {
        self.world_n
    }

    /// Record the neighboring vertices when segments are chained.
    ///
    /// Tangents are stored as offsets from each endpoint toward its neighbor.
    pub fn set_neighbors(&mut self, prev: Vect, next: Vect) {
        self.a_tangent = prev - self.a;
        self.b_tangent = next - self.b;
    }

    /// Tangents toward the chained neighbors, zero when unchained.
    #[must_use]
    pub fn tangents(&self) -> (Vect, Vect) {
        (self.a_tangent, self.b_tangent)
    }

    /// Moment of inertia about the body origin for the given mass.
    ///
    /// Thin rod plus the parallel-axis term for the midpoint.
    #[must_use]
    pub fn moment(&self, mass: f64) -> f64 {
        let mid = (self.a + self.b) * 0.5;
        mass * ((self.b - self.a).norm_squared() / 12.0 + mid.norm_squared())
    }

    /// Recompute world endpoints and normals and return the bounding box.
    pub fn update(&mut self, xf: &Transform) -> Aabb {
        self.world_a = xf.transform_point(self.a);
        self.world_b = xf.transform_point(self.b);
        self.n = normalize_or_zero(perp(self.b - self.a));
        self.world_n = xf.transform_vector(self.n);

        let r = Vect::new(self.radius, self.radius);
        Aabb::new(
            component_min(self.world_a, self.world_b) - r,
            component_max(self.world_a, self.world_b) + r,
        )
    }

    /// Point queries are not supported for segments; always `false`.
    #[must_use]
    pub fn test_point(&self, _point: Vect) -> bool {
        false
    }
}
