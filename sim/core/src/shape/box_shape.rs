//! Axis-aligned box convenience geometry over [`Polygon`].

use planar_types::{Aabb, Transform, Vect};

use super::Polygon;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rectangle centered at a local `position`, backed by a four-vertex polygon.
///
/// `width`, `height` and `position` may be edited freely, but the backing
/// polygon keeps its old vertices until [`update_poly`](Self::update_poly) is
/// called.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoxShape {
    /// Width along the local x axis.
    pub width: f64,
    /// Height along the local y axis.
    pub height: f64,
    /// Center in body-local coordinates.
    pub position: Vect,
    polygon: Polygon,
}

impl BoxShape {
    /// Create a box of the given size centered at `position`.
    #[must_use]
    pub fn new(width: f64, height: f64, position: Vect) -> Self {
        let mut shape = Self {
            width,
            height,
            position,
            polygon: Polygon::default(),
        };
        shape.update_poly();
        shape
    }

    /// Rebuild the backing polygon from `width`, `height` and `position`.
    pub fn update_poly(&mut self) {
        let hw = (self.width / 2.0).abs();
        let hh = (self.height / 2.0).abs();
        let verts = [
            Vect::new(-hw, -hh),
            Vect::new(-hw, hh),
            Vect::new(hw, hh),
            Vect::new(hw, -hh),
        ];
        self.polygon.set_verts(&verts, self.position);
    }

    /// The backing polygon.
    #[must_use]
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    /// Moment of inertia about the body origin for the given mass.
    #[must_use]
    pub fn moment(&self, mass: f64) -> f64 {
        mass * (self.width * self.width + self.height * self.height) / 12.0
            + mass * self.position.norm_squared()
    }

    /// Recompute the backing polygon's world data and return the bounding box.
    pub fn update(&mut self, xf: &Transform) -> Aabb {
        self.polygon.update(xf)
    }

    /// Whether a world point lies inside or on the box.
    #[must_use]
    pub fn test_point(&self, point: Vect) -> bool {
        self.polygon.test_point(point)
    }
}
