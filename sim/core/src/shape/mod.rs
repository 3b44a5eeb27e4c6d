//! Collision shapes attached to bodies.
//!
//! A [`Shape`] pairs a [`ShapeGeometry`] variant with surface material and a
//! cached world-space bounding box. Geometry is stored in body-local
//! coordinates; world-space queries ([`Shape::test_point`], polygon axis
//! tests) are valid only after [`Shape::update`] has been called with the
//! body's current transform.
//!
//! # Example
//!
//! ```
//! use planar_core::Shape;
//! use planar_types::{Transform, Vect};
//!
//! let mut shape = Shape::circle(1.0, Vect::zeros()).with_friction(0.5);
//! let aabb = shape.update(&Transform::from_position(Vect::new(3.0, 0.0)));
//!
//! assert_eq!(aabb.center(), Vect::new(3.0, 0.0));
//! assert!(shape.test_point(Vect::new(3.5, 0.0)));
//! ```

mod box_shape;
mod circle;
mod polygon;
mod segment;

pub use box_shape::BoxShape;
pub use circle::Circle;
pub use polygon::{Polygon, PolygonAxis, PolygonWarning, validate_polygon};
pub use segment::Segment;

use planar_types::{Aabb, BodyId, Transform, Vect};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Geometric category of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ShapeType {
    /// A circle.
    Circle,
    /// A convex polygon (including boxes).
    Polygon,
    /// A thick line segment.
    Segment,
}

/// Local geometry of a shape.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ShapeGeometry {
    /// A circle.
    Circle(Circle),
    /// A convex polygon.
    Polygon(Polygon),
    /// A box backed by a polygon.
    Box(BoxShape),
    /// A thick line segment.
    Segment(Segment),
}

impl ShapeGeometry {
    /// The shape category. Boxes report [`ShapeType::Polygon`].
    #[must_use]
    pub fn shape_type(&self) -> ShapeType {
        match self {
            Self::Circle(_) => ShapeType::Circle,
            Self::Polygon(_) | Self::Box(_) => ShapeType::Polygon,
            Self::Segment(_) => ShapeType::Segment,
        }
    }

    /// Moment of inertia about the body origin for the given mass.
    #[must_use]
    pub fn moment(&self, mass: f64) -> f64 {
        match self {
            Self::Circle(c) => c.moment(mass),
            Self::Polygon(p) => p.moment(mass),
            Self::Box(b) => b.moment(mass),
            Self::Segment(s) => s.moment(mass),
        }
    }

    /// Recompute world-space data and return the bounding box.
    pub fn update(&mut self, xf: &Transform) -> Aabb {
        match self {
            Self::Circle(c) => c.update(xf),
            Self::Polygon(p) => p.update(xf),
            Self::Box(b) => b.update(xf),
            Self::Segment(s) => s.update(xf),
        }
    }

    /// Whether a world point lies inside the shape.
    #[must_use]
    pub fn test_point(&self, point: Vect) -> bool {
        match self {
            Self::Circle(c) => c.test_point(point),
            Self::Polygon(p) => p.test_point(point),
            Self::Box(b) => b.test_point(point),
            Self::Segment(s) => s.test_point(point),
        }
    }

    /// The polygon behind a polygon or box.
    #[must_use]
    pub fn as_polygon(&self) -> Option<&Polygon> {
        match self {
            Self::Polygon(p) => Some(p),
            Self::Box(b) => Some(b.polygon()),
            _ => None,
        }
    }
}

/// Identifies a shape by its owning body and its index in the body's shape list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShapeKey {
    /// Owning body.
    pub body: BodyId,
    /// Index into the body's shapes.
    pub index: usize,
}

impl ShapeKey {
    /// Create a shape key.
    #[must_use]
    pub const fn new(body: BodyId, index: usize) -> Self {
        Self { body, index }
    }
}

/// A collision shape: geometry, surface material and cached bounds.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Shape {
    geometry: ShapeGeometry,
    body: Option<BodyId>,
    aabb: Aabb,
    /// Coulomb friction coefficient.
    pub friction: f64,
    /// Restitution coefficient (0 = inelastic, 1 = perfectly elastic).
    pub elasticity: f64,
    /// Tangential surface velocity, as for conveyor belts.
    pub surface_velocity: Vect,
    /// Sensors report collisions but produce no contact response.
    pub sensor: bool,
}

impl Shape {
    /// Wrap geometry in a shape with default material.
    #[must_use]
    pub fn new(geometry: ShapeGeometry) -> Self {
        Self {
            geometry,
            body: None,
            aabb: Aabb::empty(),
            friction: 0.0,
            elasticity: 0.0,
            surface_velocity: Vect::zeros(),
            sensor: false,
        }
    }

    /// A circle of `radius` centered at the local `offset`.
    #[must_use]
    pub fn circle(radius: f64, offset: Vect) -> Self {
        Self::new(ShapeGeometry::Circle(Circle::new(offset, radius)))
    }

    /// A convex polygon from clockwise vertices shifted by `offset`.
    #[must_use]
    pub fn polygon(verts: &[Vect], offset: Vect) -> Self {
        Self::new(ShapeGeometry::Polygon(Polygon::new(verts, offset)))
    }

    /// A box of the given size centered at the local `position`.
    #[must_use]
    pub fn box_shape(width: f64, height: f64, position: Vect) -> Self {
        Self::new(ShapeGeometry::Box(BoxShape::new(width, height, position)))
    }

    /// A segment from `a` to `b` with thickness `radius`.
    #[must_use]
    pub fn segment(a: Vect, b: Vect, radius: f64) -> Self {
        Self::new(ShapeGeometry::Segment(Segment::new(a, b, radius)))
    }

    /// Set the friction coefficient.
    #[must_use]
    pub fn with_friction(mut self, friction: f64) -> Self {
        self.friction = friction;
        self
    }

    /// Set the restitution coefficient.
    #[must_use]
    pub fn with_elasticity(mut self, elasticity: f64) -> Self {
        self.elasticity = elasticity;
        self
    }

    /// Set the surface velocity.
    #[must_use]
    pub fn with_surface_velocity(mut self, velocity: Vect) -> Self {
        self.surface_velocity = velocity;
        self
    }

    /// Mark the shape as a sensor.
    #[must_use]
    pub fn as_sensor(mut self) -> Self {
        self.sensor = true;
        self
    }

    /// The geometry.
    #[must_use]
    pub fn geometry(&self) -> &ShapeGeometry {
        &self.geometry
    }

    /// Mutable geometry. Edits take effect at the next update.
    pub fn geometry_mut(&mut self) -> &mut ShapeGeometry {
        &mut self.geometry
    }

    /// The owning body, once attached.
    #[must_use]
    pub fn body(&self) -> Option<BodyId> {
        self.body
    }

    pub(crate) fn set_body(&mut self, body: Option<BodyId>) {
        self.body = body;
    }

    /// Bounding box as of the last update.
    #[must_use]
    pub fn aabb(&self) -> Aabb {
        self.aabb
    }

    /// The shape category.
    #[must_use]
    pub fn shape_type(&self) -> ShapeType {
        self.geometry.shape_type()
    }

    /// Moment of inertia about the body origin for the given mass.
    #[must_use]
    pub fn moment(&self, mass: f64) -> f64 {
        self.geometry.moment(mass)
    }

    /// Recompute world-space data from the body transform and cache the bounds.
    pub fn update(&mut self, xf: &Transform) -> Aabb {
        self.aabb = self.geometry.update(xf);
        self.aabb
    }

    /// Whether a world point lies inside the shape.
    #[must_use]
    pub fn test_point(&self, point: Vect) -> bool {
        self.geometry.test_point(point)
    }

    /// The polygon behind a polygon or box shape.
    #[must_use]
    pub fn as_polygon(&self) -> Option<&Polygon> {
        self.geometry.as_polygon()
    }
}
