//! Rigid bodies and collision shapes for 2D simulation.
//!
//! This crate holds the per-body half of the simulation core:
//!
//! - [`Body`] - mass properties, kinematic state, force accumulators, the bias
//!   velocity channel, and the two integration phases
//! - [`VelocityIntegrator`] / [`PositionIntegrator`] - per-body replacements
//!   for the default [`SemiImplicitEuler`] phases
//! - [`Shape`] / [`ShapeGeometry`] - circles, convex polygons, boxes and segments
//! - [`BodySet`] - the registry that owns bodies and resolves [`BodyId`] handles
//! - [`CollisionHandler`] - optional per-body collision lifecycle callbacks
//!
//! # Step Order
//!
//! The driver calling into this crate runs each step as:
//!
//! ```text
//! 1. accumulate forces                (Body::add_force, ...)
//! 2. BodySet::update_velocities       (forces → velocity)
//! 3. solve constraints                (planar-constraint, planar-contact)
//! 4. BodySet::update_positions        (velocity + bias → position)
//! 5. BodySet::update_shapes           (world-space geometry for the next step)
//! ```
//!
//! # Example
//!
//! ```
//! use planar_core::{Body, BodySet, Shape};
//! use planar_types::{SimulationConfig, Vect};
//!
//! let mut bodies = BodySet::new();
//! let ball = bodies.insert(
//!     Body::new(1.0, 0.5)
//!         .unwrap()
//!         .with_position(Vect::new(0.0, 10.0))
//!         .with_shape(Shape::circle(1.0, Vect::zeros())),
//! );
//!
//! let config = SimulationConfig::default();
//! for _ in 0..60 {
//!     bodies.update_velocities(&config, config.timestep);
//!     bodies.update_positions(config.timestep);
//! }
//! bodies.update_shapes();
//!
//! assert!(bodies.get(ball).unwrap().position().y < 10.0);
//! ```

#![doc(html_root_url = "https://docs.rs/planar-core/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,
    clippy::suboptimal_flops,
    clippy::missing_errors_doc,
    clippy::cast_precision_loss, // usize ids and counts to u64/f64
    clippy::module_name_repetitions
)]

mod body;
mod body_set;
mod handler;
pub mod integrator;
pub mod shape;

pub use body::{Body, UserData};
pub use body_set::BodySet;
pub use handler::{CollisionHandler, CollisionPair};
pub use integrator::{PositionIntegrator, SemiImplicitEuler, VelocityIntegrator};
pub use shape::{
    BoxShape, Circle, Polygon, PolygonAxis, PolygonWarning, Segment, Shape, ShapeGeometry,
    ShapeKey, ShapeType, validate_polygon,
};

// Re-export the value types every caller needs
pub use planar_types::{Aabb, BodyId, PhysicsError, Result, Rotation, Transform, Vect};
