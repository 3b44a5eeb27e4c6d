//! Contact constraints for 2D rigid-body simulation.
//!
//! Narrow-phase collision detection (outside this workspace) reports a list
//! of [`ContactPoint`]s per overlapping shape pair. This crate turns them into
//! constraints:
//!
//! - [`Contact`] - one contact with warm-start impulse accumulators
//! - [`ContactGroup`] - every contact of one shape pair, solved as a
//!   [`Constraint`](planar_constraint::Constraint) with restitution, Coulomb
//!   friction, and bias-only penetration correction
//! - [`ContactCache`] - keeps groups alive across steps and drives the
//!   bodies' [`CollisionHandler`](planar_core::CollisionHandler) callbacks
//!
//! # Warm Starting
//!
//! A contact keeps its accumulated impulses from the previous step when the
//! narrow phase reports the same feature hash in the same slot. Any other
//! hash starts from zero.
//!
//! # Example
//!
//! ```
//! use planar_constraint::SequentialImpulseSolver;
//! use planar_contact::{ContactCache, ContactGroup, ContactPoint};
//! use planar_core::{Body, BodySet, CollisionPair, Shape, ShapeKey};
//! use planar_types::Vect;
//!
//! let mut bodies = BodySet::new();
//! let ground = bodies.insert(
//!     Body::new_static().with_shape(Shape::segment(
//!         Vect::new(-5.0, 0.0),
//!         Vect::new(5.0, 0.0),
//!         0.0,
//!     )),
//! );
//! let ball = bodies.insert(
//!     Body::new(1.0, 0.1)
//!         .unwrap()
//!         .with_position(Vect::new(0.0, 0.5))
//!         .with_velocity(Vect::new(0.0, -3.0))
//!         .with_shape(Shape::circle(0.5, Vect::zeros())),
//! );
//!
//! let pair = CollisionPair::new(ShapeKey::new(ground, 0), ShapeKey::new(ball, 0));
//! let mut cache = ContactCache::default();
//! let mut solver = SequentialImpulseSolver::default();
//!
//! cache.begin_step();
//! cache
//!     .update(pair, &[ContactPoint::new(Vect::zeros(), Vect::y(), -0.01, 0)], &bodies)
//!     .unwrap();
//! let mut groups: Vec<&mut ContactGroup> = cache.active_groups_mut().collect();
//! solver.solve(&mut bodies, &mut groups, 1.0 / 60.0).unwrap();
//! cache.post_solve(&bodies);
//! cache.end_step(&bodies);
//!
//! assert!(bodies.get(ball).unwrap().velocity().y.abs() < 1e-9);
//! ```

#![doc(html_root_url = "https://docs.rs/planar-contact/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,
    clippy::suboptimal_flops,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions
)]

mod cache;
mod contact;
mod group;

pub use cache::ContactCache;
pub use contact::{Contact, ContactPoint, FeatureHash};
pub use group::ContactGroup;
