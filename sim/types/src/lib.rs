//! Core value types for 2D rigid-body simulation.
//!
//! This crate provides the leaf types every other `planar-*` crate builds on:
//!
//! - [`Vect`] and the 2D helpers in [`math`] - vector algebra on `nalgebra::Vector2<f64>`
//! - [`Rotation`] - a rotation stored as a (cosine, sine) pair
//! - [`Transform`] - rotation plus translation, local ↔ world mapping
//! - [`Aabb`] - world-space axis-aligned bounding box
//! - [`BodyId`] - non-owning handle to a body in a registry
//! - [`PhysicsError`] - configuration and solver errors
//! - [`SimulationConfig`] / [`SolverConfig`] - inputs consumed from the step driver
//!
//! # Design Philosophy
//!
//! These types are **pure values**. Bodies, shapes and constraints live in the
//! crates layered above (`planar-core`, `planar-constraint`, `planar-contact`).
//!
//! # Coordinate System
//!
//! - X: right
//! - Y: up
//! - Positive angles rotate counter-clockwise
//!
//! # Example
//!
//! ```
//! use planar_types::{Transform, Vect};
//! use std::f64::consts::FRAC_PI_2;
//!
//! let xf = Transform::new(Vect::new(1.0, 0.0), FRAC_PI_2);
//! let world = xf.transform_point(Vect::new(1.0, 0.0));
//!
//! assert!((world.x - 1.0).abs() < 1e-12);
//! assert!((world.y - 1.0).abs() < 1e-12);
//! ```

#![doc(html_root_url = "https://docs.rs/planar-types/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,     // Many methods can't be const due to nalgebra
    clippy::suboptimal_flops,          // mul_add style changes aren't always clearer
    clippy::missing_errors_doc,        // Error docs added where non-obvious
)]

mod aabb;
mod config;
mod error;
mod id;
pub mod math;
mod transform;

pub use aabb::Aabb;
pub use config::{SimulationConfig, SolverConfig, default_error_bias};
pub use error::PhysicsError;
pub use id::BodyId;
pub use math::Vect;
pub use transform::{Rotation, Transform};

/// Result type for simulation operations.
pub type Result<T> = std::result::Result<T, PhysicsError>;
