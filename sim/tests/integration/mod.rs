//! Integration tests for the planar-* crates.
//!
//! These tests drive bodies, shapes, joints and contacts together:
//! - Body mass properties and cloning
//! - Velocity/position integration and custom integrators
//! - Shape geometry in world space
//! - Pivot joints and damped springs under the sequential impulse solver
//! - Warm-started contacts through the pair cache

pub mod bodies;
pub mod contacts;
pub mod stepping;
pub mod joints;
pub mod shapes;
