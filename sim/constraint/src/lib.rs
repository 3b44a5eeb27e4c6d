//! Joint constraints and the sequential impulse solver for 2D rigid bodies.
//!
//! # Constraints
//!
//! - [`PivotJoint`] - pins a point on one body to a point on another
//! - [`DampedSpring`] - Hookean (or custom) spring with viscous damping
//!
//! Contact groups in `planar-contact` implement the same [`Constraint`]
//! trait, so joints and contacts are solved together.
//!
//! # Solver
//!
//! [`SequentialImpulseSolver`] drives the protocol documented in
//! [`Constraint`]: one pre-step, one warm start, then a fixed number of
//! Gauss-Seidel relaxation passes. Position error is corrected through each
//! body's bias velocity, which is consumed by the next position update and
//! never feeds back into the real velocity.
//!
//! ```text
//! bias_coef = 1 - error_bias^dt
//! bias      = clamp(-bias_coef · error / dt, max_bias)
//! ```
//!
//! # Example
//!
//! ```
//! use planar_constraint::{Constraint, PivotJoint, SequentialImpulseSolver};
//! use planar_core::{Body, BodySet};
//! use planar_types::Vect;
//!
//! let mut bodies = BodySet::new();
//! let ground = bodies.insert(Body::new_static());
//! let bob = bodies.insert(
//!     Body::new(1.0, 1.0).unwrap().with_velocity(Vect::new(0.0, -5.0)),
//! );
//!
//! let mut joints = [PivotJoint::at_centers(ground, bob).unwrap()];
//! let mut solver = SequentialImpulseSolver::default();
//! let report = solver.solve(&mut bodies, &mut joints, 1.0 / 60.0).unwrap();
//!
//! assert_eq!(report.constraints, 1);
//! assert!(bodies.get(bob).unwrap().velocity().norm() < 1e-9);
//! assert!((joints[0].impulse() - 5.0).abs() < 1e-9);
//! ```

#![doc(html_root_url = "https://docs.rs/planar-constraint/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,
    clippy::suboptimal_flops,
    clippy::missing_errors_doc,
    clippy::neg_cmp_op_on_partial_ord, // NaN-rejecting comparisons
    clippy::module_name_repetitions
)]

mod constraint;
mod damped_spring;
pub mod impulse;
mod pivot;
mod solver;

pub use constraint::{Constraint, ConstraintParams};
pub use damped_spring::{DampedSpring, HookeanForce, SpringForce};
pub use pivot::PivotJoint;
pub use solver::{SequentialImpulseSolver, SolverReport};

// Re-export the solver configuration
pub use planar_types::SolverConfig;
