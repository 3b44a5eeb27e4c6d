//! The constraint protocol.
//!
//! Every constraint (joint or contact group) is driven through the same four
//! calls each step, in this order:
//!
//! ```text
//! pre_step(dt)                  once     anchors, effective mass, bias target
//! apply_cached_impulse(dt_coef) once     warm start from last step's impulse
//! apply_impulse()               N times  one Gauss-Seidel relaxation pass
//! impulse()                     any time magnitude of the accumulated impulse
//! ```
//!
//! `apply_*` calls must follow a successful `pre_step` in the same step.

use planar_core::BodySet;
use planar_types::{BodyId, PhysicsError, Result, default_error_bias};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Limits and error correction shared by joints.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConstraintParams {
    /// Maximum force the constraint may apply.
    pub max_force: f64,
    /// Maximum speed at which positional error is corrected.
    pub max_bias: f64,
    /// Fraction of positional error left uncorrected after one second.
    pub error_bias: f64,
}

impl Default for ConstraintParams {
    fn default() -> Self {
        Self {
            max_force: f64::INFINITY,
            max_bias: f64::INFINITY,
            error_bias: default_error_bias(),
        }
    }
}

impl ConstraintParams {
    /// Set the maximum force.
    #[must_use]
    pub fn with_max_force(mut self, max_force: f64) -> Self {
        self.max_force = max_force;
        self
    }

    /// Set the maximum correction speed.
    #[must_use]
    pub fn with_max_bias(mut self, max_bias: f64) -> Self {
        self.max_bias = max_bias;
        self
    }

    /// Set the error bias.
    #[must_use]
    pub fn with_error_bias(mut self, error_bias: f64) -> Self {
        self.error_bias = error_bias;
        self
    }

    /// Validate the parameters.
    pub fn validate(&self) -> Result<()> {
        if !(self.max_force >= 0.0) {
            return Err(PhysicsError::invalid_config("max_force cannot be negative"));
        }
        if !(self.max_bias >= 0.0) {
            return Err(PhysicsError::invalid_config("max_bias cannot be negative"));
        }
        if !(0.0..=1.0).contains(&self.error_bias) {
            return Err(PhysicsError::invalid_config(
                "error_bias must be between 0 and 1",
            ));
        }
        Ok(())
    }
}

/// A velocity constraint between two bodies.
pub trait Constraint {
    /// First body.
    fn body_a(&self) -> BodyId;

    /// Second body.
    fn body_b(&self) -> BodyId;

    /// Prepare for a step of length `dt`.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidTimestep`] unless `dt` is positive and
    /// finite, [`PhysicsError::UnsolvableConstraint`] when the effective mass
    /// is singular, or a lookup error when a body is missing.
    fn pre_step(&mut self, bodies: &mut BodySet, dt: f64) -> Result<()>;

    /// Re-apply last step's impulse scaled by `dt_coef` (new dt / old dt).
    fn apply_cached_impulse(&mut self, bodies: &mut BodySet, dt_coef: f64) -> Result<()>;

    /// Run one relaxation pass.
    fn apply_impulse(&mut self, bodies: &mut BodySet) -> Result<()>;

    /// Magnitude of the impulse accumulated this step.
    fn impulse(&self) -> f64;
}

impl<C: Constraint + ?Sized> Constraint for &mut C {
    fn body_a(&self) -> BodyId {
        (**self).body_a()
    }

    fn body_b(&self) -> BodyId {
        (**self).body_b()
    }

    fn pre_step(&mut self, bodies: &mut BodySet, dt: f64) -> Result<()> {
        (**self).pre_step(bodies, dt)
    }

    fn apply_cached_impulse(&mut self, bodies: &mut BodySet, dt_coef: f64) -> Result<()> {
        (**self).apply_cached_impulse(bodies, dt_coef)
    }

    fn apply_impulse(&mut self, bodies: &mut BodySet) -> Result<()> {
        (**self).apply_impulse(bodies)
    }

    fn impulse(&self) -> f64 {
        (**self).impulse()
    }
}

impl<C: Constraint + ?Sized> Constraint for Box<C> {
    fn body_a(&self) -> BodyId {
        (**self).body_a()
    }

    fn body_b(&self) -> BodyId {
        (**self).body_b()
    }

    fn pre_step(&mut self, bodies: &mut BodySet, dt: f64) -> Result<()> {
        (**self).pre_step(bodies, dt)
    }

    fn apply_cached_impulse(&mut self, bodies: &mut BodySet, dt_coef: f64) -> Result<()> {
        (**self).apply_cached_impulse(bodies, dt_coef)
    }

    fn apply_impulse(&mut self, bodies: &mut BodySet) -> Result<()> {
        (**self).apply_impulse(bodies)
    }

    fn impulse(&self) -> f64 {
        (**self).impulse()
    }
}

pub(crate) fn check_distinct(a: BodyId, b: BodyId) -> Result<()> {
    if a == b {
        return Err(PhysicsError::SameBody(a));
    }
    Ok(())
}
