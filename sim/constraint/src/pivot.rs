//! Pivot joint: pins a point on one body to a point on another.
//!
//! Both translational degrees of freedom at the pivot are removed, so the
//! effective mass is a full 2×2 tensor. The accumulated impulse is clamped
//! to a circle of radius `max_force · dt`.

use nalgebra::Matrix2;
use planar_core::BodySet;
use planar_types::math::clamp_length;
use planar_types::{BodyId, PhysicsError, Result, Vect};

use crate::constraint::check_distinct;
use crate::impulse::{apply_impulses, bias_coef, check_timestep, k_tensor, relative_velocity};
use crate::{Constraint, ConstraintParams};

/// Holds two bodies together at a shared point.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotJoint {
    body_a: BodyId,
    body_b: BodyId,
    /// Pivot in body A's local coordinates.
    pub anchor_a: Vect,
    /// Pivot in body B's local coordinates.
    pub anchor_b: Vect,
    /// Force limit and error correction.
    pub params: ConstraintParams,

    r1: Vect,
    r2: Vect,
    k: Matrix2<f64>,
    j_acc: Vect,
    j_max: f64,
    bias: Vect,
}

impl PivotJoint {
    /// Join `a` and `b` at local anchors on each body.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::SameBody`] if `a == b`.
    pub fn new(a: BodyId, b: BodyId, anchor_a: Vect, anchor_b: Vect) -> Result<Self> {
        check_distinct(a, b)?;
        Ok(Self {
            body_a: a,
            body_b: b,
            anchor_a,
            anchor_b,
            params: ConstraintParams::default(),
            r1: Vect::zeros(),
            r2: Vect::zeros(),
            k: Matrix2::zeros(),
            j_acc: Vect::zeros(),
            j_max: 0.0,
            bias: Vect::zeros(),
        })
    }

    /// Join `a` and `b` at their centers of gravity.
    pub fn at_centers(a: BodyId, b: BodyId) -> Result<Self> {
        Self::new(a, b, Vect::zeros(), Vect::zeros())
    }

    /// Join `a` and `b` at a world-space pivot, using their current poses to
    /// compute the local anchors.
    ///
    /// # Errors
    ///
    /// Returns a lookup error if either body is missing.
    pub fn with_world_pivot(bodies: &BodySet, a: BodyId, b: BodyId, pivot: Vect) -> Result<Self> {
        check_distinct(a, b)?;
        let body_a = bodies.get(a).ok_or(PhysicsError::InvalidBodyId(a))?;
        let body_b = bodies.get(b).ok_or(PhysicsError::InvalidBodyId(b))?;
        Self::new(a, b, body_a.world_to_local(pivot), body_b.world_to_local(pivot))
    }

    /// Set the constraint parameters.
    #[must_use]
    pub fn with_params(mut self, params: ConstraintParams) -> Self {
        self.params = params;
        self
    }

    /// Accumulated impulse vector.
    #[must_use]
    pub fn accumulated_impulse(&self) -> Vect {
        self.j_acc
    }

    /// Forget the accumulated impulse so the next step starts cold.
    pub fn reset_impulse(&mut self) {
        self.j_acc = Vect::zeros();
    }

    /// World-space anchor offsets from the last pre-step.
    #[must_use]
    pub fn world_offsets(&self) -> (Vect, Vect) {
        (self.r1, self.r2)
    }

    /// Bias velocity target from the last pre-step.
    #[must_use]
    pub fn bias(&self) -> Vect {
        self.bias
    }
}

impl Constraint for PivotJoint {
    fn body_a(&self) -> BodyId {
        self.body_a
    }

    fn body_b(&self) -> BodyId {
        self.body_b
    }

    fn pre_step(&mut self, bodies: &mut BodySet, dt: f64) -> Result<()> {
        check_timestep(dt)?;
        let (a, b) = bodies.pair_mut(self.body_a, self.body_b)?;

        self.r1 = a.rotation().rotate(self.anchor_a);
        self.r2 = b.rotation().rotate(self.anchor_b);

        self.k = k_tensor(a, b, self.r1, self.r2)?;
        self.j_max = self.params.max_force * dt;

        let delta = (b.position() + self.r2) - (a.position() + self.r1);
        self.bias = clamp_length(
            delta * (-bias_coef(self.params.error_bias, dt) / dt),
            self.params.max_bias,
        );
        Ok(())
    }

    fn apply_cached_impulse(&mut self, bodies: &mut BodySet, dt_coef: f64) -> Result<()> {
        let (a, b) = bodies.pair_mut(self.body_a, self.body_b)?;
        apply_impulses(a, b, self.r1, self.r2, self.j_acc * dt_coef);
        Ok(())
    }

    fn apply_impulse(&mut self, bodies: &mut BodySet) -> Result<()> {
        let (a, b) = bodies.pair_mut(self.body_a, self.body_b)?;

        let vr = relative_velocity(a, b, self.r1, self.r2);
        let j = self.k * (self.bias - vr);

        let j_old = self.j_acc;
        self.j_acc = clamp_length(j_old + j, self.j_max);
        apply_impulses(a, b, self.r1, self.r2, self.j_acc - j_old);
        Ok(())
    }

    fn impulse(&self) -> f64 {
        self.j_acc.norm()
    }
}
