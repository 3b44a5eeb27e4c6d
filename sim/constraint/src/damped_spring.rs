//! Damped spring between two anchor points.
//!
//! The spring force is applied in full during the pre-step as a single
//! impulse `n · f(dist) · dt`. Each relaxation pass then applies a damping
//! impulse that moves the relative normal velocity a fixed fraction of the
//! way toward a target that starts the step at zero:
//!
//! ```text
//! v_coef   = 1 - exp(-damping · dt · k)
//! v_damp   = (target - vrn) · v_coef
//! target  ← vrn + v_damp
//! ```
//!
//! Neither impulse is clamped and nothing is warm-started.

use std::fmt;
use std::sync::Arc;

use planar_core::BodySet;
use planar_types::{BodyId, Result, Vect};

use crate::Constraint;
use crate::constraint::check_distinct;
use crate::impulse::{apply_impulses, check_timestep, k_scalar, normal_relative_velocity};

/// Force law for a [`DampedSpring`].
pub trait SpringForce: Send + Sync {
    /// Force along the spring axis at separation `dist`. Positive values push
    /// the anchors apart.
    fn force(&self, spring: &DampedSpring, dist: f64) -> f64;
}

/// Hooke's law: `stiffness · (rest_length - dist)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HookeanForce;

impl SpringForce for HookeanForce {
    fn force(&self, spring: &DampedSpring, dist: f64) -> f64 {
        (spring.rest_length - dist) * spring.stiffness
    }
}

/// A spring with viscous damping along the line between its anchors.
#[derive(Clone)]
pub struct DampedSpring {
    body_a: BodyId,
    body_b: BodyId,
    /// Anchor in body A's local coordinates.
    pub anchor_a: Vect,
    /// Anchor in body B's local coordinates.
    pub anchor_b: Vect,
    /// Separation at which the spring exerts no force.
    pub rest_length: f64,
    /// Spring constant.
    pub stiffness: f64,
    /// Damping coefficient.
    pub damping: f64,
    force_law: Arc<dyn SpringForce>,

    r1: Vect,
    r2: Vect,
    n: Vect,
    n_mass: f64,
    v_coef: f64,
    target_vrn: f64,
    j_acc: f64,
}

impl DampedSpring {
    /// Create a Hookean spring between local anchors on `a` and `b`.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::SameBody`](planar_types::PhysicsError::SameBody) if `a == b`.
    pub fn new(
        a: BodyId,
        b: BodyId,
        anchor_a: Vect,
        anchor_b: Vect,
        rest_length: f64,
        stiffness: f64,
        damping: f64,
    ) -> Result<Self> {
        check_distinct(a, b)?;
        Ok(Self {
            body_a: a,
            body_b: b,
            anchor_a,
            anchor_b,
            rest_length,
            stiffness,
            damping,
            force_law: Arc::new(HookeanForce),
            r1: Vect::zeros(),
            r2: Vect::zeros(),
            n: Vect::zeros(),
            n_mass: 0.0,
            v_coef: 0.0,
            target_vrn: 0.0,
            j_acc: 0.0,
        })
    }

    /// Replace the force law.
    #[must_use]
    pub fn with_force_law(mut self, law: Arc<dyn SpringForce>) -> Self {
        self.force_law = law;
        self
    }

    /// Replace the force law in place.
    pub fn set_force_law(&mut self, law: Arc<dyn SpringForce>) {
        self.force_law = law;
    }

    /// Spring axis from A's anchor toward B's anchor, from the last pre-step.
    ///
    /// Zero when the anchors coincide.
    #[must_use]
    pub fn normal(&self) -> Vect {
        self.n
    }

    /// Signed scalar impulse accumulated along the normal this step.
    #[must_use]
    pub fn accumulated_impulse(&self) -> f64 {
        self.j_acc
    }
}

impl fmt::Debug for DampedSpring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DampedSpring")
            .field("body_a", &self.body_a)
            .field("body_b", &self.body_b)
            .field("anchor_a", &self.anchor_a)
            .field("anchor_b", &self.anchor_b)
            .field("rest_length", &self.rest_length)
            .field("stiffness", &self.stiffness)
            .field("damping", &self.damping)
            .field("j_acc", &self.j_acc)
            .finish_non_exhaustive()
    }
}

impl Constraint for DampedSpring {
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

        let delta = (b.position() + self.r2) - (a.position() + self.r1);
        let dist = delta.norm();
        self.n = if dist > 0.0 { delta / dist } else { Vect::zeros() };

        let k = k_scalar(a, b, self.r1, self.r2, self.n)?;
        self.n_mass = 1.0 / k;
        self.target_vrn = 0.0;
        self.v_coef = 1.0 - (-self.damping * dt * k).exp();

        let f_spring = self.force_law.force(self, dist);
        self.j_acc = f_spring * dt;
        apply_impulses(a, b, self.r1, self.r2, self.n * self.j_acc);
        Ok(())
    }

    fn apply_cached_impulse(&mut self, _bodies: &mut BodySet, _dt_coef: f64) -> Result<()> {
        Ok(())
    }

    fn apply_impulse(&mut self, bodies: &mut BodySet) -> Result<()> {
        let (a, b) = bodies.pair_mut(self.body_a, self.body_b)?;

        let vrn = normal_relative_velocity(a, b, self.r1, self.r2, self.n);
        let v_damp = (self.target_vrn - vrn) * self.v_coef;
        self.target_vrn = vrn + v_damp;

        let j_damp = v_damp * self.n_mass;
        self.j_acc += j_damp;
        apply_impulses(a, b, self.r1, self.r2, self.n * j_damp);
        Ok(())
    }

    fn impulse(&self) -> f64 {
        self.j_acc.abs()
    }
}
