//! The contact constraint for one colliding shape pair.
//!
//! A [`ContactGroup`] owns every contact between two shapes and solves them
//! together through the [`Constraint`] protocol. Each relaxation pass runs,
//! per contact:
//!
//! ```text
//! bias     jb  = max(0, jb + (bias − vb·n)·n_mass)      → bias velocity only
//! normal   jn  = max(0, jn − (bounce + vr·n)·n_mass)
//! friction jt  = clamp(jt − (vr + v_surface)·t·t_mass, ±u·jn)
//! ```
//!
//! where `t = perp(n)`, `u` is the combined friction, and `bounce` is the
//! restitution target captured at pre-step.

use planar_constraint::Constraint;
use planar_constraint::impulse::{
    apply_bias_impulses, apply_impulses, bias_coef, bias_relative_velocity, check_timestep,
    k_scalar, normal_relative_velocity, relative_velocity,
};
use planar_core::{BodySet, CollisionPair, Shape, ShapeKey};
use planar_types::math::{fclamp, perp};
use planar_types::{BodyId, PhysicsError, Result, SolverConfig, Vect};

use crate::{Contact, ContactPoint};

/// All contacts between one pair of shapes.
#[derive(Debug, Clone)]
pub struct ContactGroup {
    pair: CollisionPair,
    contacts: Vec<Contact>,
    friction: f64,
    elasticity: f64,
    surface_vr: Vect,
    sensor: bool,
    slop: f64,
    collision_bias: f64,
}

impl ContactGroup {
    /// Create an empty group for `pair`, taking material properties from the
    /// two shapes.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidBodyId`] if either shape cannot be found.
    pub fn new(pair: CollisionPair, bodies: &BodySet) -> Result<Self> {
        let mut group = Self {
            pair,
            contacts: Vec::new(),
            friction: 0.0,
            elasticity: 0.0,
            surface_vr: Vect::zeros(),
            sensor: false,
            slop: 0.0,
            collision_bias: 0.0,
        };
        group.set_solver_config(&SolverConfig::default());
        group.refresh_material(bodies)?;
        Ok(group)
    }

    /// Use the slop and collision bias of `config`.
    #[must_use]
    pub fn with_solver_config(mut self, config: &SolverConfig) -> Self {
        self.set_solver_config(config);
        self
    }

    /// Use the slop and collision bias of `config`.
    pub fn set_solver_config(&mut self, config: &SolverConfig) {
        self.slop = config.collision_slop;
        self.collision_bias = config.collision_bias;
    }

    /// Re-read friction, elasticity and surface velocity from the shapes.
    pub fn refresh_material(&mut self, bodies: &BodySet) -> Result<()> {
        let a = lookup(bodies, self.pair.shape_a)?;
        let b = lookup(bodies, self.pair.shape_b)?;

        self.friction = a.friction * b.friction;
        self.elasticity = a.elasticity * b.elasticity;
        self.surface_vr = a.surface_velocity - b.surface_velocity;
        self.sensor = a.sensor || b.sensor;
        Ok(())
    }

    /// Replace the contacts with this step's narrow-phase output.
    ///
    /// Contacts are matched slot by slot: slot `i` keeps its warm start when
    /// the new point at `i` has the same feature hash.
    pub fn update(&mut self, points: &[ContactPoint]) {
        self.contacts.truncate(points.len());
        for (i, point) in points.iter().enumerate() {
            match self.contacts.get_mut(i) {
                Some(con) => con.reset(point.position, point.normal, point.depth, point.hash),
                None => self.contacts.push(Contact::from(point)),
            }
        }
        tracing::trace!(pair = ?self.pair, contacts = points.len(), "contact group updated");
    }

    /// The shape pair.
    #[must_use]
    pub fn pair(&self) -> CollisionPair {
        self.pair
    }

    /// Current contacts.
    #[must_use]
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Combined friction coefficient.
    #[must_use]
    pub fn friction(&self) -> f64 {
        self.friction
    }

    /// Override the combined friction coefficient.
    pub fn set_friction(&mut self, friction: f64) {
        self.friction = friction;
    }

    /// Combined elasticity.
    #[must_use]
    pub fn elasticity(&self) -> f64 {
        self.elasticity
    }

    /// Override the combined elasticity.
    pub fn set_elasticity(&mut self, elasticity: f64) {
        self.elasticity = elasticity;
    }

    /// Surface velocity of shape A relative to shape B.
    #[must_use]
    pub fn surface_velocity(&self) -> Vect {
        self.surface_vr
    }

    /// Whether either shape is a sensor.
    #[must_use]
    pub fn is_sensor(&self) -> bool {
        self.sensor
    }

    /// Sum of every contact's normal and friction impulse.
    #[must_use]
    pub fn total_impulse(&self) -> Vect {
        self.contacts.iter().map(Contact::impulse).sum()
    }
}

fn lookup(bodies: &BodySet, key: ShapeKey) -> Result<&Shape> {
    bodies
        .shape(key)
        .ok_or(PhysicsError::InvalidBodyId(key.body))
}

impl Constraint for ContactGroup {
    fn body_a(&self) -> BodyId {
        self.pair.body_a()
    }

    fn body_b(&self) -> BodyId {
        self.pair.body_b()
    }

    fn pre_step(&mut self, bodies: &mut BodySet, dt: f64) -> Result<()> {
        check_timestep(dt)?;
        let (a, b) = bodies.pair_mut(self.body_a(), self.body_b())?;
        let coef = bias_coef(self.collision_bias, dt);

        for con in &mut self.contacts {
            con.r1 = con.p - a.position();
            con.r2 = con.p - b.position();

            con.n_mass = 1.0 / k_scalar(a, b, con.r1, con.r2, con.n)?;
            con.t_mass = 1.0 / k_scalar(a, b, con.r1, con.r2, perp(con.n))?;

            con.bias = -coef * (con.dist + self.slop).min(0.0) / dt;
            con.j_bias = 0.0;

            con.bounce = normal_relative_velocity(a, b, con.r1, con.r2, con.n) * self.elasticity;
        }
        Ok(())
    }

    fn apply_cached_impulse(&mut self, bodies: &mut BodySet, dt_coef: f64) -> Result<()> {
        let (a, b) = bodies.pair_mut(self.body_a(), self.body_b())?;
        for con in &self.contacts {
            apply_impulses(a, b, con.r1, con.r2, con.impulse() * dt_coef);
        }
        Ok(())
    }

    fn apply_impulse(&mut self, bodies: &mut BodySet) -> Result<()> {
        let (a, b) = bodies.pair_mut(self.body_a(), self.body_b())?;

        for con in &mut self.contacts {
            let (n, r1, r2) = (con.n, con.r1, con.r2);
            let t = perp(n);

            // Position correction
            let vbn = bias_relative_velocity(a, b, r1, r2).dot(&n);
            let jbn = (con.bias - vbn) * con.n_mass;
            let jbn_old = con.j_bias;
            con.j_bias = (jbn_old + jbn).max(0.0);
            apply_bias_impulses(a, b, r1, r2, n * (con.j_bias - jbn_old));

            let vr = relative_velocity(a, b, r1, r2);

            let jn = -(con.bounce + vr.dot(&n)) * con.n_mass;
            let jn_old = con.jn_acc;
            con.jn_acc = (jn_old + jn).max(0.0);

            let vrt = (vr + self.surface_vr).dot(&t);
            let jt = -vrt * con.t_mass;
            let jt_max = self.friction * con.jn_acc;
            let jt_old = con.jt_acc;
            con.jt_acc = fclamp(jt_old + jt, -jt_max, jt_max);

            let j = n * (con.jn_acc - jn_old) + t * (con.jt_acc - jt_old);
            apply_impulses(a, b, r1, r2, j);
        }
        Ok(())
    }

    fn impulse(&self) -> f64 {
        self.total_impulse().norm()
    }
}
