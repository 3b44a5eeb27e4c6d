//! Rigid bodies.
//!
//! A [`Body`] owns its mass properties, kinematic state, force accumulators,
//! and its [`Shape`]s. Mass and moment are only ever changed through validated
//! setters, which keep the cached inverses consistent:
//!
//! ```text
//! mass_inv   = 1 / mass      (0 for infinite mass)
//! moment_inv = 1 / moment    (0 for infinite moment)
//! ```
//!
//! Besides the physical velocity `(v, w)`, every body carries a *bias*
//! velocity `(v_bias, w_bias)` that constraints write to for position-error
//! correction. The bias channel moves the body during
//! [`update_position`](Body::update_position) and is then cleared; it never
//! shows up in the reported velocity.
//!
//! # Example
//!
//! ```
//! use planar_core::Body;
//! use planar_types::Vect;
//!
//! let mut body = Body::new(1.0, 1.0).unwrap();
//! body.update_velocity(Vect::new(0.0, -10.0), 1.0, 1.0, 0.1);
//! body.update_position(0.1);
//!
//! assert!((body.velocity().y + 1.0).abs() < 1e-12);
//! assert!((body.position().y + 0.1).abs() < 1e-12);
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use planar_types::math::{cross, cross_sv};
use planar_types::{BodyId, PhysicsError, Result, Rotation, Transform, Vect};

use crate::integrator::{PositionIntegrator, SemiImplicitEuler, VelocityIntegrator};
use crate::{CollisionHandler, Shape};

/// Opaque user payload attached to a body.
pub type UserData = Arc<dyn Any + Send + Sync>;

/// A rigid body.
pub struct Body {
    pub(crate) id: Option<BodyId>,

    pub(crate) mass: f64,
    pub(crate) mass_inv: f64,
    pub(crate) moment: f64,
    pub(crate) moment_inv: f64,

    pub(crate) position: Vect,
    pub(crate) velocity: Vect,
    pub(crate) force: Vect,

    pub(crate) angle: f64,
    pub(crate) rotation: Rotation,
    pub(crate) angular_velocity: f64,
    pub(crate) torque: f64,

    pub(crate) velocity_bias: Vect,
    pub(crate) angular_velocity_bias: f64,

    pub(crate) velocity_limit: f64,
    pub(crate) angular_velocity_limit: f64,
    pub(crate) ignore_gravity: bool,
    pub(crate) idle_time: f64,

    shapes: Vec<Shape>,

    velocity_integrator: Option<Arc<dyn VelocityIntegrator>>,
    position_integrator: Option<Arc<dyn PositionIntegrator>>,
    user_data: Option<UserData>,
    handler: Option<Arc<dyn CollisionHandler>>,
}

impl Body {
    /// Create a dynamic body at the origin.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidMass`] or [`PhysicsError::InvalidMoment`]
    /// if either value is not positive.
    pub fn new(mass: f64, moment: f64) -> Result<Self> {
        let mut body = Self::blank();
        body.set_mass(mass)?;
        body.set_moment(moment)?;
        Ok(body)
    }

    /// Create a static body: infinite mass and moment, unaffected by gravity,
    /// and skipped by integration.
    #[must_use]
    pub fn new_static() -> Self {
        let mut body = Self::blank();
        body.mass = f64::INFINITY;
        body.moment = f64::INFINITY;
        body.ignore_gravity = true;
        body.idle_time = f64::INFINITY;
        body
    }

    fn blank() -> Self {
        Self {
            id: None,
            mass: 0.0,
            mass_inv: 0.0,
            moment: 0.0,
            moment_inv: 0.0,
            position: Vect::zeros(),
            velocity: Vect::zeros(),
            force: Vect::zeros(),
            angle: 0.0,
            rotation: Rotation::identity(),
            angular_velocity: 0.0,
            torque: 0.0,
            velocity_bias: Vect::zeros(),
            angular_velocity_bias: 0.0,
            velocity_limit: f64::INFINITY,
            angular_velocity_limit: f64::INFINITY,
            ignore_gravity: false,
            idle_time: 0.0,
            shapes: Vec::new(),
            velocity_integrator: None,
            position_integrator: None,
            user_data: None,
            handler: None,
        }
    }

    // =========================================================================
    // Builders
    // =========================================================================

    /// Set the initial position.
    #[must_use]
    pub fn with_position(mut self, position: Vect) -> Self {
        self.position = position;
        self
    }

    /// Set the initial angle in radians.
    #[must_use]
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.set_angle_unchecked(angle);
        self
    }

    /// Set the initial velocity.
    #[must_use]
    pub fn with_velocity(mut self, velocity: Vect) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the initial angular velocity.
    #[must_use]
    pub fn with_angular_velocity(mut self, angular_velocity: f64) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    /// Attach a shape.
    #[must_use]
    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.add_shape(shape);
        self
    }

    /// Cap the linear speed after each velocity step.
    #[must_use]
    pub fn with_velocity_limit(mut self, limit: f64) -> Self {
        self.velocity_limit = limit;
        self
    }

    /// Cap the angular speed after each velocity step.
    #[must_use]
    pub fn with_angular_velocity_limit(mut self, limit: f64) -> Self {
        self.angular_velocity_limit = limit;
        self
    }

    /// Exclude the body from gravity.
    #[must_use]
    pub fn with_ignore_gravity(mut self, ignore: bool) -> Self {
        self.ignore_gravity = ignore;
        self
    }

    /// Replace the default velocity integration.
    #[must_use]
    pub fn with_velocity_integrator(mut self, integrator: Arc<dyn VelocityIntegrator>) -> Self {
        self.velocity_integrator = Some(integrator);
        self
    }

    /// Replace the default position integration.
    #[must_use]
    pub fn with_position_integrator(mut self, integrator: Arc<dyn PositionIntegrator>) -> Self {
        self.position_integrator = Some(integrator);
        self
    }

    /// Attach user data.
    #[must_use]
    pub fn with_user_data(mut self, data: UserData) -> Self {
        self.user_data = Some(data);
        self
    }

    /// Attach a collision handler.
    #[must_use]
    pub fn with_handler(mut self, handler: Arc<dyn CollisionHandler>) -> Self {
        self.handler = Some(handler);
        self
    }

    // =========================================================================
    // Identity, mass properties, activation
    // =========================================================================

    /// Handle assigned when the body is inserted into a [`BodySet`](crate::BodySet).
    #[must_use]
    pub fn id(&self) -> Option<BodyId> {
        self.id
    }

    pub(crate) fn assign_id(&mut self, id: BodyId) {
        self.id = Some(id);
        for shape in &mut self.shapes {
            shape.set_body(Some(id));
        }
    }

    /// Mass.
    #[must_use]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Inverse mass (0 for infinite mass).
    #[must_use]
    pub fn mass_inv(&self) -> f64 {
        self.mass_inv
    }

    /// Set the mass. Infinite mass is allowed and yields a zero inverse.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidMass`] for zero, negative, or `NaN` mass.
    pub fn set_mass(&mut self, mass: f64) -> Result<()> {
        if mass.is_nan() || mass <= 0.0 {
            return Err(PhysicsError::InvalidMass(mass));
        }
        self.activate();
        self.mass = mass;
        self.mass_inv = 1.0 / mass;
        Ok(())
    }

    /// Moment of inertia.
    #[must_use]
    pub fn moment(&self) -> f64 {
        self.moment
    }

    /// Inverse moment of inertia (0 for infinite moment).
    #[must_use]
    pub fn moment_inv(&self) -> f64 {
        self.moment_inv
    }

    /// Set the moment of inertia. Infinite moment is allowed.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidMoment`] for zero, negative, or `NaN` moment.
    pub fn set_moment(&mut self, moment: f64) -> Result<()> {
        if moment.is_nan() || moment <= 0.0 {
            return Err(PhysicsError::InvalidMoment(moment));
        }
        self.activate();
        self.moment = moment;
        self.moment_inv = 1.0 / moment;
        Ok(())
    }

    /// Whether this is a static body.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.idle_time.is_infinite()
    }

    /// Wake the body.
    ///
    /// Resets the idle timer of dynamic bodies. No sleep subsystem is wired
    /// in, so bodies are never actually put to sleep.
    pub fn activate(&mut self) {
        if !self.is_static() {
            self.idle_time = 0.0;
        }
    }

    /// Always `false`: sleeping is not supported.
    #[must_use]
    pub fn is_sleeping(&self) -> bool {
        false
    }

    /// Time the body has spent idle (infinite for static bodies).
    #[must_use]
    pub fn idle_time(&self) -> f64 {
        self.idle_time
    }

    // =========================================================================
    // Kinematic state
    // =========================================================================

    /// Position of the center of gravity.
    #[must_use]
    pub fn position(&self) -> Vect {
        self.position
    }

    /// Move the body.
    pub fn set_position(&mut self, position: Vect) {
        self.activate();
        self.position = position;
    }

    /// Angle in radians.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Cached rotation, consistent with [`angle`](Self::angle).
    #[must_use]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Set the angle and refresh the cached rotation.
    pub fn set_angle(&mut self, angle: f64) {
        self.activate();
        self.set_angle_unchecked(angle);
    }

    /// Rotate the body by `delta` radians.
    pub fn add_angle(&mut self, delta: f64) {
        self.set_angle(self.angle + delta);
    }

    pub(crate) fn set_angle_unchecked(&mut self, angle: f64) {
        self.angle = angle;
        self.rotation = Rotation::from_angle(angle);
    }

    /// Linear velocity.
    #[must_use]
    pub fn velocity(&self) -> Vect {
        self.velocity
    }

    /// Set the linear velocity.
    pub fn set_velocity(&mut self, velocity: Vect) {
        self.activate();
        self.velocity = velocity;
    }

    /// Add to the linear velocity.
    pub fn add_velocity(&mut self, delta: Vect) {
        self.activate();
        self.velocity += delta;
    }

    /// Angular velocity in radians per second.
    #[must_use]
    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    /// Set the angular velocity.
    pub fn set_angular_velocity(&mut self, angular_velocity: f64) {
        self.activate();
        self.angular_velocity = angular_velocity;
    }

    /// Add to the angular velocity.
    pub fn add_angular_velocity(&mut self, delta: f64) {
        self.activate();
        self.angular_velocity += delta;
    }

    /// Accumulated force, cleared by velocity integration.
    #[must_use]
    pub fn force(&self) -> Vect {
        self.force
    }

    /// Replace the accumulated force.
    pub fn set_force(&mut self, force: Vect) {
        self.activate();
        self.force = force;
    }

    /// Add a force through the center of gravity.
    pub fn add_force(&mut self, force: Vect) {
        self.activate();
        self.force += force;
    }

    /// Add a force at a world-space offset `r` from the center of gravity.
    pub fn apply_force_at(&mut self, force: Vect, r: Vect) {
        self.activate();
        self.force += force;
        self.torque += cross(r, force);
    }

    /// Accumulated torque, cleared by velocity integration.
    #[must_use]
    pub fn torque(&self) -> f64 {
        self.torque
    }

    /// Replace the accumulated torque.
    pub fn set_torque(&mut self, torque: f64) {
        self.activate();
        self.torque = torque;
    }

    /// Add a torque.
    pub fn add_torque(&mut self, torque: f64) {
        self.activate();
        self.torque += torque;
    }

    /// Linear bias velocity.
    #[must_use]
    pub fn velocity_bias(&self) -> Vect {
        self.velocity_bias
    }

    /// Set the linear bias velocity.
    pub fn set_velocity_bias(&mut self, bias: Vect) {
        self.velocity_bias = bias;
    }

    /// Angular bias velocity.
    #[must_use]
    pub fn angular_velocity_bias(&self) -> f64 {
        self.angular_velocity_bias
    }

    /// Set the angular bias velocity.
    pub fn set_angular_velocity_bias(&mut self, bias: f64) {
        self.angular_velocity_bias = bias;
    }

    /// Maximum linear speed.
    #[must_use]
    pub fn velocity_limit(&self) -> f64 {
        self.velocity_limit
    }

    /// Set the maximum linear speed.
    pub fn set_velocity_limit(&mut self, limit: f64) {
        self.velocity_limit = limit;
    }

    /// Maximum angular speed.
    #[must_use]
    pub fn angular_velocity_limit(&self) -> f64 {
        self.angular_velocity_limit
    }

    /// Set the maximum angular speed.
    pub fn set_angular_velocity_limit(&mut self, limit: f64) {
        self.angular_velocity_limit = limit;
    }

    /// Whether gravity is skipped for this body.
    #[must_use]
    pub fn ignores_gravity(&self) -> bool {
        self.ignore_gravity
    }

    /// Include or exclude the body from gravity.
    pub fn set_ignore_gravity(&mut self, ignore: bool) {
        self.ignore_gravity = ignore;
    }

    // =========================================================================
    // Impulses and derived quantities
    // =========================================================================

    /// Apply impulse `j` at world offset `r` to the real velocity.
    #[inline]
    pub fn apply_impulse_at(&mut self, j: Vect, r: Vect) {
        self.velocity += j * self.mass_inv;
        self.angular_velocity += self.moment_inv * cross(r, j);
    }

    /// Apply impulse `j` at world offset `r` to the bias velocity.
    #[inline]
    pub fn apply_bias_impulse_at(&mut self, j: Vect, r: Vect) {
        self.velocity_bias += j * self.mass_inv;
        self.angular_velocity_bias += self.moment_inv * cross(r, j);
    }

    /// Velocity of the point at world offset `r` from the center of gravity.
    #[inline]
    #[must_use]
    pub fn velocity_at_world_offset(&self, r: Vect) -> Vect {
        self.velocity + cross_sv(self.angular_velocity, r)
    }

    /// Bias velocity of the point at world offset `r`.
    #[inline]
    #[must_use]
    pub fn bias_velocity_at_world_offset(&self, r: Vect) -> Vect {
        self.velocity_bias + cross_sv(self.angular_velocity_bias, r)
    }

    /// Kinetic energy `½mv² + ½Iw²`. Infinite-mass terms contribute nothing.
    #[must_use]
    pub fn kinetic_energy(&self) -> f64 {
        if self.is_static() {
            return 0.0;
        }
        let linear = if self.mass.is_finite() {
            0.5 * self.mass * self.velocity.norm_squared()
        } else {
            0.0
        };
        let angular = if self.moment.is_finite() {
            0.5 * self.moment * self.angular_velocity * self.angular_velocity
        } else {
            0.0
        };
        linear + angular
    }

    /// Current body transform.
    #[must_use]
    pub fn transform(&self) -> Transform {
        Transform::from_parts(self.position, self.rotation)
    }

    /// Map a body-local point to world space.
    #[must_use]
    pub fn local_to_world(&self, local: Vect) -> Vect {
        self.transform().transform_point(local)
    }

    /// Map a world point to body-local space.
    #[must_use]
    pub fn world_to_local(&self, world: Vect) -> Vect {
        self.transform().inverse_transform_point(world)
    }

    // =========================================================================
    // Shapes
    // =========================================================================

    /// Attach a shape, returning its index.
    pub fn add_shape(&mut self, mut shape: Shape) -> usize {
        shape.set_body(self.id);
        self.shapes.push(shape);
        self.shapes.len() - 1
    }

    /// Attached shapes.
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Mutable access to the attached shapes.
    pub fn shapes_mut(&mut self) -> &mut [Shape] {
        &mut self.shapes
    }

    /// Re-project every shape into world space with the current transform.
    pub fn update_shapes(&mut self) {
        let xf = self.transform();
        for shape in &mut self.shapes {
            shape.update(&xf);
        }
    }

    // =========================================================================
    // Integration
    // =========================================================================

    /// Advance the velocity by `dt`.
    ///
    /// Damping values are per-step multiplicative factors. A custom velocity
    /// integrator, if installed, runs instead of the default. Static bodies
    /// are not integrated.
    pub fn update_velocity(
        &mut self,
        gravity: Vect,
        linear_damping: f64,
        angular_damping: f64,
        dt: f64,
    ) {
        if self.is_static() {
            return;
        }
        match self.velocity_integrator.clone() {
            Some(integrator) => {
                integrator.update_velocity(self, gravity, linear_damping, angular_damping, dt);
            }
            None => {
                SemiImplicitEuler.update_velocity(self, gravity, linear_damping, angular_damping, dt);
            }
        }
    }

    /// Advance the position and angle by `dt`, consuming the bias velocity.
    ///
    /// A custom position integrator, if installed, runs instead of the
    /// default. Static bodies are not integrated.
    pub fn update_position(&mut self, dt: f64) {
        if self.is_static() {
            return;
        }
        match self.position_integrator.clone() {
            Some(integrator) => integrator.update_position(self, dt),
            None => SemiImplicitEuler.update_position(self, dt),
        }
    }

    /// Install a velocity integrator.
    pub fn set_velocity_integrator(&mut self, integrator: Arc<dyn VelocityIntegrator>) {
        self.velocity_integrator = Some(integrator);
    }

    /// Restore default velocity integration.
    pub fn clear_velocity_integrator(&mut self) {
        self.velocity_integrator = None;
    }

    /// Install a position integrator.
    pub fn set_position_integrator(&mut self, integrator: Arc<dyn PositionIntegrator>) {
        self.position_integrator = Some(integrator);
    }

    /// Restore default position integration.
    pub fn clear_position_integrator(&mut self) {
        self.position_integrator = None;
    }

    /// Whether a custom integrator replaces either phase.
    #[must_use]
    pub fn has_custom_integrator(&self) -> bool {
        self.velocity_integrator.is_some() || self.position_integrator.is_some()
    }

    // =========================================================================
    // User data and callbacks
    // =========================================================================

    /// Attached user data.
    #[must_use]
    pub fn user_data(&self) -> Option<&(dyn Any + Send + Sync)> {
        self.user_data.as_deref()
    }

    /// Attached user data, if it has type `T`.
    #[must_use]
    pub fn user_data_as<T: Any>(&self) -> Option<&T> {
        self.user_data.as_deref()?.downcast_ref::<T>()
    }

    /// Replace the user data, returning the previous value.
    pub fn set_user_data(&mut self, data: Option<UserData>) -> Option<UserData> {
        std::mem::replace(&mut self.user_data, data)
    }

    /// Attached collision handler.
    #[must_use]
    pub fn handler(&self) -> Option<&Arc<dyn CollisionHandler>> {
        self.handler.as_ref()
    }

    /// Replace the collision handler.
    pub fn set_handler(&mut self, handler: Option<Arc<dyn CollisionHandler>>) {
        self.handler = handler;
    }
}

impl Clone for Body {
    /// Deep-copies the shapes. The clone is detached: it has no id and its
    /// shapes have no owner until it is inserted into a set. Integrators,
    /// user data and the handler are shared.
    fn clone(&self) -> Self {
        let shapes = self
            .shapes
            .iter()
            .map(|shape| {
                let mut shape = shape.clone();
                shape.set_body(None);
                shape
            })
            .collect();

        Self {
            id: None,
            shapes,
            velocity_integrator: self.velocity_integrator.clone(),
            position_integrator: self.position_integrator.clone(),
            user_data: self.user_data.clone(),
            handler: self.handler.clone(),
            ..*self
        }
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Body")
            .field("id", &self.id)
            .field("mass", &self.mass)
            .field("moment", &self.moment)
            .field("position", &self.position)
            .field("angle", &self.angle)
            .field("velocity", &self.velocity)
            .field("angular_velocity", &self.angular_velocity)
            .field("shapes", &self.shapes.len())
            .field("custom_integrator", &self.has_custom_integrator())
            .finish_non_exhaustive()
    }
}
