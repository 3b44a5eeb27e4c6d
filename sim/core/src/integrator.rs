//! Per-body integration strategies.
//!
//! Bodies advance in two phases each step: velocity, then position. Each
//! phase runs [`SemiImplicitEuler`] unless the body carries its own strategy,
//! in which case that strategy runs *instead of* the default and owns every
//! state change for the phase (including clearing forces or the bias channel).
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use planar_core::{Body, PositionIntegrator};
//!
//! /// Keeps a body in place regardless of its velocity.
//! struct Pinned;
//!
//! impl PositionIntegrator for Pinned {
//!     fn update_position(&self, _body: &mut Body, _dt: f64) {}
//! }
//!
//! let mut body = Body::new(1.0, 1.0)
//!     .unwrap()
//!     .with_position_integrator(Arc::new(Pinned));
//! body.set_velocity(planar_types::Vect::new(1.0, 0.0));
//! body.update_position(0.1);
//! assert_eq!(body.position().x, 0.0);
//! ```

use planar_types::Vect;
use planar_types::math::{clamp_length, fclamp};

use crate::Body;

/// Strategy for the velocity phase of a step.
pub trait VelocityIntegrator: Send + Sync {
    /// Advance `body`'s velocity by `dt`.
    ///
    /// `linear_damping` and `angular_damping` are the per-step multiplicative
    /// factors (1.0 = no loss).
    fn update_velocity(
        &self,
        body: &mut Body,
        gravity: Vect,
        linear_damping: f64,
        angular_damping: f64,
        dt: f64,
    );
}

/// Strategy for the position phase of a step.
pub trait PositionIntegrator: Send + Sync {
    /// Advance `body`'s position and angle by `dt`.
    fn update_position(&self, body: &mut Body, dt: f64);
}

/// Symplectic Euler: forces update velocity, then the new velocity moves the body.
///
/// ```text
/// v ← v·damp_v + (g + f/m)·dt      w ← w·damp_w + τ/I·dt
/// p ← p + (v + v_bias)·dt          θ ← θ + (w + w_bias)·dt
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SemiImplicitEuler;

impl VelocityIntegrator for SemiImplicitEuler {
    fn update_velocity(
        &self,
        body: &mut Body,
        gravity: Vect,
        linear_damping: f64,
        angular_damping: f64,
        dt: f64,
    ) {
        let gravity = if body.ignore_gravity {
            Vect::zeros()
        } else {
            gravity
        };

        let v = body.velocity * linear_damping + (gravity + body.force * body.mass_inv) * dt;
        let w = body.angular_velocity * angular_damping + body.torque * body.moment_inv * dt;

        body.velocity = clamp_length(v, body.velocity_limit);
        body.angular_velocity = fclamp(
            w,
            -body.angular_velocity_limit,
            body.angular_velocity_limit,
        );

        body.force = Vect::zeros();
        body.torque = 0.0;
    }
}

impl PositionIntegrator for SemiImplicitEuler {
    fn update_position(&self, body: &mut Body, dt: f64) {
        body.position += (body.velocity + body.velocity_bias) * dt;
        let angle = body.angle + (body.angular_velocity + body.angular_velocity_bias) * dt;
        body.set_angle_unchecked(angle);

        body.velocity_bias = Vect::zeros();
        body.angular_velocity_bias = 0.0;
    }
}
