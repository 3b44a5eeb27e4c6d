//! Impulse math shared by every constraint.
//!
//! Conventions: `r1`/`r2` are world-space offsets from each body's center of
//! gravity to the constraint point, and an impulse `j` is applied as `-j` to
//! body A and `+j` to body B.
//!
//! # Effective Mass
//!
//! Along a unit axis `n`, the scalar effective mass is the inverse of
//!
//! ```text
//! k = m_a⁻¹ + I_a⁻¹ (r1 × n)² + m_b⁻¹ + I_b⁻¹ (r2 × n)²
//! ```
//!
//! For a two-axis point constraint the same sum becomes a 2×2 tensor, which is
//! inverted in closed form.

use nalgebra::Matrix2;
use planar_core::Body;
use planar_types::math::{cross, cross_sv};
use planar_types::{PhysicsError, Result, Vect};

/// Fraction of positional error to correct this step, for an error bias that
/// leaves `error_bias` of the error after one second.
#[inline]
#[must_use]
pub fn bias_coef(error_bias: f64, dt: f64) -> f64 {
    1.0 - error_bias.powf(dt)
}

/// Check that `dt` can divide a positional error into a bias velocity.
///
/// # Errors
///
/// Returns [`PhysicsError::InvalidTimestep`] unless `dt` is positive and finite.
pub fn check_timestep(dt: f64) -> Result<()> {
    if dt.is_finite() && dt > 0.0 {
        Ok(())
    } else {
        Err(PhysicsError::InvalidTimestep(dt))
    }
}

/// One body's contribution to the scalar effective mass along `n`.
#[inline]
#[must_use]
pub fn k_scalar_body(body: &Body, r: Vect, n: Vect) -> f64 {
    let rcn = cross(r, n);
    body.mass_inv() + body.moment_inv() * rcn * rcn
}

/// Inverse effective mass along `n`.
///
/// # Errors
///
/// Returns [`PhysicsError::UnsolvableConstraint`] when neither body can move
/// along `n`.
pub fn k_scalar(a: &Body, b: &Body, r1: Vect, r2: Vect, n: Vect) -> Result<f64> {
    let k = k_scalar_body(a, r1, n) + k_scalar_body(b, r2, n);
    if k == 0.0 {
        tracing::warn!(?a, ?b, "zero effective mass along constraint axis");
        return Err(PhysicsError::unsolvable("effective mass is zero"));
    }
    Ok(k)
}

/// Effective mass tensor for a point constraint: the inverse of the 2×2
/// inverse-mass matrix at offsets `r1`, `r2`.
///
/// # Errors
///
/// Returns [`PhysicsError::UnsolvableConstraint`] when the matrix is singular.
pub fn k_tensor(a: &Body, b: &Body, r1: Vect, r2: Vect) -> Result<Matrix2<f64>> {
    let m_sum = a.mass_inv() + b.mass_inv();

    let (a_i, b_i) = (a.moment_inv(), b.moment_inv());
    let k11 = m_sum + r1.y * r1.y * a_i + r2.y * r2.y * b_i;
    let k12 = -r1.x * r1.y * a_i - r2.x * r2.y * b_i;
    let k22 = m_sum + r1.x * r1.x * a_i + r2.x * r2.x * b_i;

    let det = k11 * k22 - k12 * k12;
    if det == 0.0 {
        tracing::warn!(?a, ?b, "singular mass tensor");
        return Err(PhysicsError::unsolvable("mass tensor determinant is zero"));
    }

    let det_inv = 1.0 / det;
    Ok(Matrix2::new(
        k22 * det_inv,
        -k12 * det_inv,
        -k12 * det_inv,
        k11 * det_inv,
    ))
}

/// Velocity of B's point relative to A's point.
#[inline]
#[must_use]
pub fn relative_velocity(a: &Body, b: &Body, r1: Vect, r2: Vect) -> Vect {
    b.velocity_at_world_offset(r2) - a.velocity_at_world_offset(r1)
}

/// Relative velocity projected onto `n`.
#[inline]
#[must_use]
pub fn normal_relative_velocity(a: &Body, b: &Body, r1: Vect, r2: Vect, n: Vect) -> f64 {
    relative_velocity(a, b, r1, r2).dot(&n)
}

/// Relative bias velocity of B's point with respect to A's point.
#[inline]
#[must_use]
pub fn bias_relative_velocity(a: &Body, b: &Body, r1: Vect, r2: Vect) -> Vect {
    (b.velocity_bias() + cross_sv(b.angular_velocity_bias(), r2))
        - (a.velocity_bias() + cross_sv(a.angular_velocity_bias(), r1))
}

/// Apply `j` to B and `-j` to A.
#[inline]
pub fn apply_impulses(a: &mut Body, b: &mut Body, r1: Vect, r2: Vect, j: Vect) {
    a.apply_impulse_at(-j, r1);
    b.apply_impulse_at(j, r2);
}

/// Apply `j` to B's and `-j` to A's bias velocity.
#[inline]
pub fn apply_bias_impulses(a: &mut Body, b: &mut Body, r1: Vect, r2: Vect, j: Vect) {
    a.apply_bias_impulse_at(-j, r1);
    b.apply_bias_impulse_at(j, r2);
}
