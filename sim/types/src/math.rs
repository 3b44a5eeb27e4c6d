//! 2D vector algebra.
//!
//! [`Vect`] is a plain `nalgebra::Vector2<f64>`, so addition, subtraction,
//! scaling, [`dot`](nalgebra::Matrix::dot), [`norm`](nalgebra::Matrix::norm) and
//! [`normalize`](nalgebra::Matrix::normalize) come straight from nalgebra. This
//! module adds the planar operations nalgebra does not spell out: scalar cross
//! products, perpendiculars, circular clamping and component-wise bounds.
//!
//! # Cross Products in 2D
//!
//! ```text
//! cross(a, b)   = a.x * b.y - a.y * b.x        (scalar, z of the 3D cross)
//! cross_sv(s, v) = (-s * v.y,  s * v.x)         (ω × r)
//! cross_vs(v, s) = ( s * v.y, -s * v.x)         (r × ω)
//! ```

use nalgebra::Vector2;

/// A 2D vector (position, velocity, force, impulse, ...).
pub type Vect = Vector2<f64>;

/// Unit vector pointing along `angle` (radians).
#[must_use]
pub fn from_angle(angle: f64) -> Vect {
    let (sin, cos) = angle.sin_cos();
    Vect::new(cos, sin)
}

/// Scalar 2D cross product.
#[inline]
#[must_use]
pub fn cross(a: Vect, b: Vect) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Cross product of a scalar (out-of-plane) and a vector.
#[inline]
#[must_use]
pub fn cross_sv(s: f64, v: Vect) -> Vect {
    Vect::new(-s * v.y, s * v.x)
}

/// Cross product of a vector and a scalar (out-of-plane).
#[inline]
#[must_use]
pub fn cross_vs(v: Vect, s: f64) -> Vect {
    Vect::new(s * v.y, -s * v.x)
}

/// `v` rotated by +90 degrees.
#[inline]
#[must_use]
pub fn perp(v: Vect) -> Vect {
    Vect::new(-v.y, v.x)
}

/// `v` rotated by -90 degrees.
#[inline]
#[must_use]
pub fn rperp(v: Vect) -> Vect {
    Vect::new(v.y, -v.x)
}

/// Normalize `v`, returning the zero vector when it has no length.
#[must_use]
pub fn normalize_or_zero(v: Vect) -> Vect {
    v.try_normalize(0.0).unwrap_or_else(Vect::zeros)
}

/// Clamp the magnitude of `v` to at most `max_len`, keeping its direction.
///
/// An infinite `max_len` leaves every finite vector untouched.
#[must_use]
pub fn clamp_length(v: Vect, max_len: f64) -> Vect {
    if v.norm_squared() > max_len * max_len {
        normalize_or_zero(v) * max_len
    } else {
        v
    }
}

/// Linear interpolation from `a` (`t = 0`) to `b` (`t = 1`).
#[must_use]
pub fn lerp(a: Vect, b: Vect, t: f64) -> Vect {
    a + (b - a) * t
}

/// Clamp a scalar into `[min, max]`.
#[inline]
#[must_use]
pub fn fclamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Component-wise minimum.
#[must_use]
pub fn component_min(a: Vect, b: Vect) -> Vect {
    Vect::new(a.x.min(b.x), a.y.min(b.y))
}

/// Component-wise maximum.
#[must_use]
pub fn component_max(a: Vect, b: Vect) -> Vect {
    Vect::new(a.x.max(b.x), a.y.max(b.y))
}

/// Squared distance between two points.
#[must_use]
pub fn dist_sqr(a: Vect, b: Vect) -> f64 {
    (a - b).norm_squared()
}

/// Distance between two points.
#[must_use]
pub fn dist(a: Vect, b: Vect) -> f64 {
    (a - b).norm()
}
