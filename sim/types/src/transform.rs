//! Rotations and rigid transforms.
//!
//! A [`Rotation`] stores the cosine and sine of its angle instead of the angle
//! itself, so rotating a vector never evaluates a trigonometric function:
//!
//! ```text
//! rotate(v)         = (x·c − y·s, x·s + y·c)
//! inverse_rotate(v) = (x·c + y·s, −x·s + y·c)
//! ```

use crate::math::Vect;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A planar rotation as a unit (cosine, sine) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rotation {
    /// Cosine of the rotation angle.
    pub cos: f64,
    /// Sine of the rotation angle.
    pub sin: f64,
}

impl Default for Rotation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Rotation {
    /// The identity rotation.
    #[must_use]
    pub const fn identity() -> Self {
        Self { cos: 1.0, sin: 0.0 }
    }

    /// Rotation by `angle` radians.
    #[must_use]
    pub fn from_angle(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { cos, sin }
    }

    /// Rotation whose (cos, sin) pair is the given unit vector.
    ///
    /// The vector is used as given; callers pass an already normalized direction.
    #[must_use]
    pub fn from_unit_vector(v: Vect) -> Self {
        Self { cos: v.x, sin: v.y }
    }

    /// Reset to the identity rotation.
    pub fn set_identity(&mut self) {
        *self = Self::identity();
    }

    /// Reset to a rotation by `angle` radians.
    pub fn set_angle(&mut self, angle: f64) {
        *self = Self::from_angle(angle);
    }

    /// The rotation angle in `(-π, π]`.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.sin.atan2(self.cos)
    }

    /// The (cos, sin) pair as a vector.
    #[must_use]
    pub fn as_vect(&self) -> Vect {
        Vect::new(self.cos, self.sin)
    }

    /// Rotate `v` by this rotation.
    #[inline]
    #[must_use]
    pub fn rotate(&self, v: Vect) -> Vect {
        Vect::new(
            v.x * self.cos - v.y * self.sin,
            v.x * self.sin + v.y * self.cos,
        )
    }

    /// Rotate `v` by the inverse of this rotation.
    #[inline]
    #[must_use]
    pub fn inverse_rotate(&self, v: Vect) -> Vect {
        Vect::new(
            v.x * self.cos + v.y * self.sin,
            -v.x * self.sin + v.y * self.cos,
        )
    }

    /// The inverse rotation.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            cos: self.cos,
            sin: -self.sin,
        }
    }

    /// Compose two rotations: `self` applied after `other`.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            cos: self.cos * other.cos - self.sin * other.sin,
            sin: self.sin * other.cos + self.cos * other.sin,
        }
    }
}

/// A rigid transform: rotation followed by translation.
///
/// # Example
///
/// ```
/// use planar_types::{Transform, Vect};
///
/// let xf = Transform::from_position(Vect::new(1.0, 2.0));
/// assert_eq!(xf.transform_point(Vect::new(1.0, 0.0)), Vect::new(2.0, 2.0));
/// assert_eq!(xf.inverse_transform_point(Vect::new(2.0, 2.0)), Vect::new(1.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transform {
    /// Translation (world position of the local origin).
    pub position: Vect,
    /// Orientation.
    pub rotation: Rotation,
}

impl Transform {
    /// Create a transform from a position and an angle in radians.
    #[must_use]
    pub fn new(position: Vect, angle: f64) -> Self {
        Self {
            position,
            rotation: Rotation::from_angle(angle),
        }
    }

    /// Create a transform from a position and an existing rotation.
    #[must_use]
    pub const fn from_parts(position: Vect, rotation: Rotation) -> Self {
        Self { position, rotation }
    }

    /// Create a pure translation.
    #[must_use]
    pub fn from_position(position: Vect) -> Self {
        Self {
            position,
            rotation: Rotation::identity(),
        }
    }

    /// The identity transform.
    #[must_use]
    pub fn identity() -> Self {
        Self::default()
    }

    /// Reset to the identity transform.
    pub fn set_identity(&mut self) {
        *self = Self::identity();
    }

    /// Replace position and angle.
    pub fn set(&mut self, position: Vect, angle: f64) {
        self.position = position;
        self.rotation.set_angle(angle);
    }

    /// Map a local point to world space: rotate, then translate.
    #[inline]
    #[must_use]
    pub fn transform_point(&self, local: Vect) -> Vect {
        self.position + self.rotation.rotate(local)
    }

    /// Map a world point to local space: untranslate, then inverse-rotate.
    #[inline]
    #[must_use]
    pub fn inverse_transform_point(&self, world: Vect) -> Vect {
        self.rotation.inverse_rotate(world - self.position)
    }

    /// Map a local direction to world space (rotation only).
    #[inline]
    #[must_use]
    pub fn transform_vector(&self, local: Vect) -> Vect {
        self.rotation.rotate(local)
    }

    /// Map a world direction to local space (rotation only).
    #[inline]
    #[must_use]
    pub fn inverse_transform_vector(&self, world: Vect) -> Vect {
        self.rotation.inverse_rotate(world)
    }

    /// The inverse transform.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let rotation = self.rotation.inverse();
        Self {
            position: -rotation.rotate(self.position),
            rotation,
        }
    }

    /// Compose two transforms: `self * other`.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            position: self.transform_point(other.position),
            rotation: self.rotation.compose(&other.rotation),
        }
    }

    /// Check if the transform contains `NaN` or `Inf` values.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|x| x.is_finite())
            && self.rotation.cos.is_finite()
            && self.rotation.sin.is_finite()
    }
}
