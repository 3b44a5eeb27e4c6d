//! Contact points and their warm-start state.

use planar_types::Vect;
use planar_types::math::perp;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifies the geometric feature pair (vertex/edge, ...) that produced a
/// contact, so the same contact can be recognized across steps.
pub type FeatureHash = u64;

/// A contact point as produced by narrow-phase collision detection.
///
/// The normal points from the pair's first body towards its second.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContactPoint {
    /// World-space contact position.
    pub position: Vect,
    /// Unit contact normal, from body A to body B.
    pub normal: Vect,
    /// Signed separation along the normal (negative when penetrating).
    pub depth: f64,
    /// Feature hash used to match the contact across steps.
    pub hash: FeatureHash,
}

impl ContactPoint {
    /// Create a contact point.
    #[must_use]
    pub fn new(position: Vect, normal: Vect, depth: f64, hash: FeatureHash) -> Self {
        Self {
            position,
            normal,
            depth,
            hash,
        }
    }
}

/// One solved contact of a [`ContactGroup`](crate::ContactGroup).
///
/// Alongside the geometry it keeps three impulse accumulators: normal,
/// tangent (friction), and bias. The bias accumulator only ever feeds the
/// bodies' bias velocity, never their real velocity.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub(crate) p: Vect,
    pub(crate) n: Vect,
    pub(crate) dist: f64,
    pub(crate) hash: FeatureHash,

    pub(crate) r1: Vect,
    pub(crate) r2: Vect,
    pub(crate) n_mass: f64,
    pub(crate) t_mass: f64,
    pub(crate) bounce: f64,
    pub(crate) bias: f64,

    pub(crate) jn_acc: f64,
    pub(crate) jt_acc: f64,
    pub(crate) j_bias: f64,
}

impl Contact {
    /// Create a contact with no accumulated impulse.
    #[must_use]
    pub fn new(position: Vect, normal: Vect, depth: f64, hash: FeatureHash) -> Self {
        Self {
            p: position,
            n: normal,
            dist: depth,
            hash,
            r1: Vect::zeros(),
            r2: Vect::zeros(),
            n_mass: 0.0,
            t_mass: 0.0,
            bounce: 0.0,
            bias: 0.0,
            jn_acc: 0.0,
            jt_acc: 0.0,
            j_bias: 0.0,
        }
    }

    /// Replace the contact geometry for a new step.
    ///
    /// The accumulated impulses survive only when `hash` matches the previous
    /// one; a different feature discards the warm start.
    pub fn reset(&mut self, position: Vect, normal: Vect, depth: f64, hash: FeatureHash) {
        if hash != self.hash {
            self.jn_acc = 0.0;
            self.jt_acc = 0.0;
            self.j_bias = 0.0;
        }
        self.p = position;
        self.n = normal;
        self.dist = depth;
        self.hash = hash;
    }

    /// World-space position.
    #[must_use]
    pub fn position(&self) -> Vect {
        self.p
    }

    /// Contact normal.
    #[must_use]
    pub fn normal(&self) -> Vect {
        self.n
    }

    /// Signed separation.
    #[must_use]
    pub fn depth(&self) -> f64 {
        self.dist
    }

    /// Feature hash.
    #[must_use]
    pub fn hash(&self) -> FeatureHash {
        self.hash
    }

    /// Accumulated normal impulse.
    #[must_use]
    pub fn normal_impulse(&self) -> f64 {
        self.jn_acc
    }

    /// Accumulated friction impulse.
    #[must_use]
    pub fn tangent_impulse(&self) -> f64 {
        self.jt_acc
    }

    /// Accumulated position-correction impulse for the current step.
    #[must_use]
    pub fn bias_impulse(&self) -> f64 {
        self.j_bias
    }

    /// Accumulated normal and friction impulse as a world-space vector.
    #[must_use]
    pub fn impulse(&self) -> Vect {
        self.n * self.jn_acc + perp(self.n) * self.jt_acc
    }
}

impl From<&ContactPoint> for Contact {
    fn from(point: &ContactPoint) -> Self {
        Self::new(point.position, point.normal, point.depth, point.hash)
    }
}
