//! Collision lifecycle callbacks.
//!
//! A body may carry a [`CollisionHandler`]. The contact bookkeeping layer
//! calls it as a shape pair starts touching, before and after each solve, and
//! when the pair separates. Every method has a permissive default, so
//! handlers implement only what they need.

use planar_types::BodyId;

use crate::ShapeKey;

/// The two shapes of a colliding pair.
///
/// Pairs are stored in canonical order (`shape_a < shape_b`), so the same two
/// shapes always produce the same pair regardless of detection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollisionPair {
    /// First shape.
    pub shape_a: ShapeKey,
    /// Second shape.
    pub shape_b: ShapeKey,
}

impl CollisionPair {
    /// Create a pair in canonical order.
    #[must_use]
    pub fn new(a: ShapeKey, b: ShapeKey) -> Self {
        if b < a {
            Self {
                shape_a: b,
                shape_b: a,
            }
        } else {
            Self {
                shape_a: a,
                shape_b: b,
            }
        }
    }

    /// Body owning the first shape.
    #[must_use]
    pub fn body_a(&self) -> BodyId {
        self.shape_a.body
    }

    /// Body owning the second shape.
    #[must_use]
    pub fn body_b(&self) -> BodyId {
        self.shape_b.body
    }

    /// Whether both shapes belong to the same body.
    #[must_use]
    pub fn is_self_pair(&self) -> bool {
        self.shape_a.body == self.shape_b.body
    }
}

/// Callbacks for a body's collisions.
pub trait CollisionHandler: Send + Sync {
    /// The pair started touching. Returning `false` ignores the pair until it separates.
    fn on_enter(&self, _pair: &CollisionPair) -> bool {
        true
    }

    /// Called every step before solving. Returning `false` skips the pair for this step.
    fn on_pre_solve(&self, _pair: &CollisionPair) -> bool {
        true
    }

    /// Called every step after the pair has been solved.
    fn on_post_solve(&self, _pair: &CollisionPair) {}

    /// The pair stopped touching.
    fn on_exit(&self, _pair: &CollisionPair) {}
}
