//! Error types for simulation operations.
//!
//! Every variant is a configuration or caller error. None are transient, so
//! nothing here carries retry semantics.

use thiserror::Error;

use crate::BodyId;

/// Errors that can occur while configuring or solving a simulation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PhysicsError {
    /// Mass must be positive and non-zero.
    #[error("invalid mass: {0} (must be positive and non-zero)")]
    InvalidMass(f64),

    /// Moment of inertia must be positive and non-zero.
    #[error("invalid moment of inertia: {0} (must be positive and non-zero)")]
    InvalidMoment(f64),

    /// The effective mass of a constraint is singular.
    ///
    /// Raised at pre-step when neither body can respond along a constrained
    /// axis, e.g. two infinite-mass bodies joined together.
    #[error("unsolvable constraint: {reason}")]
    UnsolvableConstraint {
        /// Description of the degenerate configuration.
        reason: String,
    },

    /// Invalid body ID referenced.
    #[error("invalid body ID: {0}")]
    InvalidBodyId(BodyId),

    /// A constraint references the same body on both sides.
    #[error("constraint connects {0} to itself")]
    SameBody(BodyId),

    /// Invalid timestep.
    #[error("invalid timestep: {0} (must be positive and finite)")]
    InvalidTimestep(f64),

    /// Invalid configuration.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the configuration error.
        reason: String,
    },
}

impl PhysicsError {
    /// Create an unsolvable constraint error.
    #[must_use]
    pub fn unsolvable(reason: impl Into<String>) -> Self {
        Self::UnsolvableConstraint {
            reason: reason.into(),
        }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Check if this error rejects a configuration value.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidMass(_)
                | Self::InvalidMoment(_)
                | Self::InvalidTimestep(_)
                | Self::InvalidConfig { .. }
        )
    }

    /// Check if this is an unsolvable constraint error.
    #[must_use]
    pub fn is_unsolvable(&self) -> bool {
        matches!(self, Self::UnsolvableConstraint { .. })
    }
}
