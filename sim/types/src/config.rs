//! Configuration types for simulation.
//!
//! These are the values the step driver hands to the core each step:
//! timestep, gravity, damping, and solver settings. The driver loop itself is
//! not part of this workspace; these types only describe and validate its inputs.

use crate::math::Vect;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Error bias that leaves 10% of positional error uncorrected after each
/// 1/60 s of simulated time: `(1 - 0.1)^60`.
#[must_use]
pub fn default_error_bias() -> f64 {
    0.9_f64.powf(60.0)
}

/// Main configuration for a simulation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulationConfig {
    /// Fixed timestep for physics integration (seconds).
    pub timestep: f64,
    /// Gravitational acceleration applied to every body that does not ignore it.
    pub gravity: Vect,
    /// Fraction of linear velocity retained after one second (1.0 = no loss).
    pub linear_damping: f64,
    /// Fraction of angular velocity retained after one second (1.0 = no loss).
    pub angular_damping: f64,
    /// Solver configuration.
    pub solver: SolverConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            timestep: 1.0 / 60.0,
            gravity: Vect::new(0.0, -9.81),
            linear_damping: 1.0,
            angular_damping: 1.0,
            solver: SolverConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Create a new simulation config with the given timestep.
    #[must_use]
    pub fn with_timestep(timestep: f64) -> Self {
        Self {
            timestep,
            ..Default::default()
        }
    }

    /// Create a configuration for real-time simulation (60 Hz).
    #[must_use]
    pub fn realtime() -> Self {
        Self::default()
    }

    /// Create a configuration for high-fidelity simulation (240 Hz, more iterations).
    #[must_use]
    pub fn high_accuracy() -> Self {
        Self {
            timestep: 1.0 / 240.0,
            solver: SolverConfig::high_accuracy(),
            ..Default::default()
        }
    }

    /// Create a configuration for fast, low-fidelity simulation (30 Hz).
    #[must_use]
    pub fn fast() -> Self {
        Self {
            timestep: 1.0 / 30.0,
            solver: SolverConfig::fast(),
            ..Default::default()
        }
    }

    /// Set the gravity.
    #[must_use]
    pub fn gravity(mut self, gravity: Vect) -> Self {
        self.gravity = gravity;
        self
    }

    /// Disable gravity (zero-G environment).
    #[must_use]
    pub fn zero_gravity(mut self) -> Self {
        self.gravity = Vect::zeros();
        self
    }

    /// Set the linear and angular damping (fraction of velocity retained per second).
    #[must_use]
    pub fn damping(mut self, linear: f64, angular: f64) -> Self {
        self.linear_damping = linear;
        self.angular_damping = angular;
        self
    }

    /// Set the solver configuration.
    #[must_use]
    pub fn solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Per-step multiplicative damping factors for a step of length `dt`.
    ///
    /// Returns `(linear, angular)` as consumed by body velocity integration.
    #[must_use]
    pub fn damping_factors(&self, dt: f64) -> (f64, f64) {
        (
            self.linear_damping.powf(dt),
            self.angular_damping.powf(dt),
        )
    }

    /// Validate the configuration.
    pub fn validate(&self) -> crate::Result<()> {
        if !self.timestep.is_finite() || self.timestep <= 0.0 {
            return Err(crate::PhysicsError::InvalidTimestep(self.timestep));
        }

        if !self.gravity.iter().all(|g| g.is_finite()) {
            return Err(crate::PhysicsError::invalid_config("gravity must be finite"));
        }

        for (name, value) in [
            ("linear_damping", self.linear_damping),
            ("angular_damping", self.angular_damping),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(crate::PhysicsError::invalid_config(format!(
                    "{name} must be between 0 and 1, got {value}"
                )));
            }
        }

        self.solver.validate()
    }

    /// Get the frequency in Hz.
    #[must_use]
    pub fn frequency(&self) -> f64 {
        1.0 / self.timestep
    }
}

/// Configuration for the sequential impulse solver.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverConfig {
    /// Number of relaxation passes over all constraints per step.
    pub iterations: usize,
    /// Penetration depth left uncorrected to keep resting contacts stable.
    pub collision_slop: f64,
    /// Fraction of contact penetration left uncorrected after one second.
    pub collision_bias: f64,
    /// Whether to re-apply the previous step's impulses before iterating.
    pub warm_starting: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            iterations: 10,
            collision_slop: 0.1,
            collision_bias: default_error_bias(),
            warm_starting: true,
        }
    }
}

impl SolverConfig {
    /// Create a high-accuracy solver configuration.
    #[must_use]
    pub fn high_accuracy() -> Self {
        Self {
            iterations: 30,
            collision_slop: 0.01,
            ..Default::default()
        }
    }

    /// Create a fast solver configuration.
    #[must_use]
    pub fn fast() -> Self {
        Self {
            iterations: 4,
            ..Default::default()
        }
    }

    /// Set the number of solver iterations.
    #[must_use]
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the collision slop.
    #[must_use]
    pub fn slop(mut self, slop: f64) -> Self {
        self.collision_slop = slop;
        self
    }

    /// Set the collision bias.
    #[must_use]
    pub fn collision_bias(mut self, bias: f64) -> Self {
        self.collision_bias = bias;
        self
    }

    /// Disable warm starting.
    #[must_use]
    pub fn without_warm_starting(mut self) -> Self {
        self.warm_starting = false;
        self
    }

    /// Validate the solver configuration.
    pub fn validate(&self) -> crate::Result<()> {
        if self.iterations == 0 {
            return Err(crate::PhysicsError::invalid_config(
                "iterations must be at least 1",
            ));
        }

        if !(self.collision_slop >= 0.0) {
            return Err(crate::PhysicsError::invalid_config(
                "collision_slop cannot be negative",
            ));
        }

        if !(0.0..=1.0).contains(&self.collision_bias) {
            return Err(crate::PhysicsError::invalid_config(
                "collision_bias must be between 0 and 1",
            ));
        }

        Ok(())
    }
}
