//! Sequential impulse driver.
//!
//! Runs the constraint protocol across every constraint for one step:
//!
//! 1. `pre_step` on all constraints
//! 2. `apply_cached_impulse` on all constraints, scaled by `dt / previous_dt`
//! 3. `iterations` passes of `apply_impulse` over all constraints
//!
//! This is Gauss-Seidel relaxation: each constraint sees the velocity changes
//! of the ones before it in the same pass, so constraint order affects the
//! result for finite iteration counts.

use planar_core::BodySet;
use planar_types::{BodyId, Result, SolverConfig, Vect};

use crate::Constraint;
use crate::impulse::check_timestep;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Summary of one solver step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverReport {
    /// Number of constraints solved.
    pub constraints: usize,
    /// Relaxation passes run.
    pub iterations: usize,
    /// Warm-start scale applied to cached impulses.
    pub dt_coef: f64,
    /// Largest impulse reported by any constraint after the last pass.
    pub max_impulse: f64,
}

impl SolverReport {
    /// Whether no constraints were solved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constraints == 0
    }
}

/// Velocity and bias state of one body at the start of a step.
#[derive(Debug, Clone, Copy)]
struct VelocityState {
    id: BodyId,
    velocity: Vect,
    angular_velocity: f64,
    velocity_bias: Vect,
    angular_velocity_bias: f64,
}

impl VelocityState {
    fn capture<C: Constraint>(bodies: &BodySet, constraints: &[C]) -> Vec<Self> {
        let mut ids: Vec<BodyId> = constraints
            .iter()
            .flat_map(|c| [c.body_a(), c.body_b()])
            .collect();
        ids.sort_unstable();
        ids.dedup();

        ids.into_iter()
            .filter_map(|id| {
                bodies.get(id).map(|body| Self {
                    id,
                    velocity: body.velocity(),
                    angular_velocity: body.angular_velocity(),
                    velocity_bias: body.velocity_bias(),
                    angular_velocity_bias: body.angular_velocity_bias(),
                })
            })
            .collect()
    }

    fn restore(states: &[Self], bodies: &mut BodySet) {
        for state in states {
            if let Some(body) = bodies.get_mut(state.id) {
                body.set_velocity(state.velocity);
                body.set_angular_velocity(state.angular_velocity);
                body.set_velocity_bias(state.velocity_bias);
                body.set_angular_velocity_bias(state.angular_velocity_bias);
            }
        }
    }
}

/// Iterative impulse solver with warm starting.
#[derive(Debug, Clone, Default)]
pub struct SequentialImpulseSolver {
    config: SolverConfig,
    previous_dt: Option<f64>,
}

impl SequentialImpulseSolver {
    /// Create a solver with the given configuration.
    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            previous_dt: None,
        }
    }

    /// Get the solver configuration.
    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Replace the solver configuration.
    pub fn set_config(&mut self, config: SolverConfig) {
        self.config = config;
    }

    /// Forget the previous timestep so the next step starts without warm starting.
    pub fn clear_warm_start(&mut self) {
        self.previous_dt = None;
    }

    /// Warm-start scale for a step of length `dt`.
    #[must_use]
    pub fn dt_coef(&self, dt: f64) -> f64 {
        match self.previous_dt {
            Some(previous) if self.config.warm_starting && previous > 0.0 => dt / previous,
            _ => 0.0,
        }
    }

    /// Solve one step of length `dt`.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidTimestep`](planar_types::PhysicsError::InvalidTimestep)
    /// for a non-positive `dt`, and propagates the first constraint error. On
    /// error every body the constraints touch gets back the velocity and bias
    /// it had before the call, and the warm-start timestep is left unchanged.
    pub fn solve<C: Constraint>(
        &mut self,
        bodies: &mut BodySet,
        constraints: &mut [C],
        dt: f64,
    ) -> Result<SolverReport> {
        check_timestep(dt)?;

        let dt_coef = self.dt_coef(dt);
        let saved = VelocityState::capture(bodies, constraints);

        if let Err(err) = self.relax(bodies, constraints, dt, dt_coef) {
            VelocityState::restore(&saved, bodies);
            tracing::debug!(%err, bodies = saved.len(), "solve failed, velocities restored");
            return Err(err);
        }

        self.previous_dt = Some(dt);

        let max_impulse = constraints
            .iter()
            .map(Constraint::impulse)
            .fold(0.0, f64::max);

        tracing::debug!(
            constraints = constraints.len(),
            iterations = self.config.iterations,
            dt_coef,
            max_impulse,
            "solved constraints"
        );

        Ok(SolverReport {
            constraints: constraints.len(),
            iterations: self.config.iterations,
            dt_coef,
            max_impulse,
        })
    }

    fn relax<C: Constraint>(
        &self,
        bodies: &mut BodySet,
        constraints: &mut [C],
        dt: f64,
        dt_coef: f64,
    ) -> Result<()> {
        for constraint in constraints.iter_mut() {
            constraint.pre_step(bodies, dt)?;
        }
        for constraint in constraints.iter_mut() {
            constraint.apply_cached_impulse(bodies, dt_coef)?;
        }
        for _ in 0..self.config.iterations {
            for constraint in constraints.iter_mut() {
                constraint.apply_impulse(bodies)?;
            }
        }
        Ok(())
    }
}
