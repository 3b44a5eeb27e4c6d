//! Shared scene builders for the cross-crate integration tests.

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]

use planar_constraint::{Constraint, SequentialImpulseSolver};
use planar_contact::{ContactCache, ContactGroup, ContactPoint};
use planar_core::{Body, BodySet, CollisionPair, Shape, ShapeKey};
use planar_types::{BodyId, Result, SimulationConfig, Vect};

/// A static ground whose top surface is the line `y = 0`.
pub struct Ground {
    /// The bodies in the scene.
    pub bodies: BodySet,
    /// The static ground body.
    pub ground: BodyId,
}

impl Ground {
    /// Create a scene containing only the ground.
    #[must_use]
    pub fn new(friction: f64) -> Self {
        let mut bodies = BodySet::new();
        let ground = bodies.insert(
            Body::new_static().with_shape(
                Shape::segment(Vect::new(-100.0, 0.0), Vect::new(100.0, 0.0), 0.0)
                    .with_friction(friction),
            ),
        );
        Self { bodies, ground }
    }

    /// Add a ball of `radius` resting on the ground at `x`.
    pub fn add_ball(&mut self, x: f64, radius: f64, mass: f64) -> Result<BodyId> {
        let moment = Shape::circle(radius, Vect::zeros()).moment(mass);
        let body = Body::new(mass, moment)?
            .with_position(Vect::new(x, radius))
            .with_shape(Shape::circle(radius, Vect::zeros()).with_friction(1.0));
        Ok(self.bodies.insert(body))
    }

    /// The pair formed by the ground and `ball`'s first shape.
    #[must_use]
    pub fn pair(&self, ball: BodyId) -> CollisionPair {
        CollisionPair::new(ShapeKey::new(self.ground, 0), ShapeKey::new(ball, 0))
    }

    /// Contact between the ground and a ball of `radius`, if the ball is
    /// within `margin` of the surface and has not passed through it.
    #[must_use]
    pub fn ball_contact(&self, ball: BodyId, radius: f64, margin: f64) -> Option<ContactPoint> {
        let position = self.bodies.get(ball)?.position();
        let depth = position.y - radius;
        (depth < margin && depth > -2.0 * radius)
            .then(|| ContactPoint::new(Vect::new(position.x, 0.0), Vect::y(), depth, 0))
    }
}

/// Run one full step over `bodies`: velocity phase, constraints, position phase.
pub fn step<C: Constraint>(
    bodies: &mut BodySet,
    solver: &mut SequentialImpulseSolver,
    constraints: &mut [C],
    config: &SimulationConfig,
) -> Result<f64> {
    let dt = config.timestep;
    bodies.update_velocities(config, dt);
    let report = solver.solve(bodies, constraints, dt)?;
    bodies.update_positions(dt);
    bodies.update_shapes();
    Ok(report.max_impulse)
}

/// Run one step of `scene` with the balls' ground contacts routed through `cache`.
pub fn step_with_contacts(
    scene: &mut Ground,
    balls: &[(BodyId, f64)],
    cache: &mut ContactCache,
    solver: &mut SequentialImpulseSolver,
    config: &SimulationConfig,
) -> Result<()> {
    cache.begin_step();
    for &(ball, radius) in balls {
        if let Some(point) = scene.ball_contact(ball, radius, 0.05) {
            cache.update(scene.pair(ball), &[point], &scene.bodies)?;
        }
    }

    let dt = config.timestep;
    scene.bodies.update_velocities(config, dt);
    let mut groups: Vec<&mut ContactGroup> = cache.active_groups_mut().collect();
    solver.solve(&mut scene.bodies, &mut groups, dt)?;
    cache.post_solve(&scene.bodies);
    scene.bodies.update_positions(dt);
    scene.bodies.update_shapes();

    cache.end_step(&scene.bodies);
    Ok(())
}
