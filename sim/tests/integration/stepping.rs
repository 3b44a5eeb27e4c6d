//! Velocity and position integration.

use std::sync::Arc;

use approx::assert_relative_eq;
use planar_core::{Body, BodySet, PositionIntegrator, VelocityIntegrator};
use planar_types::{SimulationConfig, Vect};

struct Frozen;

impl VelocityIntegrator for Frozen {
    fn update_velocity(&self, _body: &mut Body, _gravity: Vect, _lin: f64, _ang: f64, _dt: f64) {}
}

impl PositionIntegrator for Frozen {
    fn update_position(&self, _body: &mut Body, _dt: f64) {}
}

/// Test: the canonical falling-body step.
///
/// Gravity (0, -10) over dt = 0.1 gives velocity (0, -1); the position
/// phase then uses the new velocity.
#[test]
fn gravity_step_is_symplectic() {
    let config = SimulationConfig::with_timestep(0.1)
        .gravity(Vect::new(0.0, -10.0))
        .damping(1.0, 1.0);
    let mut bodies = BodySet::new();
    let id = bodies.insert(Body::new(1.0, 1.0).expect("valid body"));

    bodies.update_velocities(&config, config.timestep);
    let body = bodies.get(id).expect("inserted");
    assert_relative_eq!(body.velocity().x, 0.0);
    assert_relative_eq!(body.velocity().y, -1.0, epsilon = 1e-12);
    assert_eq!(body.position(), Vect::zeros());

    bodies.update_positions(config.timestep);
    let body = bodies.get(id).expect("inserted");
    assert_relative_eq!(body.position().x, 0.0);
    assert_relative_eq!(body.position().y, -0.1, epsilon = 1e-12);
}

/// Test: a free body keeps its velocity and moves by exactly v·dt.
#[test]
fn free_body_moves_linearly() {
    let config = SimulationConfig::default().zero_gravity();
    let dt = config.timestep;
    let velocity = Vect::new(3.0, -1.5);

    let mut bodies = BodySet::new();
    let id = bodies.insert(
        Body::new(2.0, 1.0)
            .expect("valid body")
            .with_position(Vect::new(1.0, 1.0))
            .with_velocity(velocity)
            .with_angular_velocity(0.5),
    );

    bodies.update_velocities(&config, dt);
    bodies.update_positions(dt);

    let body = bodies.get(id).expect("inserted");
    assert_eq!(body.velocity(), velocity);
    assert_eq!(body.angular_velocity(), 0.5);
    assert_relative_eq!(body.position().x, 1.0 + 3.0 * dt, epsilon = 1e-12);
    assert_relative_eq!(body.position().y, 1.0 - 1.5 * dt, epsilon = 1e-12);
    assert_relative_eq!(body.angle(), 0.5 * dt, epsilon = 1e-12);
}

/// Test: custom integrators replace the default phases entirely.
#[test]
fn no_op_integrators_freeze_state() {
    let config = SimulationConfig::default();
    let frozen = Arc::new(Frozen);

    let mut bodies = BodySet::new();
    let id = bodies.insert(
        Body::new(1.0, 1.0)
            .expect("valid body")
            .with_position(Vect::new(2.0, 3.0))
            .with_velocity(Vect::new(1.0, 0.0))
            .with_velocity_integrator(frozen.clone())
            .with_position_integrator(frozen),
    );
    bodies
        .get_mut(id)
        .expect("inserted")
        .add_force(Vect::new(10.0, 10.0));

    for _ in 0..10 {
        bodies.update_velocities(&config, config.timestep);
        bodies.update_positions(config.timestep);
    }

    let body = bodies.get(id).expect("inserted");
    assert!(body.has_custom_integrator());
    assert_eq!(body.position(), Vect::new(2.0, 3.0));
    assert_eq!(body.velocity(), Vect::new(1.0, 0.0));
    // The default phase would have cleared the force
    assert_eq!(body.force(), Vect::new(10.0, 10.0));
}

/// Test: bias velocity moves the body once and never becomes real velocity.
#[test]
fn bias_velocity_is_consumed_once() {
    let mut body = Body::new(1.0, 1.0).expect("valid body");
    body.set_velocity_bias(Vect::new(1.0, 0.0));
    body.set_angular_velocity_bias(2.0);

    body.update_position(0.5);
    assert_relative_eq!(body.position().x, 0.5, epsilon = 1e-12);
    assert_relative_eq!(body.angle(), 1.0, epsilon = 1e-12);
    assert_eq!(body.velocity(), Vect::zeros());
    assert_eq!(body.velocity_bias(), Vect::zeros());
    assert_eq!(body.angular_velocity_bias(), 0.0);

    body.update_position(0.5);
    assert_relative_eq!(body.position().x, 0.5, epsilon = 1e-12);
}

/// Test: static bodies are never integrated.
#[test]
fn static_bodies_do_not_fall() {
    let config = SimulationConfig::default();
    let mut bodies = BodySet::new();
    let id = bodies.insert(Body::new_static().with_position(Vect::new(0.0, 5.0)));

    for _ in 0..60 {
        bodies.update_velocities(&config, config.timestep);
        bodies.update_positions(config.timestep);
    }
    assert_eq!(bodies.get(id).expect("inserted").position(), Vect::new(0.0, 5.0));
}

/// Test: per-second damping is applied as a per-step factor.
#[test]
fn damping_retains_fraction_per_second() {
    let config = SimulationConfig::with_timestep(0.1).zero_gravity().damping(0.5, 1.0);
    let mut bodies = BodySet::new();
    let id = bodies.insert(
        Body::new(1.0, 1.0)
            .expect("valid body")
            .with_velocity(Vect::new(2.0, 0.0)),
    );

    for _ in 0..10 {
        bodies.update_velocities(&config, config.timestep);
    }
    assert_relative_eq!(
        bodies.get(id).expect("inserted").velocity().x,
        1.0,
        epsilon = 1e-9
    );
}
