//! Warm-started contacts driven through the pair cache.

use std::sync::Arc;

use approx::assert_relative_eq;
use planar_constraint::SequentialImpulseSolver;
use planar_contact::{ContactCache, ContactPoint};
use planar_core::{CollisionHandler, CollisionPair};
use planar_tests::{Ground, step_with_contacts};
use planar_types::{SimulationConfig, Vect};

const RADIUS: f64 = 0.5;

/// Test: matching feature hashes carry impulses into the next step; new ones reset them.
#[test]
fn warm_start_follows_feature_hash() {
    let config = SimulationConfig::default();
    let mut scene = Ground::new(1.0);
    let ball = scene.add_ball(0.0, RADIUS, 1.0).expect("valid ball");
    let pair = scene.pair(ball);

    let mut cache = ContactCache::new(config.solver);
    let mut solver = SequentialImpulseSolver::new(config.solver);
    step_with_contacts(&mut scene, &[(ball, RADIUS)], &mut cache, &mut solver, &config)
        .expect("step");

    let after_solve = cache.get(&pair).expect("tracked").contacts()[0].clone();
    assert!(after_solve.normal_impulse() > 0.0);

    // Same feature: accumulators survive the reset
    cache.begin_step();
    let point = scene.ball_contact(ball, RADIUS, 0.05).expect("touching");
    cache.update(pair, &[point], &scene.bodies).expect("update");
    let carried = &cache.get(&pair).expect("tracked").contacts()[0];
    assert_eq!(carried.normal_impulse(), after_solve.normal_impulse());
    assert_eq!(carried.tangent_impulse(), after_solve.tangent_impulse());
    assert_eq!(carried.bias_impulse(), after_solve.bias_impulse());

    // New feature: all three accumulators start over
    let moved = ContactPoint { hash: point.hash + 1, ..point };
    cache.update(pair, &[moved], &scene.bodies).expect("update");
    let fresh = &cache.get(&pair).expect("tracked").contacts()[0];
    assert_eq!(fresh.normal_impulse(), 0.0);
    assert_eq!(fresh.tangent_impulse(), 0.0);
    assert_eq!(fresh.bias_impulse(), 0.0);
}

/// Test: a ball placed on the ground stays there.
#[test]
fn resting_ball_stays_put() {
    let config = SimulationConfig::default();
    let mut scene = Ground::new(1.0);
    let ball = scene.add_ball(0.0, RADIUS, 1.0).expect("valid ball");

    let mut cache = ContactCache::new(config.solver);
    let mut solver = SequentialImpulseSolver::new(config.solver);
    for _ in 0..240 {
        step_with_contacts(&mut scene, &[(ball, RADIUS)], &mut cache, &mut solver, &config)
            .expect("step");
    }

    let body = scene.bodies.get(ball).expect("ball");
    assert_relative_eq!(body.position().y, RADIUS, epsilon = 1e-6);
    assert!(body.velocity().norm() < 1e-6);
    assert_eq!(cache.len(), 1);
}

/// Test: a dropped ball lands and comes to rest near the surface.
#[test]
fn dropped_ball_comes_to_rest() {
    let config = SimulationConfig::default();
    let mut scene = Ground::new(1.0);
    let ball = scene.add_ball(0.0, RADIUS, 1.0).expect("valid ball");
    scene
        .bodies
        .get_mut(ball)
        .expect("ball")
        .set_position(Vect::new(0.0, 2.0));

    let mut cache = ContactCache::new(config.solver);
    let mut solver = SequentialImpulseSolver::new(config.solver);
    for _ in 0..300 {
        step_with_contacts(&mut scene, &[(ball, RADIUS)], &mut cache, &mut solver, &config)
            .expect("step");
    }

    let body = scene.bodies.get(ball).expect("ball");
    let y = body.position().y;
    assert!(y > RADIUS - 0.15 && y < RADIUS + 0.05, "ball at {y}");
    assert!(body.velocity().norm() < 1e-3);
}

/// Test: friction turns sliding into rolling without slipping.
#[test]
fn sliding_ball_starts_rolling() {
    let config = SimulationConfig::default();
    let mut scene = Ground::new(1.0);
    let ball = scene.add_ball(0.0, RADIUS, 1.0).expect("valid ball");
    scene
        .bodies
        .get_mut(ball)
        .expect("ball")
        .set_velocity(Vect::new(3.0, 0.0));

    let mut cache = ContactCache::new(config.solver);
    let mut solver = SequentialImpulseSolver::new(config.solver);
    for _ in 0..120 {
        step_with_contacts(&mut scene, &[(ball, RADIUS)], &mut cache, &mut solver, &config)
            .expect("step");
    }

    // Solid disk: v = v0 / (1 + I / (m r²)) = 2
    let body = scene.bodies.get(ball).expect("ball");
    assert_relative_eq!(body.velocity().x, 2.0, epsilon = 0.05);
    assert_relative_eq!(body.angular_velocity(), -body.velocity().x / RADIUS, epsilon = 1e-3);
}

struct PassThrough;

impl CollisionHandler for PassThrough {
    fn on_enter(&self, _pair: &CollisionPair) -> bool {
        false
    }
}

/// Test: a handler that rejects the pair lets the ball fall through.
#[test]
fn rejected_pair_falls_through() {
    let config = SimulationConfig::default();
    let mut scene = Ground::new(1.0);
    let ball = scene.add_ball(0.0, RADIUS, 1.0).expect("valid ball");
    scene
        .bodies
        .get_mut(ball)
        .expect("ball")
        .set_handler(Some(Arc::new(PassThrough) as Arc<dyn CollisionHandler>));

    let mut cache = ContactCache::new(config.solver);
    let mut solver = SequentialImpulseSolver::new(config.solver);
    for _ in 0..60 {
        step_with_contacts(&mut scene, &[(ball, RADIUS)], &mut cache, &mut solver, &config)
            .expect("step");
    }

    assert!(scene.bodies.get(ball).expect("ball").position().y < 0.0);
    assert!(cache.is_empty());
}
