//! Pivot joints and damped springs under the sequential impulse solver.

use std::sync::Arc;

use approx::assert_relative_eq;
use planar_constraint::{
    Constraint, DampedSpring, PivotJoint, SequentialImpulseSolver, SpringForce,
};
use planar_core::{Body, BodySet};
use planar_tests::step;
use planar_types::{BodyId, PhysicsError, SimulationConfig, SolverConfig, Vect};

fn anchor_velocity(bodies: &BodySet, joint: &PivotJoint) -> Vect {
    let a = bodies.get(joint.body_a()).expect("body a");
    let b = bodies.get(joint.body_b()).expect("body b");
    let (r1, r2) = joint.world_offsets();
    b.velocity_at_world_offset(r2) - a.velocity_at_world_offset(r1)
}

fn momentum(bodies: &BodySet, ids: &[BodyId]) -> Vect {
    ids.iter()
        .map(|&id| {
            let body = bodies.get(id).expect("body");
            body.velocity() * body.mass()
        })
        .sum()
}

/// Test: relaxing a pivot never increases the relative anchor velocity.
#[test]
fn pivot_converges_monotonically() {
    let mut bodies = BodySet::new();
    let a = bodies.insert(
        Body::new(1.0, 1.0)
            .expect("valid body")
            .with_velocity(Vect::new(0.0, 1.0))
            .with_angular_velocity(0.3),
    );
    let b = bodies.insert(
        Body::new(1.0, 1.0)
            .expect("valid body")
            .with_position(Vect::new(2.0, 0.0))
            .with_velocity(Vect::new(0.5, -1.0)),
    );
    let mut joint = PivotJoint::with_world_pivot(&bodies, a, b, Vect::new(1.0, 0.0))
        .expect("distinct bodies");

    joint.pre_step(&mut bodies, 1.0 / 60.0).expect("solvable");
    let mut previous = anchor_velocity(&bodies, &joint).norm();
    assert!(previous > 0.5);

    for i in 0..20 {
        joint.apply_impulse(&mut bodies).expect("solvable");
        let current = anchor_velocity(&bodies, &joint).norm();
        assert!(
            current <= previous + 1e-12,
            "iteration {i}: {current} > {previous}"
        );
        previous = current;
    }
    assert!(previous < 1e-9);

    // Equal and opposite impulses leave linear momentum untouched
    let p = momentum(&bodies, &[a, b]);
    assert_relative_eq!(p.x, 0.5, epsilon = 1e-12);
    assert_relative_eq!(p.y, 0.0, epsilon = 1e-12);
}

/// Test: Gauss-Seidel passes converge a chain sharing a body.
#[test]
fn pivot_chain_converges() {
    let mut bodies = BodySet::new();
    let ground = bodies.insert(Body::new_static());
    let first = bodies.insert(
        Body::new(1.0, 0.2)
            .expect("valid body")
            .with_position(Vect::new(1.0, 0.0))
            .with_velocity(Vect::new(0.0, 1.0)),
    );
    let second = bodies.insert(
        Body::new(1.0, 0.2)
            .expect("valid body")
            .with_position(Vect::new(2.0, 0.0))
            .with_velocity(Vect::new(0.0, -1.0)),
    );

    let mut joints = [
        PivotJoint::with_world_pivot(&bodies, ground, first, Vect::new(0.5, 0.0))
            .expect("distinct bodies"),
        PivotJoint::with_world_pivot(&bodies, first, second, Vect::new(1.5, 0.0))
            .expect("distinct bodies"),
    ];
    let mut solver = SequentialImpulseSolver::new(SolverConfig::default().iterations(100));
    let report = solver
        .solve(&mut bodies, &mut joints, 1.0 / 60.0)
        .expect("solvable");

    assert_eq!(report.constraints, 2);
    for joint in &joints {
        assert!(anchor_velocity(&bodies, joint).norm() < 1e-6);
    }
}

/// Test: a pendulum keeps its length while swinging under gravity.
#[test]
fn pendulum_keeps_its_length() {
    let config = SimulationConfig::default();
    let mut bodies = BodySet::new();
    let pivot = bodies.insert(Body::new_static());
    let bob = bodies.insert(
        Body::new(1.0, 0.1)
            .expect("valid body")
            .with_position(Vect::new(1.0, 0.0)),
    );
    let mut joints =
        [PivotJoint::with_world_pivot(&bodies, pivot, bob, Vect::zeros()).expect("distinct bodies")];
    let mut solver = SequentialImpulseSolver::new(config.solver);

    let mut lowest = 0.0_f64;
    for _ in 0..120 {
        step(&mut bodies, &mut solver, &mut joints, &config).expect("step");
        let p = bodies.get(bob).expect("bob").position();
        lowest = lowest.min(p.y);

        // The bob's anchor stays on the pivot
        let anchor = bodies.get(bob).expect("bob").local_to_world(Vect::new(-1.0, 0.0));
        assert!(anchor.norm() < 0.1, "anchor drifted to {anchor:?}");
    }
    assert!(lowest < -0.5, "bob never swung down");
}

/// Test: joints between two immovable bodies cannot be solved.
#[test]
fn pivot_between_static_bodies_fails() {
    let mut bodies = BodySet::new();
    let a = bodies.insert(Body::new_static());
    let b = bodies.insert(Body::new_static());
    let mut joints = [PivotJoint::at_centers(a, b).expect("distinct bodies")];

    let mut solver = SequentialImpulseSolver::default();
    let err = solver
        .solve(&mut bodies, &mut joints, 1.0 / 60.0)
        .expect_err("singular");
    assert!(err.is_unsolvable());

    assert!(matches!(
        PivotJoint::at_centers(a, a),
        Err(PhysicsError::SameBody(_))
    ));
}

/// Test: a stretched damped spring settles at its rest length.
#[test]
fn spring_settles_at_rest_length() {
    let config = SimulationConfig::default().zero_gravity();
    let mut bodies = BodySet::new();
    let a = bodies.insert(Body::new(1.0, 1.0).expect("valid body"));
    let b = bodies.insert(
        Body::new(1.0, 1.0)
            .expect("valid body")
            .with_position(Vect::new(2.0, 0.0)),
    );
    let mut springs = [DampedSpring::new(a, b, Vect::zeros(), Vect::zeros(), 1.0, 10.0, 2.0)
        .expect("distinct bodies")];
    let mut solver = SequentialImpulseSolver::new(config.solver);

    step(&mut bodies, &mut solver, &mut springs, &config).expect("step");
    assert!(springs[0].impulse() > 0.0);
    assert!(bodies.get(b).expect("b").velocity().x < 0.0);

    for _ in 0..600 {
        step(&mut bodies, &mut solver, &mut springs, &config).expect("step");
    }

    let pa = bodies.get(a).expect("a").position();
    let pb = bodies.get(b).expect("b").position();
    assert_relative_eq!((pb - pa).norm(), 1.0, epsilon = 1e-2);
    assert!(momentum(&bodies, &[a, b]).norm() < 1e-9);
}

struct Constant(f64);

impl SpringForce for Constant {
    fn force(&self, _spring: &DampedSpring, _dist: f64) -> f64 {
        self.0
    }
}

/// Test: a custom force law replaces Hooke's law.
#[test]
fn spring_uses_custom_force_law() {
    let mut bodies = BodySet::new();
    let a = bodies.insert(Body::new_static());
    let b = bodies.insert(
        Body::new(2.0, 1.0)
            .expect("valid body")
            .with_position(Vect::new(0.0, 3.0)),
    );
    let mut spring = DampedSpring::new(a, b, Vect::zeros(), Vect::zeros(), 3.0, 100.0, 0.0)
        .expect("distinct bodies")
        .with_force_law(Arc::new(Constant(8.0)));

    spring.pre_step(&mut bodies, 0.5).expect("solvable");

    // 8 N for 0.5 s along +y on a 2 kg body
    let v = bodies.get(b).expect("b").velocity();
    assert_relative_eq!(v.x, 0.0, epsilon = 1e-12);
    assert_relative_eq!(v.y, 2.0, epsilon = 1e-12);
    assert_relative_eq!(spring.normal().y, 1.0, epsilon = 1e-12);
}
