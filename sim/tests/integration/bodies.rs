//! Body mass properties and cloning.

use planar_core::{Body, BodySet, Shape, ShapeGeometry};
use planar_types::{PhysicsError, Vect};

/// Test: mass and its inverse round-trip exactly.
#[test]
fn mass_round_trip() {
    for mass in [1e-3, 0.5, 1.0, 3.7, 42.0, 1e6] {
        let mut body = Body::new(1.0, 1.0).expect("valid body");
        body.set_mass(mass).expect("positive mass");

        assert_eq!(body.mass(), mass, "mass {mass}");
        assert_eq!(body.mass_inv(), 1.0 / mass, "inverse of {mass}");
    }
}

/// Test: moment and its inverse round-trip exactly.
#[test]
fn moment_round_trip() {
    for moment in [1e-3, 2.0, 1e4] {
        let mut body = Body::new(1.0, 1.0).expect("valid body");
        body.set_moment(moment).expect("positive moment");

        assert_eq!(body.moment(), moment);
        assert_eq!(body.moment_inv(), 1.0 / moment);
    }
}

/// Test: the static sentinel has zero inverse mass and moment.
#[test]
fn static_body_inverse_is_zero() {
    let body = Body::new_static();
    assert!(body.is_static());
    assert!(body.mass().is_infinite());
    assert_eq!(body.mass_inv(), 0.0);
    assert_eq!(body.moment_inv(), 0.0);
}

/// Test: non-positive or NaN mass and moment are rejected and leave the body unchanged.
#[test]
fn invalid_mass_is_rejected() {
    let mut body = Body::new(2.0, 3.0).expect("valid body");

    for bad in [0.0, -1.0, f64::NAN] {
        assert!(matches!(body.set_mass(bad), Err(PhysicsError::InvalidMass(_))));
        assert!(matches!(body.set_moment(bad), Err(PhysicsError::InvalidMoment(_))));
    }
    assert_eq!(body.mass(), 2.0);
    assert_eq!(body.moment(), 3.0);

    assert!(Body::new(0.0, 1.0).is_err());
    assert!(Body::new(1.0, -1.0).is_err());
}

/// Test: a cloned body owns an independent shape list.
#[test]
fn clone_has_independent_shapes() {
    let mut bodies = BodySet::new();
    let id = bodies.insert(
        Body::new(1.0, 1.0)
            .expect("valid body")
            .with_shape(Shape::circle(1.5, Vect::new(0.5, 0.0)).with_friction(0.7)),
    );
    let original = bodies.get(id).expect("inserted");

    let mut copy = original.clone();
    assert_eq!(copy.shapes().len(), 1);
    assert_eq!(copy.shapes()[0].geometry(), original.shapes()[0].geometry());
    assert_eq!(copy.shapes()[0].friction, 0.7);
    assert!(copy.id().is_none());
    assert!(copy.shapes()[0].body().is_none());

    if let ShapeGeometry::Circle(circle) = copy.shapes_mut()[0].geometry_mut() {
        circle.radius = 4.0;
    }
    copy.shapes_mut()[0].friction = 0.1;

    let original = bodies.get(id).expect("inserted");
    match original.shapes()[0].geometry() {
        ShapeGeometry::Circle(circle) => assert_eq!(circle.radius, 1.5),
        other => panic!("unexpected geometry {other:?}"),
    }
    assert_eq!(original.shapes()[0].friction, 0.7);
    assert_eq!(original.shapes()[0].body(), Some(id));
}

/// Test: removing a body invalidates its handle.
#[test]
fn removed_handles_fail_lookup() {
    let mut bodies = BodySet::new();
    let a = bodies.insert(Body::new(1.0, 1.0).expect("valid body"));
    let b = bodies.insert(Body::new(1.0, 1.0).expect("valid body"));

    assert!(bodies.remove(a).is_some());
    assert!(bodies.get(a).is_none());
    assert!(matches!(
        bodies.pair_mut(a, b),
        Err(PhysicsError::InvalidBodyId(_))
    ));
    assert_eq!(bodies.len(), 1);
}
