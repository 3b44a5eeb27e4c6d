//! Shape geometry attached to moving bodies.

use std::f64::consts::{FRAC_PI_2, PI};

use approx::assert_relative_eq;
use planar_core::{Body, BodySet, Circle, Polygon, Shape, ShapeType, validate_polygon};
use planar_types::{Transform, Vect};

fn hexagon(radius: f64) -> Vec<Vect> {
    // Clockwise: decreasing angle
    (0..6)
        .map(|i| {
            let angle = -f64::from(i) * PI / 3.0;
            Vect::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

/// Test: every edge axis passes through its start vertex and points outward.
#[test]
fn polygon_axes_are_outward_and_consistent() {
    let verts = hexagon(2.0);
    assert!(validate_polygon(&verts).is_ok());

    let poly = Polygon::new(&verts, Vect::zeros());
    let centroid = poly.centroid();
    assert_relative_eq!(centroid.norm(), 0.0, epsilon = 1e-12);

    for (i, axis) in poly.axes().iter().enumerate() {
        let a = poly.verts()[i];
        let b = poly.verts()[(i + 1) % poly.num_verts()];

        assert_relative_eq!(axis.n.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(axis.n.dot(&a), axis.d, epsilon = 1e-12);
        assert_relative_eq!(axis.n.dot(&b), axis.d, epsilon = 1e-12);
        assert!(axis.n.dot(&((a + b) * 0.5 - centroid)) > 0.0, "edge {i} faces inward");
    }
}

/// Test: world axes stay consistent with world vertices after a body transform.
#[test]
fn polygon_world_axes_follow_the_body() {
    let mut poly = Polygon::new(&hexagon(1.0), Vect::new(0.5, 0.0));
    let xf = Transform::new(Vect::new(3.0, -2.0), 0.9);
    let aabb = poly.update(&xf);

    for (i, axis) in poly.world_axes().iter().enumerate() {
        let v = poly.world_verts()[i];
        assert_relative_eq!(axis.n.dot(&v), axis.d, epsilon = 1e-9);
        assert!(aabb.contains_point(v));
    }

    let center = xf.transform_point(Vect::new(0.5, 0.0));
    assert!(poly.test_point(center));
    assert!(!poly.test_point(center + Vect::new(5.0, 0.0)));
}

/// Test: a circle contains its center and nothing beyond its radius.
#[test]
fn circle_test_point_boundary() {
    for radius in [0.01, 1.0, 2.5, 100.0] {
        let mut circle = Circle::new(Vect::new(0.25, 0.0), radius);
        circle.update(&Transform::new(Vect::new(1.0, 2.0), FRAC_PI_2));
        let center = circle.world_center();

        assert_relative_eq!(center.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(center.y, 2.25, epsilon = 1e-12);
        assert!(circle.test_point(center));

        for eps in [1e-6, 1e-3, 0.5, 10.0] {
            for angle in [0.0, 1.0, 2.5, 4.0] {
                let dir = Vect::new(f64::cos(angle), f64::sin(angle));
                let outside = center + dir * (radius + eps * radius.max(1.0));
                assert!(
                    !circle.test_point(outside),
                    "r={radius} eps={eps} angle={angle}"
                );
            }
        }
    }
}

/// Test: body shapes are re-projected by the body transform.
#[test]
fn body_shapes_update_in_world_space() {
    let mut bodies = BodySet::new();
    let id = bodies.insert(
        Body::new(1.0, 1.0)
            .expect("valid body")
            .with_position(Vect::new(10.0, 0.0))
            .with_angle(FRAC_PI_2)
            .with_shape(Shape::circle(1.0, Vect::new(2.0, 0.0)))
            .with_shape(Shape::box_shape(2.0, 2.0, Vect::zeros()))
            .with_shape(Shape::segment(Vect::new(-1.0, 0.0), Vect::new(1.0, 0.0), 0.5)),
    );
    bodies.update_shapes();

    let body = bodies.get(id).expect("inserted");
    let [circle, boxed, segment] = body.shapes() else {
        panic!("expected three shapes");
    };

    // Local +x maps to world +y after a quarter turn
    assert!(circle.test_point(Vect::new(10.0, 2.0)));
    assert!(!circle.test_point(Vect::new(12.0, 0.0)));
    assert_eq!(circle.shape_type(), ShapeType::Circle);

    assert_eq!(boxed.shape_type(), ShapeType::Polygon);
    assert!(boxed.test_point(Vect::new(10.5, 0.5)));
    assert_relative_eq!(boxed.aabb().area(), 4.0, epsilon = 1e-9);

    assert_eq!(segment.shape_type(), ShapeType::Segment);
    assert!(!segment.test_point(Vect::new(10.0, 0.0)));
    let aabb = segment.aabb();
    assert_relative_eq!(aabb.lower.x, 9.5, epsilon = 1e-12);
    assert_relative_eq!(aabb.upper.y, 1.5, epsilon = 1e-12);
}

/// Test: moments include the parallel-axis offset and sum across shapes.
#[test]
fn composite_moment() {
    let mass = 2.0;
    let centered = Shape::circle(1.0, Vect::zeros()).moment(mass);
    let offset = Shape::circle(1.0, Vect::new(3.0, 4.0)).moment(mass);
    assert_relative_eq!(centered, 1.0, epsilon = 1e-12);
    assert_relative_eq!(offset, centered + mass * 25.0, epsilon = 1e-12);

    let boxed = Shape::box_shape(2.0, 4.0, Vect::zeros()).moment(mass);
    let rect = [
        Vect::new(-1.0, -2.0),
        Vect::new(-1.0, 2.0),
        Vect::new(1.0, 2.0),
        Vect::new(1.0, -2.0),
    ];
    let poly = Shape::polygon(&rect, Vect::zeros()).moment(mass);
    assert_relative_eq!(boxed, mass * (4.0 + 16.0) / 12.0, epsilon = 1e-12);
    assert_relative_eq!(poly, boxed, epsilon = 1e-9);

    let rod = Shape::segment(Vect::new(-1.0, 0.0), Vect::new(1.0, 0.0), 0.0).moment(mass);
    assert_relative_eq!(rod, mass * 4.0 / 12.0, epsilon = 1e-12);
}
