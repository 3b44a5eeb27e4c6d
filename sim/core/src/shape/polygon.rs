//! Convex polygon geometry.
//!
//! Vertices are stored in body-local space and must be convex and wound
//! clockwise. Each edge `i` (from vertex `i` to vertex `i + 1`) carries a
//! [`PolygonAxis`]: its outward unit normal and the normal's projection of the
//! edge's start vertex.
//!
//! ```text
//!   n_i = normalize(perp(v[i+1] - v[i]))
//!   d_i = n_i · v[i]
//! ```
//!
//! A point `p` is inside the polygon when `n_i · p - d_i <= 0` for every edge.

use planar_types::math::{cross, normalize_or_zero, perp};
use planar_types::{Aabb, Transform, Vect};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A separating axis: outward edge normal and support distance.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PolygonAxis {
    /// Outward unit normal.
    pub n: Vect,
    /// Distance of the edge from the origin along `n`.
    pub d: f64,
}

/// A problem found while validating polygon vertices.
///
/// These are warnings: the geometry is still used as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PolygonWarning {
    /// No vertices were supplied.
    #[error("polygon has no vertices")]
    Empty,
    /// Two consecutive vertices coincide.
    #[error("polygon edge {index} has zero length")]
    DegenerateEdge {
        /// Index of the edge's start vertex.
        index: usize,
    },
    /// The vertices turn counter-clockwise at this vertex.
    #[error("polygon is not convex and clockwise at vertex {index}")]
    NotConvex {
        /// Index of the vertex where the winding fails.
        index: usize,
    },
}

/// Check that `verts` form a convex polygon wound clockwise.
///
/// Collinear runs are accepted.
pub fn validate_polygon(verts: &[Vect]) -> Result<(), PolygonWarning> {
    let count = verts.len();
    if count == 0 {
        return Err(PolygonWarning::Empty);
    }

    for i in 0..count {
        let a = verts[i];
        let b = verts[(i + 1) % count];
        let c = verts[(i + 2) % count];

        if count > 1 && a == b {
            return Err(PolygonWarning::DegenerateEdge { index: i });
        }
        if cross(b - a, c - b) > 0.0 {
            return Err(PolygonWarning::NotConvex {
                index: (i + 1) % count,
            });
        }
    }

    Ok(())
}

/// A convex polygon.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Polygon {
    verts: Vec<Vect>,
    axes: Vec<PolygonAxis>,
    world_verts: Vec<Vect>,
    world_axes: Vec<PolygonAxis>,
}

impl Polygon {
    /// Create a polygon from clockwise vertices, each shifted by `offset`.
    ///
    /// Invalid vertices are logged and used as given.
    #[must_use]
    pub fn new(verts: &[Vect], offset: Vect) -> Self {
        let mut poly = Self::default();
        poly.set_verts(verts, offset);
        poly
    }

    /// Replace the vertices, recomputing every edge axis.
    ///
    /// World-space data is reset to the local geometry until the next update.
    pub fn set_verts(&mut self, verts: &[Vect], offset: Vect) {
        if let Err(warning) = validate_polygon(verts) {
            tracing::warn!(%warning, vertices = verts.len(), "invalid polygon vertices");
        }

        let count = verts.len();
        self.verts.clear();
        self.axes.clear();
        for i in 0..count {
            let a = verts[i] + offset;
            let b = verts[(i + 1) % count] + offset;
            let n = normalize_or_zero(perp(b - a));
            self.verts.push(a);
            self.axes.push(PolygonAxis { n, d: n.dot(&a) });
        }

        self.world_verts.clone_from(&self.verts);
        self.world_axes.clone_from(&self.axes);
    }

    /// Number of vertices.
    #[must_use]
    pub fn num_verts(&self) -> usize {
        self.verts.len()
    }

    /// Body-local vertices.
    #[must_use]
    pub fn verts(&self) -> &[Vect] {
        &self.verts
    }

    /// Body-local edge axes.
    #[must_use]
    pub fn axes(&self) -> &[PolygonAxis] {
        &self.axes
    }

    /// World-space vertices as of the last update.
    #[must_use]
    pub fn world_verts(&self) -> &[Vect] {
        &self.world_verts
    }

    /// World-space edge axes as of the last update.
    #[must_use]
    pub fn world_axes(&self) -> &[PolygonAxis] {
        &self.world_axes
    }

    /// Recompute world-space axes and vertices and return the bounding box.
    pub fn update(&mut self, xf: &Transform) -> Aabb {
        for (dst, src) in self.world_axes.iter_mut().zip(&self.axes) {
            let n = xf.transform_vector(src.n);
            *dst = PolygonAxis {
                n,
                d: xf.position.dot(&n) + src.d,
            };
        }

        let mut aabb = Aabb::empty();
        for (dst, src) in self.world_verts.iter_mut().zip(&self.verts) {
            *dst = xf.transform_point(*src);
            aabb = aabb.include(*dst);
        }
        aabb
    }

    /// Whether a world point lies inside or on the polygon.
    #[must_use]
    pub fn test_point(&self, point: Vect) -> bool {
        self.contains_vert(point)
    }

    /// Whether `v` lies behind every world edge.
    #[must_use]
    pub fn contains_vert(&self, v: Vect) -> bool {
        self.world_axes.iter().all(|axis| axis.n.dot(&v) - axis.d <= 0.0)
    }

    /// Like [`contains_vert`](Self::contains_vert), ignoring edges whose
    /// normal faces away from `n`.
    #[must_use]
    pub fn contains_vert_partial(&self, v: Vect, n: Vect) -> bool {
        self.world_axes
            .iter()
            .filter(|axis| axis.n.dot(&n) >= 0.0)
            .all(|axis| axis.n.dot(&v) - axis.d <= 0.0)
    }

    /// Minimum projection of the world vertices onto `n`, minus `d`.
    ///
    /// Positive values mean the polygon lies entirely in front of the
    /// half-plane `(n, d)`.
    #[must_use]
    pub fn value_on_axis(&self, n: Vect, d: f64) -> f64 {
        let min = self
            .world_verts
            .iter()
            .map(|v| n.dot(v))
            .fold(f64::INFINITY, f64::min);
        min - d
    }

    fn signed_area_sum(&self) -> f64 {
        self.edges().map(|(a, b)| cross(b, a)).sum()
    }

    fn edges(&self) -> impl Iterator<Item = (Vect, Vect)> + '_ {
        let count = self.verts.len();
        (0..count).map(move |i| (self.verts[i], self.verts[(i + 1) % count]))
    }

    /// Unsigned area.
    #[must_use]
    pub fn area(&self) -> f64 {
        0.5 * self.signed_area_sum().abs()
    }

    /// Area centroid in body-local coordinates.
    ///
    /// Falls back to the vertex average for zero-area input.
    #[must_use]
    pub fn centroid(&self) -> Vect {
        if self.verts.is_empty() {
            return Vect::zeros();
        }

        let sum = self.signed_area_sum();
        if sum == 0.0 {
            let total: Vect = self.verts.iter().sum();
            return total / self.verts.len() as f64;
        }

        let weighted: Vect = self.edges().map(|(a, b)| (a + b) * cross(b, a)).sum();
        weighted / (3.0 * sum)
    }

    /// Moment of inertia about the body origin for the given mass.
    ///
    /// Integrated about the centroid, then shifted by the parallel-axis term.
    /// Zero-area polygons have zero moment.
    #[must_use]
    pub fn moment(&self, mass: f64) -> f64 {
        let c = self.centroid();
        let count = self.verts.len();

        let mut sum1 = 0.0;
        let mut sum2 = 0.0;
        for i in 0..count {
            let v1 = self.verts[i] - c;
            let v2 = self.verts[(i + 1) % count] - c;
            let a = cross(v2, v1);
            sum1 += a * (v1.dot(&v1) + v1.dot(&v2) + v2.dot(&v2));
            sum2 += a;
        }

        if sum2 == 0.0 {
            return 0.0;
        }
        mass * sum1 / (6.0 * sum2) + mass * c.norm_squared()
    }
}
