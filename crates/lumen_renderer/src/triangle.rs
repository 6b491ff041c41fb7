//! Ray-triangle intersection.
//!
//! Uses the Möller-Trumbore algorithm. Both windings are hit; the caller
//! decides which normal to report.

use crate::Ray;
use lumen_math::{Interval, Vec3};

/// Ray parameter and barycentric weights of a triangle hit.
///
/// The hit point is `(1 - beta - gamma) * v0 + beta * v1 + gamma * v2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    pub t: f32,
    pub beta: f32,
    pub gamma: f32,
}

/// Möller-Trumbore ray-triangle intersection restricted to `ray_t`.
pub fn intersect_triangle(ray: &Ray, [v0, v1, v2]: [Vec3; 3], ray_t: Interval) -> Option<TriangleHit> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray.direction().cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < 1e-8 {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin() - v0;
    let beta = f * s.dot(h);

    // Check if intersection is outside triangle (beta parameter)
    if !(0.0..=1.0).contains(&beta) {
        return None;
    }

    let q = s.cross(edge1);
    let gamma = f * ray.direction().dot(q);

    // Check if intersection is outside triangle (gamma parameter)
    if gamma < 0.0 || beta + gamma > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    if !ray_t.surrounds(t) {
        return None;
    }

    Some(TriangleHit { t, beta, gamma })
}
