use crate::Vec3;

/// A ray in 3D space: a half-line starting at `origin` and traveling along a
/// unit-length `direction`.
///
/// The reciprocal direction and per-axis sign bits are computed once at
/// construction so box slab tests can pick the near/far face of each axis
/// without branching. A zero direction component yields a signed infinity in
/// `inv_direction`, which the slab comparisons handle per IEEE-754.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
    inv_direction: Vec3,
    sign: [usize; 3],
}

impl Ray {
    /// Create a new ray. `direction` is normalized here, once.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        let direction = direction.normalize();
        let inv_direction = direction.recip();
        let sign = [
            (inv_direction.x < 0.0) as usize,
            (inv_direction.y < 0.0) as usize,
            (inv_direction.z < 0.0) as usize,
        ];

        Self {
            origin,
            direction,
            inv_direction,
            sign,
        }
    }

    /// Create a ray that starts at `from` and points at `to`.
    pub fn between(from: Vec3, to: Vec3) -> Self {
        Self::new(from, to - from)
    }

    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Unit-length direction.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Component-wise reciprocal of the direction.
    #[inline]
    pub fn inv_direction(&self) -> Vec3 {
        self.inv_direction
    }

    /// 1 if the direction is negative along `axis` (0=X, 1=Y, 2=Z), else 0.
    #[inline]
    pub fn sign(&self, axis: usize) -> usize {
        self.sign[axis]
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_direction_is_normalized() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(3.0, 0.0, 4.0));
        assert!((ray.direction().length() - 1.0).abs() < 1e-6);
        assert!((ray.direction() - Vec3::new(0.6, 0.0, 0.8)).length() < 1e-6);
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::X);
        assert_eq!(ray.at(2.0), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_sign_bits() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(-1.0, 2.0, -3.0));
        assert_eq!(ray.sign(0), 1);
        assert_eq!(ray.sign(1), 0);
        assert_eq!(ray.sign(2), 1);
    }

    #[test]
    fn test_zero_component_gives_infinite_reciprocal() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(ray.inv_direction().x.is_infinite());
        assert!(ray.inv_direction().y.is_infinite());
        assert_eq!(ray.inv_direction().z, -1.0);
        assert_eq!(ray.sign(2), 1);
    }

    #[test]
    fn test_ray_between() {
        let ray = Ray::between(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO);
        assert_eq!(ray.origin(), Vec3::new(0.0, 5.0, 0.0));
        assert!((ray.direction() - Vec3::NEG_Y).length() < 1e-6);
        assert!((ray.at(5.0) - Vec3::ZERO).length() < 1e-6);
    }

    #[test]
    fn test_ray_copy() {
        let ray1 = Ray::new(Vec3::ZERO, Vec3::Y);
        let ray2 = ray1;

        assert_eq!(ray1.origin(), ray2.origin());
        assert_eq!(ray1.at(1.0), ray2.at(1.0));
    }
}
