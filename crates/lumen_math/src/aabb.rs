use crate::{Interval, Ray, Vec3};

/// Axis-aligned bounding box, one interval per axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create an AABB from two corner points.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self {
            x: Interval::new(a.x.min(b.x), a.x.max(b.x)),
            y: Interval::new(a.y.min(b.y), a.y.max(b.y)),
            z: Interval::new(a.z.min(b.z), a.z.max(b.z)),
        }
    }

    /// Smallest box containing every point. Empty input gives `Aabb::EMPTY`.
    pub fn enclosing<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Self {
        points.into_iter().fold(Self::EMPTY, |bounds, p| Self {
            x: bounds.x.include(p.x),
            y: bounds.y.include(p.y),
            z: bounds.z.include(p.z),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.x.min > self.x.max || self.y.min > self.y.max || self.z.min > self.z.max
    }

    /// Corner with the smallest coordinates.
    pub fn min(&self) -> Vec3 {
        Vec3::new(self.x.min, self.y.min, self.z.min)
    }

    /// Corner with the largest coordinates.
    pub fn max(&self) -> Vec3 {
        Vec3::new(self.x.max, self.y.max, self.z.max)
    }

    /// Test if a ray intersects this AABB within `ray_t`.
    ///
    /// Slab method after Williams, Barrus, Morley and Shirley, "An Efficient
    /// and Robust Ray-Box Intersection Algorithm" (JGT 10(1), 2005). The
    /// ray's sign bits select which corner bounds the near and far plane of
    /// each slab. Succeeds when the overlap of all three slabs intersects
    /// `(ray_t.min, ray_t.max)`.
    pub fn hit(&self, r: &Ray, ray_t: Interval) -> bool {
        let bounds = [self.min(), self.max()];
        let orig = r.origin();
        let inv = r.inv_direction();

        let mut tmin = (bounds[r.sign(0)].x - orig.x) * inv.x;
        let mut tmax = (bounds[1 - r.sign(0)].x - orig.x) * inv.x;
        let tymin = (bounds[r.sign(1)].y - orig.y) * inv.y;
        let tymax = (bounds[1 - r.sign(1)].y - orig.y) * inv.y;

        if tmin > tymax || tymin > tmax {
            return false;
        }
        if tymin > tmin {
            tmin = tymin;
        }
        if tymax < tmax {
            tmax = tymax;
        }

        let tzmin = (bounds[r.sign(2)].z - orig.z) * inv.z;
        let tzmax = (bounds[1 - r.sign(2)].z - orig.z) * inv.z;

        if tmin > tzmax || tzmin > tmax {
            return false;
        }
        if tzmin > tmin {
            tmin = tzmin;
        }
        if tzmax < tmax {
            tmax = tzmax;
        }

        tmin < ray_t.max && tmax > ray_t.min
    }

    /// Translate (move) the AABB by an offset vector.
    pub fn translate(&self, offset: Vec3) -> Aabb {
        Aabb {
            x: self.x.add_scalar(offset.x),
            y: self.y.add_scalar(offset.y),
            z: self.z.add_scalar(offset.z),
        }
    }

    /// Returns the center point of the bounding box.
    pub fn centroid(&self) -> Vec3 {
        (self.min() + self.max()) * 0.5
    }

    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb {
        Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0))
    }

    #[test]
    fn test_aabb_from_points_orders_corners() {
        let aabb = Aabb::from_points(Vec3::new(10.0, 0.0, 5.0), Vec3::new(0.0, 10.0, -5.0));

        assert_eq!(aabb.min(), Vec3::new(0.0, 0.0, -5.0));
        assert_eq!(aabb.max(), Vec3::new(10.0, 10.0, 5.0));
    }

    #[test]
    fn test_enclosing() {
        let points = [
            Vec3::new(-1.0, -2.0, -3.0),
            Vec3::new(4.0, 5.0, 6.0),
            Vec3::ZERO,
        ];
        let aabb = Aabb::enclosing(&points);

        assert_eq!(aabb.min(), Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(aabb.max(), Vec3::new(4.0, 5.0, 6.0));
        assert!(Aabb::enclosing(&[] as &[Vec3]).is_empty());
    }

    #[test]
    fn test_aabb_hit() {
        let aabb = unit_box();
        let range = Interval::new(0.0, 1000.0);

        // Ray pointing at center
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        assert!(aabb.hit(&ray, range));

        // Ray pointing away
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::NEG_Z);
        assert!(!aabb.hit(&ray, range));

        // Ray missing the box
        let ray = Ray::new(Vec3::new(10.0, 0.0, 0.0), Vec3::Z);
        assert!(!aabb.hit(&ray, range));
    }

    #[test]
    fn test_aabb_hit_diagonal_negative_direction() {
        let aabb = unit_box();
        let ray = Ray::new(Vec3::splat(5.0), Vec3::splat(-1.0));
        assert!(aabb.hit(&ray, Interval::new(0.0, 1000.0)));
    }

    #[test]
    fn test_aabb_hit_from_inside() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.3, -0.2, 0.9));
        assert!(unit_box().hit(&ray, Interval::new(0.0, 1000.0)));
    }

    #[test]
    fn test_aabb_hit_respects_range() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -50.0), Vec3::Z);
        assert!(unit_box().hit(&ray, Interval::new(0.0, 1000.0)));
        assert!(!unit_box().hit(&ray, Interval::new(0.0, 10.0)));
    }

    #[test]
    fn test_axis_parallel_ray_outside_slab_misses() {
        // Zero x/y direction: reciprocal is infinite, the slab test must still reject.
        let ray = Ray::new(Vec3::new(2.0, 0.0, -5.0), Vec3::Z);
        assert!(!unit_box().hit(&ray, Interval::new(0.0, 1000.0)));
    }

    #[test]
    fn test_aabb_centroid_and_translate() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::splat(10.0));
        assert_eq!(aabb.centroid(), Vec3::splat(5.0));

        let moved = aabb.translate(Vec3::new(-5.0, 0.0, 1.0));
        assert_eq!(moved.min(), Vec3::new(-5.0, 0.0, 1.0));
        assert_eq!(moved.max(), Vec3::new(5.0, 10.0, 11.0));
    }
}
