//! Sphere primitive for ray tracing.

use crate::{
    hittable::{GeometryError, Hit, Hittable},
    Material, Ray,
};
use lumen_math::{Interval, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Material,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Result<Self, GeometryError> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(GeometryError::InvalidRadius(radius));
        }

        Ok(Self {
            center,
            radius,
            material,
        })
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Hittable for Sphere {
    /// Substitutes the ray into |p - c|^2 = r^2. The ray direction is unit
    /// length, so the quadratic's leading coefficient is 1.
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let oc = self.center - ray.origin();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = h - sqrtd;
        if !Interval::POSITIVE.surrounds(root) {
            root = h + sqrtd;
            if !Interval::POSITIVE.surrounds(root) {
                return None;
            }
        }

        let outward_normal = (ray.at(root) - self.center) / self.radius;
        Some(Hit::new(ray, root, outward_normal.normalize()))
    }

    fn material(&self) -> &Material {
        &self.material
    }

    fn position(&self) -> Vec3 {
        self.center
    }
}
