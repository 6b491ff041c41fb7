//! Plane primitive, finite or infinite, optionally textured.

use std::sync::Arc;

use crate::{
    hittable::{GeometryError, Hit, Hittable},
    Material, Ray,
};
use lumen_core::Texture;
use lumen_math::{Color, Vec3};

/// Texels per world unit unless overridden.
pub const DEFAULT_TEXELS_PER_UNIT: f32 = 80.0;

/// A plane through `position` with a unit `normal`.
///
/// `basis1` and `basis2` are an orthonormal pair spanning the plane. They are
/// derived once whenever the normal changes and reused for the finite-extent
/// test and texture lookups. `basis1` runs along the width, `basis2` along
/// the height.
#[derive(Debug, Clone)]
pub struct Plane {
    position: Vec3,
    normal: Vec3,
    basis1: Vec3,
    basis2: Vec3,
    width: f32,
    height: f32,
    infinite: bool,
    material: Material,
    texture: Option<Arc<Texture>>,
    texels_per_unit: f32,
}

impl Plane {
    /// An infinite plane.
    pub fn infinite(position: Vec3, normal: Vec3, material: Material) -> Result<Self, GeometryError> {
        let mut plane = Self {
            position,
            normal: Vec3::Y,
            basis1: Vec3::X,
            basis2: Vec3::Z,
            width: 20.0,
            height: 20.0,
            infinite: true,
            material,
            texture: None,
            texels_per_unit: DEFAULT_TEXELS_PER_UNIT,
        };
        plane.set_normal(normal)?;
        Ok(plane)
    }

    /// A `width` x `height` rectangle centred on `position`.
    pub fn finite(
        position: Vec3,
        normal: Vec3,
        width: f32,
        height: f32,
        material: Material,
    ) -> Result<Self, GeometryError> {
        let mut plane = Self::infinite(position, normal, material)?;
        plane.set_extent(width, height)?;
        plane.infinite = false;
        Ok(plane)
    }

    /// Change the normal and rebuild the in-plane basis.
    pub fn set_normal(&mut self, normal: Vec3) -> Result<(), GeometryError> {
        let normal = normal.try_normalize().ok_or(GeometryError::DegenerateNormal)?;
        let (basis1, basis2) = plane_basis(normal);

        self.normal = normal;
        self.basis1 = basis1;
        self.basis2 = basis2;
        Ok(())
    }

    /// Change the size of the rectangle used by finite planes and texture anchoring.
    pub fn set_extent(&mut self, width: f32, height: f32) -> Result<(), GeometryError> {
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(GeometryError::InvalidExtent { width, height });
        }
        self.width = width;
        self.height = height;
        Ok(())
    }

    pub fn set_infinite(&mut self, infinite: bool) {
        self.infinite = infinite;
    }

    pub fn with_texture(mut self, texture: Arc<Texture>) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_texels_per_unit(mut self, texels_per_unit: f32) -> Self {
        self.texels_per_unit = texels_per_unit;
        self
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn basis(&self) -> (Vec3, Vec3) {
        (self.basis1, self.basis2)
    }

    pub fn is_infinite(&self) -> bool {
        self.infinite
    }

    pub fn texture(&self) -> Option<&Arc<Texture>> {
        self.texture.as_ref()
    }

    /// Where texture coordinates start: the plane's position, or its
    /// lower-left corner for finite planes.
    fn texture_origin(&self) -> Vec3 {
        if self.infinite {
            self.position
        } else {
            self.position - self.basis1 * (self.width / 2.0) - self.basis2 * (self.height / 2.0)
        }
    }
}

/// Orthonormal in-plane basis for a unit normal.
///
/// Two candidate vectors perpendicular to the normal are built in closed
/// form, with a fallback when an axis-aligned normal zeroes a candidate, then
/// Gram-Schmidt-orthogonalized against the normal and each other.
fn plane_basis(normal: Vec3) -> (Vec3, Vec3) {
    const PARALLEL_EPSILON: f32 = 1e-6;

    let fallback = Vec3::new(0.0, -normal.z, normal.y);

    let mut x1 = Vec3::new(-normal.y, normal.x, 0.0);
    if x1.length_squared() == 0.0 {
        x1 = fallback;
    }
    let mut x2 = Vec3::new(normal.z, 0.0, -normal.x);
    if x2.length_squared() == 0.0 {
        x2 = fallback;
    }

    let basis1 = (x1 - x1.dot(normal) * normal).normalize();
    let basis2 = x2 - x2.dot(normal) * normal - x2.dot(basis1) * basis1;

    // With normal.x == 0 the two candidates are parallel and only rounding
    // noise survives the projection.
    let basis2 = if basis2.length_squared() < PARALLEL_EPSILON {
        normal.cross(basis1).normalize()
    } else {
        basis2.normalize()
    };

    (basis1, basis2)
}

impl Hittable for Plane {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let denom = ray.direction().dot(self.normal);
        if denom.abs() < 1e-6 {
            return None;
        }

        let t = (self.position - ray.origin()).dot(self.normal) / denom;
        if t <= 0.0 {
            return None;
        }

        let hit = Hit::new(ray, t, self.normal);

        if !self.infinite {
            let relative = hit.point - self.position;
            if relative.dot(self.basis1).abs() > self.width / 2.0
                || relative.dot(self.basis2).abs() > self.height / 2.0
            {
                return None;
            }
        }

        Some(hit)
    }

    fn material(&self) -> &Material {
        &self.material
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    /// Flat diffuse color, or the texel under `point` for textured planes.
    /// The texture tiles across the plane.
    fn color_at(&self, point: Vec3) -> Color {
        let Some(texture) = &self.texture else {
            return self.material.diffuse;
        };

        let offset = point - self.texture_origin();
        let s = offset.dot(self.basis1 * self.texels_per_unit);
        let t = offset.dot(self.basis2 * self.texels_per_unit);
        texture.sample_wrapped(s, t)
    }
}
