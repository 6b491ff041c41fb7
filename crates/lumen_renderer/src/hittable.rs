//! Hittable trait and Hit record for ray-object intersection.

use crate::{Material, Ray};
use lumen_math::{Color, Vec3};
use thiserror::Error;

/// Construction-time precondition violations.
///
/// Shapes and lights validate their parameters up front so the tracing code
/// never has to deal with NaNs from degenerate input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("sphere radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("plane normal must have non-zero length")]
    DegenerateNormal,

    #[error("plane extent must be positive, got {width}x{height}")]
    InvalidExtent { width: f32, height: f32 },

    #[error("mesh scale must be positive and finite, got {0}")]
    InvalidScale(f32),

    #[error("direction must have non-zero length")]
    DegenerateDirection,

    #[error("light intensity must be non-negative and finite, got {0}")]
    InvalidIntensity(f32),

    #[error("spotlight cone angle must be positive and finite, got {0}")]
    InvalidConeAngle(f32),

    #[error("view plane must have positive width and height")]
    InvalidViewPlane,
}

/// Where a ray meets a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Ray parameter; equals the distance from the ray origin
    pub t: f32,
    /// Point of intersection
    pub point: Vec3,
    /// Unit surface normal at the intersection
    pub normal: Vec3,
}

impl Hit {
    pub fn new(ray: &Ray, t: f32, normal: Vec3) -> Self {
        Self {
            t,
            point: ray.at(t),
            normal,
        }
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Nearest intersection with a strictly positive ray parameter, if any.
    fn intersect(&self, ray: &Ray) -> Option<Hit>;

    /// Surface colors of the object.
    fn material(&self) -> &Material;

    /// Reference position of the object (center, anchor or origin).
    fn position(&self) -> Vec3;

    /// Diffuse color at a world-space point on the surface.
    fn color_at(&self, _point: Vec3) -> Color {
        self.material().diffuse
    }
}
