// Object placement: per-axis Euler rotation, uniform scale, translation.
//
// Points are rotated about X, then Y, then Z, then scaled, then translated.
// Directions (normals) only see the rotation.

use glam::{Mat3, Vec3};

/// Placement of an object in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    /// World-space position of the object's local origin.
    pub translation: Vec3,
    /// Rotation about X, Y and Z in degrees, applied in that order.
    pub rotation_degrees: Vec3,
    /// Uniform scale factor.
    pub scale: f32,
}

impl Default for Orientation {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation_degrees: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

impl Orientation {
    /// Orientation that only moves the object.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// The rotation part as a 3x3 matrix (X first, then Y, then Z).
    pub fn rotation_matrix(&self) -> Mat3 {
        let r = self.rotation_degrees;
        Mat3::from_rotation_z(r.z.to_radians())
            * Mat3::from_rotation_y(r.y.to_radians())
            * Mat3::from_rotation_x(r.x.to_radians())
    }

    /// Transform a local-space point into world space.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation_matrix() * point * self.scale + self.translation
    }

    /// Rotate a direction (no scale, no translation).
    pub fn rotate_vector(&self, vector: Vec3) -> Vec3 {
        self.rotation_matrix() * vector
    }
}
