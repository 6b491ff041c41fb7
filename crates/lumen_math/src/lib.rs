//! Math types shared by the lumen crates.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod ray;
mod transform;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
pub use transform::Orientation;

/// Color type alias (RGB, each channel nominally 0-1)
pub type Color = Vec3;
