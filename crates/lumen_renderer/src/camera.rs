//! Camera for ray generation.
//!
//! The camera shoots rays from its position through a rectangular view plane
//! held at a fixed distance in front of it. Normalized coordinates
//! `(u, v)` in `[0, 1]^2` map onto the rectangle, with `(0, 0)` at its
//! lower-left corner.

use crate::{hittable::GeometryError, Ray};
use lumen_core::CameraDesc;
use lumen_math::{Vec2, Vec3};

/// Rectangle in camera-local units: x runs right, y runs up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewPlane {
    min: Vec2,
    max: Vec2,
}

impl ViewPlane {
    pub fn new(min: Vec2, max: Vec2) -> Result<Self, GeometryError> {
        let size = max - min;
        if !(size.x > 0.0 && size.y > 0.0 && size.is_finite()) {
            return Err(GeometryError::InvalidViewPlane);
        }
        Ok(Self { min, max })
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn aspect(&self) -> f32 {
        self.width() / self.height()
    }

    /// Camera-local offset of normalized coordinates `(u, v)`.
    pub fn to_local(&self, u: f32, v: f32) -> Vec2 {
        Vec2::new(self.min.x + u * self.width(), self.min.y + v * self.height())
    }
}

/// Orthonormal camera frame.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Frame {
    forward: Vec3,
    right: Vec3,
    up: Vec3,
}

impl Frame {
    fn looking(forward: Vec3) -> Self {
        // Fall back to +X as the right vector when looking straight up or down.
        let right = forward.cross(Vec3::Y).try_normalize().unwrap_or(Vec3::X);
        let up = right.cross(forward);
        Self { forward, right, up }
    }
}

/// Pinhole camera with a rectangular view plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCamera {
    position: Vec3,
    aim: Vec3,
    view: ViewPlane,
    distance: f32,
    frame: Frame,
}

impl RenderCamera {
    /// Camera at `position` looking at `aim`, with the view plane `distance`
    /// units in front of it.
    pub fn new(position: Vec3, aim: Vec3, view: ViewPlane, distance: f32) -> Result<Self, GeometryError> {
        if !(distance > 0.0 && distance.is_finite()) {
            return Err(GeometryError::InvalidViewPlane);
        }
        let forward = (aim - position)
            .try_normalize()
            .ok_or(GeometryError::DegenerateDirection)?;

        Ok(Self {
            position,
            aim,
            view,
            distance,
            frame: Frame::looking(forward),
        })
    }

    pub fn from_desc(desc: &CameraDesc) -> Result<Self, GeometryError> {
        let view = ViewPlane::new(desc.view_min, desc.view_max)?;
        Self::new(desc.position, desc.aim, view, desc.view_distance)
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn aim(&self) -> Vec3 {
        self.aim
    }

    pub fn view(&self) -> &ViewPlane {
        &self.view
    }

    /// World-space point on the view plane at normalized `(u, v)`.
    pub fn to_world(&self, u: f32, v: f32) -> Vec3 {
        let local = self.view.to_local(u, v);
        self.position + self.frame.forward * self.distance + self.frame.right * local.x + self.frame.up * local.y
    }

    /// Ray from the camera through the view plane at normalized `(u, v)`.
    pub fn get_ray(&self, u: f32, v: f32) -> Ray {
        Ray::between(self.position, self.to_world(u, v))
    }
}

impl Default for RenderCamera {
    fn default() -> Self {
        let desc = CameraDesc::default();
        let view = ViewPlane {
            min: desc.view_min,
            max: desc.view_max,
        };
        Self {
            position: desc.position,
            aim: desc.aim,
            view,
            distance: desc.view_distance,
            frame: Frame::looking((desc.aim - desc.position).normalize()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "{a:?} != {b:?}");
    }

    #[test]
    fn test_default_matches_description() {
        let camera = RenderCamera::from_desc(&CameraDesc::default()).unwrap();
        assert_eq!(camera, RenderCamera::default());
    }

    #[test]
    fn test_view_plane_corners() {
        let camera = RenderCamera::default();

        // Looking down -Z from z = 10 with the plane 5 units ahead.
        assert_close(camera.to_world(0.0, 0.0), Vec3::new(-3.0, -2.0, 5.0));
        assert_close(camera.to_world(1.0, 1.0), Vec3::new(3.0, 2.0, 5.0));
        assert_close(camera.to_world(0.5, 0.5), Vec3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn test_center_ray_points_at_aim() {
        let camera = RenderCamera::default();
        let ray = camera.get_ray(0.5, 0.5);

        assert_close(ray.origin(), Vec3::new(0.0, 0.0, 10.0));
        assert_close(ray.direction(), Vec3::NEG_Z);
    }

    #[test]
    fn test_turned_camera_keeps_up_vector() {
        let view = ViewPlane::new(Vec2::splat(-1.0), Vec2::splat(1.0)).unwrap();
        let camera = RenderCamera::new(Vec3::ZERO, Vec3::X, view, 1.0).unwrap();

        assert_close(camera.to_world(0.5, 0.5), Vec3::X);
        assert_close(camera.to_world(0.5, 1.0), Vec3::new(1.0, 1.0, 0.0));
        assert_close(camera.to_world(1.0, 0.5), Vec3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn test_looking_straight_down() {
        let view = ViewPlane::new(Vec2::splat(-1.0), Vec2::splat(1.0)).unwrap();
        let camera = RenderCamera::new(Vec3::Y, Vec3::ZERO, view, 1.0).unwrap();

        let ray = camera.get_ray(0.5, 0.5);
        assert_close(ray.direction(), Vec3::NEG_Y);
        assert!(camera.get_ray(0.0, 0.0).direction().is_finite());
    }

    #[test]
    fn test_rejects_degenerate_setup() {
        assert_eq!(
            ViewPlane::new(Vec2::ZERO, Vec2::new(1.0, 0.0)).unwrap_err(),
            GeometryError::InvalidViewPlane
        );

        let view = ViewPlane::new(Vec2::ZERO, Vec2::ONE).unwrap();
        assert_eq!(
            RenderCamera::new(Vec3::ONE, Vec3::ONE, view, 1.0).unwrap_err(),
            GeometryError::DegenerateDirection
        );
        assert!(RenderCamera::new(Vec3::ZERO, Vec3::X, view, 0.0).is_err());
    }
}
