//! Point and spot lights with shadow-ray occlusion.
//!
//! Lights are not scene objects: they are never hit by camera rays and never
//! block each other's shadow rays.

use crate::{hittable::GeometryError, Ray, SceneObject};
use lumen_math::Vec3;

/// Capability shared by every light: where it is, how bright it is, and
/// whether it reaches a given surface point.
pub trait LightSource: Send + Sync {
    fn position(&self) -> Vec3;

    fn intensity(&self) -> f32;

    /// True if the light does not reach `surface_point`, either because a
    /// visible blocker sits between the two or because the point lies outside
    /// the light's emission region.
    fn is_occluded(&self, surface_point: Vec3, blockers: &[SceneObject]) -> bool;
}

/// Cast a ray from `light` towards `surface_point` and report whether any
/// visible blocker is hit strictly closer to the light than the surface.
fn segment_blocked(light: Vec3, surface_point: Vec3, blockers: &[SceneObject]) -> bool {
    let surface_distance = light.distance(surface_point);
    if surface_distance == 0.0 {
        return false;
    }

    let ray = Ray::between(light, surface_point);
    blockers.iter().any(|object| {
        object
            .intersect(&ray)
            .is_some_and(|hit| hit.point.distance(light) < surface_distance)
    })
}

fn validate_intensity(intensity: f32) -> Result<(), GeometryError> {
    if intensity >= 0.0 && intensity.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::InvalidIntensity(intensity))
    }
}

/// Omnidirectional light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    position: Vec3,
    intensity: f32,
}

impl PointLight {
    pub fn new(position: Vec3, intensity: f32) -> Result<Self, GeometryError> {
        validate_intensity(intensity)?;
        Ok(Self { position, intensity })
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }
}

impl LightSource for PointLight {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn intensity(&self) -> f32 {
        self.intensity
    }

    fn is_occluded(&self, surface_point: Vec3, blockers: &[SceneObject]) -> bool {
        segment_blocked(self.position, surface_point, blockers)
    }
}

/// Light emitted in a cone around `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    position: Vec3,
    intensity: f32,
    direction: Vec3,
    /// Cone half-angle in degrees.
    angle: f32,
}

impl SpotLight {
    pub fn new(position: Vec3, intensity: f32, direction: Vec3, angle: f32) -> Result<Self, GeometryError> {
        validate_intensity(intensity)?;
        let direction = direction.try_normalize().ok_or(GeometryError::DegenerateDirection)?;
        if !(angle > 0.0 && angle.is_finite()) {
            return Err(GeometryError::InvalidConeAngle(angle));
        }

        Ok(Self {
            position,
            intensity,
            direction,
            angle,
        })
    }

    /// Unit direction of the cone axis.
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Cone half-angle in degrees.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Re-aim the light at `target`.
    pub fn aim_at(&mut self, target: Vec3) -> Result<(), GeometryError> {
        self.direction = (target - self.position)
            .try_normalize()
            .ok_or(GeometryError::DegenerateDirection)?;
        Ok(())
    }

    /// True if `surface_point` lies within the cone (boundary included).
    pub fn illuminates(&self, surface_point: Vec3) -> bool {
        let Some(to_point) = (surface_point - self.position).try_normalize() else {
            return true;
        };
        let cos = self.direction.dot(to_point).clamp(-1.0, 1.0);
        cos.acos() <= self.angle.to_radians()
    }
}

impl LightSource for SpotLight {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn intensity(&self) -> f32 {
        self.intensity
    }

    fn is_occluded(&self, surface_point: Vec3, blockers: &[SceneObject]) -> bool {
        !self.illuminates(surface_point) || segment_blocked(self.position, surface_point, blockers)
    }
}

/// Any light the scene can hold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Point(PointLight),
    Spot(SpotLight),
}

impl LightSource for Light {
    fn position(&self) -> Vec3 {
        match self {
            Light::Point(light) => light.position(),
            Light::Spot(light) => light.position(),
        }
    }

    fn intensity(&self) -> f32 {
        match self {
            Light::Point(light) => light.intensity(),
            Light::Spot(light) => light.intensity(),
        }
    }

    fn is_occluded(&self, surface_point: Vec3, blockers: &[SceneObject]) -> bool {
        match self {
            Light::Point(light) => light.is_occluded(surface_point, blockers),
            Light::Spot(light) => light.is_occluded(surface_point, blockers),
        }
    }
}

impl From<PointLight> for Light {
    fn from(light: PointLight) -> Self {
        Light::Point(light)
    }
}

impl From<SpotLight> for Light {
    fn from(light: SpotLight) -> Self {
        Light::Spot(light)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, Sphere};

    fn blocker_at(center: Vec3) -> SceneObject {
        SceneObject::new("blocker", Sphere::new(center, 1.0, Material::default()).unwrap())
    }

    #[test]
    fn test_point_light_occlusion() {
        let light = PointLight::new(Vec3::new(0.0, 10.0, 0.0), 1.0).unwrap();
        let surface = Vec3::ZERO;

        assert!(!light.is_occluded(surface, &[]));

        let mut blockers = vec![blocker_at(Vec3::new(0.0, 5.0, 0.0))];
        assert!(light.is_occluded(surface, &blockers));

        blockers.clear();
        assert!(!light.is_occluded(surface, &blockers));
    }

    #[test]
    fn test_blocker_behind_surface_does_not_occlude() {
        let light = PointLight::new(Vec3::new(0.0, 10.0, 0.0), 1.0).unwrap();
        let blockers = [blocker_at(Vec3::new(0.0, -5.0, 0.0))];
        assert!(!light.is_occluded(Vec3::ZERO, &blockers));
    }

    #[test]
    fn test_hidden_blocker_does_not_occlude() {
        let light = PointLight::new(Vec3::new(0.0, 10.0, 0.0), 1.0).unwrap();
        let blockers = [blocker_at(Vec3::new(0.0, 5.0, 0.0)).hidden()];
        assert!(!light.is_occluded(Vec3::ZERO, &blockers));
    }

    #[test]
    fn test_surface_at_light_is_lit() {
        let light = PointLight::new(Vec3::ONE, 1.0).unwrap();
        let blockers = [blocker_at(Vec3::ONE)];
        assert!(!light.is_occluded(Vec3::ONE, &blockers));
    }

    #[test]
    fn test_spot_cone_boundary() {
        let spot = SpotLight::new(Vec3::ZERO, 1.0, Vec3::NEG_Y, 30.0).unwrap();

        let at_angle = |degrees: f32| {
            let radians = degrees.to_radians();
            Vec3::new(radians.sin(), -radians.cos(), 0.0) * 10.0
        };

        assert!(!spot.is_occluded(at_angle(0.0), &[]));
        assert!(!spot.is_occluded(at_angle(29.9), &[]));
        assert!(spot.is_occluded(at_angle(30.1), &[]));
        assert!(spot.is_occluded(at_angle(90.0), &[]));
        // Behind the light entirely
        assert!(spot.is_occluded(Vec3::new(0.0, 10.0, 0.0), &[]));
    }

    #[test]
    fn test_spot_inside_cone_still_checks_blockers() {
        let spot = SpotLight::new(Vec3::new(0.0, 10.0, 0.0), 1.0, Vec3::NEG_Y, 20.0).unwrap();
        let blockers = [blocker_at(Vec3::new(0.0, 5.0, 0.0))];
        assert!(spot.is_occluded(Vec3::ZERO, &blockers));
    }

    #[test]
    fn test_spot_aim_at() {
        let mut spot = SpotLight::new(Vec3::new(0.0, 10.0, 0.0), 1.0, Vec3::X, 10.0).unwrap();
        assert!(spot.is_occluded(Vec3::ZERO, &[]));

        spot.aim_at(Vec3::ZERO).unwrap();
        assert!((spot.direction() - Vec3::NEG_Y).length() < 1e-6);
        assert!(!spot.is_occluded(Vec3::ZERO, &[]));
        assert!(spot.aim_at(Vec3::new(0.0, 10.0, 0.0)).is_err());
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert_eq!(
            PointLight::new(Vec3::ZERO, -1.0).unwrap_err(),
            GeometryError::InvalidIntensity(-1.0)
        );
        assert_eq!(
            SpotLight::new(Vec3::ZERO, 1.0, Vec3::ZERO, 20.0).unwrap_err(),
            GeometryError::DegenerateDirection
        );
        assert_eq!(
            SpotLight::new(Vec3::ZERO, 1.0, Vec3::Y, 0.0).unwrap_err(),
            GeometryError::InvalidConeAngle(0.0)
        );
    }

    #[test]
    fn test_enum_dispatch() {
        let light: Light = PointLight::new(Vec3::new(1.0, 2.0, 3.0), 0.75).unwrap().into();
        assert_eq!(light.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(light.intensity(), 0.75);
    }
}
