//! Scene container and nearest-hit traversal.

use crate::{Hit, Light, Ray, SceneObject};

/// Result of a camera-ray query: which object was hit and where.
#[derive(Debug, Clone, Copy)]
pub struct SceneHit<'a> {
    pub object: &'a SceneObject,
    pub hit: Hit,
}

/// Ordered objects plus ordered lights.
///
/// Objects are both what camera rays see and what blocks shadow rays. Lights
/// are kept apart and never intersected.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    lights: Vec<Light>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object and return its index.
    pub fn add_object(&mut self, object: SceneObject) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    /// Add a light and return its index.
    pub fn add_light(&mut self, light: impl Into<Light>) -> usize {
        self.lights.push(light.into());
        self.lights.len() - 1
    }

    /// Remove the object at `index`, shifting later objects down.
    pub fn remove_object(&mut self, index: usize) -> Option<SceneObject> {
        (index < self.objects.len()).then(|| self.objects.remove(index))
    }

    /// Remove the light at `index`, shifting later lights down.
    pub fn remove_light(&mut self, index: usize) -> Option<Light> {
        (index < self.lights.len()).then(|| self.lights.remove(index))
    }

    /// Flip an object's visibility and return the new state.
    pub fn toggle_visibility(&mut self, index: usize) -> Option<bool> {
        let object = self.objects.get_mut(index)?;
        object.visible = !object.visible;
        Some(object.visible)
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn object(&self, index: usize) -> Option<&SceneObject> {
        self.objects.get(index)
    }

    pub fn object_mut(&mut self, index: usize) -> Option<&mut SceneObject> {
        self.objects.get_mut(index)
    }

    /// Find an object by name.
    pub fn find(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|object| object.name == name)
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn light_mut(&mut self, index: usize) -> Option<&mut Light> {
        self.lights.get_mut(index)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// Closest visible object along `ray`.
    ///
    /// Ties keep the object that comes first.
    pub fn nearest_hit(&self, ray: &Ray) -> Option<SceneHit<'_>> {
        let mut closest: Option<SceneHit<'_>> = None;

        for object in &self.objects {
            let Some(hit) = object.intersect(ray) else {
                continue;
            };
            if closest.map_or(true, |best| hit.t < best.hit.t) {
                closest = Some(SceneHit { object, hit });
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LightSource, Material, Plane, PointLight, Sphere};
    use lumen_math::Vec3;

    fn sphere(name: &str, z: f32) -> SceneObject {
        SceneObject::new(name, Sphere::new(Vec3::new(0.0, 0.0, z), 1.0, Material::default()).unwrap())
    }

    #[test]
    fn test_nearest_hit_picks_closest() {
        let mut scene = Scene::new();
        scene.add_object(sphere("far", -10.0));
        scene.add_object(sphere("near", -5.0));

        let hit = scene.nearest_hit(&Ray::new(Vec3::ZERO, Vec3::NEG_Z)).unwrap();
        assert_eq!(hit.object.name, "near");
        assert!((hit.hit.t - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_ties_keep_first_object() {
        let mut scene = Scene::new();
        scene.add_object(sphere("first", -5.0));
        scene.add_object(sphere("second", -5.0));

        let hit = scene.nearest_hit(&Ray::new(Vec3::ZERO, Vec3::NEG_Z)).unwrap();
        assert_eq!(hit.object.name, "first");
    }

    #[test]
    fn test_ray_away_from_everything_misses() {
        let mut scene = Scene::new();
        scene.add_object(sphere("ball", -5.0));
        scene.add_object(SceneObject::new(
            "floor",
            Plane::infinite(Vec3::new(0.0, -1.0, 0.0), Vec3::Y, Material::default()).unwrap(),
        ));

        assert!(scene.nearest_hit(&Ray::new(Vec3::ZERO, Vec3::Y)).is_none());
    }

    #[test]
    fn test_hidden_objects_are_skipped() {
        let mut scene = Scene::new();
        let near = scene.add_object(sphere("near", -5.0));
        scene.add_object(sphere("far", -10.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        assert_eq!(scene.toggle_visibility(near), Some(false));
        assert_eq!(scene.nearest_hit(&ray).unwrap().object.name, "far");

        assert_eq!(scene.toggle_visibility(near), Some(true));
        assert_eq!(scene.nearest_hit(&ray).unwrap().object.name, "near");
        assert_eq!(scene.toggle_visibility(99), None);
    }

    #[test]
    fn test_occlusion_follows_scene_edits() {
        let mut scene = Scene::new();
        let light = PointLight::new(Vec3::new(0.0, 10.0, 0.0), 1.0).unwrap();
        scene.add_light(light);
        let surface = Vec3::ZERO;

        assert!(!scene.lights()[0].is_occluded(surface, scene.objects()));

        let index = scene.add_object(SceneObject::new(
            "blocker",
            Sphere::new(Vec3::new(0.0, 5.0, 0.0), 1.0, Material::default()).unwrap(),
        ));
        assert!(scene.lights()[0].is_occluded(surface, scene.objects()));

        assert!(scene.remove_object(index).is_some());
        assert!(!scene.lights()[0].is_occluded(surface, scene.objects()));
        assert_eq!(scene.light_count(), 1);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut scene = Scene::new();
        assert!(scene.remove_object(0).is_none());
        assert!(scene.remove_light(0).is_none());

        scene.add_light(PointLight::new(Vec3::ZERO, 1.0).unwrap());
        assert!(scene.remove_light(0).is_some());
        assert_eq!(scene.light_count(), 0);
    }
}
