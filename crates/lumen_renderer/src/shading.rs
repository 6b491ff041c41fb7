//! Local illumination: ambient, Lambert diffuse and Blinn-Phong highlights.
//!
//! Only direct light is considered. A light contributes at a point unless
//! it is occluded there; occlusion is tested from a point nudged off the
//! surface along the normal so the surface does not shadow itself.

use crate::{Hittable, Light, LightSource, Scene, SceneHit};
use lumen_core::RenderSettings;
use lumen_math::{Color, Vec3};

/// Add `contribution` to `color`, saturating each channel at 1.
#[inline]
fn accumulate(color: Color, contribution: Color) -> Color {
    (color + contribution).min(Color::ONE)
}

/// Shades surface points of one scene as seen from one eye position.
pub struct Shader<'a> {
    scene: &'a Scene,
    settings: &'a RenderSettings,
    eye: Vec3,
}

impl<'a> Shader<'a> {
    pub fn new(scene: &'a Scene, settings: &'a RenderSettings, eye: Vec3) -> Self {
        Self { scene, settings, eye }
    }

    /// Full shading for a camera-ray hit: the object's color at the hit
    /// point, lit with [`Shader::phong`].
    pub fn shade(&self, hit: &SceneHit<'_>) -> Color {
        let primitive = &hit.object.primitive;
        let diffuse = primitive.color_at(hit.hit.point);

        self.phong(
            hit.hit.point,
            hit.hit.normal,
            diffuse,
            primitive.material().specular,
            self.settings.phong_power,
        )
    }

    /// Ambient plus Lambert diffuse from every light that reaches `point`.
    pub fn lambert(&self, point: Vec3, normal: Vec3, diffuse: Color) -> Color {
        let mut color = (diffuse * self.settings.ambient_strength).min(Color::ONE);

        for light in self.lit_by(point, normal) {
            color = accumulate(color, self.diffuse_term(light, point, normal, diffuse));
        }

        color
    }

    /// [`Shader::lambert`] plus a Blinn-Phong highlight from every light that
    /// reaches `point`.
    pub fn phong(&self, point: Vec3, normal: Vec3, diffuse: Color, specular: Color, power: f32) -> Color {
        let mut color = (diffuse * self.settings.ambient_strength).min(Color::ONE);
        let view = (self.eye - point).normalize_or_zero();

        // Contributions are non-negative, so the order of additions does not
        // change the clamped sum.
        for light in self.lit_by(point, normal) {
            color = accumulate(color, self.diffuse_term(light, point, normal, diffuse));

            let to_light = (light.position() - point).normalize_or_zero();
            let halfway = (to_light + view).normalize_or_zero();
            let strength = self.strength(light) * normal.dot(halfway).max(0.0).powf(power);
            color = accumulate(color, specular * strength);
        }

        color
    }

    /// Lights not occluded at `point`.
    fn lit_by(&self, point: Vec3, normal: Vec3) -> impl Iterator<Item = &'a Light> + '_ {
        let shadow_origin = point + normal * self.settings.shadow_bias;
        let blockers = self.scene.objects();

        self.scene
            .lights()
            .iter()
            .filter(move |light| !light.is_occluded(shadow_origin, blockers))
    }

    fn diffuse_term(&self, light: &impl LightSource, point: Vec3, normal: Vec3, diffuse: Color) -> Color {
        let to_light = (light.position() - point).normalize_or_zero();
        diffuse * self.strength(light) * normal.dot(to_light).max(0.0)
    }

    fn strength(&self, light: &impl LightSource) -> f32 {
        light.intensity() / self.settings.light_falloff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, PointLight, SceneObject, Sphere};

    const RED: Color = Color::new(0.8, 0.1, 0.1);

    fn settings() -> RenderSettings {
        RenderSettings::default()
    }

    fn lit_scene(intensity: f32) -> Scene {
        let mut scene = Scene::new();
        scene.add_light(PointLight::new(Vec3::new(0.0, 10.0, 0.0), intensity).unwrap());
        scene
    }

    #[test]
    fn test_ambient_only_without_lights() {
        let scene = Scene::new();
        let settings = settings();
        let shader = Shader::new(&scene, &settings, Vec3::new(0.0, 0.0, 10.0));

        let color = shader.lambert(Vec3::ZERO, Vec3::Y, RED);
        assert!((color - RED * 0.3).length() < 1e-6);
    }

    #[test]
    fn test_lambert_facing_light() {
        let scene = lit_scene(0.5);
        let settings = settings();
        let shader = Shader::new(&scene, &settings, Vec3::new(0.0, 0.0, 10.0));

        // Normal straight at the light: ambient + full diffuse.
        let color = shader.lambert(Vec3::ZERO, Vec3::Y, RED);
        assert!((color - RED * 0.8).length() < 1e-5);

        // Facing away: ambient only.
        let color = shader.lambert(Vec3::ZERO, Vec3::NEG_Y, RED);
        assert!((color - RED * 0.3).length() < 1e-5);
    }

    #[test]
    fn test_falloff_divides_intensity() {
        let scene = lit_scene(1.0);
        let settings = RenderSettings {
            light_falloff: 2.0,
            ..settings()
        };
        let shader = Shader::new(&scene, &settings, Vec3::new(0.0, 0.0, 10.0));

        let color = shader.lambert(Vec3::ZERO, Vec3::Y, RED);
        assert!((color - RED * 0.8).length() < 1e-5);
    }

    #[test]
    fn test_channels_saturate() {
        let scene = lit_scene(5.0);
        let settings = settings();
        let shader = Shader::new(&scene, &settings, Vec3::new(0.0, 10.0, 0.0));

        let color = shader.phong(Vec3::ZERO, Vec3::Y, RED, Color::ONE, 100.0);
        assert_eq!(color, Color::ONE);
    }

    #[test]
    fn test_highlight_peaks_at_mirror_direction() {
        let scene = lit_scene(1.0);
        let settings = settings();
        let dark = Color::splat(0.1);

        // Eye above the light direction: halfway vector equals the normal.
        let aligned = Shader::new(&scene, &settings, Vec3::new(0.0, 20.0, 0.0));
        let peak = aligned.phong(Vec3::ZERO, Vec3::Y, dark, Color::ONE, 100.0);

        // Eye at a grazing angle: highlight all but vanishes.
        let grazing = Shader::new(&scene, &settings, Vec3::new(20.0, 1.0, 0.0));
        let off = grazing.phong(Vec3::ZERO, Vec3::Y, dark, Color::ONE, 100.0);

        assert!(peak.x > off.x + 0.5);
        assert!((off - aligned.lambert(Vec3::ZERO, Vec3::Y, dark)).length() < 1e-3);
    }

    #[test]
    fn test_phong_without_specular_matches_lambert() {
        let mut scene = Scene::new();
        scene.add_light(PointLight::new(Vec3::new(0.0, 10.0, 0.0), 0.2).unwrap());
        scene.add_light(PointLight::new(Vec3::new(10.0, 10.0, 0.0), 0.3).unwrap());
        scene.add_light(PointLight::new(Vec3::new(0.0, -10.0, 0.0), 1.0).unwrap());
        let settings = settings();
        let shader = Shader::new(&scene, &settings, Vec3::new(3.0, 4.0, 5.0));

        let normal = Vec3::new(0.2, 1.0, 0.1).normalize();
        let phong = shader.phong(Vec3::ZERO, normal, RED, Color::ZERO, 100.0);
        let lambert = shader.lambert(Vec3::ZERO, normal, RED);
        assert!((phong - lambert).length() < 1e-6);

        // Both upper lights contribute; the one below faces away.
        let ambient = RED * 0.3;
        assert!(lambert.x > ambient.x + 0.2);
    }

    #[test]
    fn test_shadowed_point_gets_ambient_only() {
        let mut scene = lit_scene(1.0);
        scene.add_object(SceneObject::new(
            "blocker",
            Sphere::new(Vec3::new(0.0, 5.0, 0.0), 1.0, Material::default()).unwrap(),
        ));
        let settings = settings();
        let shader = Shader::new(&scene, &settings, Vec3::new(0.0, 0.0, 10.0));

        let color = shader.phong(Vec3::ZERO, Vec3::Y, RED, Color::ONE, 100.0);
        assert!((color - RED * 0.3).length() < 1e-5);
    }

    #[test]
    fn test_shade_uses_surface_color() {
        let mut scene = lit_scene(1.0);
        let material = Material::new(RED).with_specular(Color::ZERO);
        scene.add_object(SceneObject::new(
            "ball",
            Sphere::new(Vec3::ZERO, 1.0, material).unwrap(),
        ));
        let settings = settings();
        let eye = Vec3::new(0.0, 5.0, 0.0);
        let shader = Shader::new(&scene, &settings, eye);

        let ray = crate::Ray::new(eye, Vec3::NEG_Y);
        let hit = scene.nearest_hit(&ray).unwrap();
        let color = shader.shade(&hit);

        // Top of the ball faces the light: ambient + full diffuse, no highlight.
        let expected = (RED * 1.3).min(Color::ONE);
        assert!((color - expected).length() < 1e-4);
    }
}
