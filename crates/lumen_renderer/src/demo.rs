//! Built-in scene rendered when no scene file is given.
//!
//! Three spheres standing on a tilted wooden floor in front of a brick
//! wall, lit by a point light from the right and a spotlight from the upper
//! left. The textures are procedural checkerboards so no asset files are
//! needed.

use std::sync::Arc;

use crate::{LoadedScene, Material, Plane, PointLight, RenderCamera, Scene, SceneObject, SceneResult, Sphere, SpotLight};
use lumen_core::{RenderSettings, Texture};
use lumen_math::{Color, Vec3};

const LIGHT_BLUE: Color = Color::new(0.678, 0.847, 0.902);
const GREY: Color = Color::new(0.502, 0.502, 0.502);
const CHARTREUSE: Color = Color::new(0.498, 1.0, 0.0);
const DARK_MAGENTA: Color = Color::new(0.545, 0.0, 0.545);
const ORANGE_RED: Color = Color::new(1.0, 0.271, 0.0);

/// The demo objects and lights, with plane textures at the density of `settings`.
pub fn demo_scene(settings: &RenderSettings) -> SceneResult<Scene> {
    let wood = Arc::new(Texture::checker(
        64,
        32,
        Color::new(0.62, 0.44, 0.26),
        Color::new(0.48, 0.32, 0.18),
    )?);
    let bricks = Arc::new(Texture::checker(
        32,
        16,
        Color::new(0.92, 0.91, 0.88),
        Color::new(0.78, 0.77, 0.75),
    )?);

    let floor = Plane::infinite(Vec3::new(0.0, -1.0, 0.0), Vec3::new(0.05, 1.0, 0.1), Material::new(LIGHT_BLUE))
        .map_err(|source| invalid("floor", source))?
        .with_texture(wood)
        .with_texels_per_unit(settings.texels_per_unit);
    let backdrop = Plane::infinite(Vec3::new(0.0, 5.0, -32.0), Vec3::Z, Material::new(GREY))
        .map_err(|source| invalid("backdrop", source))?
        .with_texture(bricks)
        .with_texels_per_unit(settings.texels_per_unit);

    let mut scene = Scene::new();
    scene.add_object(SceneObject::new("floor", floor));
    scene.add_object(SceneObject::new("backdrop", backdrop));

    for (name, center, radius, color) in [
        ("chartreuse", Vec3::new(3.0, 1.4, -2.0), 2.5, CHARTREUSE),
        ("magenta", Vec3::new(-3.5, 1.7, -4.0), 2.0, DARK_MAGENTA),
        ("orange", Vec3::new(0.0, 2.0, -8.0), 2.2, ORANGE_RED),
    ] {
        let sphere = Sphere::new(center, radius, Material::new(color)).map_err(|source| invalid(name, source))?;
        scene.add_object(SceneObject::new(name, sphere));
    }

    let key = PointLight::new(Vec3::new(10.0, 4.5, 12.0), 1.0).map_err(|source| crate::SceneError::Light {
        index: 0,
        source,
    })?;
    let spot = SpotLight::new(Vec3::new(-10.0, 12.0, 10.0), 1.5, Vec3::new(10.0, -9.0, -10.0), 20.0).map_err(
        |source| crate::SceneError::Light { index: 1, source },
    )?;
    scene.add_light(key);
    scene.add_light(spot);

    Ok(scene)
}

/// The demo scene with the default camera and settings.
pub fn demo() -> SceneResult<LoadedScene> {
    let settings = RenderSettings::default();
    let scene = demo_scene(&settings)?;
    Ok(LoadedScene {
        scene,
        camera: RenderCamera::default(),
        settings,
    })
}

fn invalid(name: &str, source: crate::GeometryError) -> crate::SceneError {
    crate::SceneError::Object {
        name: name.to_string(),
        source,
    }
}
