//! Build a traceable scene from a scene description.

use std::path::Path;

use crate::{
    GeometryError, Light, Material, Plane, PointLight, RenderCamera, Scene, SceneObject, Sphere, SpotLight,
    TriangleMesh,
};
use lumen_core::{
    load_obj, LightDesc, ObjError, ObjectDesc, RenderSettings, SceneDescription, SceneFileError, SettingsError,
    ShapeDesc, TextureCache, TextureError,
};
use lumen_math::Orientation;
use thiserror::Error;

/// Anything that can go wrong between a scene file and a ready scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error(transparent)]
    File(#[from] SceneFileError),

    #[error(transparent)]
    Mesh(#[from] ObjError),

    #[error(transparent)]
    Texture(#[from] TextureError),

    #[error("invalid render settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("invalid object '{name}': {source}")]
    Object {
        name: String,
        #[source]
        source: GeometryError,
    },

    #[error("invalid light #{index}: {source}")]
    Light {
        index: usize,
        #[source]
        source: GeometryError,
    },

    #[error("invalid camera: {0}")]
    Camera(#[source] GeometryError),
}

pub type SceneResult<T> = Result<T, SceneError>;

/// A scene ready to render, with the camera and settings it was described with.
#[derive(Debug, Clone)]
pub struct LoadedScene {
    pub scene: Scene,
    pub camera: RenderCamera,
    pub settings: RenderSettings,
}

/// Read a scene file and build it.
pub fn load_scene_file(path: impl AsRef<Path>) -> SceneResult<LoadedScene> {
    let desc = SceneDescription::load(path)?;
    load_scene(&desc)
}

/// Build a scene from a parsed description.
///
/// Meshes and textures are loaded from disk; textures shared by several
/// planes are loaded once.
pub fn load_scene(desc: &SceneDescription) -> SceneResult<LoadedScene> {
    // Texture paths are resolved against the scene file before they reach the cache.
    let mut textures = TextureCache::new();
    let settings = desc.settings.clone();
    settings.validate()?;

    let mut scene = Scene::new();
    for (index, object) in desc.objects.iter().enumerate() {
        scene.add_object(build_object(desc, object, index, &settings, &mut textures)?);
    }
    for (index, light) in desc.lights.iter().enumerate() {
        let light = build_light(light).map_err(|source| SceneError::Light { index, source })?;
        scene.add_light(light);
    }

    let camera = RenderCamera::from_desc(&desc.camera).map_err(SceneError::Camera)?;

    log::info!(
        "Built scene: {} objects, {} lights, {} textures",
        scene.object_count(),
        scene.light_count(),
        textures.len()
    );

    Ok(LoadedScene {
        scene,
        camera,
        settings,
    })
}

fn build_object(
    desc: &SceneDescription,
    object: &ObjectDesc,
    index: usize,
    settings: &RenderSettings,
    textures: &mut TextureCache,
) -> SceneResult<SceneObject> {
    let name = if object.name.is_empty() {
        format!("object{index}")
    } else {
        object.name.clone()
    };
    let material = Material::from(object.material);
    let invalid = |source| SceneError::Object {
        name: name.clone(),
        source,
    };

    let mut built = match &object.shape {
        ShapeDesc::Sphere { center, radius } => {
            SceneObject::new(&name, Sphere::new(*center, *radius, material).map_err(invalid)?)
        }
        ShapeDesc::Plane {
            position,
            normal,
            width,
            height,
            infinite,
            texture,
        } => {
            let mut plane = Plane::finite(*position, *normal, *width, *height, material)
                .map_err(invalid)?
                .with_texels_per_unit(settings.texels_per_unit);
            plane.set_infinite(*infinite);
            if let Some(texture) = texture {
                plane = plane.with_texture(textures.load(desc.resolve(texture))?);
            }
            SceneObject::new(&name, plane)
        }
        ShapeDesc::Mesh {
            path,
            position,
            rotation,
            scale,
        } => {
            let geometry = load_obj(desc.resolve(path))?;
            let orientation = Orientation {
                translation: *position,
                rotation_degrees: *rotation,
                scale: *scale,
            };
            SceneObject::new(&name, TriangleMesh::new(geometry, orientation, material).map_err(invalid)?)
        }
    };

    built.visible = object.visible;
    Ok(built)
}

fn build_light(light: &LightDesc) -> Result<Light, GeometryError> {
    Ok(match *light {
        LightDesc::Point { position, intensity } => PointLight::new(position, intensity)?.into(),
        LightDesc::Spot {
            position,
            intensity,
            direction,
            angle,
        } => SpotLight::new(position, intensity, direction, angle)?.into(),
    })
}
