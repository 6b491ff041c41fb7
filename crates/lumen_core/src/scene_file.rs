//! JSON scene descriptions.
//!
//! A description is plain data: it names shapes, lights, the camera and the
//! render settings, but holds no derived geometry. The renderer turns it into
//! a traceable scene.

use std::path::{Path, PathBuf};

use lumen_math::{Color, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::settings::RenderSettings;

#[derive(Error, Debug)]
pub enum SceneFileError {
    #[error("Failed to read scene file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse scene file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Surface colors shared by every shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialDesc {
    pub diffuse: Color,
    pub specular: Color,
}

impl Default for MaterialDesc {
    fn default() -> Self {
        Self {
            diffuse: Color::splat(0.5),
            specular: Color::ONE,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_plane_size() -> f32 {
    20.0
}

fn default_scale() -> f32 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeDesc {
    Sphere {
        center: Vec3,
        radius: f32,
    },
    Plane {
        position: Vec3,
        normal: Vec3,
        #[serde(default = "default_plane_size")]
        width: f32,
        #[serde(default = "default_plane_size")]
        height: f32,
        #[serde(default = "default_true")]
        infinite: bool,
        /// Image file, relative to the scene file
        #[serde(default)]
        texture: Option<String>,
    },
    Mesh {
        /// OBJ file, relative to the scene file
        path: String,
        #[serde(default)]
        position: Vec3,
        /// Degrees about X, Y, Z
        #[serde(default)]
        rotation: Vec3,
        #[serde(default = "default_scale")]
        scale: f32,
    },
}

/// One renderable entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDesc {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub shape: ShapeDesc,
    #[serde(default)]
    pub material: MaterialDesc,
    #[serde(default = "default_true")]
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LightDesc {
    Point {
        position: Vec3,
        intensity: f32,
    },
    Spot {
        position: Vec3,
        intensity: f32,
        direction: Vec3,
        /// Cone half-angle in degrees
        angle: f32,
    },
}

/// Render camera: eye position, aim point and a view rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraDesc {
    pub position: Vec3,
    pub aim: Vec3,
    /// Lower-left corner of the view plane in camera-local units
    pub view_min: Vec2,
    /// Upper-right corner of the view plane in camera-local units
    pub view_max: Vec2,
    /// Distance from the eye to the view plane
    pub view_distance: f32,
}

impl Default for CameraDesc {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 10.0),
            aim: Vec3::new(0.0, 0.0, -1.0),
            view_min: Vec2::new(-3.0, -2.0),
            view_max: Vec2::new(3.0, 2.0),
            view_distance: 5.0,
        }
    }
}

/// A complete scene file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    pub camera: CameraDesc,
    pub settings: RenderSettings,
    pub objects: Vec<ObjectDesc>,
    pub lights: Vec<LightDesc>,
    /// Directory that relative asset paths resolve against
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl SceneDescription {
    /// Parse a description from JSON text. Relative paths resolve against
    /// the current directory.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read and parse a scene file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneFileError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let text = std::fs::read_to_string(path).map_err(|source| SceneFileError::Io {
            path: display.clone(),
            source,
        })?;
        let mut scene = Self::from_json(&text).map_err(|source| SceneFileError::Parse {
            path: display.clone(),
            source,
        })?;
        scene.base_dir = path.parent().map(Path::to_path_buf);

        log::debug!(
            "Read scene {}: {} objects, {} lights",
            display,
            scene.objects.len(),
            scene.lights.len()
        );

        Ok(scene)
    }

    /// Resolve an asset path from the file against `base_dir`.
    pub fn resolve(&self, asset: &str) -> PathBuf {
        let asset = Path::new(asset);
        match &self.base_dir {
            Some(base) if asset.is_relative() => base.join(asset),
            _ => asset.to_path_buf(),
        }
    }
}
