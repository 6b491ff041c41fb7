//! lumen core - renderer-agnostic scene data.
//!
//! This crate provides:
//!
//! - **Mesh geometry**: `MeshGeometry` with recentering and derived normals
//! - **Textures**: `Texture`, `TextureCache` with tiled nearest-texel lookup
//! - **Loading**: OBJ meshes and JSON scene descriptions
//! - **Settings**: `RenderSettings` shared by the shading pass
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::{load_obj, SceneDescription};
//!
//! let scene = SceneDescription::load("scene.json")?;
//! let bunny = load_obj(scene.resolve("bunny.obj"))?;
//! println!("{} triangles", bunny.triangle_count());
//! ```

pub mod mesh;
pub mod obj;
pub mod scene_file;
pub mod settings;
pub mod texture;

// Re-export commonly used types
pub use mesh::{MeshError, MeshGeometry, Triangle};
pub use obj::{load_obj, ObjError};
pub use scene_file::{CameraDesc, LightDesc, MaterialDesc, ObjectDesc, SceneDescription, SceneFileError, ShapeDesc};
pub use settings::{RenderSettings, SettingsError};
pub use texture::{Texture, TextureCache, TextureError, TextureResult};
