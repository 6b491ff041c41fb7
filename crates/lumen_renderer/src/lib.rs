//! lumen renderer - CPU ray tracing with local illumination.
//!
//! One camera ray per pixel, nearest hit over a flat list of spheres,
//! planes and triangle meshes, then ambient + Lambert + Blinn-Phong shading
//! with hard shadows from point lights and spotlights. No reflection,
//! refraction or indirect light.

mod bucket;
mod camera;
mod demo;
mod hittable;
mod light;
mod loader;
mod material;
mod mesh;
mod plane;
mod primitive;
mod renderer;
mod scene;
mod shading;
mod sphere;
mod triangle;

pub use bucket::{generate_buckets, render_bucket, render_buckets, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{RenderCamera, ViewPlane};
pub use demo::{demo, demo_scene};
pub use hittable::{GeometryError, Hit, Hittable};
pub use light::{Light, LightSource, PointLight, SpotLight};
pub use loader::{load_scene, load_scene_file, LoadedScene, SceneError, SceneResult};
pub use material::Material;
pub use mesh::TriangleMesh;
pub use plane::{Plane, DEFAULT_TEXELS_PER_UNIT};
pub use primitive::{Primitive, SceneObject};
pub use renderer::{
    color_to_rgb, render, render_parallel, render_pixel, ImageBuffer, RenderContext, RenderError, RenderResult,
};
pub use scene::{Scene, SceneHit};
pub use shading::Shader;
pub use sphere::Sphere;
pub use triangle::{intersect_triangle, TriangleHit};

/// Re-export common math types from lumen_math
pub use lumen_math::{Color, Interval, Ray, Vec3};
