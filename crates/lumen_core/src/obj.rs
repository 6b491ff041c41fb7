//! Wavefront OBJ loading into [`MeshGeometry`].
//!
//! Only vertex positions (`v`) and faces (`f`) matter; every model in the
//! file is merged into one mesh. Polygons are triangulated by `tobj`.

use std::path::Path;

use lumen_math::Vec3;
use thiserror::Error;

use crate::mesh::{MeshError, MeshGeometry};

#[derive(Error, Debug)]
pub enum ObjError {
    #[error("Failed to parse OBJ file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: tobj::LoadError,
    },

    #[error("Invalid mesh in {path}: {source}")]
    Mesh {
        path: String,
        #[source]
        source: MeshError,
    },
}

/// Load an OBJ file and build a recentered mesh from it.
pub fn load_obj(path: impl AsRef<Path>) -> Result<MeshGeometry, ObjError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let options = tobj::LoadOptions {
        triangulate: true,
        ..Default::default()
    };
    let (models, _materials) = tobj::load_obj(path, &options).map_err(|source| ObjError::Parse {
        path: display.clone(),
        source,
    })?;

    let mut vertices = Vec::new();
    let mut triangles = Vec::new();

    for model in &models {
        let base = vertices.len() as u32;
        vertices.extend(
            model
                .mesh
                .positions
                .chunks_exact(3)
                .map(|p| Vec3::new(p[0], p[1], p[2])),
        );
        triangles.extend(
            model
                .mesh
                .indices
                .chunks_exact(3)
                .map(|f| [base + f[0], base + f[1], base + f[2]]),
        );
    }

    log::debug!(
        "Parsed {}: {} models, {} vertices, {} triangles",
        display,
        models.len(),
        vertices.len(),
        triangles.len()
    );

    MeshGeometry::new(vertices, triangles).map_err(|source| ObjError::Mesh { path: display, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_obj(name: &str, contents: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join("lumen_obj_tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_quad_is_triangulated_and_recentered() {
        let path = write_obj(
            "quad.obj",
            "# quad in the XZ plane\n\
             v 0 0 0\n\
             v 2 0 0\n\
             v 2 0 2\n\
             v 0 0 2\n\
             vt 0 0\nvt 1 0\nvt 1 1\nvt 0 1\n\
             vn 0 1 0\n\
             f 1/1/1 4/4/1 3/3/1 2/2/1\n",
        );

        let mesh = load_obj(&path).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert!(mesh.bounds().centroid().length() < 1e-6);
        assert_eq!(mesh.bounds().max(), Vec3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn test_faces_use_zero_based_indices() {
        let path = write_obj("tri.obj", "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        let mesh = load_obj(&path).unwrap();
        assert_eq!(mesh.triangles()[0].indices(), [0, 1, 2]);
        assert!((mesh.triangles()[0].normal() - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_obj("/definitely/not/here.obj").unwrap_err();
        assert!(matches!(err, ObjError::Parse { .. }));
    }

    #[test]
    fn test_file_without_faces_is_an_error() {
        let path = write_obj("points.obj", "v 0 0 0\nv 1 0 0\n");
        let err = load_obj(&path).unwrap_err();
        // tobj drops models without faces, so this surfaces as an empty mesh.
        assert!(matches!(
            err,
            ObjError::Mesh {
                source: MeshError::NoVertices | MeshError::NoTriangles,
                ..
            }
        ));
    }
}
