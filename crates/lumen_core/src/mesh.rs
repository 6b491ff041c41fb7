//! Triangle mesh geometry with derived normals and bounds.
//!
//! `MeshGeometry` owns its vertex buffer together with everything derived
//! from it: per-triangle face normals, per-vertex averaged normals and the
//! local bounding box. All derived data is rebuilt in one pass whenever the
//! geometry is (re)loaded, so it can never go stale.

use lumen_math::{Aabb, Vec3};
use thiserror::Error;

/// Errors raised when mesh data violates construction preconditions.
#[derive(Error, Debug, PartialEq)]
pub enum MeshError {
    #[error("mesh has no vertices")]
    NoVertices,

    #[error("mesh has no triangles")]
    NoTriangles,

    #[error("triangle {triangle} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfBounds {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },
}

/// A triangle: three indices into the owning mesh's vertex array plus its
/// cached face normal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    indices: [u32; 3],
    normal: Vec3,
}

impl Triangle {
    /// Vertex indices in winding order.
    pub fn indices(&self) -> [u32; 3] {
        self.indices
    }

    /// Unit face normal (counter-clockwise winding), zero for degenerate triangles.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    fn vertex(&self, corner: usize) -> usize {
        self.indices[corner] as usize
    }
}

/// Vertex and triangle arrays with their derived data.
#[derive(Clone, Debug)]
pub struct MeshGeometry {
    vertices: Vec<Vec3>,
    triangles: Vec<Triangle>,
    vertex_normals: Vec<Vec3>,
    bounds: Aabb,
}

impl MeshGeometry {
    /// Build a mesh from vertex positions and 0-based triangle indices.
    ///
    /// The vertices are recentered so the local origin sits at the centre of
    /// their bounding box, then face normals, vertex normals and bounds are
    /// computed.
    pub fn new(vertices: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> Result<Self, MeshError> {
        let mut mesh = Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
            vertex_normals: Vec::new(),
            bounds: Aabb::EMPTY,
        };
        mesh.load(vertices, triangles)?;
        Ok(mesh)
    }

    /// Replace the geometry wholesale and rebuild every derived buffer.
    ///
    /// On error the mesh is left unchanged.
    pub fn load(&mut self, mut vertices: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> Result<(), MeshError> {
        validate(&vertices, &triangles)?;

        let center = Aabb::enclosing(&vertices).centroid();
        for v in &mut vertices {
            *v -= center;
        }

        let triangles: Vec<Triangle> = triangles
            .into_iter()
            .map(|indices| Triangle {
                indices,
                normal: face_normal(&vertices, indices),
            })
            .collect();

        self.vertex_normals = average_vertex_normals(vertices.len(), &triangles);
        self.bounds = Aabb::enclosing(&vertices);
        self.vertices = vertices;
        self.triangles = triangles;

        log::debug!(
            "Loaded mesh: {} vertices, {} triangles (recentered by {:?})",
            self.vertices.len(),
            self.triangles.len(),
            center
        );

        Ok(())
    }

    /// Recentered vertex positions.
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Normal of vertex `i`: the normalized average of the face normals of
    /// all triangles that use it.
    pub fn vertex_normals(&self) -> &[Vec3] {
        &self.vertex_normals
    }

    /// Local bounding box, centred on the origin after recentering.
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Gouraud-style normal: `(1 - beta - gamma) * n0 + beta * n1 + gamma * n2`,
    /// renormalized. `beta`/`gamma` are the barycentric weights of the
    /// triangle's second and third vertex.
    pub fn interpolate_normal(&self, triangle: &Triangle, beta: f32, gamma: f32) -> Vec3 {
        let n0 = self.vertex_normals[triangle.vertex(0)];
        let n1 = self.vertex_normals[triangle.vertex(1)];
        let n2 = self.vertex_normals[triangle.vertex(2)];

        ((1.0 - beta - gamma) * n0 + beta * n1 + gamma * n2).normalize_or_zero()
    }
}

fn validate(vertices: &[Vec3], triangles: &[[u32; 3]]) -> Result<(), MeshError> {
    if vertices.is_empty() {
        return Err(MeshError::NoVertices);
    }
    if triangles.is_empty() {
        return Err(MeshError::NoTriangles);
    }

    let vertex_count = vertices.len();
    for (triangle, indices) in triangles.iter().enumerate() {
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(MeshError::IndexOutOfBounds {
                triangle,
                index,
                vertex_count,
            });
        }
    }

    Ok(())
}

fn face_normal(vertices: &[Vec3], [i0, i1, i2]: [u32; 3]) -> Vec3 {
    let p0 = vertices[i0 as usize];
    let p1 = vertices[i1 as usize];
    let p2 = vertices[i2 as usize];

    (p1 - p0).cross(p2 - p0).normalize_or_zero()
}

fn average_vertex_normals(vertex_count: usize, triangles: &[Triangle]) -> Vec<Vec3> {
    let mut sums = vec![Vec3::ZERO; vertex_count];
    let mut counts = vec![0u32; vertex_count];

    for triangle in triangles {
        for corner in 0..3 {
            let v = triangle.vertex(corner);
            sums[v] += triangle.normal;
            counts[v] += 1;
        }
    }

    let unused = counts.iter().filter(|&&c| c == 0).count();
    if unused > 0 {
        log::warn!("{} mesh vertices are not used by any triangle", unused);
    }

    sums.into_iter()
        .zip(counts)
        .map(|(sum, count)| {
            if count == 0 {
                return Vec3::Y;
            }
            let average = sum / count as f32;
            if average.length_squared() > 0.0 {
                average.normalize()
            } else {
                Vec3::Y // Default up normal for degenerate cases
            }
        })
        .collect()
}
