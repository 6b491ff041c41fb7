//! Triangle mesh primitive.
//!
//! Local geometry lives in [`MeshGeometry`]; this type adds a world
//! placement and keeps a transformed copy of the vertices plus their world
//! bounds. The copy is rebuilt in full whenever the placement or the
//! geometry changes, never per ray.

use crate::{
    hittable::{GeometryError, Hit, Hittable},
    triangle::intersect_triangle,
    Material, Ray,
};
use lumen_core::MeshGeometry;
use lumen_math::{Aabb, Interval, Orientation, Vec3};

/// Ray parameters considered by the bounding-box and triangle tests.
const MESH_RAY_RANGE: Interval = Interval::new(0.0, 1000.0);

#[derive(Debug, Clone)]
pub struct TriangleMesh {
    geometry: MeshGeometry,
    orientation: Orientation,
    material: Material,
    world_vertices: Vec<Vec3>,
    world_bounds: Aabb,
}

impl TriangleMesh {
    pub fn new(geometry: MeshGeometry, orientation: Orientation, material: Material) -> Result<Self, GeometryError> {
        validate_orientation(&orientation)?;

        let mut mesh = Self {
            geometry,
            orientation,
            material,
            world_vertices: Vec::new(),
            world_bounds: Aabb::EMPTY,
        };
        mesh.rebuild_world();
        Ok(mesh)
    }

    pub fn geometry(&self) -> &MeshGeometry {
        &self.geometry
    }

    pub fn orientation(&self) -> &Orientation {
        &self.orientation
    }

    /// World-space bounding box of the placed mesh.
    pub fn world_bounds(&self) -> Aabb {
        self.world_bounds
    }

    /// Move, rotate or scale the mesh.
    pub fn set_orientation(&mut self, orientation: Orientation) -> Result<(), GeometryError> {
        validate_orientation(&orientation)?;
        self.orientation = orientation;
        self.rebuild_world();
        Ok(())
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.orientation.translation = position;
        self.rebuild_world();
    }

    /// Swap in new geometry, keeping the placement and material.
    pub fn replace_geometry(&mut self, geometry: MeshGeometry) {
        self.geometry = geometry;
        self.rebuild_world();
    }

    fn rebuild_world(&mut self) {
        self.world_vertices = self
            .geometry
            .vertices()
            .iter()
            .map(|&v| self.orientation.transform_point(v))
            .collect();
        self.world_bounds = Aabb::enclosing(&self.world_vertices);

        log::debug!(
            "Placed mesh: {} triangles, world bounds {:?}..{:?}",
            self.geometry.triangle_count(),
            self.world_bounds.min(),
            self.world_bounds.max()
        );
    }
}

fn validate_orientation(orientation: &Orientation) -> Result<(), GeometryError> {
    if orientation.scale > 0.0 && orientation.scale.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::InvalidScale(orientation.scale))
    }
}

impl Hittable for TriangleMesh {
    /// Bounding-box rejection, then a linear scan for the closest triangle.
    /// The reported normal is interpolated from the vertex normals and
    /// rotated into world space.
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        if !self.world_bounds.hit(ray, MESH_RAY_RANGE) {
            return None;
        }

        let mut closest_so_far = MESH_RAY_RANGE.max;
        let mut closest = None;

        for triangle in self.geometry.triangles() {
            let [i0, i1, i2] = triangle.indices();
            let corners = [
                self.world_vertices[i0 as usize],
                self.world_vertices[i1 as usize],
                self.world_vertices[i2 as usize],
            ];

            if let Some(hit) = intersect_triangle(ray, corners, Interval::new(MESH_RAY_RANGE.min, closest_so_far)) {
                closest_so_far = hit.t;
                closest = Some((triangle, hit));
            }
        }

        let (triangle, hit) = closest?;
        let local_normal = self.geometry.interpolate_normal(triangle, hit.beta, hit.gamma);
        let normal = self.orientation.rotate_vector(local_normal).normalize_or_zero();

        Some(Hit::new(ray, hit.t, normal))
    }

    fn material(&self) -> &Material {
        &self.material
    }

    fn position(&self) -> Vec3 {
        self.orientation.translation
    }
}
