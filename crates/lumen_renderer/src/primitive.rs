//! Closed set of scene shapes and the named, toggleable scene entry that wraps them.

use crate::{Hit, Hittable, Material, Plane, Ray, Sphere, TriangleMesh};
use lumen_math::{Color, Vec3};

/// Any shape the scene can hold.
#[derive(Debug, Clone)]
pub enum Primitive {
    Sphere(Sphere),
    Plane(Plane),
    Mesh(TriangleMesh),
}

impl Hittable for Primitive {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        match self {
            Primitive::Sphere(sphere) => sphere.intersect(ray),
            Primitive::Plane(plane) => plane.intersect(ray),
            Primitive::Mesh(mesh) => mesh.intersect(ray),
        }
    }

    fn material(&self) -> &Material {
        match self {
            Primitive::Sphere(sphere) => sphere.material(),
            Primitive::Plane(plane) => plane.material(),
            Primitive::Mesh(mesh) => mesh.material(),
        }
    }

    fn position(&self) -> Vec3 {
        match self {
            Primitive::Sphere(sphere) => sphere.position(),
            Primitive::Plane(plane) => plane.position(),
            Primitive::Mesh(mesh) => mesh.position(),
        }
    }

    fn color_at(&self, point: Vec3) -> Color {
        match self {
            Primitive::Sphere(sphere) => sphere.color_at(point),
            Primitive::Plane(plane) => plane.color_at(point),
            Primitive::Mesh(mesh) => mesh.color_at(point),
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl From<Plane> for Primitive {
    fn from(plane: Plane) -> Self {
        Primitive::Plane(plane)
    }
}

impl From<TriangleMesh> for Primitive {
    fn from(mesh: TriangleMesh) -> Self {
        Primitive::Mesh(mesh)
    }
}

/// A shape placed in the scene.
///
/// Invisible objects are skipped by camera rays and never block light.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub primitive: Primitive,
    pub visible: bool,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, primitive: impl Into<Primitive>) -> Self {
        Self {
            name: name.into(),
            primitive: primitive.into(),
            visible: true,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Intersection with this object, or `None` if it is hidden or missed.
    pub fn intersect(&self, ray: &Ray) -> Option<Hit> {
        if !self.visible {
            return None;
        }
        self.primitive.intersect(ray)
    }
}
