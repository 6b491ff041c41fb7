//! Surface colors for local shading.

use lumen_core::MaterialDesc;
use lumen_math::Color;

/// Diffuse and specular color of a surface (RGB, 0-1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub diffuse: Color,
    pub specular: Color,
}

impl Material {
    /// A surface with the given diffuse color and a white highlight.
    pub fn new(diffuse: Color) -> Self {
        Self {
            diffuse,
            specular: Color::ONE,
        }
    }

    pub fn with_specular(mut self, specular: Color) -> Self {
        self.specular = specular;
        self
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(Color::splat(0.5))
    }
}

impl From<MaterialDesc> for Material {
    fn from(desc: MaterialDesc) -> Self {
        Self {
            diffuse: desc.diffuse,
            specular: desc.specular,
        }
    }
}
