//! Render-wide parameters.
//!
//! These are read-only during a render: the shading pass borrows them
//! immutably, so pixels can be evaluated on any thread.

use lumen_math::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A render setting outside the range the shading pass can handle.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    #[error("image dimensions must be non-zero, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("{name} must be {requirement}, got {value}")]
    OutOfRange {
        name: &'static str,
        requirement: &'static str,
        value: f32,
    },
}

/// Image size and the global shading parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Color of pixels whose camera ray hits nothing
    pub background: Color,
    /// Fraction of the diffuse color that is always visible
    pub ambient_strength: f32,
    /// Divisor applied to every light's intensity
    pub light_falloff: f32,
    /// Blinn-Phong specular exponent
    pub phong_power: f32,
    /// Offset along the normal for shadow-ray origins
    pub shadow_bias: f32,
    /// Texture density on planes
    pub texels_per_unit: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            background: Color::splat(0.25),
            ambient_strength: 0.3,
            light_falloff: 1.0,
            phong_power: 100.0,
            shadow_bias: 0.01,
            texels_per_unit: 80.0,
        }
    }
}

impl RenderSettings {
    /// Override the output resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Check every value before it reaches the shading pass.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.width == 0 || self.height == 0 {
            return Err(SettingsError::EmptyImage {
                width: self.width,
                height: self.height,
            });
        }

        check("ambient_strength", "finite and non-negative", self.ambient_strength, |v| v >= 0.0)?;
        check("light_falloff", "finite and positive", self.light_falloff, |v| v > 0.0)?;
        check("phong_power", "finite and non-negative", self.phong_power, |v| v >= 0.0)?;
        check("shadow_bias", "finite and non-negative", self.shadow_bias, |v| v >= 0.0)?;
        check("texels_per_unit", "finite and positive", self.texels_per_unit, |v| v > 0.0)?;

        let background = self.background;
        if !background.is_finite() {
            return Err(SettingsError::OutOfRange {
                name: "background",
                requirement: "finite",
                value: background.max_element(),
            });
        }

        Ok(())
    }

    /// Width over height.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

fn check(
    name: &'static str,
    requirement: &'static str,
    value: f32,
    in_range: impl Fn(f32) -> bool,
) -> Result<(), SettingsError> {
    if value.is_finite() && in_range(value) {
        Ok(())
    } else {
        Err(SettingsError::OutOfRange {
            name,
            requirement,
            value,
        })
    }
}
