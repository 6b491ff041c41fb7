//! Image synthesis.
//!
//! One camera ray per pixel through the pixel's centre, nearest hit via the
//! scene, Blinn-Phong shading, background color on a miss. Every pixel is a
//! pure function of the scene, camera, settings and pixel coordinates, so
//! the serial and parallel paths produce identical images.

use std::path::Path;
use std::time::Instant;

use crate::{RenderCamera, Scene, Shader};
use lumen_core::RenderSettings;
use lumen_math::Color;
use rayon::prelude::*;
use thiserror::Error;

/// Errors raised by image synthesis and output.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("image dimensions must be non-zero, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("failed to write image: {0}")]
    Write(#[from] image::ImageError),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Everything a pixel needs, borrowed for the duration of a render.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub scene: &'a Scene,
    pub camera: &'a RenderCamera,
    pub settings: &'a RenderSettings,
}

impl<'a> RenderContext<'a> {
    pub fn new(scene: &'a Scene, camera: &'a RenderCamera, settings: &'a RenderSettings) -> Self {
        Self {
            scene,
            camera,
            settings,
        }
    }

    fn validate(&self) -> RenderResult<()> {
        let (width, height) = (self.settings.width, self.settings.height);
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyImage { width, height });
        }
        Ok(())
    }

    fn shader(&self) -> Shader<'a> {
        Shader::new(self.scene, self.settings, self.camera.position())
    }
}

/// Render a single pixel.
///
/// `i` counts columns from the left, `j` counts rows from the bottom.
pub fn render_pixel(ctx: &RenderContext<'_>, i: u32, j: u32) -> Color {
    let u = (i as f32 + 0.5) / ctx.settings.width as f32;
    let v = (j as f32 + 0.5) / ctx.settings.height as f32;

    let ray = ctx.camera.get_ray(u, v);
    match ctx.scene.nearest_hit(&ray) {
        Some(hit) => ctx.shader().shade(&hit),
        None => ctx.settings.background,
    }
}

/// Render one image row; `y` counts from the top.
fn render_row(ctx: &RenderContext<'_>, y: u32, row: &mut [Color]) {
    let j = ctx.settings.height - 1 - y;
    for (i, pixel) in row.iter_mut().enumerate() {
        *pixel = render_pixel(ctx, i as u32, j);
    }
}

#[inline]
fn clamp_01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Convert a color to 8-bit RGB, saturating each channel.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let r = (255.0 * clamp_01(color.x)) as u8;
    let g = (255.0 * clamp_01(color.y)) as u8;
    let b = (255.0 * clamp_01(color.z)) as u8;
    [r, g, b]
}

/// Simple image buffer for storing render output.
///
/// Row 0 is the top of the image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Convert to an 8-bit RGB image.
    pub fn to_rgb8(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| image::Rgb(color_to_rgb(self.get(x, y))))
    }

    /// Write the image; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let path = path.as_ref();
        self.to_rgb8().save(path)?;
        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

/// Render the entire scene on the calling thread.
pub fn render(ctx: &RenderContext<'_>) -> RenderResult<ImageBuffer> {
    ctx.validate()?;
    let (width, height) = (ctx.settings.width, ctx.settings.height);
    let start = Instant::now();

    let mut image = ImageBuffer::new(width, height);
    for (y, row) in image.pixels.chunks_mut(width as usize).enumerate() {
        render_row(ctx, y as u32, row);
    }

    log::info!("Rendered {}x{} in {:.2?} (serial)", width, height, start.elapsed());
    Ok(image)
}

/// Render the entire scene with one rayon task per row.
pub fn render_parallel(ctx: &RenderContext<'_>) -> RenderResult<ImageBuffer> {
    ctx.validate()?;
    let (width, height) = (ctx.settings.width, ctx.settings.height);
    let start = Instant::now();

    let mut image = ImageBuffer::new(width, height);
    image
        .pixels
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(y, row)| render_row(ctx, y as u32, row));

    log::info!(
        "Rendered {}x{} in {:.2?} ({} threads)",
        width,
        height,
        start.elapsed(),
        rayon::current_num_threads()
    );
    Ok(image)
}
