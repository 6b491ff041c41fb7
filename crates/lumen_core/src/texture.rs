//! Texture loading and caching for textured planes.
//!
//! Textures are plain 2-D color arrays. The only lookup the renderer needs is
//! a nearest-texel fetch with tiling (wrap-around) in both directions; there
//! is no filtering.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use lumen_math::Color;
use thiserror::Error;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Texture has zero size")]
    Empty,

    #[error("Texture data has {actual} pixels, expected {expected} for {width}x{height}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A loaded texture with pixel data.
///
/// Row 0 is the top row of the source image.
#[derive(Clone, Debug)]
pub struct Texture {
    width: u32,
    height: u32,
    /// RGB in 0-1 range, row-major
    pixels: Vec<Color>,
    /// Original file path (for debugging)
    path: String,
}

impl Texture {
    /// Create a new texture from pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<Color>, path: impl Into<String>) -> TextureResult<Self> {
        if width == 0 || height == 0 {
            return Err(TextureError::Empty);
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(TextureError::SizeMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
            path: path.into(),
        })
    }

    /// Two-color checkerboard with square cells of `cell` texels.
    pub fn checker(size: u32, cell: u32, a: Color, b: Color) -> TextureResult<Self> {
        let cell = cell.max(1);
        let pixels = (0..size)
            .flat_map(|y| (0..size).map(move |x| if (x / cell + y / cell) % 2 == 0 { a } else { b }))
            .collect();
        Self::new(size, size, pixels, "<checker>")
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get pixel at integer coordinates (row 0 at the top).
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Nearest-texel lookup with tiling.
    ///
    /// `s` and `t` are texel coordinates measured from the bottom-left of the
    /// image. Both are floored and wrapped into the image with a
    /// positive-only modulo, and `t` is flipped so the image is not drawn
    /// upside down.
    pub fn sample_wrapped(&self, s: f32, t: f32) -> Color {
        let x = wrap(s, self.width);
        let y = self.height - 1 - wrap(t, self.height);
        self.pixel(x, y)
    }

    /// Get total size in bytes (approximate).
    pub fn size_bytes(&self) -> usize {
        self.pixels.len() * std::mem::size_of::<Color>()
    }
}

/// Floor `coord` and wrap it into `[0, size)`, also for negative input.
fn wrap(coord: f32, size: u32) -> u32 {
    let wrapped = coord.floor().rem_euclid(size as f32) as u32;
    // rem_euclid can round up to `size` for tiny negative inputs
    wrapped.min(size - 1)
}

/// Cache for loaded textures.
///
/// Textures are loaded on-demand and shared between every plane that uses
/// the same file.
pub struct TextureCache {
    /// Cached textures by file path
    textures: HashMap<PathBuf, Arc<Texture>>,
}

impl TextureCache {
    /// Create a new empty texture cache.
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
        }
    }

    /// Load a texture from file, using cache if available.
    ///
    /// Paths are used as given; relative paths resolve against the working
    /// directory.
    pub fn load(&mut self, path: impl AsRef<Path>) -> TextureResult<Arc<Texture>> {
        let path = path.as_ref();
        if let Some(texture) = self.textures.get(path) {
            return Ok(texture.clone());
        }

        let texture = Arc::new(load_texture_file(path)?);
        self.textures.insert(path.to_path_buf(), texture.clone());

        log::debug!(
            "Loaded texture: {} ({}x{}, {:.1} KB)",
            path.display(),
            texture.width,
            texture.height,
            texture.size_bytes() as f32 / 1024.0
        );

        Ok(texture)
    }

    /// Get the number of cached textures.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a texture from a file path.
fn load_texture_file(path: &Path) -> TextureResult<Texture> {
    let img = image::open(path).map_err(|source| TextureError::Load {
        path: path.display().to_string(),
        source,
    })?;

    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();

    // 8-bit channels map straight onto 0-1; output is written back without a
    // gamma curve, so no linearization here.
    let pixels = rgb
        .pixels()
        .map(|p| Color::new(p[0] as f32, p[1] as f32, p[2] as f32) / 255.0)
        .collect();

    Texture::new(width, height, pixels, path.to_string_lossy())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::new(1.0, 0.0, 0.0);
    const GREEN: Color = Color::new(0.0, 1.0, 0.0);
    const BLUE: Color = Color::new(0.0, 0.0, 1.0);
    const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    /// 2x2 texture: top row red/green, bottom row blue/white.
    fn quad() -> Texture {
        Texture::new(2, 2, vec![RED, GREEN, BLUE, WHITE], "<quad>").unwrap()
    }

    #[test]
    fn test_sample_flips_vertically() {
        let tex = quad();
        // t = 0 is the bottom row of the image.
        assert_eq!(tex.sample_wrapped(0.5, 0.5), BLUE);
        assert_eq!(tex.sample_wrapped(1.5, 0.5), WHITE);
        assert_eq!(tex.sample_wrapped(0.5, 1.5), RED);
        assert_eq!(tex.sample_wrapped(1.5, 1.5), GREEN);
    }

    #[test]
    fn test_sample_tiles_in_both_directions() {
        let tex = quad();
        assert_eq!(tex.sample_wrapped(2.5, 0.5), tex.sample_wrapped(0.5, 0.5));
        assert_eq!(tex.sample_wrapped(-0.5, 0.5), WHITE);
        assert_eq!(tex.sample_wrapped(0.5, -0.5), RED);
        assert_eq!(tex.sample_wrapped(-1e-7, -1e-7), GREEN);
    }

    #[test]
    fn test_checker_pattern() {
        let tex = Texture::checker(4, 2, WHITE, BLUE).unwrap();
        assert_eq!(tex.pixel(0, 0), WHITE);
        assert_eq!(tex.pixel(2, 0), BLUE);
        assert_eq!(tex.pixel(2, 2), WHITE);
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        assert!(matches!(Texture::new(0, 1, Vec::new(), "x"), Err(TextureError::Empty)));
        assert!(matches!(
            Texture::new(2, 2, vec![RED], "x"),
            Err(TextureError::SizeMismatch { expected: 4, actual: 1, .. })
        ));
    }

    #[test]
    fn test_texture_cache_loads_once() {
        let dir = std::env::temp_dir().join("lumen_texture_cache_test");
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("tile.png");
        image::RgbImage::from_pixel(3, 2, image::Rgb([255, 0, 0]))
            .save(&file)
            .unwrap();

        let mut cache = TextureCache::new();
        assert!(cache.is_empty());

        let first = cache.load(&file).unwrap();
        let second = cache.load(dir.join("tile.png")).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        assert_eq!((first.width(), first.height()), (3, 2));
        assert_eq!(first.pixel(2, 1), RED);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut cache = TextureCache::new();
        assert!(matches!(
            cache.load("/definitely/not/here.png"),
            Err(TextureError::Load { .. })
        ));
    }
}
