//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that can be rendered
//! independently and in parallel using rayon.

use std::time::Instant;

use crate::renderer::{render_pixel, ImageBuffer, RenderContext, RenderError, RenderResult};
use lumen_math::Color;
use rayon::prelude::*;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner (row 0 is the top)
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Generate buckets for an image, sorted in spiral order from center.
///
/// Buckets near the middle of the frame come first.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();
    let mut index = 0;

    // Generate grid of buckets
    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, index));
            index += 1;
            x += bucket_size;
        }
        y += bucket_size;
    }

    sort_spiral(&mut buckets, width, height);

    // Update indices after sorting
    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from image center.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;

    let distance = |b: &Bucket| {
        let bx = b.x as f32 + b.width as f32 / 2.0;
        let by = b.y as f32 + b.height as f32 / 2.0;
        (bx - center_x).powi(2) + (by - center_y).powi(2)
    };

    // Stable sort: equidistant buckets keep their scanline order.
    buckets.sort_by(|a, b| distance(a).total_cmp(&distance(b)));
}

/// Render a single bucket.
///
/// Returns pixels in row-major order within the bucket.
pub fn render_bucket(bucket: &Bucket, ctx: &RenderContext<'_>) -> Vec<Color> {
    let height = ctx.settings.height;
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        // Image rows count from the top, pixel rows from the bottom.
        let j = height - 1 - (bucket.y + local_y);
        for local_x in 0..bucket.width {
            pixels.push(render_pixel(ctx, bucket.x + local_x, j));
        }
    }

    pixels
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    /// Create a new bucket result.
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }

    /// Copy the bucket's pixels into their place in `image`.
    pub fn write_to(&self, image: &mut ImageBuffer) {
        let width = self.bucket.width as usize;
        for (local_y, row) in self.pixels.chunks(width).enumerate() {
            for (local_x, &color) in row.iter().enumerate() {
                image.set(self.bucket.x + local_x as u32, self.bucket.y + local_y as u32, color);
            }
        }
    }
}

/// Render the entire scene bucket by bucket on the rayon pool.
pub fn render_buckets(ctx: &RenderContext<'_>, bucket_size: u32) -> RenderResult<ImageBuffer> {
    let (width, height) = (ctx.settings.width, ctx.settings.height);
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyImage { width, height });
    }
    let start = Instant::now();

    let buckets = generate_buckets(width, height, bucket_size);
    log::debug!("Rendering {} buckets of up to {}px", buckets.len(), bucket_size);

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| BucketResult::new(*bucket, render_bucket(bucket, ctx)))
        .collect();

    let mut image = ImageBuffer::new(width, height);
    for result in &results {
        result.write_to(&mut image);
    }

    log::info!(
        "Rendered {}x{} in {:.2?} ({} buckets)",
        width,
        height,
        start.elapsed(),
        results.len()
    );
    Ok(image)
}
