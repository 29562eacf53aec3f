//! Shared test utilities for the leafscan test suite.
//!
//! Synthetic bitmaps are all any test needs: a solid color proves pixel
//! values survive the pipeline byte-for-byte, a gradient proves ordering.
//! No fixture photos are checked in.

use image::{DynamicImage, Rgb, RgbImage};
use std::path::Path;

/// A `width`×`height` RGB image where every pixel is `color`.
pub fn solid_image(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)))
}

/// A bitmap whose pixel at (x, y) is `[x as u8, y as u8, 0]`.
///
/// Lets a test recover the source coordinates from any byte triple, which
/// pins down row-major HWC ordering.
pub fn gradient_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([x as u8, y as u8, 0])
    }))
}

/// Write an image to `path` as PNG. Panics on failure.
pub fn save_png(path: &Path, image: &DynamicImage) {
    image
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap_or_else(|e| panic!("failed to save test image {}: {e}", path.display()));
}
