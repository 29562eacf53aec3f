//! Image acquisition: decode a file and resample it to the model's size.
//!
//! This is the boundary the classifier core treats as external — by the
//! time [`crate::tensor::encode`] runs, the bitmap is already exactly the
//! layout's width × height. Resampling uses bilinear filtering
//! (`FilterType::Triangle`); the encoder doesn't care which filter produced
//! its input, only that the dimensions match.

use crate::tensor::TensorLayout;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AcquireError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },
}

/// Extensions whose decoders are compiled in and known to work.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tif", "tiff", "webp"];

/// Whether a path looks like an image this build can decode.
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|s| e.eq_ignore_ascii_case(s))
        })
}

/// Load and decode an image from disk.
pub fn load_image(path: &Path) -> Result<DynamicImage, AcquireError> {
    ImageReader::open(path)
        .map_err(AcquireError::Io)?
        .decode()
        .map_err(|e| AcquireError::Decode {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
}

/// Resample to exactly the layout's dimensions.
///
/// Already-exact images pass through untouched. `resize_exact` ignores the
/// source aspect ratio on purpose: the model wants a fixed square and the
/// reference pipeline stretches rather than crops.
pub fn fit_to_layout(image: DynamicImage, layout: &TensorLayout) -> DynamicImage {
    let (width, height) = (image.width(), image.height());
    if layout.matches(width, height) {
        return image;
    }
    log::debug!(
        "resampling {width}x{height} -> {}x{}",
        layout.width,
        layout.height
    );
    image.resize_exact(layout.width, layout.height, FilterType::Triangle)
}

/// Decode a file and fit it to the layout in one step.
pub fn acquire(path: &Path, layout: &TensorLayout) -> Result<DynamicImage, AcquireError> {
    Ok(fit_to_layout(load_image(path)?, layout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{save_png, solid_image};

    #[test]
    fn supported_extensions_are_case_insensitive() {
        assert!(is_supported(Path::new("leaf.jpg")));
        assert!(is_supported(Path::new("leaf.JPEG")));
        assert!(is_supported(Path::new("leaf.Png")));
        assert!(!is_supported(Path::new("leaf.gif")));
        assert!(!is_supported(Path::new("leaf")));
    }

    #[test]
    fn load_nonexistent_file_errors() {
        let err = load_image(Path::new("/nonexistent/leaf.jpg")).unwrap_err();
        assert!(matches!(err, AcquireError::Io(_)));
    }

    #[test]
    fn load_non_image_bytes_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("notes.png");
        std::fs::write(&path, b"not an image at all").unwrap();

        let err = load_image(&path).unwrap_err();
        assert!(matches!(err, AcquireError::Decode { .. }));
    }

    #[test]
    fn acquire_resamples_to_layout() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("leaf.png");
        save_png(&path, &solid_image(640, 480, [30, 120, 40]));

        let layout = TensorLayout::rgb(224, 224);
        let fitted = acquire(&path, &layout).unwrap();
        assert_eq!(fitted.width(), 224);
        assert_eq!(fitted.height(), 224);
    }

    #[test]
    fn exact_size_image_is_not_resampled() {
        let layout = TensorLayout::rgb(224, 224);
        let image = solid_image(224, 224, [1, 2, 3]);
        let fitted = fit_to_layout(image.clone(), &layout);
        assert_eq!(fitted.to_rgb8().as_raw(), image.to_rgb8().as_raw());
    }

    #[test]
    fn resampled_solid_color_stays_solid() {
        // Bilinear filtering of a uniform field must not invent colors.
        let layout = TensorLayout::rgb(32, 32);
        let fitted = fit_to_layout(solid_image(100, 60, [200, 10, 10]), &layout);
        for pixel in fitted.to_rgb8().pixels() {
            assert_eq!(pixel.0, [200, 10, 10]);
        }
    }
}
