//! Bitmap → input tensor encoding.
//!
//! The encoder turns an already-resampled bitmap into the exact byte buffer
//! the quantized model consumes: row-major pixels, R-G-B channel order, one
//! unsigned byte per channel, no normalization and no float scaling. A model
//! with a float input would need a different encoding stage entirely — this
//! one exists only for the uint8 contract.
//!
//! Resampling is deliberately not done here. Callers hand over a bitmap that
//! is already exactly the layout's width × height (see [`crate::acquire`]);
//! anything else is rejected up front rather than producing a truncated or
//! misaligned buffer.

use super::layout::TensorLayout;
use image::{DynamicImage, GenericImageView};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EncodeError {
    #[error("image is {actual_width}x{actual_height}, encoder requires exactly {expected_width}x{expected_height}")]
    ShapeMismatch {
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },
}

/// A fixed-length byte buffer in the model's input layout.
///
/// Length is always exactly `layout.byte_len()` — the constructor is private
/// and the encoder is the only producer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputTensor(Vec<u8>);

impl InputTensor {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

/// Encode a bitmap into the model's input buffer.
///
/// Pixels are visited row by row (y outer, x inner) and each contributes its
/// R, G and B bytes in that order. An alpha channel, if present, is dropped.
///
/// Fails with [`EncodeError::ShapeMismatch`] when the bitmap does not match
/// the layout dimensions exactly.
pub fn encode(image: &DynamicImage, layout: &TensorLayout) -> Result<InputTensor, EncodeError> {
    let (width, height) = image.dimensions();
    if !layout.matches(width, height) {
        return Err(EncodeError::ShapeMismatch {
            expected_width: layout.width,
            expected_height: layout.height,
            actual_width: width,
            actual_height: height,
        });
    }

    // to_rgb8 drops alpha and yields 8-bit channels for any source format.
    let rgb = image.to_rgb8();
    let mut buffer = vec![0u8; layout.byte_len()];

    for y in 0..height {
        for x in 0..width {
            let pixel = rgb.get_pixel(x, y);
            let idx = ((y * width + x) * 3) as usize;
            buffer[idx] = pixel[0];
            buffer[idx + 1] = pixel[1];
            buffer[idx + 2] = pixel[2];
        }
    }

    debug_assert_eq!(buffer.len(), layout.byte_len());
    Ok(InputTensor(buffer))
}
