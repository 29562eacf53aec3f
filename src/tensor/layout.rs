//! Pure dimension math for the model input tensor.
//!
//! All functions here are pure and testable without any I/O or images.

/// Shape of the model's input tensor in HWC order.
///
/// The byte length of an encoded buffer is always
/// `width × height × channels`, row-major with height as the outer loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TensorLayout {
    pub width: u32,
    pub height: u32,
    pub channels: u32,
}

impl TensorLayout {
    /// RGB layout (three channels, one byte each).
    pub const fn rgb(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            channels: 3,
        }
    }

    /// Exact byte length of a buffer in this layout.
    pub fn byte_len(&self) -> usize {
        self.width as usize * self.height as usize * self.channels as usize
    }

    /// Whether an image of the given dimensions can be encoded as-is.
    pub fn matches(&self, width: u32, height: u32) -> bool {
        self.width == width && self.height == height
    }
}

impl Default for TensorLayout {
    /// The shipped model takes 224×224 RGB.
    fn default() -> Self {
        Self::rgb(224, 224)
    }
}

impl std::fmt::Display for TensorLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.channels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_is_224_rgb() {
        let layout = TensorLayout::default();
        assert_eq!(layout.width, 224);
        assert_eq!(layout.height, 224);
        assert_eq!(layout.channels, 3);
    }

    #[test]
    fn byte_len_is_product_of_dimensions() {
        assert_eq!(TensorLayout::default().byte_len(), 150_528);
        assert_eq!(TensorLayout::rgb(2, 3).byte_len(), 18);
        assert_eq!(TensorLayout::rgb(1, 1).byte_len(), 3);
    }

    #[test]
    fn matches_requires_both_dimensions() {
        let layout = TensorLayout::rgb(224, 224);
        assert!(layout.matches(224, 224));
        assert!(!layout.matches(224, 225));
        assert!(!layout.matches(300, 224));
    }

    #[test]
    fn display_is_compact() {
        assert_eq!(TensorLayout::rgb(224, 224).to_string(), "224x224x3");
    }
}
