//! Common types shared across all models.

use serde::{Deserialize, Serialize};

/// Image with URL and dimensions.
///
/// Catalog responses omit dimensions for some images, so both default to 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Image {
    /// URL to the image.
    pub url: String,

    /// Height in pixels.
    #[serde(default)]
    pub height: u32,

    /// Width in pixels.
    #[serde(default)]
    pub width: u32,
}

impl Image {
    /// Create a new image.
    pub fn new<S: Into<String>>(url: S, height: u32, width: u32) -> Self {
        Self {
            url: url.into(),
            height,
            width,
        }
    }

    /// Pick the largest image of a list, falling back to the first when
    /// no dimensions are known.
    pub fn largest(images: &[Image]) -> Option<&Image> {
        images
            .iter()
            .max_by_key(|img| img.area())
            .filter(|img| img.area() > 0)
            .or_else(|| images.first())
    }

    /// Pixel count, widened so catalog-supplied sizes cannot overflow.
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_largest_image() {
        let images = vec![
            Image::new("small", 64, 64),
            Image::new("big", 640, 640),
            Image::new("medium", 300, 300),
        ];
        assert_eq!(Image::largest(&images).unwrap().url, "big");
    }

    #[test]
    fn test_largest_without_dimensions() {
        let images = vec![Image::new("first", 0, 0), Image::new("second", 0, 0)];
        assert_eq!(Image::largest(&images).unwrap().url, "first");
        assert!(Image::largest(&[]).is_none());
    }

    #[test]
    fn test_largest_with_huge_dimensions() {
        let images = vec![
            Image::new("normal", 640, 640),
            Image::new("huge", u32::MAX, u32::MAX),
        ];
        assert_eq!(Image::largest(&images).unwrap().url, "huge");
        assert_eq!(images[1].area(), u64::from(u32::MAX) * u64::from(u32::MAX));
    }
}
