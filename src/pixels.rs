use image::DynamicImage;

use crate::color::Color;

/// Decoded pixel data, one color per pixel in row-major order.
///
/// Alpha is dropped: a fully transparent pixel counts as whatever RGB it
/// carries, the same way a canvas read reports it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Vec<Color>,
}

impl PixelBuffer {
    pub fn new(pixels: Vec<Color>) -> Self {
        Self { pixels }
    }

    /// Build from interleaved RGBA8 bytes. A trailing partial pixel is ignored.
    pub fn from_rgba8(raw: &[u8]) -> Self {
        let pixels = raw
            .chunks_exact(4)
            .map(|chunk| Color::new(chunk[0], chunk[1], chunk[2]))
            .collect();
        Self { pixels }
    }

    pub fn from_image(img: &DynamicImage) -> Self {
        Self::from_rgba8(img.to_rgba8().as_raw())
    }

    pub fn as_slice(&self) -> &[Color] {
        &self.pixels
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}

impl From<Vec<Color>> for PixelBuffer {
    fn from(pixels: Vec<Color>) -> Self {
        Self::new(pixels)
    }
}
