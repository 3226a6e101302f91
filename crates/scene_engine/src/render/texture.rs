//! Texture resource
//!
//! Pixel data is always RGBA, four bytes per pixel. The embedded GUI
//! surface streams its frames through `set_img_data` every time the
//! browser control repaints.

use thiserror::Error;

/// Errors raised by texture operations
#[derive(Error, Debug)]
pub enum TextureError {
    /// Pixel buffer length does not match width * height * 4
    #[error("pixel buffer is {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    SizeMismatch {
        /// Provided buffer length
        actual: usize,
        /// Required buffer length
        expected: usize,
        /// Target width
        width: u32,
        /// Target height
        height: u32,
    },
}

/// A CPU-side texture with RGBA8 pixel data
#[derive(Debug, Clone, Default)]
pub struct Texture {
    name: String,
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Texture {
    /// Bytes per pixel; all engine textures are RGBA8
    pub const BYTES_PER_PIXEL: usize = 4;

    /// Create an empty texture
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Create a texture from an existing pixel buffer
    pub fn from_pixels(
        name: impl Into<String>,
        data: Vec<u8>,
        width: u32,
        height: u32,
    ) -> Result<Self, TextureError> {
        let mut texture = Self::new(name);
        texture.set_img_data(&data, width, height)?;
        Ok(texture)
    }

    /// The texture's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Replace the pixel data, validating the 4-byte-per-pixel format
    pub fn set_img_data(&mut self, data: &[u8], width: u32, height: u32) -> Result<(), TextureError> {
        let expected = width as usize * height as usize * Self::BYTES_PER_PIXEL;
        if data.len() != expected {
            return Err(TextureError::SizeMismatch {
                actual: data.len(),
                expected,
                width,
                height,
            });
        }
        self.width = width;
        self.height = height;
        self.data.clear();
        self.data.extend_from_slice(data);
        Ok(())
    }

    /// Raw pixel bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Pixels viewed as RGBA quadruplets
    pub fn pixels(&self) -> &[[u8; 4]] {
        bytemuck::cast_slice(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_mismatch_is_rejected() {
        let mut texture = Texture::new("gui");
        let result = texture.set_img_data(&[0u8; 10], 2, 2);
        assert!(matches!(result, Err(TextureError::SizeMismatch { expected: 16, .. })));
    }

    #[test]
    fn test_pixels_view() {
        let mut texture = Texture::new("gui");
        texture.set_img_data(&[1, 2, 3, 4, 5, 6, 7, 8], 2, 1).unwrap();

        let pixels = texture.pixels();
        assert_eq!(pixels.len(), 2);
        assert_eq!(pixels[0], [1, 2, 3, 4]);
        assert_eq!(pixels[1], [5, 6, 7, 8]);
    }
}
