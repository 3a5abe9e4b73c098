//! Flat RGBA raster buffers built from pipeline output.
//!
//! [`ColorImage`] is what the exporter receives: row-major RGBA8 pixels plus
//! dimensions. Encoding it to a file format is left to the caller.

use crate::TerrainError;
use crate::biome::Rgba8;
use crate::field::{ScalarField, check_dimensions};

/// A row-major RGBA8 image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorImage {
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Pixel data in row-major RGBA format. Length = `width * height * 4`.
    pub pixels: Vec<u8>,
}

impl ColorImage {
    /// Create a transparent black image.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height * 4],
        }
    }

    /// Pack a per-cell color field into an image.
    ///
    /// # Errors
    ///
    /// [`TerrainError::InvalidDimensions`] for a zero-sized grid and
    /// [`TerrainError::DataLength`] if `colors.len() != width * height`.
    pub fn from_colors(width: usize, height: usize, colors: &[Rgba8]) -> Result<Self, TerrainError> {
        check_dimensions(width, height)?;
        if colors.len() != width * height {
            return Err(TerrainError::DataLength {
                len: colors.len(),
                width,
                height,
            });
        }
        let pixels = colors.iter().flat_map(|c| c.to_array()).collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Set the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgba8) {
        let idx = (y * self.width + x) * 4;
        self.pixels[idx..idx + 4].copy_from_slice(&color.to_array());
    }

    /// Get the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn get_pixel(&self, x: usize, y: usize) -> Rgba8 {
        let idx = (y * self.width + x) * 4;
        Rgba8::new(
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        )
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Count the number of distinct colors (ignoring alpha) in the image.
    pub fn unique_color_count(&self) -> usize {
        let mut colors = std::collections::HashSet::new();
        for chunk in self.pixels.chunks_exact(4) {
            colors.insert((chunk[0], chunk[1], chunk[2]));
        }
        colors.len()
    }
}

/// Render a field as an opaque grayscale image.
///
/// Samples are mapped with a true min-max rescale (`(v - min) / (max - min)`)
/// so the full gray ramp is used. A flat field renders mid-gray.
pub fn elevation_image(field: &ScalarField) -> ColorImage {
    let (min, max) = (field.min_value(), field.max_value());
    let range = max - min;
    let mut image = ColorImage::new(field.width(), field.height());

    for (offset, &value) in field.data().iter().enumerate() {
        let normalized = if range > 0.0 {
            ((value - min) / range).clamp(0.0, 1.0)
        } else {
            0.5
        };
        let gray = (normalized * 255.0).round() as u8;
        let (x, y) = (offset % field.width(), offset / field.width());
        image.set_pixel(x, y, Rgba8::opaque(gray, gray, gray));
    }

    image
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_image_dimensions() {
        let image = ColorImage::new(256, 128);
        assert_eq!(image.dimensions(), (256, 128));
        assert_eq!(image.pixels.len(), 256 * 128 * 4);
    }

    #[test]
    fn test_from_colors_is_row_major() {
        let colors = [
            Rgba8::new(1, 0, 0, 255),
            Rgba8::new(2, 0, 0, 255),
            Rgba8::new(3, 0, 0, 255),
            Rgba8::new(4, 0, 0, 255),
            Rgba8::new(5, 0, 0, 255),
            Rgba8::new(6, 0, 0, 255),
        ];
        let image = ColorImage::from_colors(3, 2, &colors).unwrap();
        assert_eq!(image.get_pixel(2, 0).r, 3);
        assert_eq!(image.get_pixel(0, 1).r, 4);
        assert_eq!(&image.pixels[..4], &[1, 0, 0, 255]);
    }

    #[test]
    fn test_from_colors_length_mismatch() {
        let result = ColorImage::from_colors(2, 2, &[Rgba8::default(); 3]);
        assert!(matches!(result, Err(TerrainError::DataLength { .. })));
    }

    #[test]
    fn test_set_and_get_pixel() {
        let mut image = ColorImage::new(8, 8);
        image.set_pixel(2, 3, Rgba8::new(10, 20, 30, 40));
        assert_eq!(image.get_pixel(2, 3), Rgba8::new(10, 20, 30, 40));
        assert_eq!(image.get_pixel(3, 2), Rgba8::default());
    }

    #[test]
    fn test_unique_color_count() {
        let mut image = ColorImage::new(4, 1);
        image.set_pixel(0, 0, Rgba8::opaque(255, 0, 0));
        image.set_pixel(1, 0, Rgba8::opaque(0, 255, 0));
        image.set_pixel(2, 0, Rgba8::opaque(255, 0, 0));
        image.set_pixel(3, 0, Rgba8::opaque(0, 0, 255));
        assert_eq!(image.unique_color_count(), 3);
    }

    #[test]
    fn test_elevation_image_spans_gray_ramp() {
        let field = ScalarField::from_data(3, 1, vec![-1.0, 0.0, 1.0]).unwrap();
        let image = elevation_image(&field);
        assert_eq!(image.get_pixel(0, 0), Rgba8::opaque(0, 0, 0));
        assert_eq!(image.get_pixel(1, 0), Rgba8::opaque(128, 128, 128));
        assert_eq!(image.get_pixel(2, 0), Rgba8::opaque(255, 255, 255));
    }

    #[test]
    fn test_flat_field_renders_mid_gray() {
        let field = ScalarField::constant(2, 2, 0.7).unwrap();
        let image = elevation_image(&field);
        assert_eq!(image.unique_color_count(), 1);
        assert_eq!(image.get_pixel(1, 1), Rgba8::opaque(128, 128, 128));
    }
}
