//! PNG export of pipeline rasters.

use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};
use islegen_terrain::ColorImage;
use tracing::info;

/// Errors raised while writing an image.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The raster is too large for the image encoder.
    #[error("image of {width}x{height} pixels exceeds encoder limits")]
    TooLarge {
        /// Raster width.
        width: usize,
        /// Raster height.
        height: usize,
    },

    /// The pixel buffer does not hold `width * height` RGBA pixels.
    #[error("pixel buffer holds {len} bytes, expected {expected}")]
    BufferSize {
        /// Bytes supplied.
        len: usize,
        /// Bytes required.
        expected: usize,
    },

    /// The output directory could not be created.
    #[error("failed to create {}: {source}", path.display())]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Encoding or writing the PNG failed.
    #[error("failed to write {}: {source}", path.display())]
    Encode {
        /// Destination file.
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Encode `raster` as a PNG at `path`, creating parent directories as needed.
pub fn write_png(raster: &ColorImage, path: &Path) -> Result<(), ExportError> {
    let (raster_width, raster_height) = raster.dimensions();
    let too_large = || ExportError::TooLarge {
        width: raster_width,
        height: raster_height,
    };
    let width = u32::try_from(raster_width).map_err(|_| too_large())?;
    let height = u32::try_from(raster_height).map_err(|_| too_large())?;

    let expected = raster_width * raster_height * 4;
    let buffer = RgbaImage::from_raw(width, height, raster.pixels.clone()).ok_or(
        ExportError::BufferSize {
            len: raster.pixels.len(),
            expected,
        },
    )?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| ExportError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    buffer
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| ExportError::Encode {
            path: path.to_path_buf(),
            source,
        })?;

    info!(
        path = %path.display(),
        width,
        height,
        colors = raster.unique_color_count(),
        "wrote image"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use islegen_terrain::Rgba8;

    #[test]
    fn test_png_roundtrips_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("map.png");

        let mut raster = ColorImage::new(3, 2);
        raster.set_pixel(0, 0, Rgba8::opaque(0x02, 0x2f, 0x8e));
        raster.set_pixel(2, 1, Rgba8::opaque(0xff, 0xfa, 0xfa));
        write_png(&raster, &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(0, 0).0, [0x02, 0x2f, 0x8e, 255]);
        assert_eq!(decoded.get_pixel(2, 1).0, [0xff, 0xfa, 0xfa, 255]);
        assert_eq!(decoded.get_pixel(1, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_written_palette_matches_raster() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("palette.png");

        let mut raster = ColorImage::new(4, 4);
        raster.set_pixel(1, 1, Rgba8::opaque(0x34, 0x8c, 0x31));
        raster.set_pixel(2, 3, Rgba8::opaque(0xc2, 0xb2, 0x80));
        write_png(&raster, &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgba8();
        let mut reloaded = ColorImage::new(4, 4);
        reloaded.pixels = decoded.into_raw();
        assert_eq!(reloaded.dimensions(), raster.dimensions());
        assert_eq!(reloaded.unique_color_count(), raster.unique_color_count());
        assert_eq!(reloaded, raster);
    }

    #[test]
    fn test_short_buffer_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let raster = ColorImage {
            width: 2,
            height: 2,
            pixels: vec![0; 12],
        };
        let result = write_png(&raster, &dir.path().join("bad.png"));
        assert!(matches!(
            result,
            Err(ExportError::BufferSize {
                len: 12,
                expected: 16
            })
        ));
    }
}
