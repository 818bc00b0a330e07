//! Tone mapping and image file output.
//!
//! Supports binary PPM (`P6`) directly and any format the `image` crate
//! can encode (PNG in the default build).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::renderer::ImageBuffer;
use crate::Color;
use glint_math::Interval;
use thiserror::Error;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
}

/// Result type for output operations.
pub type OutputResult<T> = Result<T, OutputError>;

/// Scale a color down so no channel exceeds 1.0, preserving hue.
#[inline]
pub fn tone_map(color: Color) -> Color {
    let max = color.x.max(color.y.max(color.z));
    if max > 1.0 {
        color / max
    } else {
        color
    }
}

/// Tone map, clamp and quantize a linear color to 8-bit RGB.
///
/// Quantization truncates. NaN channels become 0.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let c = tone_map(color);
    let quantize = |x: f32| (255.0 * Interval::UNIT.clamp(x)) as u8;
    [quantize(c.x), quantize(c.y), quantize(c.z)]
}

impl ImageBuffer {
    /// Convert to packed RGB bytes, row-major.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb(*color));
        }
        bytes
    }
}

/// Write the image as binary PPM (`P6`).
pub fn write_ppm<W: Write>(image: &ImageBuffer, writer: &mut W) -> OutputResult<()> {
    write!(writer, "P6\n{} {}\n255\n", image.width, image.height)?;
    writer.write_all(&image.to_rgb8())?;
    writer.flush()?;
    Ok(())
}

/// Save the image, choosing the format from the file extension.
///
/// `.ppm` (or no extension) is written as binary PPM; anything else is
/// handed to the `image` crate.
pub fn save_image<P: AsRef<Path>>(image: &ImageBuffer, path: P) -> OutputResult<()> {
    let path = path.as_ref();
    let is_ppm = path
        .extension()
        .and_then(|e| e.to_str())
        .map_or(true, |e| e.eq_ignore_ascii_case("ppm"));

    if is_ppm {
        let mut writer = BufWriter::new(File::create(path)?);
        write_ppm(image, &mut writer)?;
    } else {
        let bytes = image.to_rgb8();
        let actual = bytes.len();
        let rgb = image::RgbImage::from_raw(image.width, image.height, bytes).ok_or(
            OutputError::BufferSize {
                expected: image.width as usize * image.height as usize * 3,
                actual,
            },
        )?;
        rgb.save(path)?;
    }

    log::info!("Saved {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}
