//! Bitmap output for packed renders.

use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use thiserror::Error;

use crate::framebuffer::PackedImage;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Pixel buffer holds {actual} pixels, expected {expected} for {width}x{height}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Decode a packed, bottom-up image into a top-down RGB image.
pub fn to_rgb_image(packed: &PackedImage) -> Result<RgbImage, OutputError> {
    let expected = packed.width as usize * packed.height as usize;
    if packed.pixels.len() != expected {
        return Err(OutputError::SizeMismatch {
            width: packed.width,
            height: packed.height,
            expected,
            actual: packed.pixels.len(),
        });
    }

    Ok(RgbImage::from_fn(packed.width, packed.height, |x, y| {
        Rgb(packed.rgb_top_down(x, y))
    }))
}

/// Write a packed render as an uncompressed 24-bit BMP.
pub fn save_bmp(packed: &PackedImage, path: impl AsRef<Path>) -> Result<(), OutputError> {
    let path = path.as_ref();
    to_rgb_image(packed)?.save_with_format(path, ImageFormat::Bmp)?;
    log::info!("Saved {}x{} bitmap to {}", packed.width, packed.height, path.display());
    Ok(())
}
