use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::foundation::{
    core::premultiply_rgba8_in_place,
    error::{MemeError, MemeResult},
};

#[derive(Clone, Debug)]
/// Decoded source photo in premultiplied RGBA8 form. Immutable once built.
pub struct SourceImage {
    /// Intrinsic width in pixels.
    pub width: u32,
    /// Intrinsic height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl SourceImage {
    /// Build from straight-alpha RGBA8 pixels.
    pub fn from_rgba8(width: u32, height: u32, mut rgba: Vec<u8>) -> MemeResult<Self> {
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        if rgba.len() != expected {
            return Err(MemeError::validation(format!(
                "rgba buffer is {} bytes, expected {expected} for {width}x{height}",
                rgba.len()
            )));
        }
        if width == 0 || height == 0 {
            return Err(MemeError::decode("image has zero width or height"));
        }
        premultiply_rgba8_in_place(&mut rgba);
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba),
        })
    }

    /// Intrinsic aspect ratio (`width / height`).
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// Decode encoded image bytes (any format `image` understands) into a [`SourceImage`].
pub fn decode_image(bytes: &[u8]) -> MemeResult<SourceImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| MemeError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    SourceImage::from_rgba8(width, height, rgba.into_raw())
}

/// Read and decode an image file.
pub fn decode_image_file(path: &Path) -> MemeResult<SourceImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_image(&bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
