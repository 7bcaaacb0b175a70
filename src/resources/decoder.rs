use std::path::Path;

use image::ImageFormat;

use crate::{data_structures::texture::DecodedImage, resources::load_binary};

/// Turns an image file into raw pixels.
pub trait ImageDecoder {
    /// With `flip_vertically` the first row of the result is the bottom row of
    /// the image, matching texture coordinates with their origin in the lower
    /// left corner.
    fn decode(&self, path: &Path, flip_vertically: bool) -> anyhow::Result<DecodedImage>;
}

/// [`ImageDecoder`] on top of the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageFileDecoder;

impl ImageDecoder for ImageFileDecoder {
    fn decode(&self, path: &Path, flip_vertically: bool) -> anyhow::Result<DecodedImage> {
        let bytes = load_binary(path)?;
        // Trust the extension when it names a known format, sniff the header otherwise.
        let img = match ImageFormat::from_path(path) {
            Ok(format) => image::load_from_memory_with_format(&bytes, format)?,
            Err(_) => image::load_from_memory(&bytes)?,
        };
        let img = if flip_vertically { img.flipv() } else { img };
        Ok(DecodedImage::from(img))
    }
}
