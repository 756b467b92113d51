//! Image ingestion: uploaded bytes to an 8-bit RGB bitmap

use image::RgbImage;
use log::debug;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::ImageFormat;

/// Decodes JPEG or PNG bytes into RGB
///
/// Grey, alpha and 16-bit inputs are flattened to 8-bit RGB.
pub fn decode_image(bytes: &[u8]) -> Result<RgbImage> {
    decode_image_with_format(bytes).map(|(_, rgb)| rgb)
}

/// Decodes and also reports which of the accepted formats the bytes were
pub fn decode_image_with_format(bytes: &[u8]) -> Result<(ImageFormat, RgbImage)> {
    if bytes.is_empty() {
        return Err(Error::EmptyImage);
    }

    let format = ImageFormat::sniff(bytes).ok_or_else(|| {
        Error::UnsupportedFormat("expected a JPEG or PNG upload".to_string())
    })?;

    let decoded = image::load_from_memory_with_format(bytes, format.into())?;
    let rgb = decoded.to_rgb8();

    debug!(
        "decoded {} image: {}x{} ({:?})",
        format.name(),
        rgb.width(),
        rgb.height(),
        decoded.color()
    );

    Ok((format, rgb))
}

/// Reads and decodes an image file
pub fn open_image<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
    let path = path.as_ref();

    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        if ImageFormat::from_extension(ext).is_none() {
            return Err(Error::UnsupportedFormat(format!(
                "{} (accepted: jpg, jpeg, png)",
                path.display()
            )));
        }
    }

    let bytes = fs::read(path)?;
    decode_image(&bytes)
}
