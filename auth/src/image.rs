//! Profile image encoding.
//!
//! A user-selected photo is scaled to a fixed-width preview, JPEG-compressed
//! and base64-encoded so it fits inside a single string field of the user
//! document. The blob is small (a 150-wide JPEG at quality 50 is a few KB)
//! and byte-exact output may vary across JPEG encoder versions; callers
//! should rely on size bounds and decodability, not exact bytes.

use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use thiserror::Error;

/// Fixed preview width; height scales to preserve aspect ratio.
pub const PREVIEW_WIDTH: u32 = 150;
/// JPEG quality used for the preview blob.
pub const JPEG_QUALITY: u8 = 50;

#[derive(Debug, Error)]
pub enum ImageError {
    /// Source image has a zero dimension or scales down to nothing.
    #[error("selected image is empty")]
    Empty,
    /// The image source could not decode the user's selection.
    #[error("selected image could not be read")]
    Unavailable,
    /// The JPEG encoder rejected the preview.
    #[error("failed to compress image: {0}")]
    Encode(#[from] image::ImageError),
}

/// Decode a user-selected image from its raw bytes.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, ImageError> {
    image::load_from_memory(bytes).map_err(|_| ImageError::Unavailable)
}

/// Scale `source` to the preview width, JPEG-compress at fixed quality and
/// return the standard-base64 blob.
pub fn encode_image(source: &DynamicImage) -> Result<String, ImageError> {
    let (width, height) = (source.width(), source.height());
    if width == 0 || height == 0 {
        return Err(ImageError::Empty);
    }
    let preview_height =
        (f64::from(height) * f64::from(PREVIEW_WIDTH) / f64::from(width)).round() as u32;
    if preview_height == 0 {
        return Err(ImageError::Empty);
    }

    // Nearest is fine here; the preview is too small for filter quality to
    // show, and it keeps the scale cheap.
    let preview = source
        .resize_exact(PREVIEW_WIDTH, preview_height, FilterType::Nearest)
        .to_rgb8();

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY).encode_image(&preview)?;
    Ok(base64::engine::general_purpose::STANDARD.encode(jpeg))
}
