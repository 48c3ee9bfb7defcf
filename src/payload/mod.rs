//! Image normalization: uploaded JPEG/PNG bytes → RGB JPEG payload.
//!
//! Whatever the user uploads, the model always receives a single three-channel JPEG,
//! so alpha channels, palettes and 16-bit PNGs never reach the API.

mod types;

pub use types::*;

use crate::{Error, Result};
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use tracing::debug;

/// Turns an upload into the one-element payload list sent to the model.
///
/// A missing or empty upload is [`Error::MissingImage`]; nothing is decoded in that case.
pub fn normalize(upload: Option<&UploadedImage>) -> Result<Vec<ImagePayload>> {
    let upload = match upload {
        Some(upload) if !upload.is_empty() => upload,
        _ => return Err(Error::MissingImage),
    };

    if let Some(ext) = upload.extension() {
        if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(Error::UnsupportedImageType(ext));
        }
    }

    let decoded = image::load_from_memory(&upload.bytes)?;
    debug!(
        "Decoded upload {}x{} ({:?})",
        decoded.width(),
        decoded.height(),
        decoded.color()
    );

    let data = encode_jpeg(&decoded)?;
    debug!("Normalized upload → {} bytes JPEG", data.len());

    Ok(vec![ImagePayload::jpeg(data)])
}

fn encode_jpeg(img: &DynamicImage) -> Result<Vec<u8>> {
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());

    let mut buf = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut buf), ImageFormat::Jpeg)?;

    Ok(buf)
}
