use std::path::Path;

use image::RgbaImage;
use tracing::info;

use crate::endpoint::UploadEndpoint;
use crate::error::{LandmarkError, Result};
use crate::landmark::Side;
use crate::transform::Size;

/// A decoded bitmap, normalized to 8-bit RGBA. Immutable once built.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    pixels: RgbaImage,
}

impl DecodedImage {
    /// Wrap an RGBA buffer. Empty images are rejected since nothing can be fitted to them.
    pub fn from_rgba(pixels: RgbaImage) -> Result<Self> {
        let (w, h) = pixels.dimensions();
        if w == 0 || h == 0 {
            return Err(LandmarkError::DecodeFailed(format!(
                "image has no pixels ({w}x{h})"
            )));
        }
        Ok(Self { pixels })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> Size {
        Size::new(self.width() as f64, self.height() as f64)
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// Decode an in-memory image file of any supported format.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| LandmarkError::DecodeFailed(e.to_string()))?;
    DecodedImage::from_rgba(img.to_rgba8())
}

/// Submit `bytes` to the upload collaborator, then decode the same local bytes.
///
/// Decoding only happens after the server accepted the file, so a rejected
/// upload never produces an image for display.
pub fn upload_and_decode(
    uploader: &dyn UploadEndpoint,
    side: Side,
    file_name: &str,
    bytes: &[u8],
) -> Result<DecodedImage> {
    let receipt = uploader.upload(side, file_name, bytes)?;
    info!(
        side = side.as_str(),
        file_name,
        image_id = receipt.image_id.as_deref().unwrap_or("-"),
        "image uploaded"
    );
    let image = decode_image(bytes)?;
    info!(
        side = side.as_str(),
        width = image.width(),
        height = image.height(),
        "image decoded"
    );
    Ok(image)
}

/// Read an image file and upload + decode it.
pub fn load_file(uploader: &dyn UploadEndpoint, side: Side, path: &Path) -> Result<DecodedImage> {
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".to_string());
    upload_and_decode(uploader, side, &file_name, &bytes)
}

/// Save encoded image bytes to `path`, re-encoding to the format implied by
/// its extension.
pub fn save_encoded(bytes: &[u8], path: &Path) -> Result<()> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| LandmarkError::InvalidPreview(e.to_string()))?;
    img.save(path)?;
    Ok(())
}
