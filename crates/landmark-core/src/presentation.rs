use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{LandmarkError, Result};

/// Displayable reference to the backend's blended preview (data URI or URL).
///
/// The core passes it along without looking inside; [`BlendedImage::decode`]
/// exists for front ends that need the raw bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlendedImage(String);

impl BlendedImage {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_data_uri(&self) -> bool {
        self.0.starts_with("data:")
    }

    /// Media type declared by a data URI, e.g. `image/png`.
    pub fn media_type(&self) -> Option<&str> {
        let header = self.0.strip_prefix("data:")?.split(',').next()?;
        header.split(';').next().filter(|m| !m.is_empty())
    }

    /// Decode a `data:<type>;base64,<payload>` reference into bytes.
    pub fn decode(&self) -> Result<Vec<u8>> {
        let rest = self
            .0
            .strip_prefix("data:")
            .ok_or_else(|| LandmarkError::InvalidPreview("not a data URI".into()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| LandmarkError::InvalidPreview("data URI has no payload".into()))?;
        if !header.split(';').any(|p| p == "base64") {
            return Err(LandmarkError::InvalidPreview(
                "only base64 data URIs are supported".into(),
            ));
        }
        STANDARD
            .decode(payload.trim())
            .map_err(|e| LandmarkError::InvalidPreview(e.to_string()))
    }
}

/// Where the blended preview goes. Implemented by the front end.
pub trait Presenter {
    fn show_blended(&mut self, image: &BlendedImage);
    fn hide_blended(&mut self);
}

/// Keeps the latest shown preview; `None` while hidden.
impl Presenter for Option<BlendedImage> {
    fn show_blended(&mut self, image: &BlendedImage) {
        *self = Some(image.clone());
    }

    fn hide_blended(&mut self) {
        *self = None;
    }
}
