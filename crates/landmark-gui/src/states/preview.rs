use landmark_core::io::image_io::decode_image;
use landmark_core::presentation::{BlendedImage, Presenter};

use crate::convert::decoded_to_color_image;

/// Blended preview window state. The core drives it through [`Presenter`].
#[derive(Default)]
pub struct PreviewState {
    pub blended: Option<BlendedImage>,
    pub open: bool,
    texture: Option<egui::TextureHandle>,
    decode_error: Option<String>,
}

impl PreviewState {
    /// Texture for the current preview, decoded on first use.
    pub fn texture(&mut self, ctx: &egui::Context) -> Result<&egui::TextureHandle, &str> {
        if self.texture.is_none() && self.decode_error.is_none() {
            if let Some(ref blended) = self.blended {
                match blended.decode().and_then(|bytes| decode_image(&bytes)) {
                    Ok(image) => {
                        self.texture = Some(ctx.load_texture(
                            "blended",
                            decoded_to_color_image(&image),
                            egui::TextureOptions::LINEAR,
                        ));
                    }
                    Err(e) => self.decode_error = Some(e.to_string()),
                }
            }
        }
        match (&self.texture, &self.decode_error) {
            (Some(tex), _) => Ok(tex),
            (None, Some(err)) => Err(err.as_str()),
            (None, None) => Err("no preview"),
        }
    }
}

impl Presenter for PreviewState {
    fn show_blended(&mut self, image: &BlendedImage) {
        self.blended = Some(image.clone());
        self.texture = None;
        self.decode_error = None;
        self.open = true;
    }

    fn hide_blended(&mut self) {
        self.blended = None;
        self.texture = None;
        self.decode_error = None;
        self.open = false;
    }
}
