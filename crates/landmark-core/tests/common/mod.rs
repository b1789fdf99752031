#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbaImage};

use landmark_core::config::ViewerConfig;
use landmark_core::endpoint::{RegistrationEndpoint, UploadEndpoint, UploadReceipt};
use landmark_core::error::{LandmarkError, Result};
use landmark_core::landmark::Side;
use landmark_core::presentation::{BlendedImage, Presenter};
use landmark_core::registration::{RegistrationRequest, RegistrationResponse};
use landmark_core::transform::Size;
use landmark_core::viewport::Viewport;

pub const BLENDED_URI: &str = "data:image/png;base64,aGVsbG8=";

/// Encode a solid-colour PNG of the given size.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, image::Rgba([40, 80, 120, 255]));
    let mut buf = Vec::new();
    DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .expect("encode png");
    buf
}

/// Upload endpoint that accepts or rejects everything and counts calls.
pub struct FakeUploader {
    pub accept: bool,
    pub calls: RefCell<Vec<(Side, String, usize)>>,
}

impl FakeUploader {
    pub fn accepting() -> Self {
        Self {
            accept: true,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn rejecting() -> Self {
        Self {
            accept: false,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl UploadEndpoint for FakeUploader {
    fn upload(&self, side: Side, file_name: &str, bytes: &[u8]) -> Result<UploadReceipt> {
        self.calls
            .borrow_mut()
            .push((side, file_name.to_string(), bytes.len()));
        if self.accept {
            Ok(UploadReceipt {
                image_id: Some(format!("id-{}", self.calls.borrow().len())),
            })
        } else {
            Err(LandmarkError::UploadFailed("server rejected the image".into()))
        }
    }
}

/// Registration endpoint returning a canned reply and recording requests.
pub struct FakeRegistrar {
    pub reply: std::result::Result<RegistrationResponse, String>,
    pub requests: RefCell<Vec<RegistrationRequest>>,
    pub calls: Cell<usize>,
}

impl FakeRegistrar {
    pub fn succeeding() -> Self {
        Self::with_reply(Ok(RegistrationResponse {
            success: true,
            blended_image: Some(BLENDED_URI.to_string()),
            error: None,
            homography: Some(vec![
                vec![1.0, 0.0, 5.0],
                vec![0.0, 1.0, -2.0],
                vec![0.0, 0.0, 1.0],
            ]),
            status: Some(vec![vec![1], vec![1], vec![0], vec![1]]),
        }))
    }

    pub fn failing(error: &str) -> Self {
        Self::with_reply(Ok(RegistrationResponse {
            success: false,
            error: Some(error.to_string()),
            ..Default::default()
        }))
    }

    pub fn unreachable() -> Self {
        Self::with_reply(Err("connection refused".to_string()))
    }

    fn with_reply(reply: std::result::Result<RegistrationResponse, String>) -> Self {
        Self {
            reply,
            requests: RefCell::new(Vec::new()),
            calls: Cell::new(0),
        }
    }
}

impl RegistrationEndpoint for FakeRegistrar {
    fn register(&self, request: &RegistrationRequest) -> Result<RegistrationResponse> {
        self.calls.set(self.calls.get() + 1);
        self.requests.borrow_mut().push(request.clone());
        self.reply
            .clone()
            .map_err(LandmarkError::RegistrationFailed)
    }
}

#[derive(Default)]
pub struct RecordingPresenter {
    pub shown: Vec<BlendedImage>,
    pub hidden: usize,
}

impl Presenter for RecordingPresenter {
    fn show_blended(&mut self, image: &BlendedImage) {
        self.shown.push(image.clone());
    }

    fn hide_blended(&mut self) {
        self.hidden += 1;
    }
}

/// A viewport on a 400x300 canvas with an 800x600 image loaded.
pub fn loaded_viewport(side: Side) -> Viewport {
    let mut vp = Viewport::with_canvas(side, Size::new(400.0, 300.0), &ViewerConfig::default());
    vp.load_image(&FakeUploader::accepting(), "test.png", &png_bytes(800, 600))
        .expect("load test image");
    vp
}
