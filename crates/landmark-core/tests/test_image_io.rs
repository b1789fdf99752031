mod common;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use common::{png_bytes, FakeUploader};
use landmark_core::error::LandmarkError;
use landmark_core::io::image_io::{decode_image, load_file, save_encoded};
use landmark_core::landmark::Side;
use landmark_core::presentation::BlendedImage;

#[test]
fn test_decode_png() {
    let image = decode_image(&png_bytes(12, 7)).unwrap();
    assert_eq!((image.width(), image.height()), (12, 7));
    assert_eq!(image.pixels().get_pixel(0, 0).0, [40, 80, 120, 255]);
}

#[test]
fn test_decode_garbage_fails() {
    let err = decode_image(b"\x89PNG but not really").unwrap_err();
    assert!(matches!(err, LandmarkError::DecodeFailed(_)));
}

#[test]
fn test_load_file_uses_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scan_01.png");
    std::fs::write(&path, png_bytes(20, 10)).unwrap();

    let uploader = FakeUploader::accepting();
    let image = load_file(&uploader, Side::Right, &path).unwrap();
    assert_eq!(image.width(), 20);
    let calls = uploader.calls.borrow();
    assert_eq!(calls[0].0, Side::Right);
    assert_eq!(calls[0].1, "scan_01.png");
}

#[test]
fn test_load_missing_file_skips_upload() {
    let dir = tempfile::tempdir().unwrap();
    let uploader = FakeUploader::accepting();
    let err = load_file(&uploader, Side::Left, &dir.path().join("nope.png")).unwrap_err();
    assert!(matches!(err, LandmarkError::Io(_)));
    assert!(uploader.calls.borrow().is_empty());
}

#[test]
fn test_save_blended_preview() {
    let uri = format!("data:image/png;base64,{}", STANDARD.encode(png_bytes(6, 4)));
    let blended = BlendedImage::new(uri);
    assert_eq!(blended.media_type(), Some("image/png"));

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("blended.png");
    save_encoded(&blended.decode().unwrap(), &out).unwrap();

    let reread = decode_image(&std::fs::read(&out).unwrap()).unwrap();
    assert_eq!((reread.width(), reread.height()), (6, 4));
}

#[test]
fn test_save_rejects_non_image_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let err = save_encoded(b"hello", &dir.path().join("x.png")).unwrap_err();
    assert!(matches!(err, LandmarkError::InvalidPreview(_)));
}
