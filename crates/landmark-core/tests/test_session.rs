mod common;

use common::{png_bytes, FakeRegistrar, FakeUploader, RecordingPresenter};
use landmark_core::config::ViewerConfig;
use landmark_core::error::LandmarkError;
use landmark_core::landmark::Side;
use landmark_core::render::DrawList;
use landmark_core::session::Session;
use landmark_core::transform::{Point, Size};

fn session() -> Session {
    let canvas = Size::new(400.0, 300.0);
    Session::new(
        DrawList::new(canvas),
        DrawList::new(canvas),
        &ViewerConfig::default(),
    )
}

#[test]
fn test_full_alignment_scenario() {
    let uploader = FakeUploader::accepting();
    let mut s = session();
    assert!(!s.both_loaded());

    s.load_image(Side::Left, &uploader, "left.png", &png_bytes(800, 600))
        .unwrap();
    s.load_image(Side::Right, &uploader, "right.png", &png_bytes(800, 600))
        .unwrap();
    assert!(s.both_loaded());
    assert_eq!(uploader.calls.borrow().len(), 2);
    assert_eq!(uploader.calls.borrow()[1].0, Side::Right);

    let left = s.viewport(Side::Left);
    assert_eq!(left.scale(), 0.5);
    assert_eq!(left.offset(), Point::new(0.0, 0.0));

    assert_eq!(
        s.viewport_mut(Side::Left).click(Point::new(100.0, 50.0)),
        Some(0)
    );
    assert_eq!(
        s.viewport(Side::Left).points()[0].position(),
        Point::new(200.0, 100.0)
    );

    for i in 1..4 {
        s.viewport_mut(Side::Left)
            .click(Point::new(100.0 + 40.0 * i as f64, 60.0));
    }
    for i in 0..4 {
        s.viewport_mut(Side::Right)
            .click(Point::new(90.0 + 40.0 * i as f64, 70.0));
    }

    let endpoint = FakeRegistrar::succeeding();
    let mut presenter = RecordingPresenter::default();
    let outcome = s.register(&endpoint, &mut presenter).unwrap();

    assert_eq!(outcome.pairs, 4);
    for side in Side::BOTH {
        assert!(s.viewport(side).points().iter().all(|p| p.matched));
    }
    assert_eq!(presenter.shown.len(), 1);
    let sent = endpoint.requests.borrow();
    assert_eq!(sent[0].left_points[0], [200.0, 100.0]);
}

#[test]
fn test_reset_clears_both_sides_and_hides_preview() {
    let uploader = FakeUploader::accepting();
    let mut s = session();
    for side in Side::BOTH {
        s.load_image(side, &uploader, "img.png", &png_bytes(800, 600))
            .unwrap();
        s.viewport_mut(side).click(Point::new(10.0, 10.0));
    }

    let mut presenter = RecordingPresenter::default();
    s.reset_points(&mut presenter);

    for side in Side::BOTH {
        assert!(s.viewport(side).points().is_empty());
        assert_eq!(s.viewport(side).surface().marker_count(), 0);
    }
    assert_eq!(presenter.hidden, 1);
}

#[test]
fn test_zoom_targets_one_side() {
    let uploader = FakeUploader::accepting();
    let mut s = session();
    for side in Side::BOTH {
        s.load_image(side, &uploader, "img.png", &png_bytes(800, 600))
            .unwrap();
    }
    s.zoom(Side::Right, 2.0);
    assert_eq!(s.viewport(Side::Left).scale(), 0.5);
    assert_eq!(s.viewport(Side::Right).scale(), 1.0);
}

#[test]
fn test_prepare_then_apply_out_of_band() {
    let uploader = FakeUploader::accepting();
    let mut s = session();
    for side in Side::BOTH {
        s.load_image(side, &uploader, "img.png", &png_bytes(800, 600))
            .unwrap();
        for i in 0..4 {
            s.viewport_mut(side).click(Point::new(20.0 * i as f64, 30.0));
        }
    }

    let pending = s.prepare_registration().unwrap();
    // Reloading an image while the request is out replaces the point set.
    s.load_image(Side::Left, &uploader, "other.png", &png_bytes(64, 64))
        .unwrap();

    let mut presenter: Option<landmark_core::presentation::BlendedImage> = None;
    let response = landmark_core::registration::RegistrationResponse {
        success: true,
        blended_image: Some(common::BLENDED_URI.into()),
        ..Default::default()
    };
    let err = s
        .apply_registration(&pending, response, &mut presenter)
        .unwrap_err();
    assert!(matches!(err, LandmarkError::RegistrationFailed(_)));
    assert!(presenter.is_none());
    assert!(s.viewport(Side::Right).points().iter().all(|p| !p.matched));
}
