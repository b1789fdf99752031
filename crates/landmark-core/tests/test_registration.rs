mod common;

use common::{loaded_viewport, FakeRegistrar, RecordingPresenter, BLENDED_URI};
use landmark_core::error::LandmarkError;
use landmark_core::landmark::Side;
use landmark_core::registration::{self, RegistrationResponse};
use landmark_core::render::Color;
use landmark_core::render::DrawCommand;
use landmark_core::transform::Point;
use landmark_core::viewport::Viewport;

fn with_points(side: Side, count: usize) -> Viewport {
    let mut vp = loaded_viewport(side);
    for i in 0..count {
        vp.click(Point::new(10.0 + 20.0 * i as f64, 15.0 + 10.0 * i as f64));
    }
    vp
}

fn unmatched(vp: &Viewport) -> bool {
    vp.points().iter().all(|p| !p.matched)
}

#[test]
fn test_too_few_points_sends_nothing() {
    let mut left = with_points(Side::Left, 3);
    let mut right = with_points(Side::Right, 3);
    let endpoint = FakeRegistrar::succeeding();
    let mut presenter = RecordingPresenter::default();

    let err =
        registration::register_images(&mut left, &mut right, &endpoint, &mut presenter)
            .unwrap_err();
    assert!(matches!(
        err,
        LandmarkError::InsufficientPoints {
            count: 3,
            required: 4
        }
    ));
    assert_eq!(endpoint.calls.get(), 0);
    assert!(presenter.shown.is_empty());
}

#[test]
fn test_mismatched_counts_send_nothing() {
    let mut left = with_points(Side::Left, 4);
    let mut right = with_points(Side::Right, 5);
    let endpoint = FakeRegistrar::succeeding();
    let mut presenter = RecordingPresenter::default();

    let err =
        registration::register_images(&mut left, &mut right, &endpoint, &mut presenter)
            .unwrap_err();
    assert!(matches!(
        err,
        LandmarkError::PointCountMismatch { left: 4, right: 5 }
    ));
    assert_eq!(endpoint.calls.get(), 0);
}

#[test]
fn test_mismatch_reported_before_insufficient() {
    let left = with_points(Side::Left, 1);
    let right = with_points(Side::Right, 2);
    let err = registration::prepare(&left, &right).unwrap_err();
    assert!(matches!(err, LandmarkError::PointCountMismatch { .. }));
}

#[test]
fn test_zero_points_is_insufficient() {
    let left = loaded_viewport(Side::Left);
    let right = loaded_viewport(Side::Right);
    let err = registration::prepare(&left, &right).unwrap_err();
    assert!(matches!(err, LandmarkError::InsufficientPoints { count: 0, .. }));
}

#[test]
fn test_request_carries_image_space_pairs_in_order() {
    let left = with_points(Side::Left, 4);
    let right = with_points(Side::Right, 4);
    let pending = registration::prepare(&left, &right).unwrap();

    assert_eq!(pending.request.pair_count(), 4);
    // Canvas (10,15) at scale 0.5 is image (20,30).
    assert_eq!(pending.request.left_points[0], [20.0, 30.0]);
    assert_eq!(pending.request.left_points[3], [140.0, 90.0]);
    assert_eq!(pending.request.right_points, pending.request.left_points);
}

#[test]
fn test_success_marks_every_point() {
    let mut left = with_points(Side::Left, 4);
    let mut right = with_points(Side::Right, 4);
    let endpoint = FakeRegistrar::succeeding();
    let mut presenter = RecordingPresenter::default();

    let outcome =
        registration::register_images(&mut left, &mut right, &endpoint, &mut presenter)
            .unwrap();

    assert_eq!(endpoint.calls.get(), 1);
    assert!(left.points().iter().all(|p| p.matched));
    assert!(right.points().iter().all(|p| p.matched));
    assert_eq!(presenter.shown.len(), 1);
    assert_eq!(presenter.shown[0].as_str(), BLENDED_URI);

    assert_eq!(outcome.pairs, 4);
    assert_eq!(outcome.inliers, Some(3));
    let h = outcome.homography.unwrap();
    assert_eq!(h.map_point(Point::new(1.0, 1.0)), Some(Point::new(6.0, -1.0)));

    let greens = left
        .surface()
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::Circle { color, .. } if *color == Color::MATCHED))
        .count();
    assert_eq!(greens, 4);
}

#[test]
fn test_backend_error_leaves_points_unmatched() {
    let mut left = with_points(Side::Left, 4);
    let mut right = with_points(Side::Right, 4);
    let endpoint = FakeRegistrar::failing("Registration failed: degenerate points");
    let mut presenter = RecordingPresenter::default();

    let err =
        registration::register_images(&mut left, &mut right, &endpoint, &mut presenter)
            .unwrap_err();
    match err {
        LandmarkError::RegistrationFailed(msg) => assert!(msg.contains("degenerate")),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(unmatched(&left) && unmatched(&right));
    assert!(presenter.shown.is_empty());
}

#[test]
fn test_failure_without_message_uses_generic_text() {
    let mut left = with_points(Side::Left, 4);
    let mut right = with_points(Side::Right, 4);
    let pending = registration::prepare(&left, &right).unwrap();
    let mut presenter = RecordingPresenter::default();

    let err = registration::apply(
        &mut left,
        &mut right,
        &pending,
        RegistrationResponse::default(),
        &mut presenter,
    )
    .unwrap_err();
    match err {
        LandmarkError::RegistrationFailed(msg) => assert!(!msg.is_empty()),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_transport_failure_leaves_points_unmatched() {
    let mut left = with_points(Side::Left, 5);
    let mut right = with_points(Side::Right, 5);
    let endpoint = FakeRegistrar::unreachable();
    let mut presenter = RecordingPresenter::default();

    let err =
        registration::register_images(&mut left, &mut right, &endpoint, &mut presenter)
            .unwrap_err();
    assert!(matches!(err, LandmarkError::RegistrationFailed(_)));
    assert_eq!(endpoint.calls.get(), 1);
    assert!(unmatched(&left) && unmatched(&right));
}

#[test]
fn test_success_without_preview_still_matches() {
    let mut left = with_points(Side::Left, 4);
    let mut right = with_points(Side::Right, 4);
    let pending = registration::prepare(&left, &right).unwrap();
    let mut presenter = RecordingPresenter::default();
    let response = RegistrationResponse {
        success: true,
        ..Default::default()
    };

    let outcome =
        registration::apply(&mut left, &mut right, &pending, response, &mut presenter).unwrap();
    assert_eq!(outcome.pairs, 4);
    assert!(outcome.blended.is_none());
    assert!(left.points().iter().all(|p| p.matched));
    assert!(right.points().iter().all(|p| p.matched));
    assert!(presenter.shown.is_empty());
}

#[test]
fn test_reply_for_changed_points_is_discarded() {
    let mut left = with_points(Side::Left, 4);
    let mut right = with_points(Side::Right, 4);
    let pending = registration::prepare(&left, &right).unwrap();

    // User keeps clicking while the request is in flight.
    right.click(Point::new(300.0, 200.0));

    let mut presenter = RecordingPresenter::default();
    let response = RegistrationResponse {
        success: true,
        blended_image: Some(BLENDED_URI.to_string()),
        ..Default::default()
    };
    let err = registration::apply(&mut left, &mut right, &pending, response, &mut presenter)
        .unwrap_err();
    assert!(matches!(err, LandmarkError::RegistrationFailed(_)));
    assert!(unmatched(&left) && unmatched(&right));
    assert!(presenter.shown.is_empty());
}

#[test]
fn test_request_json_shape() {
    let left = with_points(Side::Left, 4);
    let right = with_points(Side::Right, 4);
    let pending = registration::prepare(&left, &right).unwrap();
    let json = serde_json::to_value(&pending.request).unwrap();
    assert_eq!(json["leftPoints"].as_array().unwrap().len(), 4);
    assert_eq!(json["rightPoints"][1], serde_json::json!([60.0, 50.0]));
}

#[test]
fn test_response_parses_backend_reply() {
    let body = r#"{
        "success": true,
        "blendedImage": "data:image/png;base64,AAAA",
        "homography": [[1,0,0],[0,1,0],[0,0,1]],
        "status": [[1],[1],[1],[0]]
    }"#;
    let response: RegistrationResponse = serde_json::from_str(body).unwrap();
    assert!(response.success);
    assert_eq!(response.blended_image.as_deref(), Some("data:image/png;base64,AAAA"));
    assert_eq!(response.status.unwrap().len(), 4);
}

#[test]
fn test_response_error_body_without_success_field() {
    let response: RegistrationResponse =
        serde_json::from_str(r#"{"error": "At least 4 point pairs are required"}"#).unwrap();
    assert!(!response.success);
    assert!(response.error.is_some());
}
