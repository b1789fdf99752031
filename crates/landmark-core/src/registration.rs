//! Registration client: validates the two point sets, builds the request,
//! and applies the backend's reply to both viewports.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::consts::{GENERIC_REGISTRATION_ERROR, MIN_CORRESPONDENCES};
use crate::endpoint::RegistrationEndpoint;
use crate::error::{LandmarkError, Result};
use crate::presentation::{BlendedImage, Presenter};
use crate::render::Surface;
use crate::transform::Point;
use crate::viewport::Viewport;

/// Wire body: index-aligned `[x, y]` image-space pairs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub left_points: Vec<[f64; 2]>,
    pub right_points: Vec<[f64; 2]>,
}

impl RegistrationRequest {
    pub fn pair_count(&self) -> usize {
        self.left_points.len()
    }
}

/// Reply envelope. Only `success`, `blendedImage` and `error` drive behaviour.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blended_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homography: Option<Vec<Vec<f64>>>,
    /// Per-pair inlier mask from the robust estimator, e.g. `[[1],[0],[1]]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Vec<Vec<u8>>>,
}

/// 3×3 projective transform mapping left image coordinates to right.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Homography(pub [[f64; 3]; 3]);

impl Homography {
    /// Accepts only a well-formed 3×3 matrix.
    pub fn from_rows(rows: &[Vec<f64>]) -> Option<Self> {
        if rows.len() != 3 || rows.iter().any(|r| r.len() != 3) {
            return None;
        }
        let mut m = [[0.0; 3]; 3];
        for (dst, src) in m.iter_mut().zip(rows) {
            dst.copy_from_slice(src);
        }
        Some(Self(m))
    }

    /// Project a point. `None` when it maps to infinity.
    pub fn map_point(&self, p: Point) -> Option<Point> {
        let m = &self.0;
        let w = m[2][0] * p.x + m[2][1] * p.y + m[2][2];
        if w.abs() < f64::EPSILON {
            return None;
        }
        Some(Point::new(
            (m[0][0] * p.x + m[0][1] * p.y + m[0][2]) / w,
            (m[1][0] * p.x + m[1][1] * p.y + m[1][2]) / w,
        ))
    }
}

/// Result of a successful round trip.
#[derive(Clone, Debug, PartialEq)]
pub struct RegistrationOutcome {
    /// Preview reference, when the backend sent one.
    pub blended: Option<BlendedImage>,
    pub homography: Option<Homography>,
    /// Number of pairs the backend kept as inliers, when reported.
    pub inliers: Option<usize>,
    pub pairs: usize,
}

/// A validated request plus the point-set revisions it was built from.
#[derive(Clone, Debug)]
pub struct PendingRegistration {
    pub request: RegistrationRequest,
    left_revision: u64,
    right_revision: u64,
}

/// Check the correspondence preconditions and build the request.
///
/// Nothing is sent here; a failure means no request must be sent at all.
pub fn prepare<L: Surface, R: Surface>(
    left: &Viewport<L>,
    right: &Viewport<R>,
) -> Result<PendingRegistration> {
    let (l, r) = (left.points(), right.points());
    if l.len() != r.len() {
        return Err(LandmarkError::PointCountMismatch {
            left: l.len(),
            right: r.len(),
        });
    }
    if l.len() < MIN_CORRESPONDENCES {
        return Err(LandmarkError::InsufficientPoints {
            count: l.len(),
            required: MIN_CORRESPONDENCES,
        });
    }

    Ok(PendingRegistration {
        request: RegistrationRequest {
            left_points: l.iter().map(|p| p.to_pair()).collect(),
            right_points: r.iter().map(|p| p.to_pair()).collect(),
        },
        left_revision: left.revision(),
        right_revision: right.revision(),
    })
}

/// Interpret the backend's reply.
///
/// On success every point on both sides becomes matched and the preview, if
/// the reply carries one, is shown. Any failure leaves the matched flags alone. A reply for a point set
/// that has since changed is rejected rather than applied to the new set.
pub fn apply<L: Surface, R: Surface>(
    left: &mut Viewport<L>,
    right: &mut Viewport<R>,
    pending: &PendingRegistration,
    response: RegistrationResponse,
    presenter: &mut dyn Presenter,
) -> Result<RegistrationOutcome> {
    if left.revision() != pending.left_revision || right.revision() != pending.right_revision {
        warn!("points changed while registration was in flight; discarding reply");
        return Err(LandmarkError::RegistrationFailed(
            "point set changed while the request was in flight".into(),
        ));
    }

    if !response.success {
        let message = response
            .error
            .unwrap_or_else(|| GENERIC_REGISTRATION_ERROR.to_string());
        warn!(%message, "backend rejected registration");
        return Err(LandmarkError::RegistrationFailed(message));
    }

    let pairs = pending.request.pair_count();
    for i in 0..pairs {
        left.set_point_matched(i, true);
        right.set_point_matched(i, true);
    }

    let blended = response.blended_image.map(BlendedImage::new);
    match blended {
        Some(ref image) => presenter.show_blended(image),
        None => warn!("registration succeeded without a blended preview"),
    }

    let homography = response.homography.as_deref().and_then(Homography::from_rows);
    let inliers = response
        .status
        .as_ref()
        .map(|mask| mask.iter().filter(|row| row.iter().any(|&v| v != 0)).count());

    info!(pairs, inliers = ?inliers, "registration succeeded");
    Ok(RegistrationOutcome {
        blended,
        homography,
        inliers,
        pairs,
    })
}

/// Validate, submit, and apply in one blocking call.
pub fn register_images<L: Surface, R: Surface>(
    left: &mut Viewport<L>,
    right: &mut Viewport<R>,
    endpoint: &dyn RegistrationEndpoint,
    presenter: &mut dyn Presenter,
) -> Result<RegistrationOutcome> {
    let pending = prepare(left, right)?;
    let response = endpoint.register(&pending.request)?;
    apply(left, right, &pending, response, presenter)
}
