/// Minimum number of point pairs the homography solver needs.
pub const MIN_CORRESPONDENCES: usize = 4;

/// Multiplicative step used by the zoom in/out controls.
pub const DEFAULT_ZOOM_STEP: f64 = 1.2;

/// Landmark marker radius in screen pixels.
pub const DEFAULT_MARKER_RADIUS: f64 = 5.0;

/// Landmark index label font size in screen pixels.
pub const DEFAULT_LABEL_SIZE: f64 = 10.0;

/// Pointer travel (screen pixels, measured from the press position) beyond
/// which a press/release sequence counts as a pan rather than a click.
pub const DEFAULT_DRAG_THRESHOLD: f64 = 3.0;

/// Backend root used when no configuration is given.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Image upload route, relative to the server root.
pub const DEFAULT_UPLOAD_PATH: &str = "/upload";

/// Registration route, relative to the server root.
pub const DEFAULT_REGISTER_PATH: &str = "/register_images";

/// Message shown when the backend reports failure without a reason.
pub const GENERIC_REGISTRATION_ERROR: &str = "Failed to register images. Please try again.";
