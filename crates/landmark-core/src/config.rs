use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_DRAG_THRESHOLD, DEFAULT_LABEL_SIZE, DEFAULT_MARKER_RADIUS, DEFAULT_REGISTER_PATH,
    DEFAULT_SERVER_URL, DEFAULT_UPLOAD_PATH, DEFAULT_ZOOM_STEP,
};
use crate::error::{LandmarkError, Result};

/// Top-level configuration, read from TOML. Every field has a default.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub viewer: ViewerConfig,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| LandmarkError::Config(e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| LandmarkError::Config(e.to_string()))
    }
}

/// Where the upload and registration routes live.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub base_url: String,
    pub upload_path: String,
    pub register_path: String,
    /// Request timeout in seconds. Absent means requests may run indefinitely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVER_URL.to_string(),
            upload_path: DEFAULT_UPLOAD_PATH.to_string(),
            register_path: DEFAULT_REGISTER_PATH.to_string(),
            timeout_secs: None,
        }
    }
}

impl ServerConfig {
    pub fn upload_url(&self) -> String {
        join_url(&self.base_url, &self.upload_path)
    }

    pub fn register_url(&self) -> String {
        join_url(&self.base_url, &self.register_path)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Interaction and marker appearance settings for both viewports.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Factor applied by one zoom-in step; zoom-out uses its inverse.
    pub zoom_step: f64,
    /// Marker radius in screen pixels.
    pub marker_radius: f64,
    /// Pointer travel in screen pixels that turns a press into a pan.
    pub drag_threshold: f64,
    /// Index label size in screen pixels.
    pub label_size: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            zoom_step: DEFAULT_ZOOM_STEP,
            marker_radius: DEFAULT_MARKER_RADIUS,
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            label_size: DEFAULT_LABEL_SIZE,
        }
    }
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}
