//! Boundary collaborators: the image upload route and the registration route.
//!
//! The core only talks to these traits. [`crate::http::HttpBackend`] is the
//! network implementation; tests substitute in-memory fakes.

use serde::{Deserialize, Serialize};

use crate::error::{LandmarkError, Result};
use crate::landmark::Side;
use crate::registration::{RegistrationRequest, RegistrationResponse};

/// What a successful upload hands back.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadReceipt {
    /// Server-side identifier, if the backend returned one. Informational only.
    pub image_id: Option<String>,
}

/// Upload response envelope: `{ success, error?, image_id? }`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
}

impl UploadResponse {
    /// Only the `success`/`error` flag decides the outcome.
    pub fn into_result(self) -> Result<UploadReceipt> {
        if self.success {
            Ok(UploadReceipt {
                image_id: self.image_id,
            })
        } else {
            Err(LandmarkError::UploadFailed(
                self.error
                    .unwrap_or_else(|| "server rejected the image".to_string()),
            ))
        }
    }
}

pub trait UploadEndpoint {
    /// Submit image bytes tagged with the side they belong to.
    ///
    /// Transport failures and server rejections both map to
    /// [`LandmarkError::UploadFailed`].
    fn upload(&self, side: Side, file_name: &str, bytes: &[u8]) -> Result<UploadReceipt>;
}

pub trait RegistrationEndpoint {
    /// One request/response exchange. No retries.
    ///
    /// A reply that parsed is returned as-is even when `success` is false;
    /// transport and parse failures map to [`LandmarkError::RegistrationFailed`].
    fn register(&self, request: &RegistrationRequest) -> Result<RegistrationResponse>;
}
