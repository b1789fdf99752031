use reqwest::blocking::{multipart, Client};
use tracing::{debug, info};

use crate::config::ServerConfig;
use crate::endpoint::{RegistrationEndpoint, UploadEndpoint, UploadReceipt, UploadResponse};
use crate::error::{LandmarkError, Result};
use crate::landmark::Side;
use crate::registration::{RegistrationRequest, RegistrationResponse};

/// Network implementation of both boundary collaborators.
///
/// Uses the blocking client: callers run it off the UI thread.
pub struct HttpBackend {
    client: Client,
    upload_url: String,
    register_url: String,
}

impl HttpBackend {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("landmark/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()
            .map_err(|e| LandmarkError::Config(e.to_string()))?;

        Ok(Self {
            client,
            upload_url: config.upload_url(),
            register_url: config.register_url(),
        })
    }
}

impl UploadEndpoint for HttpBackend {
    fn upload(&self, side: Side, file_name: &str, bytes: &[u8]) -> Result<UploadReceipt> {
        debug!(url = %self.upload_url, side = side.as_str(), len = bytes.len(), "uploading image");

        let part = multipart::Part::bytes(bytes.to_vec()).file_name(file_name.to_string());
        let form = multipart::Form::new()
            .part("image", part)
            .text("position", side.as_str());

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .map_err(|e| LandmarkError::UploadFailed(e.to_string()))?;

        let status = response.status();
        let body: UploadResponse = response.json().map_err(|e| {
            LandmarkError::UploadFailed(format!("HTTP {status}: unreadable response: {e}"))
        })?;
        body.into_result()
    }
}

impl RegistrationEndpoint for HttpBackend {
    fn register(&self, request: &RegistrationRequest) -> Result<RegistrationResponse> {
        info!(
            url = %self.register_url,
            pairs = request.left_points.len(),
            "submitting registration"
        );

        let response = self
            .client
            .post(&self.register_url)
            .json(request)
            .send()
            .map_err(|e| LandmarkError::RegistrationFailed(e.to_string()))?;

        let status = response.status();
        let body: RegistrationResponse = response.json().map_err(|e| {
            LandmarkError::RegistrationFailed(format!("HTTP {status}: unreadable response: {e}"))
        })?;
        debug!(%status, success = body.success, "registration response");
        Ok(body)
    }
}
