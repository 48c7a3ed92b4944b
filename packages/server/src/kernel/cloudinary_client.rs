use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::{BasePhotoProcessor, PhotoError};
use crate::common::Credential;
use crate::config::CloudinaryConfig;
use crate::domains::content::ProcessedPhoto;
use crate::domains::jobs::PhotoRef;

const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

/// Downloads job photos and re-hosts them on Cloudinary through an unsigned
/// upload preset. The preset decides transformations and folder.
pub struct CloudinaryPhotoProcessor {
    cloud_name: String,
    upload_preset: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct UploadRequest<'a> {
    file: &'a str,
    upload_preset: &'a str,
    public_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    public_id: String,
    secure_url: String,
}

impl CloudinaryPhotoProcessor {
    pub fn new(cloud_name: String, upload_preset: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            cloud_name,
            upload_preset,
            client,
        })
    }

    fn upload_url(&self) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/image/upload",
            self.cloud_name
        )
    }

    async fn download(&self, photo: &PhotoRef, credential: &Credential) -> Result<(Vec<u8>, String), PhotoError> {
        let response = self
            .client
            .get(&photo.url)
            .bearer_auth(credential.expose())
            .send()
            .await
            .map_err(|e| PhotoError::Rejected(format!("download failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(PhotoError::Rejected(format!(
                "download returned {}",
                response.status()
            )));
        }

        let content_type = photo
            .content_type
            .clone()
            .or_else(|| {
                response
                    .headers()
                    .get(reqwest::header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

        let bytes = response
            .bytes()
            .await
            .map_err(|e| PhotoError::Rejected(format!("download interrupted: {}", e)))?;

        Ok((bytes.to_vec(), content_type))
    }
}

/// Inline an image as a data URI, the upload form Cloudinary accepts for raw bytes.
pub fn data_uri(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", content_type, STANDARD.encode(bytes))
}

/// Map an upload status to how far the failure reaches. Credential and
/// server problems hit every photo; anything else is about this one.
fn classify_upload_failure(status: StatusCode, body: String) -> PhotoError {
    let message = format!("Cloudinary upload error {}: {}", status, body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => {
            PhotoError::Unavailable(message)
        }
        s if s.is_server_error() => PhotoError::Unavailable(message),
        _ => PhotoError::Rejected(message),
    }
}

#[async_trait]
impl BasePhotoProcessor for CloudinaryPhotoProcessor {
    async fn process(
        &self,
        photo: &PhotoRef,
        credential: &Credential,
    ) -> std::result::Result<ProcessedPhoto, PhotoError> {
        let (bytes, content_type) = self.download(photo, credential).await?;
        let file = data_uri(&content_type, &bytes);

        let response = self
            .client
            .post(self.upload_url())
            .form(&UploadRequest {
                file: &file,
                upload_preset: &self.upload_preset,
                public_id: &photo.id,
            })
            .send()
            .await
            .map_err(|e| PhotoError::Unavailable(format!("Cloudinary unreachable: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(classify_upload_failure(status, body));
        }

        let upload: UploadResponse = response
            .json()
            .await
            .map_err(|e| PhotoError::Rejected(format!("Failed to parse Cloudinary response: {}", e)))?;

        tracing::debug!(photo_id = %photo.id, public_id = %upload.public_id, "Photo uploaded");
        Ok(ProcessedPhoto::success(
            &photo.id,
            upload.public_id,
            upload.secure_url,
        ))
    }
}

/// Passes photos through untouched when no image host is configured.
pub struct NoopPhotoProcessor;

#[async_trait]
impl BasePhotoProcessor for NoopPhotoProcessor {
    async fn process(
        &self,
        photo: &PhotoRef,
        _credential: &Credential,
    ) -> std::result::Result<ProcessedPhoto, PhotoError> {
        Ok(ProcessedPhoto::success(&photo.id, &photo.id, &photo.url))
    }

    fn is_configured(&self) -> bool {
        false
    }
}

pub fn create_photo_processor(config: Option<&CloudinaryConfig>) -> Result<Arc<dyn BasePhotoProcessor>> {
    match config {
        Some(cloudinary) => {
            tracing::info!(cloud_name = %cloudinary.cloud_name, "Photo processing via Cloudinary");
            Ok(Arc::new(CloudinaryPhotoProcessor::new(
                cloudinary.cloud_name.clone(),
                cloudinary.upload_preset.clone(),
            )?))
        }
        None => {
            tracing::warn!("Cloudinary not configured, photos will be used as-is");
            Ok(Arc::new(NoopPhotoProcessor))
        }
    }
}
