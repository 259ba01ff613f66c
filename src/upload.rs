use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::info;

use crate::utils::rewrite_upload_url;

/// Client for the file-upload collaborator. Uploaded files land under
/// /uploads/ but are served under /static/, so every returned URL is
/// rewritten before use.
pub struct UploadClient {
    base_url: String,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    pub url: Option<String>,
    pub urls: Option<Vec<String>>,
}

// The server answers with `url` for a single file and `urls` for a batch.
pub fn resolve_upload_url(response: &UploadResponse) -> Result<String, String> {
    if let Some(url) = &response.url {
        return Ok(rewrite_upload_url(url));
    }
    if let Some(first) = response.urls.as_ref().and_then(|urls| urls.first()) {
        return Ok(rewrite_upload_url(first));
    }
    Err("invalid upload response format".to_string())
}

impl UploadClient {
    pub fn new(base_url: String, http: reqwest::Client) -> Self {
        UploadClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    pub async fn upload_file(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, String> {
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part("file", part);

        let url = format!("{}/upload", self.base_url);
        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| format!("upload request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("upload failed: {}", response.status()));
        }

        let body = response
            .json::<UploadResponse>()
            .await
            .map_err(|e| format!("upload response parse failed: {}", e))?;

        let file_url = resolve_upload_url(&body)?;
        info!("uploaded {} to {}", file_name, file_url);
        Ok(file_url)
    }
}
