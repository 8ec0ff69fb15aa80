//! Image hosting upload.
//!
//! Asset images and profile photos live on an external hosting service, not
//! on the AssetVerse API. The form flow is: upload the file here, then put
//! the returned URL into the asset/profile payload.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::config::UploadConfig;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    success: bool,
    #[serde(default)]
    data: Option<UploadData>,
}

#[derive(Debug, Deserialize)]
struct UploadData {
    display_url: String,
}

/// Upload a local image file, returning its hosted URL.
pub async fn upload_image(
    client: &reqwest::Client,
    config: &UploadConfig,
    path: &Path,
) -> Result<String> {
    let api_key = config
        .api_key
        .as_deref()
        .context("No image-hosting API key configured (assetverse config set upload.api_key <key>)")?;

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string();

    let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
    let form = reqwest::multipart::Form::new().part("image", part);

    let response = client
        .post(format!("{}?key={}", config.endpoint, api_key))
        .multipart(form)
        .send()
        .await?;

    if !response.status().is_success() {
        bail!("Image upload failed: {}", response.status());
    }

    let body: UploadResponse = response.json().await?;
    match body.data {
        Some(data) if body.success => Ok(data.display_url),
        _ => bail!("Image upload rejected by the hosting service"),
    }
}
