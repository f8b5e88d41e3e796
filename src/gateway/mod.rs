// SPDX-License-Identifier: MPL-2.0
//! Client for the remote image service.
//!
//! All network traffic goes through the [`ImageGateway`] trait:
//!
//! - `GET {base}/images` lists the user's images
//! - `POST {base}/upload-image` uploads one file as multipart field `file`
//! - `POST {base}/token` exchanges credentials for a bearer token
//! - plain `GET` on an image URL downloads the asset itself
//!
//! Calls are single-shot: no retry, no custom timeout, no cancellation. Every
//! failure is returned to the caller as an [`Error`] and never retried here.

pub mod asset;
pub mod models;

pub use models::{Image, ImageId, TokenResponse, UploadDate};

use crate::config::USER_AGENT;
use crate::error::{Error, Result};
use crate::session::BearerToken;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};

/// Operations the application needs from the image service.
#[async_trait]
pub trait ImageGateway: Send + Sync {
    /// Lists the images visible to the token's owner, in backend order.
    async fn list_images(&self, token: &BearerToken) -> Result<Vec<Image>>;

    /// Uploads one file. No client-side size or type validation.
    async fn upload_image(&self, token: &BearerToken, bytes: Vec<u8>, filename: &str)
        -> Result<()>;

    /// Exchanges credentials for a session token.
    async fn login(&self, username: &str, password: &str) -> Result<BearerToken>;

    /// Downloads the raw bytes behind an image URL.
    async fn fetch_asset(&self, url: &str) -> Result<Vec<u8>>;
}

/// [`ImageGateway`] over HTTP with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    /// Builds a gateway for the given base URL (trailing slashes ignored).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Turns non-2xx responses into errors, keeping the body for validation errors.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::warn!(status = status.as_u16(), "image service rejected request");
    Err(Error::from_status(status.as_u16(), &body))
}

#[async_trait]
impl ImageGateway for HttpGateway {
    async fn list_images(&self, token: &BearerToken) -> Result<Vec<Image>> {
        let url = self.endpoint("/images");
        tracing::debug!(%url, "listing images");

        let response = self
            .client
            .get(&url)
            .bearer_auth(token.as_str())
            .send()
            .await?;
        let images: Vec<Image> = check_status(response).await?.json().await?;

        tracing::debug!(count = images.len(), "images listed");
        Ok(images)
    }

    async fn upload_image(
        &self,
        token: &BearerToken,
        bytes: Vec<u8>,
        filename: &str,
    ) -> Result<()> {
        let url = self.endpoint("/upload-image");
        tracing::debug!(%url, filename, size = bytes.len(), "uploading image");

        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(asset::mime_for_filename(filename))
            .map_err(|e| Error::Validation(e.to_string()))?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token.as_str())
            .multipart(form)
            .send()
            .await?;
        check_status(response).await?;

        tracing::info!(filename, "image uploaded");
        Ok(())
    }

    async fn login(&self, username: &str, password: &str) -> Result<BearerToken> {
        let url = self.endpoint("/token");
        tracing::debug!(%url, "requesting session token");

        let response = self
            .client
            .post(&url)
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;
        let token: TokenResponse = check_status(response).await?.json().await?;

        if token.access_token.is_empty() {
            return Err(Error::Decode("empty access_token".to_string()));
        }
        Ok(BearerToken::new(token.access_token))
    }

    async fn fetch_asset(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        let bytes = check_status(response).await?.bytes().await?;
        Ok(bytes.to_vec())
    }
}
