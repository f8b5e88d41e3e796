// SPDX-License-Identifier: MPL-2.0
//! Async side effects run on behalf of the screens.
//!
//! Each function is a plain future so it can be wrapped in an iced `Task` by
//! the update loop or awaited directly in tests.

use crate::error::{Error, Result};
use crate::gateway::{asset, Image, ImageGateway};
use crate::session::{BearerToken, SessionStore};
use crate::ui::dashboard::SelectedFile;
use iced::widget::image::Handle;
use std::sync::Arc;

/// File extensions offered by the upload picker.
pub const PICKER_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "webp", "bmp"];

fn require_token(session: &dyn SessionStore) -> Result<BearerToken> {
    session.get_token().ok_or(Error::Auth { status: None })
}

pub async fn list_images(
    gateway: Arc<dyn ImageGateway>,
    session: Arc<dyn SessionStore>,
) -> Result<Vec<Image>> {
    let token = require_token(session.as_ref())?;
    gateway.list_images(&token).await
}

/// Reads the selected file and uploads it.
pub async fn upload(
    gateway: Arc<dyn ImageGateway>,
    session: Arc<dyn SessionStore>,
    file: SelectedFile,
) -> Result<()> {
    let token = require_token(session.as_ref())?;
    let bytes = tokio::fs::read(&file.path).await?;
    gateway.upload_image(&token, bytes, &file.filename).await
}

pub async fn login(
    gateway: Arc<dyn ImageGateway>,
    email: String,
    password: String,
) -> Result<BearerToken> {
    gateway.login(&email, &password).await
}

/// Downloads and decodes one asset off the UI thread.
pub async fn load_asset(gateway: Arc<dyn ImageGateway>, url: String) -> Result<Handle> {
    let bytes = gateway.fetch_asset(&url).await?;
    let decoded = tokio::task::spawn_blocking(move || asset::decode(&bytes))
        .await
        .map_err(|e| Error::Decode(e.to_string()))??;
    Ok(Handle::from_rgba(decoded.width, decoded.height, decoded.pixels))
}

/// Opens the native file picker filtered to image files.
pub async fn pick_file(filter_name: String) -> Option<SelectedFile> {
    rfd::AsyncFileDialog::new()
        .add_filter(filter_name, &PICKER_EXTENSIONS[..])
        .pick_file()
        .await
        .and_then(|handle| SelectedFile::from_path(handle.path()))
}
