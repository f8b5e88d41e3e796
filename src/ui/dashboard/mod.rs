// SPDX-License-Identifier: MPL-2.0
//! Dashboard screen: the user's image grid and the upload form.
//!
//! The component owns no I/O. `update` mutates the local state and returns an
//! [`Event`] describing the side effect the application must run (list fetch,
//! file picker, upload, asset downloads, logout). Results come back as
//! [`Message`]s, stamped by the application with the [`ViewId`] of the
//! dashboard that asked for them. List responses also carry the
//! [`ListRequest`] they answer; only the newest request may replace the grid.
//!
//! Upload flow:
//!
//! ```text
//! Idle --FilePicked(Some)--> FileSelected --Upload--> Uploading
//!   ^                             ^                       |
//!   |                             +------- failure -------+
//!   +---------------------------- success ----------------+  (one re-list)
//! ```

mod card;
mod view;

pub use card::{description_text, uploaded_text};
pub use view::{view, ViewContext};

use crate::error::Error;
use crate::gateway::asset;
use crate::gateway::{Image, ImageId};
use iced::widget::image::Handle;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Identity of one mounted dashboard.
///
/// A new id is issued every time a dashboard is created, so results that
/// were requested by a dashboard that has since been torn down can be told
/// apart and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ViewId(u64);

impl ViewId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The id issued after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

/// Sequence number of one image-list fetch within a dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListRequest(u64);

/// A local file chosen for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub filename: String,
}

impl SelectedFile {
    /// Returns `None` for paths without a usable file name.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        let filename = path.file_name()?.to_str()?.to_string();
        Some(Self {
            path: path.to_path_buf(),
            filename,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadState {
    #[default]
    Idle,
    FileSelected(SelectedFile),
    Uploading(SelectedFile),
}

impl UploadState {
    pub fn selected_file(&self) -> Option<&SelectedFile> {
        match self {
            UploadState::Idle => None,
            UploadState::FileSelected(file) | UploadState::Uploading(file) => Some(file),
        }
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self, UploadState::Uploading(_))
    }
}

/// Display state of one card's image.
#[derive(Debug, Clone)]
pub enum AssetState {
    Loading,
    Ready(Handle),
    /// Download or decode failed; the placeholder is shown for good.
    Failed,
}

#[derive(Debug, Clone)]
pub enum Message {
    ImagesLoaded {
        request: ListRequest,
        result: Result<Vec<Image>, Error>,
    },
    Refresh,
    PickFile,
    FilePicked(Option<SelectedFile>),
    Upload,
    UploadFinished(Result<(), Error>),
    AssetLoaded {
        id: ImageId,
        result: Result<Handle, Error>,
    },
    Logout,
}

/// Side effects requested from the application.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    FetchImages(ListRequest),
    PickFile,
    Upload(SelectedFile),
    /// Download and decode these `(id, url)` assets.
    FetchAssets(Vec<(ImageId, String)>),
    /// The upload succeeded; `refresh` is the re-list to run.
    Uploaded {
        filename: String,
        refresh: ListRequest,
    },
    Failed(Error),
    Logout,
}

#[derive(Debug)]
pub struct State {
    id: ViewId,
    images: Vec<Image>,
    assets: HashMap<ImageId, AssetState>,
    upload: UploadState,
    loading: bool,
    /// Newest list fetch issued; older responses are discarded.
    latest_list: ListRequest,
    placeholder: Handle,
}

impl State {
    /// Mounts a dashboard; the returned event starts the initial list fetch.
    pub fn new(id: ViewId) -> (Self, Event) {
        let placeholder = asset::placeholder();
        let mut state = Self {
            id,
            images: Vec::new(),
            assets: HashMap::new(),
            upload: UploadState::Idle,
            loading: true,
            latest_list: ListRequest::default(),
            placeholder: Handle::from_rgba(
                placeholder.width,
                placeholder.height,
                placeholder.pixels,
            ),
        };
        let request = state.request_list();
        (state, Event::FetchImages(request))
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn asset(&self, id: &ImageId) -> Option<&AssetState> {
        self.assets.get(id)
    }

    pub fn upload_state(&self) -> &UploadState {
        &self.upload
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub(crate) fn placeholder(&self) -> &Handle {
        &self.placeholder
    }

    #[cfg(test)]
    pub(crate) fn latest_list(&self) -> ListRequest {
        self.latest_list
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::ImagesLoaded { request, .. } if request != self.latest_list => {
                tracing::debug!(view = %self.id, ?request, "discarding superseded image list");
                Event::None
            }
            Message::ImagesLoaded {
                result: Ok(images), ..
            } => self.replace_images(images),
            Message::ImagesLoaded {
                result: Err(error), ..
            } => {
                self.loading = false;
                tracing::warn!(view = %self.id, %error, "failed to list images");
                Event::Failed(error)
            }
            Message::Refresh => Event::FetchImages(self.request_list()),
            Message::PickFile => {
                if self.upload.is_uploading() {
                    Event::None
                } else {
                    Event::PickFile
                }
            }
            Message::FilePicked(Some(file)) => {
                if !self.upload.is_uploading() {
                    tracing::debug!(filename = %file.filename, "file selected");
                    self.upload = UploadState::FileSelected(file);
                }
                Event::None
            }
            Message::FilePicked(None) => Event::None,
            Message::Upload => match &self.upload {
                UploadState::FileSelected(file) => {
                    let file = file.clone();
                    self.upload = UploadState::Uploading(file.clone());
                    Event::Upload(file)
                }
                UploadState::Idle | UploadState::Uploading(_) => Event::None,
            },
            Message::UploadFinished(result) => self.finish_upload(result),
            Message::AssetLoaded { id, result } => {
                self.store_asset(id, result);
                Event::None
            }
            Message::Logout => Event::Logout,
        }
    }

    fn request_list(&mut self) -> ListRequest {
        self.latest_list = ListRequest(self.latest_list.0 + 1);
        self.loading = true;
        self.latest_list
    }

    /// Swaps in a fresh list. Assets already resolved for surviving ids are
    /// kept, so a failed asset is never downloaded again.
    fn replace_images(&mut self, images: Vec<Image>) -> Event {
        self.loading = false;
        tracing::debug!(view = %self.id, count = images.len(), "image list received");

        self.assets
            .retain(|id, _| images.iter().any(|image| &image.id == id));

        let mut to_fetch = Vec::new();
        for image in &images {
            if !self.assets.contains_key(&image.id) {
                self.assets.insert(image.id.clone(), AssetState::Loading);
                to_fetch.push((image.id.clone(), image.url.clone()));
            }
        }
        self.images = images;

        if to_fetch.is_empty() {
            Event::None
        } else {
            Event::FetchAssets(to_fetch)
        }
    }

    fn finish_upload(&mut self, result: Result<(), Error>) -> Event {
        let UploadState::Uploading(file) = std::mem::take(&mut self.upload) else {
            // Not waiting for an upload; nothing to resolve
            return Event::None;
        };
        match result {
            Ok(()) => Event::Uploaded {
                filename: file.filename,
                refresh: self.request_list(),
            },
            Err(error) => {
                tracing::warn!(view = %self.id, filename = %file.filename, %error, "upload failed");
                self.upload = UploadState::FileSelected(file);
                Event::Failed(error)
            }
        }
    }

    fn store_asset(&mut self, id: ImageId, result: Result<Handle, Error>) {
        // Ids dropped by a newer list are ignored
        let Some(slot) = self.assets.get_mut(&id) else {
            return;
        };
        *slot = match result {
            Ok(handle) => AssetState::Ready(handle),
            Err(error) => {
                tracing::debug!(%id, %error, "asset unavailable, showing placeholder");
                AssetState::Failed
            }
        };
    }
}
