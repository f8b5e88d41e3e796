// SPDX-License-Identifier: MPL-2.0
//! Bearer-token session persistence.
//!
//! The session is a single `token -> string` entry that survives restarts.
//! It is written by the login screen, read before every authorized request and
//! removed on logout. The store is handed to the application as an explicit
//! value so tests can substitute [`MemorySessionStore`].
//!
//! The file-backed store keeps the entry in CBOR next to the other application
//! state, in the data directory resolved by [`paths`](crate::app::paths).

use crate::app::paths;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Session file name within the app data directory.
const SESSION_FILE: &str = "session.cbor";

/// Opaque credential sent as `Authorization: Bearer <token>`.
///
/// No format or expiry checks happen locally; the backend is the judge.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

/// Persistent storage for the session token.
pub trait SessionStore: Send + Sync {
    /// Reads the persisted token, if any.
    fn get_token(&self) -> Option<BearerToken>;

    /// Persists a token, replacing the previous one.
    fn set_token(&self, token: BearerToken) -> Result<()>;

    /// Deletes the persisted token. Never fails from the caller's view:
    /// storage problems are logged and the session is considered gone.
    fn clear_token(&self);
}

/// On-disk layout of the session file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionRecord {
    #[serde(default)]
    token: Option<String>,
}

/// Session store backed by a CBOR file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Opens the store at the default data directory.
    pub fn open() -> Result<Self> {
        Self::open_in(None)
    }

    /// Opens the store in a custom directory (tests, portable installs).
    pub fn open_in(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = paths::get_app_data_dir_with_override(base_dir)
            .ok_or_else(|| Error::Io("could not determine data directory".to_string()))?;
        path.push(SESSION_FILE);
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_record(&self) -> Result<SessionRecord> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(SessionRecord::default()),
            Err(err) => return Err(err.into()),
        };
        ciborium::from_reader(BufReader::new(file)).map_err(|e| Error::Decode(e.to_string()))
    }

    fn write_record(&self, record: &SessionRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = fs::File::create(&self.path)?;
        ciborium::into_writer(record, BufWriter::new(file)).map_err(|e| Error::Io(e.to_string()))
    }
}

impl SessionStore for FileSessionStore {
    fn get_token(&self) -> Option<BearerToken> {
        match self.read_record() {
            Ok(record) => record
                .token
                .filter(|token| !token.is_empty())
                .map(BearerToken),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "unreadable session file");
                None
            }
        }
    }

    fn set_token(&self, token: BearerToken) -> Result<()> {
        self.write_record(&SessionRecord {
            token: Some(token.0),
        })?;
        tracing::debug!(path = %self.path.display(), "session token stored");
        Ok(())
    }

    fn clear_token(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "session token cleared"),
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => {
                // Fall back to overwriting so a stale token cannot be read back
                tracing::warn!(error = %err, "could not remove session file, overwriting");
                if let Err(err) = self.write_record(&SessionRecord::default()) {
                    tracing::error!(error = %err, "failed to clear session token");
                }
            }
        }
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<BearerToken>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(BearerToken::new(token))),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get_token(&self) -> Option<BearerToken> {
        self.token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn set_token(&self, token: BearerToken) -> Result<()> {
        *self
            .token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token);
        Ok(())
    }

    fn clear_token(&self) {
        *self
            .token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_means_no_token() {
        let dir = tempdir().expect("failed to create temp dir");
        let store = FileSessionStore::open_in(Some(dir.path().to_path_buf())).unwrap();
        assert!(store.get_token().is_none());
    }

    #[test]
    fn token_survives_reopening_the_store() {
        let dir = tempdir().expect("failed to create temp dir");
        let base = Some(dir.path().join("nested"));

        FileSessionStore::open_in(base.clone())
            .unwrap()
            .set_token(BearerToken::new("abc.def"))
            .expect("set_token should create directories");

        let reopened = FileSessionStore::open_in(base).unwrap();
        assert_eq!(reopened.get_token(), Some(BearerToken::new("abc.def")));
    }

    #[test]
    fn clear_token_removes_the_entry() {
        let dir = tempdir().expect("failed to create temp dir");
        let store = FileSessionStore::open_in(Some(dir.path().to_path_buf())).unwrap();
        store.set_token(BearerToken::new("abc")).unwrap();

        store.clear_token();

        assert!(store.get_token().is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn clear_token_without_session_is_harmless() {
        let dir = tempdir().expect("failed to create temp dir");
        let store = FileSessionStore::open_in(Some(dir.path().to_path_buf())).unwrap();
        store.clear_token();
        assert!(store.get_token().is_none());
    }

    #[test]
    fn corrupted_file_reads_as_no_token() {
        let dir = tempdir().expect("failed to create temp dir");
        let store = FileSessionStore::open_in(Some(dir.path().to_path_buf())).unwrap();
        fs::write(store.path(), b"\xff\xff not cbor").unwrap();
        assert!(store.get_token().is_none());
    }

    #[test]
    fn debug_output_hides_the_secret() {
        let token = BearerToken::new("super-secret");
        assert!(!format!("{token:?}").contains("super-secret"));
    }

    #[test]
    fn memory_store_round_trips_and_clears() {
        let store = MemorySessionStore::new();
        assert!(store.get_token().is_none());
        store.set_token(BearerToken::new("t")).unwrap();
        assert_eq!(store.get_token().map(|t| t.as_str().to_string()), Some("t".into()));
        store.clear_token();
        assert!(store.get_token().is_none());
    }
}
