// SPDX-License-Identifier: MPL-2.0
//! Error taxonomy shared by the gateway, the session store and configuration.
//!
//! Errors travel inside iced messages, so every variant only carries owned,
//! cloneable data (status codes and rendered messages) rather than the source
//! error values.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Transport-level failure: DNS, connection refused, TLS, broken body.
    #[error("Network error: {0}")]
    Network(String),

    /// Credentials rejected by the backend (401/403) or no token available.
    #[error("Authentication rejected (status {status:?})")]
    Auth { status: Option<u16> },

    /// Request refused as malformed (400/422).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any other non-success status.
    #[error("Unexpected HTTP status {status}")]
    Http { status: u16 },

    /// The response body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Maps a non-success HTTP status and its body to the matching variant.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 | 403 => Error::Auth {
                status: Some(status),
            },
            400 | 422 => Error::Validation(if body.is_empty() {
                format!("status {status}")
            } else {
                body.to_string()
            }),
            _ => Error::Http { status },
        }
    }

    /// Returns the i18n key used when surfacing this error in a notification.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Error::Network(_) => "notification-error-network",
            Error::Auth { .. } => "notification-error-auth",
            Error::Validation(_) => "notification-error-validation",
            Error::Http { .. } => "notification-error-http",
            Error::Decode(_) => "notification-error-decode",
            Error::Io(_) => "notification-error-io",
            Error::Config(_) => "notification-error-config",
        }
    }

    /// Returns true for errors that mean the session is no longer usable.
    pub fn is_auth(&self) -> bool {
        matches!(self, Error::Auth { .. })
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Error::Decode(err.to_string());
        }
        if let Some(status) = err.status() {
            return Error::from_status(status.as_u16(), "");
        }
        Error::Network(err.to_string())
    }
}
