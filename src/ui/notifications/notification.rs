// SPDX-License-Identifier: MPL-2.0
//! A single toast: what it says, how loud it is and how long it stays up.

use crate::error::Error;
use crate::ui::design_tokens::palette;
use iced::Color;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    fn fresh() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    /// Stays up until the user closes it.
    Error,
}

impl Severity {
    #[must_use]
    pub fn color(self) -> Color {
        match self {
            Severity::Success => palette::SUCCESS_500,
            Severity::Info => palette::INFO_500,
            Severity::Warning => palette::WARNING_500,
            Severity::Error => palette::ERROR_500,
        }
    }

    /// How long a toast of this severity stays on screen once shown.
    #[must_use]
    pub fn lifetime(self) -> Option<Duration> {
        match self {
            Severity::Success | Severity::Info => Some(Duration::from_secs(3)),
            Severity::Warning => Some(Duration::from_secs(5)),
            Severity::Error => None,
        }
    }
}

/// A toast waiting in the queue or on screen.
///
/// The text is an i18n key resolved at render time, so a language switch
/// also applies to toasts already raised.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    message_key: String,
    message_args: Vec<(String, String)>,
    /// Set when the toast first becomes visible; queued toasts have no clock.
    shown_at: Option<Instant>,
}

impl Notification {
    fn with_severity(severity: Severity, message_key: impl Into<String>) -> Self {
        Self {
            id: NotificationId::fresh(),
            severity,
            message_key: message_key.into(),
            message_args: Vec::new(),
            shown_at: None,
        }
    }

    pub fn success(message_key: impl Into<String>) -> Self {
        Self::with_severity(Severity::Success, message_key)
    }

    pub fn info(message_key: impl Into<String>) -> Self {
        Self::with_severity(Severity::Info, message_key)
    }

    pub fn warning(message_key: impl Into<String>) -> Self {
        Self::with_severity(Severity::Warning, message_key)
    }

    pub fn error(message_key: impl Into<String>) -> Self {
        Self::with_severity(Severity::Error, message_key)
    }

    /// Builds the error toast for a failed operation. HTTP failures carry
    /// their status code into the message.
    pub fn from_error(error: &Error) -> Self {
        let notification = Self::error(error.i18n_key());
        match error {
            Error::Http { status } => notification.with_arg("status", status.to_string()),
            _ => notification,
        }
    }

    #[must_use]
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.message_args.push((key.into(), value.into()));
        self
    }

    pub fn id(&self) -> NotificationId {
        self.id
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    pub fn message_args(&self) -> &[(String, String)] {
        &self.message_args
    }

    /// Starts the display clock. Later calls keep the first instant.
    pub(super) fn mark_shown(&mut self, now: Instant) {
        self.shown_at.get_or_insert(now);
    }

    /// True once the toast has been on screen for its whole lifetime.
    #[must_use]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match (self.shown_at, self.severity.lifetime()) {
            (Some(shown_at), Some(lifetime)) => now.saturating_duration_since(shown_at) >= lifetime,
            _ => false,
        }
    }
}
