// SPDX-License-Identifier: MPL-2.0
//! Wire models of the image service.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Opaque image identifier, unique within one list response.
///
/// The backend may send it as a JSON string or an integer; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageId(String);

impl ImageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ImageId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => ImageId(text),
            Raw::Signed(n) => ImageId(n.to_string()),
            Raw::Unsigned(n) => ImageId(n.to_string()),
        })
    }
}

/// Upload timestamp as sent by the backend.
///
/// Offsets are honoured when present; naive timestamps are UTC because the
/// service records them with `utcnow()`. Anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadDate {
    Parsed(DateTime<Utc>),
    Raw(String),
}

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Display pattern for upload timestamps.
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

impl UploadDate {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
            return UploadDate::Parsed(with_offset.with_timezone(&Utc));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
            .map(|naive| UploadDate::Parsed(naive.and_utc()))
            .unwrap_or_else(|| UploadDate::Raw(raw.to_string()))
    }

    /// Formats the timestamp in the given time zone.
    pub fn format_in<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        match self {
            UploadDate::Parsed(utc) => utc.with_timezone(tz).format(DISPLAY_FORMAT).to_string(),
            UploadDate::Raw(raw) => raw.clone(),
        }
    }

    /// Formats the timestamp in the machine's local time zone.
    pub fn to_local_string(&self) -> String {
        self.format_in(&chrono::Local)
    }
}

impl<'de> Deserialize<'de> for UploadDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(UploadDate::parse(&raw))
    }
}

/// An image record owned by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Image {
    pub id: ImageId,
    pub url: String,
    pub filename: String,
    #[serde(default)]
    pub description: Option<String>,
    pub upload_date: UploadDate,
}

impl Image {
    /// Description to show, treating an empty string like a missing one.
    pub fn description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .filter(|description| !description.is_empty())
    }
}

/// Response of the form login endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}
