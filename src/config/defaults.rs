// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for configuration constants.

// ==========================================================================
// API Defaults
// ==========================================================================

/// Base URL of the image service when nothing overrides it.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8002";

/// Environment variable overriding the API base URL.
pub const ENV_API_BASE_URL: &str = "IMAGE_DASHBOARD_API_URL";

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("ImageDashboard/", env!("CARGO_PKG_VERSION"));

// ==========================================================================
// Window Defaults
// ==========================================================================

pub const WINDOW_DEFAULT_WIDTH: f32 = 960.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 720.0;
pub const MIN_WINDOW_WIDTH: f32 = 480.0;
pub const MIN_WINDOW_HEIGHT: f32 = 400.0;

// ==========================================================================
// Notification Defaults
// ==========================================================================

/// Interval between notification auto-dismiss checks (in milliseconds).
pub const NOTIFICATION_TICK_MS: u64 = 250;
