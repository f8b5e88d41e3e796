// SPDX-License-Identifier: MPL-2.0
//! User interface components following the Elm-style "state down, messages up"
//! pattern.
//!
//! # Screens
//!
//! - [`login`] - Email/password form exchanging credentials for a token
//! - [`dashboard`] - Image grid with the upload form
//!
//! # Shared Infrastructure
//!
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode
//! - [`notifications`] - Toast notification system for user feedback

pub mod dashboard;
pub mod design_tokens;
pub mod login;
pub mod notifications;
pub mod theming;
