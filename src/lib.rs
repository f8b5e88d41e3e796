// SPDX-License-Identifier: MPL-2.0
//! `image_dashboard` is a desktop client for a remote image service built
//! with the Iced GUI framework.
//!
//! It lists the signed-in user's images as cards, uploads new ones, and keeps
//! the session token on disk between runs.

pub mod app;
pub mod config;
pub mod error;
pub mod gateway;
pub mod i18n;
pub mod session;
pub mod ui;
