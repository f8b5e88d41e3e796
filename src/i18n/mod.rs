// SPDX-License-Identifier: MPL-2.0
//! Internationalization support using the Fluent localization system.
//!
//! Translation files live in `assets/i18n/<locale>.ftl` and are embedded in
//! the binary. The active locale comes from the CLI, then the config file,
//! then the operating system, falling back to `en-US`.

pub mod fluent;
