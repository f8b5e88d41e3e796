// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::config::Config;
use crate::gateway::ImageGateway;
use crate::session::SessionStore;
use crate::ui::dashboard::{self, ViewId};
use crate::ui::login;
use crate::ui::notifications;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Login(login::Message),
    /// A dashboard message, tagged with the dashboard instance it belongs to.
    Dashboard {
        view: ViewId,
        message: dashboard::Message,
    },
    Notification(notifications::NotificationMessage),
    Tick(Instant),
}

impl Message {
    pub fn dashboard(view: ViewId) -> impl Fn(dashboard::Message) -> Message + Clone + Send + 'static {
        move |message| Message::Dashboard { view, message }
    }
}

/// Everything the application needs at startup, assembled by the launcher.
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    pub config: Config,
    /// i18n keys of problems met while assembling the flags, shown as
    /// warnings once the window is up.
    pub startup_warnings: Vec<String>,
    pub gateway: Arc<dyn ImageGateway>,
    pub session: Arc<dyn SessionStore>,
}

impl fmt::Debug for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flags")
            .field("lang", &self.lang)
            .field("config", &self.config)
            .field("startup_warnings", &self.startup_warnings)
            .finish_non_exhaustive()
    }
}
