// SPDX-License-Identifier: MPL-2.0
//! Message handlers and the translation of screen events into tasks.

use super::{effects, App, Message, Screen};
use crate::ui::dashboard::{self, ViewId};
use crate::ui::login;
use crate::ui::notifications::Notification;
use iced::Task;

impl App {
    pub(super) fn handle_login_message(&mut self, message: login::Message) -> Task<Message> {
        if self.screen != Screen::Login {
            tracing::debug!(?message, "login message outside the login screen");
            return Task::none();
        }
        match self.login.update(message) {
            login::Event::None => Task::none(),
            login::Event::Login { email, password } => {
                tracing::info!("requesting session token");
                Task::perform(
                    effects::login(self.gateway.clone(), email, password),
                    |result| Message::Login(login::Message::Finished(result)),
                )
            }
            login::Event::LoggedIn(token) => {
                if let Err(error) = self.session.set_token(token) {
                    tracing::error!(%error, "failed to persist session token");
                    self.notifications
                        .push(Notification::error("notification-session-save-error"));
                    return Task::none();
                }
                tracing::info!("signed in");
                self.notifications.clear_key("notification-error-auth");
                self.notifications
                    .push(Notification::success("notification-login-success"));
                self.open_dashboard()
            }
            login::Event::Failed(error) => {
                self.notifications.push(Notification::from_error(&error));
                Task::none()
            }
        }
    }

    /// Mounts a fresh dashboard with a new [`ViewId`] and starts its list fetch.
    pub(super) fn open_dashboard(&mut self) -> Task<Message> {
        let view = self.next_view;
        self.next_view = view.next();

        let (state, event) = dashboard::State::new(view);
        tracing::debug!(%view, "dashboard mounted");
        self.dashboard = Some(state);
        self.screen = Screen::Dashboard;
        self.run_dashboard_event(view, event)
    }

    pub(super) fn handle_dashboard_message(
        &mut self,
        view: ViewId,
        message: dashboard::Message,
    ) -> Task<Message> {
        let Some(state) = self.dashboard.as_mut().filter(|state| state.id() == view) else {
            // The dashboard that asked for this result is gone
            tracing::debug!(%view, ?message, "discarding message for a torn down dashboard");
            return Task::none();
        };
        let event = state.update(message);
        self.run_dashboard_event(view, event)
    }

    fn run_dashboard_event(&mut self, view: ViewId, event: dashboard::Event) -> Task<Message> {
        let tag = Message::dashboard(view);
        match event {
            dashboard::Event::None => Task::none(),
            dashboard::Event::FetchImages(request) => Task::perform(
                effects::list_images(self.gateway.clone(), self.session.clone()),
                move |result| tag(dashboard::Message::ImagesLoaded { request, result }),
            ),
            dashboard::Event::PickFile => Task::perform(
                effects::pick_file(self.i18n.tr("dashboard-picker-filter")),
                move |file| tag(dashboard::Message::FilePicked(file)),
            ),
            dashboard::Event::Upload(file) => {
                tracing::info!(%view, filename = %file.filename, "uploading");
                Task::perform(
                    effects::upload(self.gateway.clone(), self.session.clone(), file),
                    move |result| tag(dashboard::Message::UploadFinished(result)),
                )
            }
            dashboard::Event::FetchAssets(assets) => {
                Task::batch(assets.into_iter().map(|(id, url)| {
                    let tag = tag.clone();
                    Task::perform(effects::load_asset(self.gateway.clone(), url), move |result| {
                        tag(dashboard::Message::AssetLoaded { id, result })
                    })
                }))
            }
            dashboard::Event::Uploaded { filename, refresh } => {
                self.notifications.push(
                    Notification::success("notification-upload-success")
                        .with_arg("filename", filename),
                );
                self.run_dashboard_event(view, dashboard::Event::FetchImages(refresh))
            }
            dashboard::Event::Failed(error) => {
                self.notifications.push(Notification::from_error(&error));
                Task::none()
            }
            dashboard::Event::Logout => {
                self.logout();
                Task::none()
            }
        }
    }

    /// Clears the session and returns to the login screen. Never fails.
    pub(super) fn logout(&mut self) {
        self.session.clear_token();
        if let Some(state) = self.dashboard.take() {
            tracing::info!(view = %state.id(), "logged out");
        }
        self.login = login::State::default();
        self.screen = Screen::Login;
        self.notifications
            .push(Notification::info("notification-logged-out"));
    }
}
