// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the login and dashboard
//! screens.
//!
//! The `App` owns the injected services (image gateway, session store), the
//! active screen and the toast manager, and turns screen events into tasks.
//! Dashboard results are tagged with the [`ViewId`] of the dashboard that
//! requested them and dropped if that dashboard no longer exists.

pub mod effects;
mod message;
pub mod paths;
mod screen;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};
pub use screen::Screen;

use crate::config::{
    MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH, WINDOW_DEFAULT_HEIGHT, WINDOW_DEFAULT_WIDTH,
};
use crate::gateway::ImageGateway;
use crate::i18n::fluent::I18n;
use crate::session::SessionStore;
use crate::ui::dashboard::{self, ViewId};
use crate::ui::login;
use crate::ui::notifications::{self, Notification};
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::sync::Arc;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    screen: Screen,
    login: login::State,
    /// Present exactly while the dashboard screen is mounted.
    dashboard: Option<dashboard::State>,
    /// Id handed to the next mounted dashboard.
    next_view: ViewId,
    gateway: Arc<dyn ImageGateway>,
    session: Arc<dyn SessionStore>,
    /// Resolved once at start-up, never re-detected per frame.
    theme: Theme,
    notifications: notifications::Manager,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field("dashboard", &self.dashboard.as_ref().map(dashboard::State::id))
            .finish_non_exhaustive()
    }
}

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        min_size: Some(iced::Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Builds the app from launcher flags: the dashboard when a token is
    /// stored, the login screen otherwise.
    pub fn new(flags: Flags) -> (Self, Task<Message>) {
        let i18n = I18n::new(flags.lang, &flags.config);
        let mut app = Self {
            i18n,
            screen: Screen::Login,
            login: login::State::default(),
            dashboard: None,
            next_view: ViewId::default(),
            gateway: flags.gateway,
            session: flags.session,
            theme: flags.config.general.theme_mode.theme(),
            notifications: notifications::Manager::new(),
        };

        for key in flags.startup_warnings {
            app.notifications.push(Notification::warning(key));
        }

        let task = if app.session.get_token().is_some() {
            tracing::info!("stored session found, opening dashboard");
            app.open_dashboard()
        } else {
            tracing::info!("no stored session, showing login");
            Task::none()
        };
        (app, task)
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn dashboard(&self) -> Option<&dashboard::State> {
        self.dashboard.as_ref()
    }

    pub fn login_state(&self) -> &login::State {
        &self.login
    }

    pub fn notifications(&self) -> &notifications::Manager {
        &self.notifications
    }

    fn title(&self) -> String {
        self.i18n.tr("window-title")
    }

    fn theme(&self) -> Theme {
        self.theme.clone()
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::create_tick_subscription(self.notifications.has_notifications())
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Login(login_message) => self.handle_login_message(login_message),
            Message::Dashboard { view, message } => self.handle_dashboard_message(view, message),
            Message::Notification(notification_message) => {
                self.notifications.handle_message(&notification_message);
                Task::none()
            }
            Message::Tick(_) => {
                self.notifications.tick();
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            screen: self.screen,
            login: &self.login,
            dashboard: self.dashboard.as_ref(),
            notifications: &self.notifications,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::{Error, Result};
    use crate::gateway::{Image, ImageId, UploadDate};
    use crate::session::{BearerToken, MemorySessionStore};
    use crate::ui::theming::ThemeMode;
    use async_trait::async_trait;

    /// Gateway whose futures are never awaited in these tests.
    struct InertGateway;

    #[async_trait]
    impl ImageGateway for InertGateway {
        async fn list_images(&self, _token: &BearerToken) -> Result<Vec<Image>> {
            Ok(Vec::new())
        }

        async fn upload_image(&self, _: &BearerToken, _: Vec<u8>, _: &str) -> Result<()> {
            Ok(())
        }

        async fn login(&self, _: &str, _: &str) -> Result<BearerToken> {
            Ok(BearerToken::new("fresh"))
        }

        async fn fetch_asset(&self, _: &str) -> Result<Vec<u8>> {
            Err(Error::Http { status: 404 })
        }
    }

    fn flags_with(session: Arc<MemorySessionStore>) -> Flags {
        Flags {
            lang: Some("en-US".to_string()),
            config: Config::default(),
            startup_warnings: Vec::new(),
            gateway: Arc::new(InertGateway),
            session,
        }
    }

    fn app_with(session: Arc<MemorySessionStore>) -> App {
        App::new(flags_with(session)).0
    }

    fn image(id: &str) -> Image {
        Image {
            id: ImageId::new(id),
            url: format!("https://cdn.example/{id}.png"),
            filename: format!("{id}.png"),
            description: None,
            upload_date: UploadDate::parse("2024-01-01T00:00:00Z"),
        }
    }

    fn current_view(app: &App) -> ViewId {
        app.dashboard().map(dashboard::State::id).unwrap()
    }

    #[test]
    fn starts_on_login_without_token() {
        let app = app_with(Arc::new(MemorySessionStore::new()));
        assert_eq!(app.screen(), Screen::Login);
        assert!(app.dashboard().is_none());
    }

    #[test]
    fn starts_on_dashboard_with_token() {
        let app = app_with(Arc::new(MemorySessionStore::with_token("abc")));
        assert_eq!(app.screen(), Screen::Dashboard);
        assert!(app.dashboard().unwrap().is_loading());
    }

    #[test]
    fn theme_is_resolved_at_startup() {
        let mut flags = flags_with(Arc::new(MemorySessionStore::new()));
        flags.config.general.theme_mode = ThemeMode::Dark;
        let mut app = App::new(flags).0;
        assert_eq!(app.theme, Theme::Dark);

        // Later frames read the stored theme
        app.theme = Theme::Light;
        assert_eq!(app.theme(), Theme::Light);
        let _ = app.update(Message::Tick(std::time::Instant::now()));
        assert_eq!(app.theme(), Theme::Light);
    }

    #[test]
    fn startup_warnings_become_toasts() {
        let flags = Flags {
            lang: None,
            config: Config::default(),
            startup_warnings: vec!["notification-config-load-error".to_string()],
            gateway: Arc::new(InertGateway),
            session: Arc::new(MemorySessionStore::new()),
        };
        let (app, _) = App::new(flags);
        assert_eq!(app.notifications().visible_count(), 1);
    }

    #[test]
    fn logout_clears_token_and_returns_to_login() {
        let session = Arc::new(MemorySessionStore::with_token("abc"));
        let mut app = app_with(session.clone());
        let view = current_view(&app);

        let _ = app.update(Message::Dashboard {
            view,
            message: dashboard::Message::Logout,
        });

        assert_eq!(app.screen(), Screen::Login);
        assert!(app.dashboard().is_none());
        assert!(session.get_token().is_none());
    }

    #[test]
    fn logout_while_upload_in_flight_still_logs_out() {
        let session = Arc::new(MemorySessionStore::with_token("abc"));
        let mut app = app_with(session.clone());
        let view = current_view(&app);
        let file = dashboard::SelectedFile::from_path("/tmp/photo.png").unwrap();

        let _ = app.update(Message::Dashboard {
            view,
            message: dashboard::Message::FilePicked(Some(file)),
        });
        let _ = app.update(Message::Dashboard {
            view,
            message: dashboard::Message::Upload,
        });
        let _ = app.update(Message::Dashboard {
            view,
            message: dashboard::Message::Logout,
        });

        assert_eq!(app.screen(), Screen::Login);
        assert!(session.get_token().is_none());
    }

    #[test]
    fn late_results_for_torn_down_dashboard_are_dropped() {
        let session = Arc::new(MemorySessionStore::with_token("abc"));
        let mut app = app_with(session.clone());
        let stale = current_view(&app);

        let _ = app.update(Message::Dashboard {
            view: stale,
            message: dashboard::Message::Logout,
        });
        let toasts_after_logout = app.notifications().visible_count();

        // Log back in: a new dashboard with a new id
        session.set_token(BearerToken::new("again")).unwrap();
        let _ = app.open_dashboard();
        let fresh = current_view(&app);
        assert_ne!(stale, fresh);
        // Same request number as the live dashboard: only the view id differs
        let request = app.dashboard().unwrap().latest_list();

        let _ = app.update(Message::Dashboard {
            view: stale,
            message: dashboard::Message::ImagesLoaded {
                request,
                result: Ok(vec![image("old")]),
            },
        });
        let _ = app.update(Message::Dashboard {
            view: stale,
            message: dashboard::Message::ImagesLoaded {
                request,
                result: Err(Error::Network("late".into())),
            },
        });

        assert!(app.dashboard().unwrap().images().is_empty());
        assert_eq!(app.notifications().visible_count(), toasts_after_logout);
    }

    #[test]
    fn results_after_logout_do_not_touch_state() {
        let session = Arc::new(MemorySessionStore::with_token("abc"));
        let mut app = app_with(session);
        let view = current_view(&app);

        let _ = app.update(Message::Dashboard {
            view,
            message: dashboard::Message::Logout,
        });
        let _ = app.update(Message::Dashboard {
            view,
            message: dashboard::Message::UploadFinished(Ok(())),
        });

        assert_eq!(app.screen(), Screen::Login);
        assert!(app.dashboard().is_none());
    }

    #[test]
    fn upload_failure_raises_error_toast() {
        let session = Arc::new(MemorySessionStore::with_token("abc"));
        let mut app = app_with(session);
        let view = current_view(&app);
        let file = dashboard::SelectedFile::from_path("/tmp/photo.png").unwrap();

        for message in [
            dashboard::Message::FilePicked(Some(file)),
            dashboard::Message::Upload,
            dashboard::Message::UploadFinished(Err(Error::Http { status: 500 })),
        ] {
            let _ = app.update(Message::Dashboard { view, message });
        }

        let toast = app.notifications().visible().next().unwrap();
        assert_eq!(toast.message_key(), "notification-error-http");
        assert!(matches!(
            app.dashboard().unwrap().upload_state(),
            dashboard::UploadState::FileSelected(_)
        ));
    }

    #[test]
    fn successful_login_stores_token_and_opens_dashboard() {
        let session = Arc::new(MemorySessionStore::new());
        let mut app = app_with(session.clone());

        let _ = app.update(Message::Login(login::Message::EmailChanged("me@x.io".into())));
        let _ = app.update(Message::Login(login::Message::PasswordChanged("pw".into())));
        let _ = app.update(Message::Login(login::Message::Submit));
        assert!(app.login_state().is_pending());

        let _ = app.update(Message::Login(login::Message::Finished(Ok(
            BearerToken::new("fresh"),
        ))));

        assert_eq!(app.screen(), Screen::Dashboard);
        assert_eq!(session.get_token(), Some(BearerToken::new("fresh")));
    }

    #[test]
    fn failed_login_stays_on_login() {
        let mut app = app_with(Arc::new(MemorySessionStore::new()));

        let _ = app.update(Message::Login(login::Message::EmailChanged("me@x.io".into())));
        let _ = app.update(Message::Login(login::Message::PasswordChanged("pw".into())));
        let _ = app.update(Message::Login(login::Message::Submit));
        let _ = app.update(Message::Login(login::Message::Finished(Err(Error::Auth {
            status: Some(401),
        }))));

        assert_eq!(app.screen(), Screen::Login);
        assert_eq!(
            app.notifications().visible().next().map(Notification::message_key),
            Some("notification-error-auth")
        );
    }
}
