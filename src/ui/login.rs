// SPDX-License-Identifier: MPL-2.0
//! Login screen exchanging email and password for a session token.

use crate::error::Error;
use crate::i18n::fluent::I18n;
use crate::session::BearerToken;
use crate::ui::design_tokens::{sizing, spacing, typography};
use iced::widget::{button, text, text_input, Column, Container, Text};
use iced::{alignment, Element, Length};

#[derive(Debug, Default)]
pub struct State {
    email: String,
    password: String,
    pending: bool,
}

#[derive(Debug, Clone)]
pub enum Message {
    EmailChanged(String),
    PasswordChanged(String),
    Submit,
    Finished(Result<BearerToken, Error>),
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    /// Run the token request with these credentials.
    Login { email: String, password: String },
    LoggedIn(BearerToken),
    Failed(Error),
}

impl State {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    fn can_submit(&self) -> bool {
        !self.pending && !self.email.trim().is_empty() && !self.password.is_empty()
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::EmailChanged(email) => {
                self.email = email;
                Event::None
            }
            Message::PasswordChanged(password) => {
                self.password = password;
                Event::None
            }
            Message::Submit => {
                if !self.can_submit() {
                    return Event::None;
                }
                self.pending = true;
                Event::Login {
                    email: self.email.trim().to_string(),
                    password: self.password.clone(),
                }
            }
            Message::Finished(result) => {
                if !self.pending {
                    return Event::None;
                }
                self.pending = false;
                match result {
                    Ok(token) => {
                        self.password.clear();
                        Event::LoggedIn(token)
                    }
                    Err(error) => {
                        tracing::warn!(%error, "login failed");
                        self.password.clear();
                        Event::Failed(error)
                    }
                }
            }
        }
    }
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a State,
}

#[must_use]
#[allow(clippy::needless_pass_by_value)] // ViewContext is small and consumed
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let i18n = ctx.i18n;
    let state = ctx.state;

    let mut email = text_input(&i18n.tr("login-email"), &state.email)
        .width(Length::Fixed(sizing::INPUT_WIDTH))
        .padding(spacing::XS);
    let mut password = text_input(&i18n.tr("login-password"), &state.password)
        .secure(true)
        .width(Length::Fixed(sizing::INPUT_WIDTH))
        .padding(spacing::XS);
    if !state.pending {
        email = email.on_input(Message::EmailChanged).on_submit(Message::Submit);
        password = password
            .on_input(Message::PasswordChanged)
            .on_submit(Message::Submit);
    }

    let label = if state.pending {
        i18n.tr("login-submitting")
    } else {
        i18n.tr("login-submit")
    };
    let submit = button(text(label).size(typography::BODY))
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .on_press_maybe(state.can_submit().then_some(Message::Submit));

    let form = Column::new()
        .spacing(spacing::MD)
        .align_x(alignment::Horizontal::Center)
        .push(Text::new(i18n.tr("login-title")).size(typography::TITLE_LG))
        .push(email)
        .push(password)
        .push(submit);

    Container::new(form)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> State {
        let mut state = State::default();
        state.update(Message::EmailChanged("me@example.com".into()));
        state.update(Message::PasswordChanged("hunter2".into()));
        state
    }

    #[test]
    fn submit_requires_both_fields() {
        let mut state = State::default();
        assert_eq!(state.update(Message::Submit), Event::None);

        state.update(Message::EmailChanged("   ".into()));
        state.update(Message::PasswordChanged("secret".into()));
        assert_eq!(state.update(Message::Submit), Event::None);
        assert!(!state.is_pending());
    }

    #[test]
    fn submit_trims_email_and_marks_pending() {
        let mut state = filled();
        state.update(Message::EmailChanged(" me@example.com ".into()));

        let event = state.update(Message::Submit);
        assert_eq!(
            event,
            Event::Login {
                email: "me@example.com".into(),
                password: "hunter2".into()
            }
        );
        assert!(state.is_pending());
        // Second click while the request is in flight
        assert_eq!(state.update(Message::Submit), Event::None);
    }

    #[test]
    fn failure_keeps_email_and_clears_password() {
        let mut state = filled();
        state.update(Message::Submit);

        let error = Error::Auth { status: Some(401) };
        let event = state.update(Message::Finished(Err(error.clone())));

        assert_eq!(event, Event::Failed(error));
        assert_eq!(state.email(), "me@example.com");
        assert_eq!(state.password(), "");
        assert!(!state.is_pending());
    }

    #[test]
    fn success_hands_the_token_up() {
        let mut state = filled();
        state.update(Message::Submit);

        let event = state.update(Message::Finished(Ok(BearerToken::new("jwt"))));
        assert_eq!(event, Event::LoggedIn(BearerToken::new("jwt")));
    }

    #[test]
    fn unexpected_result_is_ignored() {
        let mut state = filled();
        let event = state.update(Message::Finished(Ok(BearerToken::new("jwt"))));
        assert_eq!(event, Event::None);
    }
}
