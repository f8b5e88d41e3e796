// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Renders the active screen and stacks the toast overlay on top of it.

use super::{Message, Screen};
use crate::i18n::fluent::I18n;
use crate::ui::dashboard;
use crate::ui::login;
use crate::ui::notifications::{self, Toast};
use iced::{
    widget::{Container, Stack, Text},
    Element, Length,
};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub screen: Screen,
    pub login: &'a login::State,
    pub dashboard: Option<&'a dashboard::State>,
    pub notifications: &'a notifications::Manager,
}

/// Renders the current application view based on the active screen.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let current_view: Element<'_, Message> = match (ctx.screen, ctx.dashboard) {
        (Screen::Login, _) => login::view(login::ViewContext {
            i18n: ctx.i18n,
            state: ctx.login,
        })
        .map(Message::Login),
        (Screen::Dashboard, Some(state)) => dashboard::view(dashboard::ViewContext {
            i18n: ctx.i18n,
            state,
        })
        .map(Message::dashboard(state.id())),
        (Screen::Dashboard, None) => Text::new("").into(),
    };

    let screen = Container::new(current_view)
        .width(Length::Fill)
        .height(Length::Fill);
    let toasts = Toast::view_overlay(ctx.notifications, ctx.i18n).map(Message::Notification);

    Stack::new().push(screen).push(toasts).into()
}
