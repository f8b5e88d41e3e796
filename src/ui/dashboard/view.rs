// SPDX-License-Identifier: MPL-2.0
//! Dashboard layout: header, upload bar and the wrapping card grid.

use super::{card, Message, State, UploadState};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use iced::widget::{button, scrollable, text, Column, Container, Row, Space, Text};
use iced::{alignment, Element, Length};

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a State,
}

#[must_use]
#[allow(clippy::needless_pass_by_value)] // ViewContext is small and consumed
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let i18n = ctx.i18n;
    let state = ctx.state;

    let header = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(Text::new(i18n.tr("dashboard-title")).size(typography::TITLE_LG))
        .push(Space::new().width(Length::Fill))
        .push(
            button(text(i18n.tr("dashboard-refresh")).size(typography::BODY))
                .height(Length::Fixed(sizing::BUTTON_HEIGHT))
                .on_press_maybe((!state.is_loading()).then_some(Message::Refresh)),
        )
        .push(
            button(text(i18n.tr("dashboard-logout")).size(typography::BODY))
                .height(Length::Fixed(sizing::BUTTON_HEIGHT))
                .on_press(Message::Logout),
        );

    let body: Element<'_, Message> = if state.images().is_empty() {
        let key = if state.is_loading() {
            "dashboard-loading"
        } else {
            "dashboard-empty"
        };
        Container::new(Text::new(i18n.tr(key)).size(typography::BODY))
            .width(Length::Fill)
            .padding(spacing::XL)
            .align_x(alignment::Horizontal::Center)
            .into()
    } else {
        let cards = state
            .images()
            .iter()
            .map(|image| card::view(i18n, image, state.asset(&image.id), state.placeholder()));
        scrollable(
            Row::with_children(cards)
                .spacing(spacing::MD)
                .wrap()
                .vertical_spacing(spacing::MD),
        )
        .height(Length::Fill)
        .into()
    };

    Column::new()
        .spacing(spacing::LG)
        .padding(spacing::LG)
        .push(header)
        .push(upload_bar(i18n, state.upload_state()))
        .push(body)
        .into()
}

fn upload_bar<'a>(i18n: &I18n, upload: &UploadState) -> Element<'a, Message> {
    let uploading = upload.is_uploading();

    let pick = button(text(i18n.tr("dashboard-choose-file")).size(typography::BODY))
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .on_press_maybe((!uploading).then_some(Message::PickFile));

    let selection = match upload.selected_file() {
        Some(file) => {
            i18n.tr_with_args("dashboard-selected-file", &[("filename", file.filename.as_str())])
        }
        None => i18n.tr("dashboard-no-file"),
    };

    let upload_label = if uploading {
        i18n.tr("dashboard-uploading")
    } else {
        i18n.tr("dashboard-upload")
    };
    let submit = button(text(upload_label).size(typography::BODY))
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .on_press_maybe(
            matches!(upload, UploadState::FileSelected(_)).then_some(Message::Upload),
        );

    Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(pick)
        .push(Text::new(selection).size(typography::BODY))
        .push(submit)
        .into()
}
