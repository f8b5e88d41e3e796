// SPDX-License-Identifier: MPL-2.0
//! One image card: thumbnail, file name, description and upload date.

use super::{AssetState, Message};
use crate::gateway::Image;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{border, radius, shadow, sizing, spacing, typography};
use iced::widget::image::Handle;
use iced::widget::{container, image as image_widget, text, Column, Container, Text};
use iced::{alignment, ContentFit, Element, Length, Theme};

/// Description line, or the localized fallback when there is none.
pub fn description_text(i18n: &I18n, image: &Image) -> String {
    match image.description() {
        Some(description) => description.to_string(),
        None => i18n.tr("image-card-no-description"),
    }
}

/// "Uploaded: <local timestamp>" line.
pub fn uploaded_text(i18n: &I18n, image: &Image) -> String {
    let date = image.upload_date.to_local_string();
    i18n.tr_with_args("image-card-uploaded", &[("date", date.as_str())])
}

pub(super) fn view<'a>(
    i18n: &I18n,
    image: &'a Image,
    asset: Option<&'a AssetState>,
    placeholder: &'a Handle,
) -> Element<'a, Message> {
    let thumbnail: Element<'a, Message> = match asset {
        Some(AssetState::Ready(handle)) => thumbnail(handle.clone()),
        Some(AssetState::Failed) => thumbnail(placeholder.clone()),
        Some(AssetState::Loading) | None => Container::new(text("…").size(typography::TITLE_SM))
            .width(Length::Fixed(sizing::CARD_WIDTH))
            .height(Length::Fixed(sizing::CARD_WIDTH))
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .into(),
    };

    let content = Column::new()
        .spacing(spacing::XXS)
        .push(thumbnail)
        .push(Text::new(image.filename.as_str()).size(typography::TITLE_SM))
        .push(Text::new(description_text(i18n, image)).size(typography::BODY))
        .push(
            Text::new(uploaded_text(i18n, image))
                .size(typography::CAPTION)
                .style(|theme: &Theme| text::Style {
                    color: Some(theme.extended_palette().background.strong.text),
                }),
        );

    Container::new(content)
        .width(Length::Fixed(sizing::CARD_WIDTH + 2.0 * spacing::XS))
        .padding(spacing::XS)
        .style(card_style)
        .into()
}

fn thumbnail<'a>(handle: Handle) -> Element<'a, Message> {
    image_widget(handle)
        .width(Length::Fixed(sizing::CARD_WIDTH))
        .height(Length::Fixed(sizing::CARD_WIDTH))
        .content_fit(ContentFit::Cover)
        .into()
}

fn card_style(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(iced::Background::Color(palette.background.weak.color)),
        border: iced::Border {
            color: palette.background.strong.color,
            width: border::WIDTH_SM,
            radius: radius::MD.into(),
        },
        shadow: shadow::SM,
        text_color: Some(palette.background.weak.text),
        ..Default::default()
    }
}
