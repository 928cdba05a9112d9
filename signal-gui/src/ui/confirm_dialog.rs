//! # Confirmation Dialog
//!
//! Modal yes/no question shown before an ω0 or T edit overrides the field
//! the user set last. The backdrop covers the whole window, so nothing else
//! can be edited or drawn until the question is answered.

use iced::widget::{button, center, column, container, horizontal_space, opaque, row, stack, text};
use iced::{Color, Element, Length};
use signal_core::OverridePrompt;

use crate::Message;

/// The dialog box itself.
pub fn dialog(prompt: &OverridePrompt) -> Element<'static, Message> {
    let buttons = row![
        horizontal_space(),
        button(text("No").size(14))
            .padding([6, 18])
            .style(button::secondary)
            .on_press(Message::OverrideAnswered(false)),
        button(text("Yes").size(14))
            .padding([6, 18])
            .style(button::primary)
            .on_press(Message::OverrideAnswered(true)),
    ]
    .spacing(10);

    container(
        column![
            text("Confirm Change").size(18),
            text(prompt.message()).size(14),
            buttons,
        ]
        .spacing(14),
    )
    .padding(20)
    .width(Length::Fixed(480.0))
    .style(container::rounded_box)
    .into()
}

/// Lays `dialog` over `base` behind a dimmed, input-blocking backdrop.
pub fn modal<'a>(base: Element<'a, Message>, dialog: Element<'a, Message>) -> Element<'a, Message> {
    stack![
        base,
        opaque(center(opaque(dialog)).style(|_theme| container::Style {
            background: Some(
                Color {
                    a: 0.7,
                    ..Color::BLACK
                }
                .into(),
            ),
            ..container::Style::default()
        }))
    ]
    .into()
}
