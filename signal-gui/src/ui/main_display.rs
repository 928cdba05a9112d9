//! # Main Display Module
//!
//! This module contains the main display components and layout logic
//! for the Signal Lab application: the tab bar, the two input panels and
//! the scrolling plot columns.

use iced::widget::{
    button, column, container, row, scrollable, text, text_input, Column, Space,
};
use iced::{Alignment, Color, Element, Length};
use signal_core::plot::PlotPanel;
use signal_core::LinkedField;

use super::confirm_dialog;
use crate::widgets::waveform_plot::WaveformPlot;
use crate::{AppDisplayData, HarmonicInput, Message, SignalInput, Tab};

const INPUT_PANEL_WIDTH: f32 = 300.0;
const LABEL_WIDTH: f32 = 150.0;
const SYNTHESIS_PLOT_HEIGHT: f32 = 190.0;
const FOURIER_PLOT_HEIGHT: f32 = 230.0;

/// Creates the complete main application view
pub fn create_main_view(data: &AppDisplayData) -> Element<'_, Message> {
    let title = text("Signal Analysis and Synthesis").size(26);

    let body = match data.active_tab {
        Tab::Synthesizer => row![
            create_synthesis_inputs(data),
            Space::with_width(10),
            create_plot_column(
                "Synthesized Signal Plots",
                &data.synthesis_panels,
                SYNTHESIS_PLOT_HEIGHT
            ),
        ],
        Tab::Fourier => row![
            create_fourier_inputs(data),
            Space::with_width(10),
            create_plot_column("Fourier Series Plots", &data.fourier_panels, FOURIER_PLOT_HEIGHT),
        ],
    }
    .height(Length::Fill)
    .align_y(Alignment::Start);

    let mut layout = column![title, create_tab_bar(data.active_tab)].spacing(12);
    if let Some(status) = &data.status {
        layout = layout.push(text(status.as_str()).size(14).color(Color::from_rgb(1.0, 0.45, 0.4)));
    }
    layout = layout.push(body);

    let base: Element<'_, Message> = container(layout.padding(20))
        .width(Length::Fill)
        .height(Length::Fill)
        .into();

    match &data.pending_override {
        Some(prompt) => confirm_dialog::modal(base, confirm_dialog::dialog(prompt)),
        None => base,
    }
}

fn create_tab_bar(active: Tab) -> Element<'static, Message> {
    let tab = |label: &'static str, target: Tab| {
        button(text(label).size(15))
            .padding([8, 16])
            .style(if target == active {
                button::primary
            } else {
                button::secondary
            })
            .on_press(Message::TabSelected(target))
    };

    row![
        tab("Signal Synthesizer", Tab::Synthesizer),
        tab("Fourier Series Analysis", Tab::Fourier),
    ]
    .spacing(6)
    .into()
}

/// A label and a text field on one line.
fn labeled_input<'a>(
    label: String,
    value: &'a str,
    on_input: impl Fn(String) -> Message + 'a,
) -> iced::widget::Row<'a, Message> {
    row![
        text(label).size(14).width(Length::Fixed(LABEL_WIDTH)),
        text_input("0.0", value).on_input(on_input).padding(5).size(14),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
}

/// An ω0/T field. Enter commits the edit; other fields are only read when drawing.
fn linked_input<'a>(label: &'static str, field: LinkedField, value: &'a str) -> iced::widget::Row<'a, Message> {
    row![
        text(label).size(14).width(Length::Fixed(LABEL_WIDTH)),
        text_input("0.0", value)
            .on_input(move |s| Message::LinkedChanged(field, s))
            .on_submit(Message::LinkedSubmitted(field))
            .padding(5)
            .size(14),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
}

/// A titled box around a column of inputs.
fn group<'a>(title: String, content: Column<'a, Message>) -> Element<'a, Message> {
    container(column![text(title).size(16), content.spacing(6)].spacing(8))
        .padding(12)
        .width(Length::Fill)
        .style(container::rounded_box)
        .into()
}

fn create_synthesis_inputs(data: &AppDisplayData) -> Element<'_, Message> {
    let form = &data.synthesis_form;
    let mut inputs = column![].spacing(10);

    for (i, fields) in form.signals.iter().enumerate() {
        let content = column![
            labeled_input("Amplitude (Ak):".into(), &fields.amplitude, move |s| {
                Message::SignalFieldChanged(i, SignalInput::Amplitude, s)
            }),
            labeled_input("Frequency (fk - Hz):".into(), &fields.frequency, move |s| {
                Message::SignalFieldChanged(i, SignalInput::Frequency, s)
            }),
            labeled_input("Phase (θk - rad):".into(), &fields.phase, move |s| {
                Message::SignalFieldChanged(i, SignalInput::Phase, s)
            }),
        ];
        inputs = inputs.push(group(format!("Signal {}", i + 1), content));
    }

    inputs = inputs.push(group(
        "Plot Duration".into(),
        column![labeled_input("Duration (s):".into(), &form.duration, Message::DurationChanged)],
    ));
    inputs = inputs.push(
        button(text("Synthesize and Plot").size(15))
            .padding([10, 16])
            .width(Length::Fill)
            .on_press(Message::SynthesizeClicked),
    );

    container(scrollable(inputs.padding([0, 12])))
        .width(Length::Fixed(INPUT_PANEL_WIDTH))
        .height(Length::Fill)
        .into()
}

fn create_fourier_inputs(data: &AppDisplayData) -> Element<'_, Message> {
    let form = &data.fourier_form;

    let params = column![
        labeled_input("a0 coefficient:".into(), &form.a0, Message::A0Changed),
        linked_input("w0 (fundamental freq.):", LinkedField::W0, &data.w0_text),
        linked_input("T (period):", LinkedField::Period, &data.period_text),
        text("Press Enter to apply w0 or T.").size(12),
    ];

    let mut inputs = column![group("Fourier Series Parameters".into(), params)].spacing(10);

    for (i, fields) in form.harmonics.iter().enumerate() {
        let k = i + 1;
        let content = column![
            labeled_input(format!("ak (a{}):", k), &fields.a, move |s| {
                Message::HarmonicChanged(i, HarmonicInput::A, s)
            }),
            labeled_input(format!("bk (b{}):", k), &fields.b, move |s| {
                Message::HarmonicChanged(i, HarmonicInput::B, s)
            }),
        ];
        inputs = inputs.push(group(format!("k={} Harmonic", k), content));
    }

    inputs = inputs.push(
        button(text("Plot Fourier Series").size(15))
            .padding([10, 16])
            .width(Length::Fill)
            .on_press(Message::PlotFourierClicked),
    );

    container(scrollable(inputs.padding([0, 12])))
        .width(Length::Fixed(INPUT_PANEL_WIDTH))
        .height(Length::Fill)
        .into()
}

fn create_plot_column<'a>(heading: &'a str, panels: &[PlotPanel], height: f32) -> Element<'a, Message> {
    let plots: Element<'a, Message> = if panels.is_empty() {
        container(text("Enter parameters and press the plot button.").size(14))
            .padding(20)
            .into()
    } else {
        scrollable(
            Column::with_children(
                panels
                    .iter()
                    .cloned()
                    .map(|panel| WaveformPlot::new(panel).view(height)),
            )
            .spacing(8)
            .padding([0, 12]),
        )
        .height(Length::Fill)
        .into()
    };

    column![text(heading).size(18), plots]
        .spacing(10)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Alignment::Center)
        .into()
}
