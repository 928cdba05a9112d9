//! # Signal Lab - Signal Synthesis and Fourier Series GUI
//!
//! This module contains the main GUI application. It collects field text,
//! hands typed requests to `signal-core`, and draws the returned plot
//! descriptions.
//!
//! ## Architecture
//! - **Single thread**: every message is handled to completion by `update`
//! - **Linked ω0/T**: owned by a `LinkedParameters` store; overriding the
//!   authoritative field goes through a modal confirmation dialog
//! - **Plots**: canvas widgets fed with `PlotPanel` descriptions

mod config;
mod ui;
mod widgets;

use iced::{Element, Theme};
use signal_core::form::{FourierForm, SynthesisForm};
use signal_core::plot::{self, PlotPanel};
use signal_core::{
    ConfirmOverride, LinkChange, LinkedField, LinkedParameters, OverridePrompt, SignalError,
    ValidationError,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use ui::main_display::create_main_view;

use config::AppConfig;

/// Main entry point for the Signal Lab application.
///
/// Sets up logging, then runs the Iced GUI with the dark theme.
pub fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    info!("[MAIN] Starting Signal Lab...");
    let result = iced::application("Signal Lab", SignalApp::update, SignalApp::view)
        .theme(SignalApp::theme)
        .window_size((1300.0, 950.0))
        .run();
    if let Err(e) = &result {
        error!("[MAIN] Application finished with error: {:?}", e);
    }
    result
}

/// Application message types for the Iced GUI framework.
#[derive(Debug, Clone)]
pub enum Message {
    TabSelected(Tab),

    // --- Synthesizer tab ---
    SignalFieldChanged(usize, SignalInput, String), // Signal index (0-2), which input, new text
    DurationChanged(String),
    SynthesizeClicked,

    // --- Fourier tab ---
    A0Changed(String),
    HarmonicChanged(usize, HarmonicInput, String), // Harmonic index (0-2), a or b, new text
    LinkedChanged(LinkedField, String),            // ω0/T text edited
    LinkedSubmitted(LinkedField),                  // Enter pressed in the ω0/T field
    PlotFourierClicked,

    // Answer from the override confirmation dialog
    OverrideAnswered(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Synthesizer,
    Fourier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalInput {
    Amplitude,
    Frequency,
    Phase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarmonicInput {
    A,
    B,
}

/// UI-specific data needed for rendering the interface.
#[derive(Debug, Clone)]
pub struct AppDisplayData {
    pub active_tab: Tab,

    // Raw field text
    pub synthesis_form: SynthesisForm,
    pub fourier_form: FourierForm,
    pub w0_text: String,
    pub period_text: String,

    // Last successful draws
    pub synthesis_panels: Vec<PlotPanel>,
    pub fourier_panels: Vec<PlotPanel>,

    /// Message from the last failed action
    pub status: Option<String>,
    /// Open confirmation dialog; all other input is blocked while set
    pub pending_override: Option<OverridePrompt>,
}

/// Main application state.
#[derive(Debug)]
struct SignalApp {
    config: AppConfig,
    params: LinkedParameters,

    // Single source of truth for all display data
    display_data: AppDisplayData,
}

/// Records the prompt and declines, so the question can be asked in a modal
/// dialog and the edit re-applied once the user agrees.
#[derive(Debug, Default)]
struct DeferredPrompt {
    prompt: Option<OverridePrompt>,
}

impl ConfirmOverride for DeferredPrompt {
    fn confirm(&mut self, prompt: &OverridePrompt) -> bool {
        self.prompt = Some(prompt.clone());
        false
    }
}

impl Default for SignalApp {
    fn default() -> Self {
        let path = config::config_path();
        Self::new(config::load_or_default(&path))
    }
}

impl SignalApp {
    fn new(config: AppConfig) -> Self {
        let params = LinkedParameters::with_w0(config.initial_w0).unwrap_or_else(|e| {
            warn!("[MAIN] {}; starting from w0 = 1", e);
            LinkedParameters::default()
        });
        let display_data = AppDisplayData {
            active_tab: Tab::Synthesizer,
            synthesis_form: SynthesisForm::from_signals(&config.synthesis, config.duration),
            fourier_form: FourierForm::from_coefficients(config.a0, &config.harmonics),
            w0_text: params.display(LinkedField::W0),
            period_text: params.display(LinkedField::Period),
            synthesis_panels: Vec::new(),
            fourier_panels: Vec::new(),
            status: None,
            pending_override: None,
        };
        Self {
            config,
            params,
            display_data,
        }
    }

    /// Handles application state updates based on incoming messages.
    fn update(&mut self, message: Message) {
        tracing::debug!("[UPDATE] Received message: {:?}", message);

        // The confirmation dialog is modal: only its answer gets through.
        if self.display_data.pending_override.is_some()
            && !matches!(message, Message::OverrideAnswered(_))
        {
            return;
        }

        match message {
            Message::TabSelected(tab) => {
                self.display_data.active_tab = tab;
            }
            Message::SignalFieldChanged(index, input, value) => {
                if let Some(fields) = self.display_data.synthesis_form.signals.get_mut(index) {
                    match input {
                        SignalInput::Amplitude => fields.amplitude = value,
                        SignalInput::Frequency => fields.frequency = value,
                        SignalInput::Phase => fields.phase = value,
                    }
                }
            }
            Message::DurationChanged(value) => {
                self.display_data.synthesis_form.duration = value;
            }
            Message::SynthesizeClicked => self.draw_synthesis(),
            Message::A0Changed(value) => {
                self.display_data.fourier_form.a0 = value;
            }
            Message::HarmonicChanged(index, input, value) => {
                if let Some(fields) = self.display_data.fourier_form.harmonics.get_mut(index) {
                    match input {
                        HarmonicInput::A => fields.a = value,
                        HarmonicInput::B => fields.b = value,
                    }
                }
            }
            Message::LinkedChanged(field, value) => {
                *self.linked_text_mut(field) = value;
            }
            Message::LinkedSubmitted(field) => {
                self.submit_linked(field);
            }
            Message::PlotFourierClicked => {
                if self.commit_linked_edits() {
                    self.draw_fourier();
                }
            }
            Message::OverrideAnswered(accepted) => self.answer_override(accepted),
        }
    }

    fn linked_text_mut(&mut self, field: LinkedField) -> &mut String {
        match field {
            LinkedField::W0 => &mut self.display_data.w0_text,
            LinkedField::Period => &mut self.display_data.period_text,
        }
    }

    /// Shows the store's current ω0 and T in both fields.
    fn refresh_linked_texts(&mut self) {
        self.display_data.w0_text = self.params.display(LinkedField::W0);
        self.display_data.period_text = self.params.display(LinkedField::Period);
    }

    fn revert_linked_text(&mut self, field: LinkedField) {
        *self.linked_text_mut(field) = self.params.display(field);
    }

    /// Commits ω0/T text that was typed but never submitted.
    ///
    /// Returns false when an edit was rejected or is waiting for confirmation.
    fn commit_linked_edits(&mut self) -> bool {
        [LinkedField::W0, LinkedField::Period]
            .into_iter()
            .all(|field| self.submit_linked(field))
    }

    /// Commits the text of an ω0/T field to the linked store.
    ///
    /// Returns true once the store and the field text agree.
    fn submit_linked(&mut self, field: LinkedField) -> bool {
        let text = match field {
            LinkedField::W0 => self.display_data.w0_text.clone(),
            LinkedField::Period => self.display_data.period_text.clone(),
        };
        if text.trim() == self.params.display(field) {
            return true;
        }

        let mut deferred = DeferredPrompt::default();
        match self.params.submit_text(field, &text, &mut deferred) {
            Ok(LinkChange::Updated) | Ok(LinkChange::Unchanged) => {
                self.refresh_linked_texts();
                self.display_data.status = None;
                true
            }
            Err(SignalError::ConfirmationDeclined(_)) => {
                match deferred.prompt {
                    Some(prompt) => {
                        info!("[MAIN] Asking before {} overrides {}", prompt.field, prompt.authoritative);
                        self.display_data.pending_override = Some(prompt);
                    }
                    None => self.revert_linked_text(field),
                }
                false
            }
            Err(SignalError::Validation(e)) => {
                self.display_data.status = Some(linked_error_message(field, &e));
                self.revert_linked_text(field);
                false
            }
        }
    }

    fn answer_override(&mut self, accepted: bool) {
        let Some(prompt) = self.display_data.pending_override.take() else {
            return;
        };
        if !accepted {
            info!("[MAIN] Kept {} as the primary input", prompt.authoritative);
            self.revert_linked_text(prompt.field);
            return;
        }

        let mut agree = |_: &OverridePrompt| true;
        match self.params.set(prompt.field, prompt.requested, &mut agree) {
            Ok(_) => {
                self.refresh_linked_texts();
                self.display_data.status = None;
            }
            Err(e) => {
                warn!("[MAIN] Could not apply confirmed {} edit: {}", prompt.field, e);
                self.display_data.status = Some(e.to_string());
                self.revert_linked_text(prompt.field);
            }
        }
    }

    /// Evaluates the synthesizer form and replaces the synthesizer plots.
    ///
    /// On invalid input the previous plots stay on screen.
    fn draw_synthesis(&mut self) {
        let sample_count = self.config.sample_count;
        let result = self
            .display_data
            .synthesis_form
            .to_request(self.config.fallback_duration)
            .and_then(|request| {
                let waveform = request.evaluate(sample_count)?;
                Ok(plot::synthesis_panels(&request, &waveform))
            });

        match result {
            Ok(panels) => {
                self.display_data.synthesis_panels = panels;
                self.display_data.status = None;
            }
            Err(e) => {
                warn!("[MAIN] Synthesis draw abandoned: {}", e);
                self.display_data.status =
                    Some(format!("Please enter valid numeric values for the synthesizer ({}).", e));
            }
        }
    }

    /// Evaluates the Fourier form with the store's ω0/T and replaces the Fourier plots.
    fn draw_fourier(&mut self) {
        let sample_count = self.config.sample_count;
        let result = self
            .display_data
            .fourier_form
            .to_spec(&self.params)
            .and_then(|spec| {
                let waveform = spec.evaluate(sample_count)?;
                Ok(plot::fourier_panels(&spec, &waveform))
            });

        match result {
            Ok(panels) => {
                self.display_data.fourier_panels = panels;
                self.display_data.status = None;
            }
            Err(e) => {
                warn!("[MAIN] Fourier draw abandoned: {}", e);
                self.display_data.status = Some(format!(
                    "Please enter valid numeric values for the Fourier series ({}).",
                    e
                ));
            }
        }
    }

    /// Renders the main application interface.
    ///
    /// Delegates all UI rendering to the main_display module.
    fn view(&self) -> Element<'_, Message> {
        create_main_view(&self.display_data)
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn linked_error_message(field: LinkedField, e: &ValidationError) -> String {
    match e {
        ValidationError::NotANumber { .. } => format!("Enter a numeric value for {}.", field),
        _ => format!("{} must be a positive number.", field),
    }
}
