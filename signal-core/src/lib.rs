// signal-core/src/lib.rs

//! The core logic for the signal synthesis and Fourier series plotter.
//! This crate is responsible for the ω0/T linked-parameter rule, signal
//! evaluation and the plot descriptions handed to a renderer. It is
//! completely headless and contains no GUI code.

pub mod error;
pub mod form;
pub mod fourier;
pub mod params;
pub mod plot;
pub mod synthesis;
pub mod waveform;

pub use error::{SignalError, ValidationError};
pub use fourier::{evaluate_fourier, FourierSpec, Harmonic};
pub use params::{ConfirmOverride, LinkChange, LinkedField, LinkedParameters, OverridePrompt};
pub use synthesis::{evaluate_synthesis, SynthesisRequest, SynthesisSignal};
pub use waveform::{SampledWaveform, DEFAULT_SAMPLE_COUNT, MAX_SAMPLE_COUNT};
