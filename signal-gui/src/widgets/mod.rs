//! # Widgets Module
//!
//! Custom canvas widgets used by the Signal Lab views.

pub mod waveform_plot;
