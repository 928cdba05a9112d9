//! # UI Module
//!
//! This module contains all view-building code for the Signal Lab application.

pub mod confirm_dialog;
pub mod main_display;
