//! # Linked Parameter Module
//!
//! Keeps the fundamental angular frequency ω0 and the period T of a Fourier
//! series consistent (`T · ω0 = 2π`) while letting the user edit either one.
//!
//! The store remembers which of the two was last set directly. Editing the
//! *other* one afterwards would silently discard the relationship the user
//! set up, so that edit must be confirmed through a [`ConfirmOverride`]
//! capability supplied by the caller. The store itself has no UI
//! dependency.

use std::f64::consts::TAU;
use std::fmt;

use tracing::{debug, info, warn};

use crate::error::{require_positive, Result, SignalError};
use crate::form::parse_real;

/// Edits closer than this to the current value are treated as no change.
pub const LINK_TOLERANCE: f64 = 1e-6;

/// One of the two linked parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkedField {
    /// Fundamental angular frequency ω0 in rad/s
    W0,
    /// Fundamental period T in seconds
    Period,
}

impl LinkedField {
    /// The field derived from this one.
    pub fn other(self) -> Self {
        match self {
            LinkedField::W0 => LinkedField::Period,
            LinkedField::Period => LinkedField::W0,
        }
    }
}

impl fmt::Display for LinkedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkedField::W0 => write!(f, "w0"),
            LinkedField::Period => write!(f, "T"),
        }
    }
}

/// Outcome of a successful edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkChange {
    /// The value matched the current one within [`LINK_TOLERANCE`]
    Unchanged,
    /// Both values were recomputed and the edited field became authoritative
    Updated,
}

/// The question put to the user before an edit overrides the authoritative field.
#[derive(Debug, Clone, PartialEq)]
pub struct OverridePrompt {
    /// The field being edited
    pub field: LinkedField,
    /// Its current (derived) value
    pub current: f64,
    /// The value the user typed
    pub requested: f64,
    /// The field that was last set directly
    pub authoritative: LinkedField,
    /// Value of the authoritative field
    pub authoritative_value: f64,
}

impl OverridePrompt {
    pub fn message(&self) -> String {
        format!(
            "{field} was computed as {current:.4} from {auth} ({auth_value:.2}).\n\
             Changing it to {requested} will override {auth} and make {field} the primary input.\n\
             Do you want to continue?",
            field = self.field,
            current = self.current,
            auth = self.authoritative,
            auth_value = self.authoritative_value,
            requested = self.requested,
        )
    }
}

/// A synchronous yes/no answer to an [`OverridePrompt`].
pub trait ConfirmOverride {
    fn confirm(&mut self, prompt: &OverridePrompt) -> bool;
}

impl<F> ConfirmOverride for F
where
    F: FnMut(&OverridePrompt) -> bool,
{
    fn confirm(&mut self, prompt: &OverridePrompt) -> bool {
        self(prompt)
    }
}

/// The ω0/T pair and which of the two the user set last.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedParameters {
    w0: f64,
    period: f64,
    active: LinkedField,
}

impl Default for LinkedParameters {
    fn default() -> Self {
        Self {
            w0: 1.0,
            period: TAU,
            active: LinkedField::W0,
        }
    }
}

impl LinkedParameters {
    /// Starts from a given ω0 with ω0 authoritative.
    pub fn with_w0(w0: f64) -> std::result::Result<Self, crate::ValidationError> {
        let w0 = require_positive("w0", w0)?;
        let period = require_positive("T", TAU / w0)?;
        Ok(Self {
            w0,
            period,
            active: LinkedField::W0,
        })
    }

    pub fn w0(&self) -> f64 {
        self.w0
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    /// The field last set directly by the user.
    pub fn active_input(&self) -> LinkedField {
        self.active
    }

    pub fn value(&self, field: LinkedField) -> f64 {
        match field {
            LinkedField::W0 => self.w0,
            LinkedField::Period => self.period,
        }
    }

    /// The text a form field shows for `field`.
    pub fn display(&self, field: LinkedField) -> String {
        format!("{:.4}", self.value(field))
    }

    pub fn set_w0<C>(&mut self, new_w0: f64, confirm: &mut C) -> Result<LinkChange>
    where
        C: ConfirmOverride + ?Sized,
    {
        self.set(LinkedField::W0, new_w0, confirm)
    }

    pub fn set_period<C>(&mut self, new_period: f64, confirm: &mut C) -> Result<LinkChange>
    where
        C: ConfirmOverride + ?Sized,
    {
        self.set(LinkedField::Period, new_period, confirm)
    }

    /// Parses `text` and applies it to `field`.
    pub fn submit_text<C>(&mut self, field: LinkedField, text: &str, confirm: &mut C) -> Result<LinkChange>
    where
        C: ConfirmOverride + ?Sized,
    {
        let value = parse_real(&field.to_string(), text).inspect_err(|e| {
            warn!("[PARAMS] rejected {} input: {}", field, e);
        })?;
        self.set(field, value, confirm)
    }

    /// Sets `field` to `value` and derives the other one.
    ///
    /// Asks `confirm` first when the other field is authoritative and the
    /// value actually changes. State is untouched on any error.
    pub fn set<C>(&mut self, field: LinkedField, value: f64, confirm: &mut C) -> Result<LinkChange>
    where
        C: ConfirmOverride + ?Sized,
    {
        let value = require_positive(&field.to_string(), value).inspect_err(|e| {
            warn!("[PARAMS] rejected {} value: {}", field, e);
        })?;

        let current = self.value(field);
        if (value - current).abs() <= LINK_TOLERANCE {
            debug!("[PARAMS] {} unchanged at {}", field, current);
            return Ok(LinkChange::Unchanged);
        }

        // A tiny but positive value can still overflow the other field.
        let derived = require_positive(&field.other().to_string(), TAU / value).inspect_err(|e| {
            warn!("[PARAMS] rejected {} value {}: {}", field, value, e);
        })?;

        if self.active != field {
            let prompt = OverridePrompt {
                field,
                current,
                requested: value,
                authoritative: self.active,
                authoritative_value: self.value(self.active),
            };
            if !confirm.confirm(&prompt) {
                info!("[PARAMS] override of {} by {} declined", self.active, field);
                return Err(SignalError::ConfirmationDeclined(field));
            }
        }

        match field {
            LinkedField::W0 => {
                self.w0 = value;
                self.period = derived;
            }
            LinkedField::Period => {
                self.period = value;
                self.w0 = derived;
            }
        }
        self.active = field;
        info!(
            "[PARAMS] {} set to {}; w0={:.6}, T={:.6}",
            field, value, self.w0, self.period
        );
        Ok(LinkChange::Updated)
    }
}
