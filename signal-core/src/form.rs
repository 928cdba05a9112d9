//! # Form Module
//!
//! Raw field text as the presentation layer holds it, and its conversion into
//! typed evaluation requests. Every field is addressed directly by struct
//! position, so there is no name-based widget lookup.

use tracing::warn;

use crate::error::ValidationError;
use crate::fourier::{FourierSpec, Harmonic, MAX_HARMONICS};
use crate::params::LinkedParameters;
use crate::synthesis::{SynthesisRequest, SynthesisSignal, DEFAULT_DURATION, MAX_SIGNALS};

/// Parses a real number from field text, ignoring surrounding whitespace.
pub fn parse_real(field: &str, text: &str) -> Result<f64, ValidationError> {
    let value: f64 = text.trim().parse().map_err(|_| ValidationError::NotANumber {
        field: field.to_string(),
        text: text.to_string(),
    })?;
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }
    Ok(value)
}

/// Formats a value the way it is first shown in a text field.
fn field_text(value: f64) -> String {
    format!("{:?}", value)
}

/// Text of the three inputs of one synthesis signal.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalFields {
    pub amplitude: String,
    pub frequency: String,
    pub phase: String,
}

impl From<&SynthesisSignal> for SignalFields {
    fn from(signal: &SynthesisSignal) -> Self {
        Self {
            amplitude: field_text(signal.amplitude),
            frequency: field_text(signal.frequency),
            phase: field_text(signal.phase),
        }
    }
}

impl Default for SignalFields {
    fn default() -> Self {
        Self::from(&SynthesisSignal::default())
    }
}

impl SignalFields {
    /// `index` is 1-based and only used to name the offending field.
    pub fn parse(&self, index: usize) -> Result<SynthesisSignal, ValidationError> {
        Ok(SynthesisSignal {
            amplitude: parse_real(&format!("amplitude {}", index), &self.amplitude)?,
            frequency: parse_real(&format!("frequency {}", index), &self.frequency)?,
            phase: parse_real(&format!("phase {}", index), &self.phase)?,
        })
    }
}

/// The synthesizer tab's inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisForm {
    pub signals: [SignalFields; MAX_SIGNALS],
    /// Plot duration in seconds
    pub duration: String,
}

impl Default for SynthesisForm {
    fn default() -> Self {
        Self::from_signals(&[SynthesisSignal::default(); MAX_SIGNALS], DEFAULT_DURATION)
    }
}

impl SynthesisForm {
    pub fn from_signals(signals: &[SynthesisSignal; MAX_SIGNALS], duration: f64) -> Self {
        Self {
            signals: signals.each_ref().map(SignalFields::from),
            duration: field_text(duration),
        }
    }

    /// Parses every field into a request.
    ///
    /// A duration that parses but is not positive is replaced by
    /// `fallback_duration`; text that does not parse is an error.
    pub fn to_request(&self, fallback_duration: f64) -> Result<SynthesisRequest, ValidationError> {
        let signals = self
            .signals
            .iter()
            .enumerate()
            .map(|(i, fields)| fields.parse(i + 1))
            .collect::<Result<Vec<_>, _>>()?;

        let mut duration = parse_real("duration", &self.duration)?;
        if duration <= 0.0 {
            warn!(
                "[FORM] duration {} is not positive, using {} s",
                duration, fallback_duration
            );
            duration = fallback_duration;
        }

        Ok(SynthesisRequest { signals, duration })
    }
}

/// Text of one harmonic's coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct HarmonicFields {
    pub a: String,
    pub b: String,
}

impl From<&Harmonic> for HarmonicFields {
    fn from(h: &Harmonic) -> Self {
        Self {
            a: field_text(h.a),
            b: field_text(h.b),
        }
    }
}

impl Default for HarmonicFields {
    fn default() -> Self {
        Self::from(&Harmonic::default())
    }
}

impl HarmonicFields {
    /// `k` is the harmonic number.
    pub fn parse(&self, k: usize) -> Result<Harmonic, ValidationError> {
        Ok(Harmonic {
            a: parse_real(&format!("a{}", k), &self.a)?,
            b: parse_real(&format!("b{}", k), &self.b)?,
        })
    }
}

/// The Fourier tab's coefficient inputs. ω0 and T live in [`LinkedParameters`].
#[derive(Debug, Clone, PartialEq)]
pub struct FourierForm {
    pub a0: String,
    pub harmonics: [HarmonicFields; MAX_HARMONICS],
}

impl Default for FourierForm {
    fn default() -> Self {
        Self::from_coefficients(0.0, &[Harmonic::default(); MAX_HARMONICS])
    }
}

impl FourierForm {
    pub fn from_coefficients(a0: f64, harmonics: &[Harmonic; MAX_HARMONICS]) -> Self {
        Self {
            a0: field_text(a0),
            harmonics: harmonics.each_ref().map(HarmonicFields::from),
        }
    }

    /// Parses the coefficients and pairs them with the store's ω0 and T.
    pub fn to_spec(&self, params: &LinkedParameters) -> Result<FourierSpec, ValidationError> {
        let a0 = parse_real("a0", &self.a0)?;
        let harmonics = self
            .harmonics
            .iter()
            .enumerate()
            .map(|(i, fields)| fields.parse(i + 1))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FourierSpec::new(a0, harmonics, params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_real_trims_and_rejects_garbage() {
        assert_eq!(parse_real("x", " 1.5 "), Ok(1.5));
        assert_eq!(parse_real("x", "-2e-3"), Ok(-0.002));
        assert_eq!(
            parse_real("amplitude 1", "abc"),
            Err(ValidationError::NotANumber {
                field: "amplitude 1".into(),
                text: "abc".into()
            })
        );
        assert!(matches!(parse_real("x", ""), Err(ValidationError::NotANumber { .. })));
        assert!(matches!(parse_real("x", "inf"), Err(ValidationError::NotFinite { .. })));
        assert!(matches!(parse_real("x", "NaN"), Err(ValidationError::NotFinite { .. })));
    }

    #[test]
    fn default_synthesis_form_matches_initial_fields() {
        let form = SynthesisForm::default();
        assert_eq!(form.signals[0].amplitude, "1.0");
        assert_eq!(form.signals[2].frequency, "1.0");
        assert_eq!(form.signals[1].phase, "0.0");
        assert_eq!(form.duration, "2.0");

        let request = form.to_request(DEFAULT_DURATION).unwrap();
        assert_eq!(request.signals, vec![SynthesisSignal::default(); 3]);
        assert_eq!(request.duration, 2.0);
    }

    #[test]
    fn non_positive_duration_falls_back() {
        let mut form = SynthesisForm::default();
        form.duration = "0".into();
        assert_eq!(form.to_request(2.0).unwrap().duration, 2.0);
        form.duration = "-3.5".into();
        assert_eq!(form.to_request(5.0).unwrap().duration, 5.0);
        form.duration = "0.75".into();
        assert_eq!(form.to_request(2.0).unwrap().duration, 0.75);
    }

    #[test]
    fn bad_synthesis_field_is_reported_by_name() {
        let mut form = SynthesisForm::default();
        form.signals[1].frequency = "fast".into();
        assert_eq!(
            form.to_request(2.0),
            Err(ValidationError::NotANumber {
                field: "frequency 2".into(),
                text: "fast".into()
            })
        );

        let mut form = SynthesisForm::default();
        form.duration = "abc".into();
        assert!(form.to_request(2.0).is_err());
    }

    #[test]
    fn fourier_form_uses_store_values_and_leaves_it_alone() {
        let params = LinkedParameters::with_w0(2.0).unwrap();
        let before = params.clone();

        let mut form = FourierForm::from_coefficients(
            1.0,
            &[Harmonic { a: 0.5, b: 0.0 }, Harmonic::default(), Harmonic { a: 0.0, b: -1.0 }],
        );
        let spec = form.to_spec(&params).unwrap();
        assert_eq!(spec.a0, 1.0);
        assert_eq!(spec.w0, 2.0);
        assert_eq!(spec.harmonics[2], Harmonic { a: 0.0, b: -1.0 });

        form.harmonics[0].b = "abc".into();
        assert_eq!(
            form.to_spec(&params),
            Err(ValidationError::NotANumber {
                field: "b1".into(),
                text: "abc".into()
            })
        );
        assert_eq!(params, before);
    }

    #[test]
    fn default_fourier_form_is_all_zero() {
        let form = FourierForm::default();
        assert_eq!(form.a0, "0.0");
        assert_eq!(form.harmonics[1].b, "0.0");
    }
}
