//! # Fourier Series Module
//!
//! Evaluates a truncated Fourier series
//!
//! ```text
//! x(t) = a0/2 + Σ_k [ a_k·cos(k·ω0·t) + b_k·sin(k·ω0·t) ]
//! ```
//!
//! over one period `[0, T]`, keeping every term as its own component so the
//! presentation layer can plot them separately.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{require_finite, require_positive, ValidationError};
use crate::params::LinkedParameters;
use crate::waveform::{check_sample_count, time_grid, Component, ComponentKind, SampledWaveform};

/// Maximum number of harmonics in one series.
pub const MAX_HARMONICS: usize = 3;

/// Cosine and sine coefficients of one harmonic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Harmonic {
    /// a_k
    pub a: f64,
    /// b_k
    pub b: f64,
}

/// A fully parsed Fourier draw request.
///
/// `w0 · period == 2π` holds whenever it was built from a
/// [`LinkedParameters`]; evaluation itself only requires both to be positive.
#[derive(Debug, Clone, PartialEq)]
pub struct FourierSpec {
    pub a0: f64,
    /// Harmonics k = 1, 2, 3 in order
    pub harmonics: Vec<Harmonic>,
    pub w0: f64,
    pub period: f64,
}

impl FourierSpec {
    /// Takes ω0 and T from the linked store.
    pub fn new(a0: f64, harmonics: Vec<Harmonic>, params: &LinkedParameters) -> Self {
        Self {
            a0,
            harmonics,
            w0: params.w0(),
            period: params.period(),
        }
    }

    /// The constant term a0/2.
    pub fn dc(&self) -> f64 {
        self.a0 / 2.0
    }

    pub fn evaluate(&self, sample_count: usize) -> Result<SampledWaveform, ValidationError> {
        evaluate_fourier(self, sample_count)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_positive("w0", self.w0)?;
        require_positive("T", self.period)?;
        require_finite("a0", self.a0)?;
        if self.harmonics.len() > MAX_HARMONICS {
            return Err(ValidationError::TooMany {
                what: "harmonics",
                max: MAX_HARMONICS,
                count: self.harmonics.len(),
            });
        }
        for (i, h) in self.harmonics.iter().enumerate() {
            let k = i + 1;
            require_finite(&format!("a{}", k), h.a)?;
            require_finite(&format!("b{}", k), h.b)?;
        }
        Ok(())
    }
}

/// Samples the DC term and each harmonic's cosine and sine over `[0, T]`.
///
/// Components come out as `Dc, Cosine(1), Sine(1), Cosine(2), Sine(2), ...`.
pub fn evaluate_fourier(spec: &FourierSpec, sample_count: usize) -> Result<SampledWaveform, ValidationError> {
    spec.validate()?;
    check_sample_count(sample_count)?;

    let time = time_grid(spec.period, sample_count);
    let mut components = Vec::with_capacity(1 + 2 * spec.harmonics.len());
    components.push(Component {
        kind: ComponentKind::Dc,
        values: vec![spec.dc(); time.len()],
    });

    for (i, h) in spec.harmonics.iter().enumerate() {
        let k = (i + 1) as f64;
        components.push(Component {
            kind: ComponentKind::Cosine(i + 1),
            values: time.iter().map(|&t| h.a * (k * spec.w0 * t).cos()).collect(),
        });
        components.push(Component {
            kind: ComponentKind::Sine(i + 1),
            values: time.iter().map(|&t| h.b * (k * spec.w0 * t).sin()).collect(),
        });
    }

    debug!(
        "[FOURIER] a0={}, {} harmonics, w0={}, T={}, {} samples",
        spec.a0,
        spec.harmonics.len(),
        spec.w0,
        spec.period,
        time.len()
    );
    Ok(SampledWaveform::from_components(time, components))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waveform::DEFAULT_SAMPLE_COUNT;
    use std::f64::consts::TAU;

    fn spec(a0: f64, harmonics: [(f64, f64); 3]) -> FourierSpec {
        FourierSpec {
            a0,
            harmonics: harmonics.iter().map(|&(a, b)| Harmonic { a, b }).collect(),
            w0: 1.0,
            period: TAU,
        }
    }

    #[test]
    fn all_zero_coefficients_give_zero_sum() {
        let waveform = evaluate_fourier(&spec(0.0, [(0.0, 0.0); 3]), DEFAULT_SAMPLE_COUNT).unwrap();
        assert_eq!(waveform.len(), 500);
        assert!(waveform.sum.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn dc_only_is_half_of_a0() {
        let waveform = evaluate_fourier(&spec(2.0, [(0.0, 0.0); 3]), DEFAULT_SAMPLE_COUNT).unwrap();
        assert!(waveform.sum.iter().all(|&v| v == 1.0));
        let dc = waveform.component(ComponentKind::Dc).unwrap();
        assert!(dc.values.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn grid_spans_one_period() {
        let waveform = evaluate_fourier(&spec(0.0, [(1.0, 0.0); 3]), 50).unwrap();
        assert_eq!(waveform.time[0], 0.0);
        assert_eq!(waveform.time[49], TAU);
    }

    #[test]
    fn components_interleave_cosines_and_sines() {
        let waveform = evaluate_fourier(&spec(1.0, [(1.0, 2.0), (3.0, 4.0), (5.0, 6.0)]), 20).unwrap();
        let kinds: Vec<ComponentKind> = waveform.components.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ComponentKind::Dc,
                ComponentKind::Cosine(1),
                ComponentKind::Sine(1),
                ComponentKind::Cosine(2),
                ComponentKind::Sine(2),
                ComponentKind::Cosine(3),
                ComponentKind::Sine(3),
            ]
        );
    }

    #[test]
    fn harmonics_use_integer_multiples_of_w0() {
        let s = FourierSpec {
            a0: 1.0,
            harmonics: vec![
                Harmonic { a: 1.0, b: 0.5 },
                Harmonic { a: -0.5, b: 0.25 },
                Harmonic { a: 0.1, b: -1.0 },
            ],
            w0: 2.0,
            period: TAU / 2.0,
        };
        let waveform = evaluate_fourier(&s, 100).unwrap();
        for (i, &t) in waveform.time.iter().enumerate() {
            let mut expected = 0.5;
            for (j, h) in s.harmonics.iter().enumerate() {
                let k = (j + 1) as f64;
                expected += h.a * (k * 2.0 * t).cos() + h.b * (k * 2.0 * t).sin();
            }
            assert!((waveform.sum[i] - expected).abs() < 1e-12);
        }
        // Third-harmonic cosine at t = 0 is a3
        let cos3 = waveform.component(ComponentKind::Cosine(3)).unwrap();
        assert_eq!(cos3.values[0], 0.1);
    }

    #[test]
    fn repeated_evaluation_is_bit_identical() {
        let s = spec(0.7, [(1.3, -0.2), (0.0, 2.2), (0.9, 0.1)]);
        assert_eq!(evaluate_fourier(&s, 500).unwrap(), evaluate_fourier(&s, 500).unwrap());
    }

    #[test]
    fn rejects_non_positive_w0_or_period() {
        let mut s = spec(0.0, [(0.0, 0.0); 3]);
        s.w0 = 0.0;
        assert!(matches!(evaluate_fourier(&s, 10), Err(ValidationError::NotPositive { .. })));

        let mut s = spec(0.0, [(0.0, 0.0); 3]);
        s.period = -1.0;
        assert!(matches!(evaluate_fourier(&s, 10), Err(ValidationError::NotPositive { .. })));

        let mut s = spec(0.0, [(0.0, 0.0); 3]);
        s.harmonics[1].b = f64::INFINITY;
        assert_eq!(
            evaluate_fourier(&s, 10),
            Err(ValidationError::NotFinite { field: "b2".into() })
        );

        let mut s = spec(0.0, [(0.0, 0.0); 3]);
        s.harmonics.push(Harmonic::default());
        assert!(matches!(evaluate_fourier(&s, 10), Err(ValidationError::TooMany { .. })));

        let s = spec(0.0, [(0.0, 0.0); 3]);
        assert!(matches!(
            evaluate_fourier(&s, crate::waveform::MAX_SAMPLE_COUNT + 1),
            Err(ValidationError::TooMany { what: "samples", .. })
        ));
    }

    #[test]
    fn spec_follows_linked_store() {
        let mut params = LinkedParameters::default();
        params.set_period(4.0, &mut |_: &crate::OverridePrompt| true).unwrap();
        let s = FourierSpec::new(1.0, vec![Harmonic::default()], &params);
        assert_eq!(s.period, 4.0);
        assert!((s.w0 * s.period - TAU).abs() < 1e-12);
    }
}
