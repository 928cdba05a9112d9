//! # Signal Synthesis Module
//!
//! Evaluates up to three sinusoids `A·cos(2πft + θ)` / `A·sin(2πft + θ)` on a
//! uniform time grid and sums them.
//!
//! Each signal contributes *two* components sharing its amplitude, frequency
//! and phase: a cosine and a sine. All cosines come first, then all sines.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{require_finite, require_positive, ValidationError};
use crate::waveform::{check_sample_count, time_grid, Component, ComponentKind, SampledWaveform};

/// Maximum number of signals in one synthesis request.
pub const MAX_SIGNALS: usize = 3;

/// Plot duration used when the requested one is not positive.
pub const DEFAULT_DURATION: f64 = 2.0;

/// One sinusoidal signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SynthesisSignal {
    pub amplitude: f64,
    /// Frequency in Hz
    pub frequency: f64,
    /// Phase in radians
    pub phase: f64,
}

impl Default for SynthesisSignal {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            frequency: 1.0,
            phase: 0.0,
        }
    }
}

impl SynthesisSignal {
    /// Instantaneous phase `2πft + θ`.
    fn argument(&self, t: f64) -> f64 {
        TAU * self.frequency * t + self.phase
    }

    fn validate(&self, index: usize) -> Result<(), ValidationError> {
        require_finite(&format!("amplitude {}", index), self.amplitude)?;
        require_finite(&format!("frequency {}", index), self.frequency)?;
        require_finite(&format!("phase {}", index), self.phase)?;
        Ok(())
    }
}

/// A fully parsed synthesis draw request.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub signals: Vec<SynthesisSignal>,
    /// Plot duration in seconds
    pub duration: f64,
}

impl SynthesisRequest {
    pub fn evaluate(&self, sample_count: usize) -> Result<SampledWaveform, ValidationError> {
        evaluate_synthesis(&self.signals, self.duration, sample_count)
    }
}

/// Samples every signal's cosine and sine over `[0, duration]` and sums them.
///
/// # Errors
/// * `duration` not finite or not positive
/// * more than [`MAX_SIGNALS`] signals
/// * a non-finite signal parameter
/// * more than [`MAX_SAMPLE_COUNT`](crate::waveform::MAX_SAMPLE_COUNT) samples
pub fn evaluate_synthesis(
    signals: &[SynthesisSignal],
    duration: f64,
    sample_count: usize,
) -> Result<SampledWaveform, ValidationError> {
    require_positive("duration", duration)?;
    check_sample_count(sample_count)?;
    if signals.len() > MAX_SIGNALS {
        return Err(ValidationError::TooMany {
            what: "signals",
            max: MAX_SIGNALS,
            count: signals.len(),
        });
    }
    for (i, signal) in signals.iter().enumerate() {
        signal.validate(i + 1)?;
    }

    let time = time_grid(duration, sample_count);

    let cosines = signals.iter().enumerate().map(|(i, s)| Component {
        kind: ComponentKind::Cosine(i + 1),
        values: time.iter().map(|&t| s.amplitude * s.argument(t).cos()).collect(),
    });
    let sines = signals.iter().enumerate().map(|(i, s)| Component {
        kind: ComponentKind::Sine(i + 1),
        values: time.iter().map(|&t| s.amplitude * s.argument(t).sin()).collect(),
    });
    let components: Vec<Component> = cosines.chain(sines).collect();

    debug!(
        "[SYNTH] {} signals over {} s, {} samples",
        signals.len(),
        duration,
        time.len()
    );
    Ok(SampledWaveform::from_components(time, components))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> SynthesisSignal {
        SynthesisSignal { amplitude: 1.0, frequency: 1.0, phase: 0.0 }
    }

    #[test]
    fn cosine_starts_at_amplitude_and_sine_at_zero() {
        let waveform = evaluate_synthesis(&[unit()], 1.0, 5).unwrap();
        assert_eq!(waveform.len(), 5);
        assert_eq!(waveform.components.len(), 2);

        let cos = waveform.component(ComponentKind::Cosine(1)).unwrap();
        let sin = waveform.component(ComponentKind::Sine(1)).unwrap();
        assert_eq!(cos.values[0], 1.0);
        assert_eq!(sin.values[0], 0.0);
        // Quarter period at t = 0.25 s
        assert!(cos.values[1].abs() < 1e-12);
        assert!((sin.values[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn components_are_cosines_then_sines() {
        let signals = [unit(), SynthesisSignal { amplitude: 2.0, ..unit() }, unit()];
        let waveform = evaluate_synthesis(&signals, 2.0, 10).unwrap();
        let kinds: Vec<ComponentKind> = waveform.components.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ComponentKind::Cosine(1),
                ComponentKind::Cosine(2),
                ComponentKind::Cosine(3),
                ComponentKind::Sine(1),
                ComponentKind::Sine(2),
                ComponentKind::Sine(3),
            ]
        );
    }

    #[test]
    fn sum_is_elementwise_over_all_six_components() {
        let signals = [
            SynthesisSignal { amplitude: 1.5, frequency: 0.5, phase: 0.3 },
            SynthesisSignal { amplitude: -2.0, frequency: 3.0, phase: 1.0 },
            SynthesisSignal { amplitude: 0.25, frequency: 7.0, phase: -2.0 },
        ];
        let waveform = evaluate_synthesis(&signals, 2.0, 500).unwrap();
        for (i, &t) in waveform.time.iter().enumerate() {
            let expected: f64 = signals
                .iter()
                .map(|s| {
                    let arg = TAU * s.frequency * t + s.phase;
                    s.amplitude * arg.cos() + s.amplitude * arg.sin()
                })
                .sum();
            assert!((waveform.sum[i] - expected).abs() < 1e-9);
        }
        assert_eq!(*waveform.time.last().unwrap(), 2.0);
    }

    #[test]
    fn phase_shifts_the_cosine() {
        let signal = SynthesisSignal { phase: std::f64::consts::FRAC_PI_2, ..unit() };
        let waveform = evaluate_synthesis(&[signal], 1.0, 3).unwrap();
        let cos = waveform.component(ComponentKind::Cosine(1)).unwrap();
        assert!(cos.values[0].abs() < 1e-12);
    }

    #[test]
    fn repeated_evaluation_is_bit_identical() {
        let signals = [unit(), SynthesisSignal { frequency: 2.7, phase: 0.4, ..unit() }];
        let a = evaluate_synthesis(&signals, 3.3, 500).unwrap();
        let b = evaluate_synthesis(&signals, 3.3, 500).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_bad_duration_and_parameters() {
        assert!(matches!(
            evaluate_synthesis(&[unit()], 0.0, 10),
            Err(ValidationError::NotPositive { .. })
        ));
        assert!(matches!(
            evaluate_synthesis(&[unit()], -1.0, 10),
            Err(ValidationError::NotPositive { .. })
        ));
        let bad = SynthesisSignal { frequency: f64::NAN, ..unit() };
        assert_eq!(
            evaluate_synthesis(&[unit(), bad], 1.0, 10),
            Err(ValidationError::NotFinite { field: "frequency 2".into() })
        );
        assert!(matches!(
            evaluate_synthesis(&[unit(); 4], 1.0, 10),
            Err(ValidationError::TooMany { count: 4, .. })
        ));
    }

    #[test]
    fn oversized_grid_is_refused_before_allocating() {
        let count = crate::waveform::MAX_SAMPLE_COUNT + 1;
        assert_eq!(
            evaluate_synthesis(&[unit()], 1.0, count),
            Err(ValidationError::TooMany { what: "samples", max: count - 1, count })
        );
        assert!(evaluate_synthesis(&[unit()], 1.0, usize::MAX).is_err());
    }

    #[test]
    fn no_signals_gives_a_flat_sum() {
        let waveform = evaluate_synthesis(&[], 1.0, 8).unwrap();
        assert!(waveform.components.is_empty());
        assert_eq!(waveform.sum, vec![0.0; 8]);
    }

    #[test]
    fn request_evaluates_with_its_duration() {
        let request = SynthesisRequest { signals: vec![unit()], duration: 4.0 };
        let waveform = request.evaluate(9).unwrap();
        assert_eq!(waveform.time[8], 4.0);
    }
}
