//! # Plot Description Module
//!
//! Turns evaluated waveforms into renderer-agnostic panel descriptions:
//! a title, labeled curves with colors, and whether a legend is wanted.
//! Drawing axes and pixels is left entirely to the presentation layer.

use crate::fourier::FourierSpec;
use crate::synthesis::SynthesisRequest;
use crate::waveform::{ComponentKind, SampledWaveform};

pub const TIME_LABEL: &str = "Time (s)";
pub const AMPLITUDE_LABEL: &str = "Amplitude";

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLUE: Rgb = Rgb(0x1f, 0x77, 0xb4);
    pub const GREEN: Rgb = Rgb(0x2c, 0xa0, 0x2c);
    pub const PURPLE: Rgb = Rgb(0x94, 0x67, 0xbd);
    pub const BROWN: Rgb = Rgb(0x8c, 0x56, 0x4b);
    pub const CYAN: Rgb = Rgb(0x17, 0xbe, 0xcf);
    pub const LIME: Rgb = Rgb(0x7f, 0xff, 0x00);
    pub const MAGENTA: Rgb = Rgb(0xff, 0x00, 0xff);
    pub const VIOLET: Rgb = Rgb(0xee, 0x82, 0xee);
    pub const SANDY_BROWN: Rgb = Rgb(0xf4, 0xa4, 0x60);
    pub const RED: Rgb = Rgb(0xe0, 0x20, 0x20);
}

const SYNTH_COSINE_COLORS: [Rgb; 3] = [Rgb::BLUE, Rgb::GREEN, Rgb::PURPLE];
const SYNTH_SINE_COLORS: [Rgb; 3] = [Rgb::CYAN, Rgb::LIME, Rgb::MAGENTA];
const FOURIER_COSINE_COLORS: [Rgb; 3] = [Rgb::GREEN, Rgb::PURPLE, Rgb::BROWN];
const FOURIER_SINE_COLORS: [Rgb; 3] = [Rgb::LIME, Rgb::VIOLET, Rgb::SANDY_BROWN];

const COMPONENT_WIDTH: f32 = 1.5;
const TOTAL_WIDTH: f32 = 2.0;

/// One polyline with its legend label.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub label: String,
    pub color: Rgb,
    pub width: f32,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

/// One subplot.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotPanel {
    /// May contain a line break
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub curves: Vec<Curve>,
    pub show_legend: bool,
}

impl PlotPanel {
    fn new(title: impl Into<String>, curves: Vec<Curve>) -> Self {
        Self {
            title: title.into(),
            x_label: TIME_LABEL,
            y_label: AMPLITUDE_LABEL,
            curves,
            show_legend: false,
        }
    }

    fn with_legend(mut self, show: bool) -> Self {
        self.show_legend = show;
        self
    }

    /// Smallest and largest x over all curves.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        bounds(self.curves.iter().flat_map(|c| c.xs.iter().copied()))
    }

    /// y bounds over all curves, padded so lines don't touch the frame.
    ///
    /// A flat set of values gets a ±1 band around it.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        let (lo, hi) = bounds(self.curves.iter().flat_map(|c| c.ys.iter().copied()))?;
        let span = hi - lo;
        if span < 1e-12 {
            return Some((lo - 1.0, hi + 1.0));
        }
        let pad = span * 0.05;
        Some((lo - pad, hi + pad))
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.filter(|v| v.is_finite()).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

fn curve(waveform: &SampledWaveform, values: &[f64], label: String, color: Rgb, width: f32) -> Curve {
    Curve {
        label,
        color,
        width,
        xs: waveform.time.clone(),
        ys: values.to_vec(),
    }
}

/// One panel per cosine, one per sine, then the total.
pub fn synthesis_panels(request: &SynthesisRequest, waveform: &SampledWaveform) -> Vec<PlotPanel> {
    let mut panels = Vec::with_capacity(2 * request.signals.len() + 1);

    for (name, is_cosine, colors) in [
        ("Cosine", true, SYNTH_COSINE_COLORS),
        ("Sine", false, SYNTH_SINE_COLORS),
    ] {
        for (i, signal) in request.signals.iter().enumerate() {
            let kind = if is_cosine {
                ComponentKind::Cosine(i + 1)
            } else {
                ComponentKind::Sine(i + 1)
            };
            let Some(component) = waveform.component(kind) else {
                continue;
            };
            let title = format!(
                "{} {}: A={:?}, f={:?} Hz\nPhase={:.2} rad",
                name,
                i + 1,
                signal.amplitude,
                signal.frequency,
                signal.phase
            );
            let color = colors[i % colors.len()];
            panels.push(PlotPanel::new(
                title,
                vec![curve(waveform, &component.values, kind.to_string(), color, COMPONENT_WIDTH)],
            ));
        }
    }

    panels.push(PlotPanel::new(
        "Total Synthesized Signal",
        vec![curve(waveform, &waveform.sum, "sum".to_string(), Rgb::RED, TOTAL_WIDTH)],
    ));
    panels
}

/// DC term, all cosine terms, all sine terms, then the total.
///
/// A term panel only carries a legend when one of its coefficients is non-zero.
pub fn fourier_panels(spec: &FourierSpec, waveform: &SampledWaveform) -> Vec<PlotPanel> {
    let mut panels = Vec::with_capacity(4);

    let dc_curves = waveform
        .component(ComponentKind::Dc)
        .map(|c| vec![curve(waveform, &c.values, "a0/2".to_string(), Rgb::BLUE, COMPONENT_WIDTH)])
        .unwrap_or_default();
    panels.push(PlotPanel::new(
        format!("DC Component: a0/2 = {:.2}", spec.dc()),
        dc_curves,
    ));

    let mut cosines = Vec::new();
    let mut sines = Vec::new();
    for k in 1..=spec.harmonics.len() {
        let color_index = (k - 1) % FOURIER_COSINE_COLORS.len();
        if let Some(c) = waveform.component(ComponentKind::Cosine(k)) {
            cosines.push(curve(
                waveform,
                &c.values,
                format!("a{k}*cos({k}w0t)"),
                FOURIER_COSINE_COLORS[color_index],
                COMPONENT_WIDTH,
            ));
        }
        if let Some(s) = waveform.component(ComponentKind::Sine(k)) {
            sines.push(curve(
                waveform,
                &s.values,
                format!("b{k}*sin({k}w0t)"),
                FOURIER_SINE_COLORS[color_index],
                COMPONENT_WIDTH,
            ));
        }
    }
    let any_a = spec.harmonics.iter().any(|h| h.a != 0.0);
    let any_b = spec.harmonics.iter().any(|h| h.b != 0.0);

    panels.push(PlotPanel::new("Cosine Terms (ak * cos(k*w0*t))", cosines).with_legend(any_a));
    panels.push(PlotPanel::new("Sine Terms (bk * sin(k*w0*t))", sines).with_legend(any_b));
    panels.push(PlotPanel::new(
        "Total Fourier Series",
        vec![curve(waveform, &waveform.sum, "sum".to_string(), Rgb::RED, TOTAL_WIDTH)],
    ));
    panels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fourier::{evaluate_fourier, Harmonic};
    use crate::synthesis::SynthesisSignal;
    use std::f64::consts::TAU;

    fn synth_request() -> SynthesisRequest {
        SynthesisRequest {
            signals: vec![
                SynthesisSignal { amplitude: 1.0, frequency: 2.0, phase: 0.5 },
                SynthesisSignal::default(),
                SynthesisSignal { amplitude: 3.5, frequency: 0.25, phase: -1.0 },
            ],
            duration: 2.0,
        }
    }

    #[test]
    fn synthesis_has_seven_panels_in_order() {
        let request = synth_request();
        let waveform = request.evaluate(50).unwrap();
        let panels = synthesis_panels(&request, &waveform);

        assert_eq!(panels.len(), 7);
        assert_eq!(panels[0].title, "Cosine 1: A=1.0, f=2.0 Hz\nPhase=0.50 rad");
        assert_eq!(panels[5].title, "Sine 3: A=3.5, f=0.25 Hz\nPhase=-1.00 rad");
        assert_eq!(panels[6].title, "Total Synthesized Signal");
        assert_eq!(panels[3].curves[0].color, Rgb::CYAN);
        assert_eq!(panels[6].curves[0].ys, waveform.sum);
        assert!(panels.iter().all(|p| p.x_label == TIME_LABEL && p.y_label == AMPLITUDE_LABEL));
        assert!(panels.iter().all(|p| p.curves[0].xs.len() == 50));
        assert!(panels[6].curves[0].width > panels[0].curves[0].width);
    }

    #[test]
    fn fourier_panels_group_terms() {
        let spec = FourierSpec {
            a0: 3.0,
            harmonics: vec![
                Harmonic { a: 1.0, b: 0.0 },
                Harmonic::default(),
                Harmonic::default(),
            ],
            w0: 1.0,
            period: TAU,
        };
        let waveform = evaluate_fourier(&spec, 40).unwrap();
        let panels = fourier_panels(&spec, &waveform);

        assert_eq!(panels.len(), 4);
        assert_eq!(panels[0].title, "DC Component: a0/2 = 1.50");
        let labels: Vec<&str> = panels[1].curves.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["a1*cos(1w0t)", "a2*cos(2w0t)", "a3*cos(3w0t)"]);
        assert_eq!(panels[2].curves[2].label, "b3*sin(3w0t)");
        assert!(panels[1].show_legend);
        assert!(!panels[2].show_legend);
        assert_eq!(panels[3].curves[0].ys, waveform.sum);
    }

    #[test]
    fn y_range_pads_flat_and_varying_data() {
        let flat = PlotPanel::new(
            "flat",
            vec![Curve {
                label: "dc".into(),
                color: Rgb::BLUE,
                width: 1.0,
                xs: vec![0.0, 1.0],
                ys: vec![1.0, 1.0],
            }],
        );
        assert_eq!(flat.y_range(), Some((0.0, 2.0)));
        assert_eq!(flat.x_range(), Some((0.0, 1.0)));

        let varying = PlotPanel::new(
            "varying",
            vec![Curve {
                label: "x".into(),
                color: Rgb::RED,
                width: 1.0,
                xs: vec![0.0, 1.0, 2.0],
                ys: vec![-1.0, 0.0, 1.0],
            }],
        );
        let (lo, hi) = varying.y_range().unwrap();
        assert!((lo + 1.1).abs() < 1e-12 && (hi - 1.1).abs() < 1e-12);

        let empty = PlotPanel::new("empty", vec![]);
        assert_eq!(empty.y_range(), None);
    }
}
