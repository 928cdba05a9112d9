//! Sampled time-domain waveforms shared by the synthesis and Fourier evaluators.

use std::fmt;

use crate::error::ValidationError;

/// Number of samples per plotted waveform.
pub const DEFAULT_SAMPLE_COUNT: usize = 500;

/// Largest grid an evaluator will allocate.
pub const MAX_SAMPLE_COUNT: usize = 100_000;

pub(crate) fn check_sample_count(count: usize) -> Result<usize, ValidationError> {
    if count > MAX_SAMPLE_COUNT {
        return Err(ValidationError::TooMany {
            what: "samples",
            max: MAX_SAMPLE_COUNT,
            count,
        });
    }
    Ok(count)
}

/// `count` evenly spaced points over `[0, end]`, both ends included.
///
/// An empty grid for `count == 0` and `[0.0]` for `count == 1`.
pub fn time_grid(end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let step = end / (count - 1) as f64;
            let mut grid: Vec<f64> = (0..count).map(|i| i as f64 * step).collect();
            // Pin the last point so the grid ends exactly at `end`.
            grid[count - 1] = end;
            grid
        }
    }
}

/// What a component represents. Indices are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    /// The constant a0/2 term of a Fourier series
    Dc,
    Cosine(usize),
    Sine(usize),
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentKind::Dc => write!(f, "DC"),
            ComponentKind::Cosine(k) => write!(f, "cos {}", k),
            ComponentKind::Sine(k) => write!(f, "sin {}", k),
        }
    }
}

/// One sampled component, aligned with [`SampledWaveform::time`].
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub kind: ComponentKind,
    pub values: Vec<f64>,
}

/// Components evaluated on a shared time grid, plus their elementwise sum.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledWaveform {
    pub time: Vec<f64>,
    pub components: Vec<Component>,
    pub sum: Vec<f64>,
}

/// One row of a [`SampledWaveform`].
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub t: f64,
    pub components: Vec<f64>,
    pub sum: f64,
}

impl SampledWaveform {
    /// Sums `components` in order and packs them with `time`.
    pub(crate) fn from_components(time: Vec<f64>, components: Vec<Component>) -> Self {
        let mut sum = vec![0.0; time.len()];
        for component in &components {
            for (acc, value) in sum.iter_mut().zip(&component.values) {
                *acc += *value;
            }
        }
        Self {
            time,
            components,
            sum,
        }
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn component(&self, kind: ComponentKind) -> Option<&Component> {
        self.components.iter().find(|c| c.kind == kind)
    }

    /// Row-wise view: `(t, components at t, sum at t)`.
    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        self.time.iter().enumerate().map(move |(i, &t)| Sample {
            t,
            components: self.components.iter().map(|c| c.values[i]).collect(),
            sum: self.sum[i],
        })
    }
}
