//! # Startup Configuration
//!
//! Optional JSON file with evaluation settings and the values the form
//! fields start with. The file is only ever read; nothing from a session is
//! written back.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use signal_core::fourier::MAX_HARMONICS;
use signal_core::synthesis::{DEFAULT_DURATION, MAX_SIGNALS};
use signal_core::{Harmonic, SynthesisSignal, DEFAULT_SAMPLE_COUNT, MAX_SAMPLE_COUNT};
use tracing::{debug, info, warn};

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "signal_lab.json";

/// Environment variable overriding [`DEFAULT_CONFIG_PATH`].
pub const CONFIG_ENV: &str = "SIGNAL_LAB_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Samples per plotted waveform
    pub sample_count: usize,
    /// Duration substituted when the entered one is not positive
    pub fallback_duration: f64,
    /// ω0 the linked store starts from
    pub initial_w0: f64,
    /// Initial synthesizer fields
    pub synthesis: [SynthesisSignal; MAX_SIGNALS],
    pub duration: f64,
    /// Initial Fourier coefficient fields
    pub a0: f64,
    pub harmonics: [Harmonic; MAX_HARMONICS],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            fallback_duration: DEFAULT_DURATION,
            initial_w0: 1.0,
            synthesis: [SynthesisSignal::default(); MAX_SIGNALS],
            duration: DEFAULT_DURATION,
            a0: 0.0,
            harmonics: [Harmonic::default(); MAX_HARMONICS],
        }
    }
}

impl AppConfig {
    /// Parses and validates a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(json).context("invalid config JSON")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(2..=MAX_SAMPLE_COUNT).contains(&self.sample_count) {
            bail!(
                "sample_count must be between 2 and {}, got {}",
                MAX_SAMPLE_COUNT,
                self.sample_count
            );
        }
        if !(self.duration.is_finite() && self.duration > 0.0) {
            bail!("duration must be positive, got {}", self.duration);
        }
        if !(self.fallback_duration.is_finite() && self.fallback_duration > 0.0) {
            bail!("fallback_duration must be positive, got {}", self.fallback_duration);
        }
        if !(self.initial_w0.is_finite() && self.initial_w0 > 0.0) {
            bail!("initial_w0 must be positive, got {}", self.initial_w0);
        }
        Ok(())
    }
}

/// Where the config is read from: `$SIGNAL_LAB_CONFIG` or [`DEFAULT_CONFIG_PATH`].
pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Reads a config file.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let mut file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let mut data = String::new();
    file.read_to_string(&mut data)
        .with_context(|| format!("cannot read {}", path.display()))?;
    AppConfig::from_json(&data).with_context(|| format!("in {}", path.display()))
}

/// Reads the config at `path`, falling back to defaults on any problem.
pub fn load_or_default(path: &Path) -> AppConfig {
    if !path.exists() {
        debug!("[CONFIG] {} not found, using defaults", path.display());
        return AppConfig::default();
    }
    match load_config(path) {
        Ok(config) => {
            info!("[CONFIG] loaded {}", path.display());
            config
        }
        Err(e) => {
            warn!("[CONFIG] {:#}; using defaults", e);
            AppConfig::default()
        }
    }
}
