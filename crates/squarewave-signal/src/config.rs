//! Signal generation parameters.
//!
//! Defaults describe the standard test signal: 100 samples alternating
//! between 95 and 159 (127 ± 32) in runs of 2..10 samples, with N(0, 10)
//! noise on top.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SignalError, SignalResult};
use crate::noise::QuantizeMode;

/// Default number of samples per generated signal.
pub const SAMPLE_SIZE: usize = 100;
/// Lower bound of the display range.
pub const Y_MIN: u8 = 0;
/// Upper bound of the display range.
pub const Y_MAX: u8 = 255;
/// Default midpoint between the two levels.
pub const MID: u8 = 127;
/// Default distance from the midpoint to each level.
pub const HALF_AMPLITUDE: u8 = 32;
/// Default minimum segment duration in samples (inclusive).
pub const SIG_MIN_DUR: usize = 2;
/// Default maximum segment duration in samples (exclusive).
pub const SIG_MAX_DUR: usize = 10;
/// Default noise mean.
pub const NOISE_MEAN: f64 = 0.0;
/// Default noise standard deviation.
pub const NOISE_STDDEV: f64 = 10.0;

/// Parameters for the square-wave synthesizer and the noise stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SignalConfig {
    /// Number of samples to generate.
    pub sample_size: usize,
    /// Midpoint between LOW and HIGH.
    pub mid: u8,
    /// LOW = mid - half_amplitude, HIGH = mid + half_amplitude.
    pub half_amplitude: u8,
    /// Minimum segment duration (inclusive).
    pub min_duration: usize,
    /// Maximum segment duration (exclusive).
    pub max_duration: usize,
    /// Noise stage parameters.
    pub noise: NoiseConfig,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            sample_size: SAMPLE_SIZE,
            mid: MID,
            half_amplitude: HALF_AMPLITUDE,
            min_duration: SIG_MIN_DUR,
            max_duration: SIG_MAX_DUR,
            noise: NoiseConfig::default(),
        }
    }
}

/// Parameters for additive Gaussian noise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NoiseConfig {
    /// Mean of the normal distribution.
    pub mean: f64,
    /// Standard deviation of the normal distribution.
    pub stddev: f64,
    /// How out-of-range sums are mapped back to bytes.
    pub mode: QuantizeMode,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            mean: NOISE_MEAN,
            stddev: NOISE_STDDEV,
            mode: QuantizeMode::Wrap,
        }
    }
}

impl NoiseConfig {
    /// Checks that the distribution parameters are usable.
    pub fn validate(&self) -> SignalResult<()> {
        if !self.mean.is_finite() {
            return Err(SignalError::invalid_noise(format!(
                "mean must be finite, got {}",
                self.mean
            )));
        }
        if !self.stddev.is_finite() || self.stddev < 0.0 {
            return Err(SignalError::invalid_noise(format!(
                "stddev must be finite and non-negative, got {}",
                self.stddev
            )));
        }
        Ok(())
    }
}

impl SignalConfig {
    /// Loads a config from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> SignalResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| SignalError::io(path, e))?;
        Self::from_json(&text)
    }

    /// Parses and validates a config from JSON text.
    pub fn from_json(text: &str) -> SignalResult<Self> {
        let config: SignalConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// The lower signal level.
    pub fn low(&self) -> u8 {
        self.mid.saturating_sub(self.half_amplitude)
    }

    /// The upper signal level.
    pub fn high(&self) -> u8 {
        self.mid.saturating_add(self.half_amplitude)
    }

    /// Checks every field, including that both levels fit in a byte.
    pub fn validate(&self) -> SignalResult<()> {
        if self.sample_size == 0 {
            return Err(SignalError::InvalidSampleSize {
                size: self.sample_size,
            });
        }
        self.validate_shape()?;
        self.noise.validate()
    }

    /// Checks the segment durations and levels, ignoring `sample_size`.
    pub fn validate_shape(&self) -> SignalResult<()> {
        if self.min_duration == 0 {
            return Err(SignalError::invalid_config(
                "min_duration",
                "must be at least 1",
            ));
        }
        if self.max_duration <= self.min_duration {
            return Err(SignalError::invalid_config(
                "max_duration",
                format!(
                    "must be greater than min_duration ({}), got {}",
                    self.min_duration, self.max_duration
                ),
            ));
        }
        if self.half_amplitude == 0 {
            return Err(SignalError::invalid_config(
                "half_amplitude",
                "must be non-zero so the two levels differ",
            ));
        }

        let mid = self.mid as u16;
        let half = self.half_amplitude as u16;
        if half > mid || mid + half > Y_MAX as u16 {
            return Err(SignalError::invalid_config(
                "half_amplitude",
                format!(
                    "levels {} ± {} do not fit in {}..={}",
                    mid, half, Y_MIN, Y_MAX
                ),
            ));
        }

        Ok(())
    }
}
