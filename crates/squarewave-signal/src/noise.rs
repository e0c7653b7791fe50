//! Additive Gaussian noise.
//!
//! Each sample gets an independent Normal(mean, stddev) draw added to it, and
//! the sum is mapped back to a byte. By default out-of-range sums wrap around
//! modulo 256 the way a plain float-to-`uint8` cast does.

use std::f64::consts::PI;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::NoiseConfig;
use crate::error::SignalResult;

/// How a noisy sample outside `0..=255` is mapped back to a byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantizeMode {
    /// Truncate toward zero, then reduce modulo 256 (260.3 -> 4, -1.5 -> 255).
    #[default]
    Wrap,
    /// Truncate toward zero, then clamp to `0..=255`.
    Saturate,
}

impl QuantizeMode {
    /// Maps a noisy sample value to a byte.
    pub fn quantize(self, value: f64) -> u8 {
        let truncated = value.trunc() as i64;
        match self {
            QuantizeMode::Wrap => truncated.rem_euclid(256) as u8,
            QuantizeMode::Saturate => truncated.clamp(0, 255) as u8,
        }
    }
}

/// Draws one standard-normal value using the Box-Muller transform.
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // gen::<f64>() is in [0, 1); flip it so ln() never sees 0.
    let u1 = 1.0 - rng.gen::<f64>();
    let u2 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Returns a copy of `samples` with Gaussian noise added to every entry.
///
/// # Errors
/// Returns [`crate::SignalError::InvalidNoise`] for a negative or non-finite
/// standard deviation, or a non-finite mean.
pub fn inject_noise<R: Rng + ?Sized>(
    samples: &[u8],
    noise: &NoiseConfig,
    rng: &mut R,
) -> SignalResult<Vec<u8>> {
    noise.validate()?;

    Ok(samples
        .iter()
        .map(|&s| {
            let offset = noise.mean + noise.stddev * standard_normal(rng);
            noise.mode.quantize(s as f64 + offset)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;
    use crate::SignalError;

    #[test]
    fn test_wrap_matches_uint8_cast() {
        assert_eq!(QuantizeMode::Wrap.quantize(127.9), 127);
        assert_eq!(QuantizeMode::Wrap.quantize(260.3), 4);
        assert_eq!(QuantizeMode::Wrap.quantize(256.0), 0);
        assert_eq!(QuantizeMode::Wrap.quantize(-1.5), 255);
        assert_eq!(QuantizeMode::Wrap.quantize(-0.5), 0);
    }

    #[test]
    fn test_saturate_clamps() {
        assert_eq!(QuantizeMode::Saturate.quantize(260.3), 255);
        assert_eq!(QuantizeMode::Saturate.quantize(-12.0), 0);
        assert_eq!(QuantizeMode::Saturate.quantize(95.99), 95);
    }

    #[test]
    fn test_zero_stddev_is_identity() {
        let samples = vec![95u8, 95, 159, 159, 159, 95];
        let noise = NoiseConfig {
            stddev: 0.0,
            ..NoiseConfig::default()
        };
        let mut rng = create_rng(3);
        let noised = inject_noise(&samples, &noise, &mut rng).unwrap();
        assert_eq!(noised, samples);
    }

    #[test]
    fn test_length_preserved() {
        let samples = vec![127u8; 250];
        let mut rng = create_rng(11);
        let noised = inject_noise(&samples, &NoiseConfig::default(), &mut rng).unwrap();
        assert_eq!(noised.len(), 250);
        assert_ne!(noised, samples);
    }

    #[test]
    fn test_mean_offset_without_spread() {
        let noise = NoiseConfig {
            mean: 10.0,
            stddev: 0.0,
            mode: QuantizeMode::Wrap,
        };
        let mut rng = create_rng(5);
        let noised = inject_noise(&[250, 95], &noise, &mut rng).unwrap();
        assert_eq!(noised, vec![4, 105]);
    }

    #[test]
    fn test_negative_stddev_is_error() {
        let noise = NoiseConfig {
            stddev: -2.0,
            ..NoiseConfig::default()
        };
        let mut rng = create_rng(5);
        let err = inject_noise(&[1, 2, 3], &noise, &mut rng).unwrap_err();
        assert!(matches!(err, SignalError::InvalidNoise { .. }));
    }

    #[test]
    fn test_standard_normal_moments() {
        let mut rng = create_rng(2024);
        let n = 20_000;
        let draws: Vec<f64> = (0..n).map(|_| standard_normal(&mut rng)).collect();

        let mean = draws.iter().sum::<f64>() / n as f64;
        let var = draws.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;

        assert!(mean.abs() < 0.05, "mean = {}", mean);
        assert!((var - 1.0).abs() < 0.05, "variance = {}", var);
    }
}
