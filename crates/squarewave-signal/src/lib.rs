//! Square-wave test signal generation.
//!
//! This crate produces the synthetic signals used to exercise external
//! smoothing filters: a piecewise-constant waveform that alternates between
//! two levels in runs of random length, with additive Gaussian noise on top.
//!
//! # Determinism
//!
//! Given the same config and seed, [`generate()`] returns byte-identical
//! output. All randomness flows through explicit PCG32 generators created in
//! [`rng`], one per stage, with per-stage seeds derived via BLAKE3.
//!
//! # Example
//!
//! ```
//! use squarewave_signal::{generate, SignalConfig};
//!
//! let result = generate(&SignalConfig::default(), 42)?;
//! assert_eq!(result.noised.len(), 100);
//! # Ok::<(), squarewave_signal::SignalError>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`generate()`] - Full pipeline: synthesize, then add noise
//! - [`config`] - Signal and noise parameters with their defaults
//! - [`synth`] - Segment tiling synthesizer
//! - [`noise`] - Gaussian noise and byte quantization
//! - [`io`] - Headerless raw byte files
//! - [`rng`] - Deterministic RNG with seed derivation

pub mod config;
pub mod error;
pub mod io;
pub mod noise;
pub mod rng;
pub mod synth;

pub use config::{NoiseConfig, SignalConfig};
pub use error::{SignalError, SignalResult};
pub use io::SignalPair;
pub use noise::{inject_noise, QuantizeMode};
pub use synth::{synthesize, Level, Segment, Signal, SignalSource, Synthesizer};

/// Output of the full generation pipeline.
#[derive(Debug, Clone)]
pub struct GenerateResult {
    /// The clean square wave.
    pub signal: Signal,
    /// The signal after noise injection.
    pub noised: Vec<u8>,
    /// BLAKE3 hash of `noised`, hex encoded.
    pub hash: String,
}

/// Synthesizes `config.sample_size` samples and adds noise, all from `seed`.
pub fn generate(config: &SignalConfig, seed: u64) -> SignalResult<GenerateResult> {
    config.validate()?;

    let mut signal_rng = rng::create_component_rng(seed, rng::SIGNAL_STREAM);
    let mut noise_rng = rng::create_component_rng(seed, rng::NOISE_STREAM);

    let signal = synthesize(config, config.sample_size, &mut signal_rng)?;
    let noised = inject_noise(&signal.samples, &config.noise, &mut noise_rng)?;
    let hash = blake3::hash(&noised).to_hex().to_string();

    Ok(GenerateResult {
        signal,
        noised,
        hash,
    })
}
