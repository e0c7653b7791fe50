//! Square-wave synthesis.
//!
//! A signal is built by tiling the sample buffer with consecutive segments of
//! random duration. Segments alternate strictly between the two levels, and
//! the last one is clamped so the buffer is covered exactly once.

use rand::Rng;

use crate::config::SignalConfig;
use crate::error::{SignalError, SignalResult};

/// One of the two discrete amplitudes a signal alternates between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// `mid - half_amplitude`.
    Low,
    /// `mid + half_amplitude`.
    High,
}

impl Level {
    /// Returns the other level.
    pub fn flip(self) -> Self {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }

    /// The sample value of this level under the given config.
    pub fn value(self, config: &SignalConfig) -> u8 {
        match self {
            Level::Low => config.low(),
            Level::High => config.high(),
        }
    }
}

/// A half-open interval `[start, end)` of the buffer held at one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// First index covered.
    pub start: usize,
    /// One past the last index covered.
    pub end: usize,
    /// Level held across the segment.
    pub level: Level,
}

impl Segment {
    /// Number of samples in the segment.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True for a zero-length segment (never produced by the synthesizer).
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A maximal run of equal values in an arbitrary byte buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    /// First index of the run.
    pub start: usize,
    /// One past the last index of the run.
    pub end: usize,
    /// The repeated value.
    pub value: u8,
}

impl Run {
    /// Number of samples in the run.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True for a zero-length run (never produced by [`runs`]).
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Output of one synthesis call.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    /// Sample values, each equal to LOW or HIGH.
    pub samples: Vec<u8>,
    /// Sample indices as reals, `0.0..=(n - 1)`. Used for display only.
    pub time: Vec<f64>,
    /// The segments that tile `samples`, in order.
    pub segments: Vec<Segment>,
}

impl Signal {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false for a synthesized signal.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Source of the random decisions the synthesizer makes.
///
/// Production code wraps a seeded RNG in [`RngSource`]; tests can script the
/// exact sequence of durations and the starting level.
pub trait SignalSource {
    /// Picks the level of the first segment.
    fn initial_level(&mut self) -> Level;

    /// Draws a segment duration uniformly from `[min, max)`.
    fn segment_duration(&mut self, min: usize, max: usize) -> usize;
}

/// Adapts any [`rand::Rng`] into a [`SignalSource`].
pub struct RngSource<'a, R: ?Sized> {
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> RngSource<'a, R> {
    /// Borrows `rng` for the duration of one synthesis call.
    pub fn new(rng: &'a mut R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + ?Sized> SignalSource for RngSource<'_, R> {
    fn initial_level(&mut self) -> Level {
        if self.rng.gen_bool(0.5) {
            Level::High
        } else {
            Level::Low
        }
    }

    fn segment_duration(&mut self, min: usize, max: usize) -> usize {
        self.rng.gen_range(min..max)
    }
}

/// Square-wave synthesizer bound to a validated config.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    low: u8,
    high: u8,
    min_duration: usize,
    max_duration: usize,
}

impl Synthesizer {
    /// Creates a synthesizer, validating durations and levels.
    pub fn new(config: &SignalConfig) -> SignalResult<Self> {
        config.validate_shape()?;
        Ok(Self {
            low: config.low(),
            high: config.high(),
            min_duration: config.min_duration,
            max_duration: config.max_duration,
        })
    }

    /// Synthesizes `sample_size` samples.
    ///
    /// # Errors
    /// Returns [`SignalError::InvalidSampleSize`] when `sample_size` is zero.
    pub fn synthesize<S: SignalSource + ?Sized>(
        &self,
        sample_size: usize,
        source: &mut S,
    ) -> SignalResult<Signal> {
        if sample_size == 0 {
            return Err(SignalError::InvalidSampleSize { size: sample_size });
        }

        let mut samples = vec![0u8; sample_size];
        let mut segments = Vec::new();
        let mut level = source.initial_level();
        let mut a = 0;

        while a < sample_size {
            let duration = source.segment_duration(self.min_duration, self.max_duration);
            // A scripted source could hand back 0; never stall on it.
            let b = (a + duration.max(1)).min(sample_size);

            samples[a..b].fill(self.level_value(level));
            segments.push(Segment {
                start: a,
                end: b,
                level,
            });

            level = level.flip();
            a = b;
        }

        Ok(Signal {
            samples,
            time: time_axis(sample_size),
            segments,
        })
    }

    fn level_value(&self, level: Level) -> u8 {
        match level {
            Level::Low => self.low,
            Level::High => self.high,
        }
    }
}

/// Synthesizes a signal with the given config, drawing from `rng`.
pub fn synthesize<R: Rng + ?Sized>(
    config: &SignalConfig,
    sample_size: usize,
    rng: &mut R,
) -> SignalResult<Signal> {
    Synthesizer::new(config)?.synthesize(sample_size, &mut RngSource::new(rng))
}

/// Returns `0.0, 1.0, ..., (n - 1) as f64`.
pub fn time_axis(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}

/// Splits a buffer into maximal runs of equal values.
pub fn runs(samples: &[u8]) -> Vec<Run> {
    let mut out: Vec<Run> = Vec::new();
    for (i, &value) in samples.iter().enumerate() {
        match out.last_mut() {
            Some(run) if run.value == value => run.end = i + 1,
            _ => out.push(Run {
                start: i,
                end: i + 1,
                value,
            }),
        }
    }
    out
}
