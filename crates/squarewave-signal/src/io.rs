//! Raw byte dumps.
//!
//! Signals are stored as headerless byte arrays: one `u8` per sample, no
//! length prefix, no delimiter. The sample count is the file size.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{SignalError, SignalResult};

/// A noised signal and its filtered counterpart, equal in length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalPair {
    /// Signal before filtering.
    pub noised: Vec<u8>,
    /// Output of the external filter.
    pub filtered: Vec<u8>,
}

impl SignalPair {
    /// Pairs two sequences, rejecting a length mismatch.
    pub fn new(noised: Vec<u8>, filtered: Vec<u8>) -> SignalResult<Self> {
        if noised.len() != filtered.len() {
            return Err(SignalError::LengthMismatch {
                noised: noised.len(),
                filtered: filtered.len(),
            });
        }
        Ok(Self { noised, filtered })
    }

    /// Number of samples in each sequence.
    pub fn len(&self) -> usize {
        self.noised.len()
    }

    /// True when both sequences are empty.
    pub fn is_empty(&self) -> bool {
        self.noised.is_empty()
    }
}

/// Writes the samples to `writer` and flushes it.
pub fn write_raw<W: Write + ?Sized>(writer: &mut W, samples: &[u8]) -> SignalResult<()> {
    writer.write_all(samples)?;
    writer.flush()?;
    Ok(())
}

/// Writes the samples to a file, replacing any existing content.
pub fn write_raw_file(path: impl AsRef<Path>, samples: &[u8]) -> SignalResult<()> {
    let path = path.as_ref();
    fs::write(path, samples).map_err(|e| SignalError::io(path, e))
}

/// Reads a whole file as raw samples.
pub fn read_raw(path: impl AsRef<Path>) -> SignalResult<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|e| SignalError::io(path, e))
}

/// Reads a noised/filtered pair of files.
pub fn read_pair(noised: impl AsRef<Path>, filtered: impl AsRef<Path>) -> SignalResult<SignalPair> {
    let noised = read_raw(noised)?;
    let filtered = read_raw(filtered)?;
    SignalPair::new(noised, filtered)
}
