//! Squarewave CLI library.
//!
//! This crate provides the commands behind the `squarewave` binary: signal
//! generation to raw bytes, and the two-panel comparison plot.

pub mod commands;
pub mod plot;
