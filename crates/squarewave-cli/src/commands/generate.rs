//! Generate command implementation
//!
//! Synthesizes a noised square wave and writes its raw bytes to stdout, and
//! also to a file when one is given. Status lines go to stderr so stdout
//! carries nothing but samples.

use anyhow::{Context, Result};
use colored::Colorize;
use squarewave_signal::io::{write_raw, write_raw_file};
use squarewave_signal::{generate, GenerateResult, QuantizeMode, SignalConfig};
use std::io::{self, Write};
use std::process::ExitCode;

/// Options for one generate run.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// File to also write the bytes to.
    pub output: Option<String>,
    /// Base seed; drawn from OS entropy when absent.
    pub seed: Option<u64>,
    /// JSON config file overriding the built-in defaults.
    pub config: Option<String>,
    /// Clamp noisy samples instead of wrapping them.
    pub saturate: bool,
}

/// Run the generate command
///
/// # Arguments
/// * `options` - Output path, seed, config file and quantization mode
/// * `quiet` - Suppress status lines on stderr
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(options: &GenerateOptions, quiet: bool) -> Result<ExitCode> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let (seed, result) = generate_to(options, &mut handle)?;

    if !quiet {
        report(options, seed, &result);
    }

    Ok(ExitCode::SUCCESS)
}

/// Generates the signal and writes it to `stdout` (and the output file, if set).
///
/// Returns the seed actually used alongside the generation result.
pub fn generate_to<W: Write + ?Sized>(
    options: &GenerateOptions,
    stdout: &mut W,
) -> Result<(u64, GenerateResult)> {
    let config = load_config(options)?;
    let seed = options.seed.unwrap_or_else(rand::random);

    let result = generate(&config, seed).context("Failed to generate signal")?;

    if let Some(path) = &options.output {
        write_raw_file(path, &result.noised)
            .with_context(|| format!("Failed to write output file: {}", path))?;
    }

    write_raw(stdout, &result.noised).context("Failed to write samples to stdout")?;

    Ok((seed, result))
}

/// Resolves the effective config from the defaults, the config file and flags.
fn load_config(options: &GenerateOptions) -> Result<SignalConfig> {
    let mut config = match &options.config {
        Some(path) => SignalConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config file: {}", path))?,
        None => SignalConfig::default(),
    };

    if options.saturate {
        config.noise.mode = QuantizeMode::Saturate;
    }

    Ok(config)
}

fn report(options: &GenerateOptions, seed: u64, result: &GenerateResult) {
    eprintln!("{} {}", "Generated:".cyan().bold(), "square wave".bold());
    eprintln!("  {} {}", "Seed:".dimmed(), seed);
    eprintln!("  {} {}", "Samples:".dimmed(), result.noised.len());
    eprintln!("  {} {}", "Segments:".dimmed(), result.signal.segments.len());
    eprintln!("  {} {}", "Hash:".dimmed(), &result.hash[..16]);
    if let Some(path) = &options.output {
        eprintln!("  {} {}", "Output:".dimmed(), path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_stdout_only_without_output() {
        let options = GenerateOptions {
            seed: Some(42),
            ..GenerateOptions::default()
        };
        let mut out = Vec::new();
        let (seed, result) = generate_to(&options, &mut out).unwrap();

        assert_eq!(seed, 42);
        assert_eq!(out.len(), 100);
        assert_eq!(out, result.noised);
    }

    #[test]
    fn test_file_and_stdout_are_identical() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("noised.bin");
        let options = GenerateOptions {
            output: Some(path.to_string_lossy().into_owned()),
            seed: Some(7),
            ..GenerateOptions::default()
        };

        let mut out = Vec::new();
        generate_to(&options, &mut out).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), out);
    }

    #[test]
    fn test_same_seed_same_bytes() {
        let options = GenerateOptions {
            seed: Some(1234),
            ..GenerateOptions::default()
        };
        let mut a = Vec::new();
        let mut b = Vec::new();
        generate_to(&options, &mut a).unwrap();
        generate_to(&options, &mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_config_file_applies() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("signal.json");
        std::fs::write(&config, r#"{"sample_size": 16, "noise": {"stddev": 0.0}}"#).unwrap();

        let options = GenerateOptions {
            seed: Some(3),
            config: Some(config.to_string_lossy().into_owned()),
            ..GenerateOptions::default()
        };
        let mut out = Vec::new();
        let (_, result) = generate_to(&options, &mut out).unwrap();

        assert_eq!(out.len(), 16);
        assert_eq!(out, result.signal.samples);
    }

    #[test]
    fn test_saturate_flag_overrides_config() {
        let options = GenerateOptions {
            saturate: true,
            ..GenerateOptions::default()
        };
        let config = load_config(&options).unwrap();
        assert_eq!(config.noise.mode, QuantizeMode::Saturate);
    }

    #[test]
    fn test_missing_config_file_fails() {
        let dir = tempdir().unwrap();
        let options = GenerateOptions {
            config: Some(dir.path().join("absent.json").to_string_lossy().into_owned()),
            ..GenerateOptions::default()
        };
        let err = generate_to(&options, &mut Vec::new()).unwrap_err();
        assert!(format!("{:#}", err).contains("absent.json"));
    }

    #[test]
    fn test_unwritable_output_fails() {
        let dir = tempdir().unwrap();
        let options = GenerateOptions {
            output: Some(dir.path().join("no/such/dir/out.bin").to_string_lossy().into_owned()),
            seed: Some(1),
            ..GenerateOptions::default()
        };
        assert!(generate_to(&options, &mut Vec::new()).is_err());
    }
}
