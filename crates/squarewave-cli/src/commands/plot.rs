//! Plot command implementation
//!
//! Reads a noised signal and its filtered version as raw bytes and renders
//! them as two stacked line plots in a PNG.

use anyhow::{Context, Result};
use colored::Colorize;
use squarewave_signal::io::read_pair;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::plot::{
    plot_path_from_noised, render_plot_png, PlotResult, FILTERED_TITLE, NOISED_TITLE,
};

/// Run the plot command
///
/// # Arguments
/// * `noised_path` - Raw byte file of the noised signal
/// * `filtered_path` - Raw byte file of the filtered signal
/// * `out` - PNG output path (default: `<noised stem>.plot.png`)
/// * `no_open` - Skip opening the PNG in the system viewer
/// * `quiet` - Suppress status lines on stderr
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(
    noised_path: &str,
    filtered_path: &str,
    out: Option<&str>,
    no_open: bool,
    quiet: bool,
) -> Result<ExitCode> {
    let (out_path, samples, result) = render_to_file(noised_path, filtered_path, out)?;

    if !quiet {
        eprintln!("{}", "Plotting:".cyan().bold());
        eprintln!("  {} {}", format!("{}:", NOISED_TITLE).dimmed(), noised_path);
        eprintln!("  {} {}", format!("{}:", FILTERED_TITLE).dimmed(), filtered_path);
        eprintln!("  {} {}", "Samples:".dimmed(), samples);
        eprintln!(
            "  {} {} ({}x{})",
            "Output:".dimmed(),
            out_path.display(),
            result.width,
            result.height
        );
        eprintln!("  {} {}", "Hash:".dimmed(), &result.hash[..16]);
    }

    if !no_open {
        if let Err(e) = open::that(&out_path) {
            eprintln!(
                "{} could not open {}: {}",
                "warning".yellow().bold(),
                out_path.display(),
                e
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Reads both inputs, renders the plot and writes the PNG.
///
/// Returns the PNG path, the per-signal sample count and the render result.
pub fn render_to_file(
    noised_path: &str,
    filtered_path: &str,
    out: Option<&str>,
) -> Result<(PathBuf, usize, PlotResult)> {
    let pair = read_pair(noised_path, filtered_path).with_context(|| {
        format!(
            "Failed to load signals: {} / {}",
            noised_path, filtered_path
        )
    })?;

    let result = render_plot_png(&pair).context("Failed to encode plot PNG")?;

    let out_path = PathBuf::from(
        out.map(str::to_string)
            .unwrap_or_else(|| plot_path_from_noised(noised_path)),
    );
    fs::write(&out_path, &result.png_data)
        .with_context(|| format!("Failed to write plot: {}", out_path.display()))?;

    Ok((out_path, pair.len(), result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_inputs(dir: &std::path::Path, noised: &[u8], filtered: &[u8]) -> (String, String) {
        let n = dir.join("noised.bin");
        let f = dir.join("filtered.bin");
        fs::write(&n, noised).unwrap();
        fs::write(&f, filtered).unwrap();
        (
            n.to_string_lossy().into_owned(),
            f.to_string_lossy().into_owned(),
        )
    }

    #[test]
    fn test_default_output_next_to_noised() {
        let dir = tempdir().unwrap();
        let (n, f) = write_inputs(dir.path(), &[95, 159, 159], &[95, 95, 159]);

        let (out, samples, result) = render_to_file(&n, &f, None).unwrap();

        assert_eq!(out, dir.path().join("noised.plot.png"));
        assert_eq!(samples, 3);
        assert_eq!(fs::read(&out).unwrap(), result.png_data);
    }

    #[test]
    fn test_explicit_output_path() {
        let dir = tempdir().unwrap();
        let (n, f) = write_inputs(dir.path(), &[1, 2], &[2, 1]);
        let target = dir.path().join("cmp.png");

        let (out, _, _) = render_to_file(&n, &f, Some(target.to_str().unwrap())).unwrap();
        assert_eq!(out, target);
        assert!(target.exists());
    }

    #[test]
    fn test_length_mismatch_fails() {
        let dir = tempdir().unwrap();
        let (n, f) = write_inputs(dir.path(), &[1, 2, 3, 4], &[1, 2, 3]);

        let err = render_to_file(&n, &f, None).unwrap_err();
        assert!(format!("{:#}", err).contains("length mismatch"));
        assert!(!dir.path().join("noised.plot.png").exists());
    }

    #[test]
    fn test_missing_input_fails() {
        let dir = tempdir().unwrap();
        let n = dir.path().join("absent.bin");
        let err = render_to_file(n.to_str().unwrap(), n.to_str().unwrap(), None).unwrap_err();
        assert!(format!("{:#}", err).contains("absent.bin"));
    }
}
