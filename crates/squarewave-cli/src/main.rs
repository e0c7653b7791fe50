//! Squarewave CLI - randomized square-wave test signals
//!
//! This binary generates noised square-wave signals as raw bytes and plots a
//! noised signal against its filtered version.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use squarewave_cli::commands;
use squarewave_cli::commands::generate::GenerateOptions;

/// Squarewave - synthetic test signals for filter evaluation
#[derive(Parser)]
#[command(name = "squarewave")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Suppress status output on stderr
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a noised square wave and write its raw bytes to stdout
    Generate {
        /// Also write the raw bytes to this file
        output: Option<String>,

        /// Base seed for reproducible output (default: random, reported on stderr)
        #[arg(long)]
        seed: Option<u64>,

        /// JSON config file overriding the built-in signal parameters
        #[arg(short, long)]
        config: Option<String>,

        /// Clamp noisy samples to 0..=255 instead of wrapping around
        #[arg(long)]
        saturate: bool,
    },

    /// Plot a noised signal above its filtered version
    Plot {
        /// Raw byte file of the noised signal
        noised: String,

        /// Raw byte file of the filtered signal
        filtered: String,

        /// Output PNG path (default: <noised stem>.plot.png)
        #[arg(short, long)]
        out: Option<String>,

        /// Write the PNG without opening it
        #[arg(long)]
        no_open: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            output,
            seed,
            config,
            saturate,
        } => commands::generate::run(
            &GenerateOptions {
                output,
                seed,
                config,
                saturate,
            },
            cli.quiet,
        ),
        Commands::Plot {
            noised,
            filtered,
            out,
            no_open,
        } => commands::plot::run(&noised, &filtered, out.as_deref(), no_open, cli.quiet),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            let label = match commands::error_code(&e) {
                Some(code) => format!("error[{}]", code),
                None => "error".to_string(),
            };
            eprintln!("{}: {:#}", colored::Colorize::red(label.as_str()), e);
            ExitCode::from(1)
        }
    }
}
