//! metplot CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod inspect;
mod plot;

#[derive(Parser)]
#[command(name = "metplot")]
#[command(about = "metplot - MET resolution comparison plots")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Make MET resolution plots
    Plot {
        /// Samples to plot
        #[arg(long, num_args = 1.., default_values_t = [String::from("TTTT")])]
        samples: Vec<String>,

        /// Estimators for the per-bin resolution (std, central68, central95,
        /// central99, sqrt_mse)
        #[arg(long, num_args = 1.., default_values_t = [String::from("std")])]
        estimators: Vec<String>,

        /// x-axis variables (photon, tau, muon, electron, jet, nvtx, HT)
        #[arg(long, num_args = 1.., default_values_t = [String::from("HT")])]
        vars: Vec<String>,

        /// Location of the input ROOT files
        #[arg(long, default_value = ".")]
        dir: PathBuf,

        /// Directory the image files are written to
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Output image formats
        #[arg(long, num_args = 1.., default_values_t = [String::from("pdf"), String::from("png")])]
        formats: Vec<String>,

        /// Halve the named algorithm's reconstructed MET before the residual
        /// (resolution-tuning variant), e.g. --halve-algo DeepMET
        #[arg(long)]
        halve_algo: Option<String>,

        /// Theme preset (cms, minimal)
        #[arg(long, default_value = "cms")]
        theme: String,

        /// YAML style-config file overriding the theme
        #[arg(long)]
        style: Option<PathBuf>,
    },

    /// List the keys and Events branches of a ROOT file
    Inspect {
        /// The ROOT file to inspect
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_max_level(cli.log_level).with_target(false).init();

    match cli.command {
        Commands::Plot {
            samples,
            estimators,
            vars,
            dir,
            out_dir,
            formats,
            halve_algo,
            theme,
            style,
        } => plot::run(plot::PlotArgs {
            samples,
            estimators,
            vars,
            dir,
            out_dir,
            formats,
            halve_algo,
            theme,
            style,
        }),
        Commands::Inspect { file } => inspect::run(&file),
    }
}
