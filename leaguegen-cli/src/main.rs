//! leaguegen CLI
//!
//! Command-line interface for building league and patch JSON artifacts
//! from hand-authored text sources.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

mod commands;
mod error;

use commands::build::run_build;
use commands::diff::run_diff;
use commands::patches::run_patches;

#[derive(Parser)]
#[command(name = "leaguegen")]
#[command(about = "Build league and patch JSON artifacts from text sources", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse, enrich, and write league.json plus every variant artifact
    Build {
        /// Data directory containing leagues/, patches/, static/, games.json
        #[arg(short, long, default_value = ".")]
        data_dir: PathBuf,

        /// Catalog directory (default: <data-dir>/static)
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Game metadata file (default: <data-dir>/games.json)
        #[arg(long)]
        games: Option<PathBuf>,

        /// Output directory for variant artifacts (default: <data-dir>/final)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },

    /// Compile patch sources into a single patches.json
    Patches {
        /// Data directory containing patches/
        #[arg(short, long, default_value = ".")]
        data_dir: PathBuf,

        /// Output file (default: <data-dir>/patches.json)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Deep-compare two JSON artifacts, ignoring key order
    Diff {
        first: PathBuf,
        second: PathBuf,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build {
            data_dir,
            static_dir,
            games,
            out_dir,
        } => run_build(data_dir, static_dir, games, out_dir),
        Commands::Patches { data_dir, out } => run_patches(data_dir, out),
        Commands::Diff { first, second } => run_diff(first, second),
    };

    if let Err(e) = result {
        eprintln!(
            "{} {}",
            "\u{2718}".if_supports_color(Stderr, |t| t.red()),
            e,
        );
        std::process::exit(1);
    }
}
