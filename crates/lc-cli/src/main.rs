//! CLI frontend for the Lanterncrawl content-generation engine.

mod app;
mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "lantern",
    about = "Lanterncrawl — weather, encounters, and time for the traveling GM",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log engine activity to stderr (repeat for debug output)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a content directory and report validation warnings
    Check {
        /// Content directory containing manifest.json
        #[arg(short, long, default_value = ".")]
        data: PathBuf,
    },

    /// Print table summaries of the loaded content
    Tables {
        /// Content directory containing manifest.json
        #[arg(short, long, default_value = ".")]
        data: PathBuf,
    },

    /// Run the interactive play session
    Play {
        /// Content directory containing manifest.json
        #[arg(short, long, default_value = ".")]
        data: PathBuf,

        /// RNG seed for deterministic generation
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let result = match cli.command {
        Commands::Check { data } => commands::check::run(&data),
        Commands::Tables { data } => commands::tables::run(&data),
        Commands::Play { data, seed } => commands::play::run(&data, seed),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
