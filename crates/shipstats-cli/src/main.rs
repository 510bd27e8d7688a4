//! shipstats CLI - relocate, unpack, and serve game data JSON files.

mod commands;

use anyhow::Result;
use clap::Parser;
use shipstats_fs::FsError;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Exit code when the external unpacker fails or cannot be started.
const EXIT_UNPACKER_FAILED: i32 = 2;

#[derive(Debug, Parser)]
#[command(name = "shipstats")]
#[command(author, version, about = "Copy, unpack, and serve ships.json/items.json")]
pub struct Cli {
    /// Directory already containing ships.json and items.json
    #[arg(long)]
    pub input_json_dir: Option<PathBuf>,

    /// Path to the local game install (input for the unpacker)
    #[arg(long)]
    pub game_dir: Option<PathBuf>,

    /// Unpacker command to run; may carry leading arguments
    /// (e.g. "python3 scunpacked/main.py")
    #[arg(long, default_value = "unp4k")]
    pub unpacker_cmd: String,

    /// Where to write ships.json and items.json
    #[arg(long, default_value = "data")]
    pub output_dir: PathBuf,

    /// Candidate subdirectory of the unpacker output to probe; repeatable,
    /// probed in order. Defaults to the output itself, then "metar", "data".
    #[arg(long = "probe-dir")]
    pub probe_dirs: Vec<PathBuf>,

    /// Start a small HTTP server exposing the JSON after copying/unpacking
    #[arg(long)]
    pub serve: bool,

    /// Host to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 4000)]
    pub port: u16,

    /// Loadout JSON for the overlay routes; defaults to loadout.json next
    /// to the output directory
    #[arg(long)]
    pub loadout_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(err) = commands::run(&cli) {
        let unpacker_failure = err
            .downcast_ref::<FsError>()
            .is_some_and(FsError::is_unpacker_failure);

        if unpacker_failure {
            eprintln!("{err:#}");
            std::process::exit(EXIT_UNPACKER_FAILED);
        }

        return Err(err);
    }

    Ok(())
}
