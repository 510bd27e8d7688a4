//! CLI command implementation: the copy/unpack/serve flow.

use crate::Cli;
use anyhow::{Context, Result};
use console::style;
use shipstats_fs::{copy_data_files, unpack_and_collect, CopyReport, ExtractConfig};
use std::path::{Path, PathBuf};

/// Run the tool: at most one of copy/unpack mode, then optionally serve.
pub fn run(cli: &Cli) -> Result<()> {
    let out = &cli.output_dir;
    println!("output dir: {}", out.display());

    if let Some(src) = &cli.input_json_dir {
        if cli.game_dir.is_some() {
            println!(
                "{}",
                style("warning: --game-dir is ignored because --input-json-dir was given")
                    .yellow()
            );
        }

        println!("Using provided JSON dir: {}", src.display());
        let report = copy_data_files(src, out).context("Failed to copy data files")?;
        print_report(&report);
    } else if let Some(game_dir) = &cli.game_dir {
        let config = extract_config(cli);
        let outcome = unpack_and_collect(&config, game_dir, out)?;

        match outcome.report {
            Some(report) => print_report(&report),
            None => println!(
                "No ships.json/items.json found in unpacked output. \
                 You may need to run conversion scripts from the unpacker toolset."
            ),
        }
    } else {
        println!("Nothing to do: provide --input-json-dir or --game-dir");
    }

    if cli.serve {
        let loadout_file = cli
            .loadout_file
            .clone()
            .unwrap_or_else(|| default_loadout_file(out));
        serve_blocking(out, &loadout_file, &cli.host, cli.port)?;
    }

    Ok(())
}

fn extract_config(cli: &Cli) -> ExtractConfig {
    let mut config = ExtractConfig::with_unpacker(&cli.unpacker_cmd);
    if !cli.probe_dirs.is_empty() {
        config.probe_dirs = cli.probe_dirs.clone();
    }
    config
}

/// The log watcher writes loadout.json next to the data directory.
fn default_loadout_file(output_dir: &Path) -> PathBuf {
    output_dir
        .parent()
        .map_or_else(|| PathBuf::from("loadout.json"), |p| p.join("loadout.json"))
}

fn print_report(report: &CopyReport) {
    for entry in report.copied() {
        println!(
            "copied {} -> {}",
            entry.source.display(),
            entry.dest.display()
        );
    }
    for entry in report.missing() {
        println!(
            "{}",
            style(format!("warning: {} not found", entry.source.display())).yellow()
        );
    }
}

/// Start the data server on a dedicated runtime. Blocks until killed.
fn serve_blocking(data_dir: &Path, loadout_file: &Path, host: &str, port: u16) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async { shipstats_server::serve(data_dir, loadout_file, host, port).await })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("shipstats").chain(args.iter().copied()))
    }

    #[test]
    fn test_noop_without_inputs() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("data");

        let cli = parse(&["--output-dir", out.to_str().unwrap()]);
        run(&cli).unwrap();

        assert!(!out.exists());
    }

    #[test]
    fn test_copy_mode() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        let out = tmp.path().join("data");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("ships.json"), b"[]").unwrap();

        let cli = parse(&[
            "--input-json-dir",
            src.to_str().unwrap(),
            "--output-dir",
            out.to_str().unwrap(),
        ]);
        run(&cli).unwrap();

        assert!(out.join("ships.json").exists());
        assert!(!out.join("items.json").exists());
    }

    #[test]
    fn test_input_json_dir_takes_precedence_over_game_dir() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        let out = tmp.path().join("data");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("ships.json"), b"[]").unwrap();

        // The unpacker command would fail if unpack mode ran; copy mode must
        // win and the run must still succeed.
        let cli = parse(&[
            "--input-json-dir",
            src.to_str().unwrap(),
            "--game-dir",
            tmp.path().to_str().unwrap(),
            "--unpacker-cmd",
            "definitely-not-a-real-binary-4729",
            "--output-dir",
            out.to_str().unwrap(),
        ]);
        run(&cli).unwrap();

        assert!(out.join("ships.json").exists());
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.unpacker_cmd, "unp4k");
        assert_eq!(cli.output_dir, PathBuf::from("data"));
        assert_eq!(cli.host, "127.0.0.1");
        assert_eq!(cli.port, 4000);
        assert!(!cli.serve);
        assert!(cli.probe_dirs.is_empty());
    }

    #[test]
    fn test_default_loadout_file_is_beside_output_dir() {
        assert_eq!(
            default_loadout_file(Path::new("/srv/app/data")),
            PathBuf::from("/srv/app/loadout.json")
        );
        assert_eq!(
            default_loadout_file(Path::new("data")),
            PathBuf::from("loadout.json")
        );
    }
}
