//! External unpacker invocation and output probing.

use crate::config::ExtractConfig;
use crate::error::{FsError, Result};
use crate::relocate::{copy_data_files, CopyReport};
use shipstats_core::DataFile;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, warn};

/// Name of the scratch directory the unpacker writes into, created next to
/// the output directory.
const TMP_DIR: &str = "_extracted_tmp";

/// Result of a full unpack run.
#[derive(Debug, Clone)]
pub struct UnpackOutcome {
    /// Directory the data files were found in, if any candidate matched.
    pub found_in: Option<PathBuf>,
    /// Copy report for the relocation into the output directory, when a
    /// candidate matched.
    pub report: Option<CopyReport>,
}

/// Run the configured unpacker against `game_dir`, writing into `out_dir`.
///
/// The command template is split on whitespace into program plus leading
/// arguments and executed directly, never through a shell, with
/// `-i <game_dir> -o <out_dir>` appended. Blocks until the child exits;
/// stdio is inherited so the unpacker's own output stays visible.
///
/// # Errors
/// Returns error if the template is empty, the process cannot be spawned,
/// or it exits non-zero.
pub fn run_unpacker(cmd_template: &str, game_dir: &Path, out_dir: &Path) -> Result<()> {
    let mut parts = cmd_template.split_whitespace();
    let program = parts.next().ok_or(FsError::EmptyUnpackerCommand)?;

    let mut cmd = Command::new(program);
    cmd.args(parts)
        .arg("-i")
        .arg(game_dir)
        .arg("-o")
        .arg(out_dir);

    info!(command = %cmd_template, game_dir = %game_dir.display(), out_dir = %out_dir.display(), "Running unpacker");

    let status = cmd.status().map_err(|source| FsError::UnpackerSpawn {
        command: cmd_template.to_string(),
        source,
    })?;

    if !status.success() {
        return Err(FsError::UnpackerFailed {
            command: cmd_template.to_string(),
            status,
        });
    }

    Ok(())
}

/// Probe the candidate directories for the data files.
///
/// Returns the first candidate (in `probe_dirs` order, joined onto `root`)
/// containing either expected file, or `None` if no candidate matches.
#[must_use]
pub fn locate_output(root: &Path, probe_dirs: &[PathBuf]) -> Option<PathBuf> {
    for probe in probe_dirs {
        let candidate = root.join(probe);
        let hit = DataFile::ALL
            .iter()
            .any(|f| candidate.join(f.file_name()).exists());

        debug!(candidate = %candidate.display(), hit, "Probed unpacker output");

        if hit {
            return Some(candidate);
        }
    }

    None
}

/// Full unpack mode: run the unpacker into a scratch directory next to
/// `output_dir`, then probe for the data files and relocate them.
///
/// A successful unpacker run that produced no recognizable output is not an
/// error; the outcome carries `found_in: None` and the caller decides how to
/// report it.
///
/// # Errors
/// Returns error if the scratch directory cannot be created, the unpacker
/// fails, or the final copy hits an IO error.
pub fn unpack_and_collect(
    config: &ExtractConfig,
    game_dir: &Path,
    output_dir: &Path,
) -> Result<UnpackOutcome> {
    let tmp_out = output_dir
        .parent()
        .map_or_else(|| PathBuf::from(TMP_DIR), |p| p.join(TMP_DIR));

    fs::create_dir_all(&tmp_out)?;

    run_unpacker(&config.unpacker_cmd, game_dir, &tmp_out)?;

    match locate_output(&tmp_out, &config.probe_dirs) {
        Some(found_in) => {
            info!(dir = %found_in.display(), "Found unpacked data files");
            let report = copy_data_files(&found_in, output_dir)?;
            Ok(UnpackOutcome {
                found_in: Some(found_in),
                report: Some(report),
            })
        }
        None => {
            warn!(root = %tmp_out.display(), "No data files found in unpacked output");
            Ok(UnpackOutcome {
                found_in: None,
                report: None,
            })
        }
    }
}
