//! File relocation: copy the two data files between directories.

use crate::error::Result;
use filetime::FileTime;
use shipstats_core::DataFile;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// What happened to a single data file during a copy pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The file existed at the source and was copied.
    Copied,
    /// The file was absent at the source and skipped.
    Missing,
}

/// Per-file record of a copy pass.
#[derive(Debug, Clone)]
pub struct CopyEntry {
    pub file: DataFile,
    pub source: PathBuf,
    pub dest: PathBuf,
    pub outcome: CopyOutcome,
}

/// Result of copying the data files from one directory to another.
#[derive(Debug, Clone, Default)]
pub struct CopyReport {
    pub entries: Vec<CopyEntry>,
}

impl CopyReport {
    /// Files that were actually copied.
    pub fn copied(&self) -> impl Iterator<Item = &CopyEntry> {
        self.entries
            .iter()
            .filter(|e| e.outcome == CopyOutcome::Copied)
    }

    /// Files that were absent at the source.
    pub fn missing(&self) -> impl Iterator<Item = &CopyEntry> {
        self.entries
            .iter()
            .filter(|e| e.outcome == CopyOutcome::Missing)
    }

    /// Whether at least one file made it to the destination.
    #[must_use]
    pub fn any_copied(&self) -> bool {
        self.copied().next().is_some()
    }
}

/// Copy `ships.json` and `items.json` from `src` into `dst`.
///
/// Creates `dst` (and parents) if absent. A file missing at the source is
/// recorded in the report and skipped; it never fails the call. The source
/// modification time is carried over to each copy.
///
/// # Errors
/// Returns error only for IO failures during mkdir or copy.
pub fn copy_data_files(src: &Path, dst: &Path) -> Result<CopyReport> {
    fs::create_dir_all(dst)?;

    let mut report = CopyReport::default();

    for file in DataFile::ALL {
        let source = src.join(file.file_name());
        let dest = dst.join(file.file_name());

        let outcome = if source.exists() {
            fs::copy(&source, &dest)?;

            let mtime = FileTime::from_last_modification_time(&fs::metadata(&source)?);
            filetime::set_file_mtime(&dest, mtime)?;

            info!(source = %source.display(), dest = %dest.display(), "Copied data file");
            CopyOutcome::Copied
        } else {
            warn!(source = %source.display(), "Data file not found at source");
            CopyOutcome::Missing
        };

        report.entries.push(CopyEntry {
            file,
            source,
            dest,
            outcome,
        });
    }

    Ok(report)
}
