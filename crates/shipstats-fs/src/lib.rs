//! Filesystem backend for shipstats.
//!
//! Covers the three disk-facing concerns:
//! - `relocate`: copy the two data files between directories
//! - `unpack`: run the external unpacker and probe its output
//! - `config`: extraction settings (unpacker command, probe directories)

pub mod config;
pub mod error;
pub mod relocate;
pub mod unpack;

pub use config::ExtractConfig;
pub use error::{FsError, Result};
pub use relocate::{copy_data_files, CopyEntry, CopyOutcome, CopyReport};
pub use unpack::{locate_output, run_unpacker, unpack_and_collect, UnpackOutcome};
