//! Extraction configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_unpacker_cmd() -> String {
    "unp4k".to_string()
}

fn default_probe_dirs() -> Vec<PathBuf> {
    // The unpacker output directory itself, then the subfolders the known
    // toolsets write into.
    vec![PathBuf::new(), PathBuf::from("metar"), PathBuf::from("data")]
}

/// Settings for the external unpacker step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Command template for the unpacker. May carry leading arguments
    /// (e.g. `"python3 scunpacked/main.py"`); split on whitespace and run
    /// without a shell.
    #[serde(default = "default_unpacker_cmd")]
    pub unpacker_cmd: String,

    /// Candidate subdirectories of the unpacker output to probe for the
    /// data files, relative to the output directory. Probed in order; the
    /// first containing either file wins.
    #[serde(default = "default_probe_dirs")]
    pub probe_dirs: Vec<PathBuf>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            unpacker_cmd: default_unpacker_cmd(),
            probe_dirs: default_probe_dirs(),
        }
    }
}

impl ExtractConfig {
    /// Create a config with a specific unpacker command and default probing.
    #[must_use]
    pub fn with_unpacker(cmd: impl Into<String>) -> Self {
        Self {
            unpacker_cmd: cmd.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = ExtractConfig::default();
        assert_eq!(config.unpacker_cmd, "unp4k");
        assert_eq!(
            config.probe_dirs,
            vec![PathBuf::new(), PathBuf::from("metar"), PathBuf::from("data")]
        );
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ExtractConfig =
            serde_json::from_str(r#"{"unpacker_cmd": "python3 main.py"}"#).unwrap();
        assert_eq!(config.unpacker_cmd, "python3 main.py");
        assert_eq!(config.probe_dirs.len(), 3);
    }
}
