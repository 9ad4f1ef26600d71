//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for program discovery and execution.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Interpreter settings
    // =========================================================================
    /// Interpreter command line (e.g. `python3` or `uv run python`).
    #[serde(default = "default_interpreter")]
    pub interpreter: String,

    /// Seconds a single file may spend loading during discovery.
    #[serde(default = "default_inspect_timeout_secs")]
    pub inspect_timeout_secs: u64,

    /// Seconds a single program run may take before it is killed.
    #[serde(default = "default_execute_timeout_secs")]
    pub execute_timeout_secs: u64,

    // =========================================================================
    // Discovery settings
    // =========================================================================
    /// Directory names pruned from the walk.
    #[serde(default = "default_ignore_dirs")]
    pub ignore_dirs: Vec<String>,

    /// Additional glob patterns matched against directory names.
    #[serde(default)]
    pub ignore_globs: Vec<String>,

    /// Whether directories starting with `.` are pruned.
    #[serde(default = "default_true")]
    pub skip_hidden_dirs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
            inspect_timeout_secs: default_inspect_timeout_secs(),
            execute_timeout_secs: default_execute_timeout_secs(),
            ignore_dirs: default_ignore_dirs(),
            ignore_globs: Vec::new(),
            skip_hidden_dirs: default_true(),
        }
    }
}
