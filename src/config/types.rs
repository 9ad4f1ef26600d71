//! Default value functions used by the Config struct.

/// Directory names that are never scanned for programs.
///
/// Covers dependency and package trees, version-control metadata, build
/// artifacts and the layout of virtual environments on every platform.
pub const DEFAULT_IGNORE_DIRS: &[&str] = &[
    ".venv",
    "venv",
    "env",
    ".git",
    ".github",
    "__pycache__",
    "site-packages",
    "dist",
    "build",
    "Include",
    "Lib",
    "Scripts",
    "tcl",
    "Tools",
    "DLLs",
    "pyvenv.cfg",
    "share",
    "bin",
    "include",
    ".cfg",
    "node_modules",
];

pub fn default_ignore_dirs() -> Vec<String> {
    DEFAULT_IGNORE_DIRS.iter().map(|s| s.to_string()).collect()
}

pub(crate) fn default_interpreter() -> String {
    "python3".to_string()
}

pub(crate) fn default_inspect_timeout_secs() -> u64 {
    30
}

pub(crate) fn default_execute_timeout_secs() -> u64 {
    300
}

pub(crate) fn default_true() -> bool {
    true
}
