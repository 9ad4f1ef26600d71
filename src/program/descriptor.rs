//! Structural summary of a discovered program.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Structural summary of one program: display name, backing file, and the
/// entry point's parameter names in declaration order.
///
/// Descriptors are plain values rebuilt on every scan. The `location` is the
/// identity of a program; `name` is a display label and may repeat across a
/// directory tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProgramDescriptor {
    pub name: String,
    pub location: PathBuf,
    pub parameters: Vec<String>,
}

impl ProgramDescriptor {
    /// Build a descriptor for `location`, deriving the name from its file stem.
    pub fn new(location: impl Into<PathBuf>, parameters: Vec<String>) -> Self {
        let location = location.into();
        Self {
            name: display_name(&location),
            location,
            parameters,
        }
    }
}

/// File base name without extension.
pub(crate) fn display_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
