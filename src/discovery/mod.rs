//! Program discovery.
//!
//! Walks a directory tree, prunes dependency and metadata directories, and
//! inspects every remaining Python source in isolation. A file becomes a
//! [`ProgramDescriptor`] only when it loads cleanly and defines a callable
//! `execute`.
//!
//! Discovery never fails: an invalid root yields an empty catalog and a
//! logged notice, and any per-file problem (syntax errors, import errors,
//! exceptions in top-level code, an interpreter crash or timeout) is logged
//! and the file skipped.

mod filter;


pub use filter::PathFilter;

use crate::config::Config;
use crate::error::Result;
use crate::loader::{Inspection, ProgramLoader, ProgramUnit, PythonLoader};
use crate::program::{ENTRY_POINT, ProgramDescriptor};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Builds the catalog of programs under a directory.
#[derive(Clone)]
pub struct Discoverer {
    loader: Arc<dyn ProgramLoader>,
    filter: PathFilter,
}

impl Discoverer {
    pub fn new(loader: Arc<dyn ProgramLoader>, filter: PathFilter) -> Self {
        Self { loader, filter }
    }

    /// Discoverer backed by the configured Python interpreter.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            Arc::new(PythonLoader::from_config(config)?),
            PathFilter::from_config(config)?,
        ))
    }

    /// List the programs under `directory`, in filesystem walk order.
    ///
    /// Returns an empty vector (and logs a warning) when `directory` does not
    /// exist or is not a directory.
    pub fn discover(&self, directory: &Path) -> Vec<ProgramDescriptor> {
        if !directory.is_dir() {
            warn!(
                directory = %directory.display(),
                "directory does not exist or is not a directory"
            );
            return Vec::new();
        }

        let programs: Vec<ProgramDescriptor> = self
            .candidates(directory)
            .iter()
            .filter_map(|path| self.inspect(path))
            .collect();

        info!(
            directory = %directory.display(),
            count = programs.len(),
            "discovered programs"
        );
        programs
    }

    /// Files under `directory` that will be inspected, in walk order.
    pub fn candidates(&self, directory: &Path) -> Vec<PathBuf> {
        let walker = WalkDir::new(directory).into_iter().filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !self.filter.is_ignored_dir(&entry.file_name().to_string_lossy())
        });

        let mut candidates = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable path during discovery");
                    continue;
                }
            };

            // Symlinked files count; symlinked directories are not descended.
            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if !is_file
                || !self
                    .filter
                    .is_candidate_file(&entry.file_name().to_string_lossy())
            {
                continue;
            }

            let relative = entry.path().strip_prefix(directory).unwrap_or(entry.path());
            if self.filter.has_ignored_segment(relative) {
                debug!(path = %entry.path().display(), "skipping file under ignored directory");
                continue;
            }

            candidates.push(entry.into_path());
        }
        candidates
    }

    /// Inspect a single file, returning its descriptor when it is a program.
    pub fn inspect(&self, path: &Path) -> Option<ProgramDescriptor> {
        if !path.is_file() {
            return None;
        }

        let unit = match ProgramUnit::resolve(path) {
            Ok(unit) => unit,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot inspect file");
                return None;
            }
        };

        match self.loader.inspect(&unit, ENTRY_POINT) {
            Ok(Inspection::EntryPoint { parameters }) => {
                debug!(path = %path.display(), ?parameters, "found program");
                Some(ProgramDescriptor::new(path, parameters))
            }
            Ok(Inspection::NoEntryPoint) => {
                debug!(path = %path.display(), "no callable execute(); not a program");
                None
            }
            Ok(Inspection::LoadFailed(diagnostics)) => {
                warn!(
                    path = %path.display(),
                    error = %diagnostics.message,
                    error_type = diagnostics.error_type.as_deref().unwrap_or("unknown"),
                    "error loading module"
                );
                None
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "error inspecting file");
                None
            }
        }
    }
}
