//! Loading programs in isolation.
//!
//! A [`ProgramLoader`] is the capability that turns a program file into
//! something the host can introspect and call. Every call loads the file
//! afresh: no module state, import cache or search-path change survives from
//! one call to the next, and two files with the same base name never share
//! an identity.
//!
//! # Errors
//!
//! Loader methods distinguish two kinds of failure:
//! - faults raised by the program itself are reported as data
//!   ([`Inspection::LoadFailed`], [`Invocation::Raised`]);
//! - failures of the host (interpreter missing, crashed, timed out, or
//!   unreadable response) are returned as `Err(HostError)`.

mod process;
mod protocol;
mod python;

pub use python::PythonLoader;

use crate::error::{HostError, Result};
use crate::program::{Diagnostics, display_name};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// A program file resolved for loading.
///
/// This is the handle the loader operates on. It holds no loaded code, only
/// the absolute file path, the module name the file is loaded under, and the
/// directory prepended to the module search path while it loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramUnit {
    path: PathBuf,
    module_name: String,
    search_dir: PathBuf,
}

impl ProgramUnit {
    /// Resolve `path` into a loadable unit.
    pub fn resolve(path: &Path) -> Result<Self> {
        let path = std::path::absolute(path).map_err(|e| {
            HostError::UserError(format!(
                "failed to resolve program path '{}': {}",
                path.display(),
                e
            ))
        })?;

        let search_dir = path
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| {
                HostError::UserError(format!(
                    "program path '{}' has no containing directory",
                    path.display()
                ))
            })?;

        let module_name = display_name(&path);
        if module_name.is_empty() {
            return Err(HostError::UserError(format!(
                "program path '{}' has no file name",
                path.display()
            )));
        }

        Ok(Self {
            path,
            module_name,
            search_dir,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn search_dir(&self) -> &Path {
        &self.search_dir
    }
}

/// What loading a file revealed about its entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inspection {
    /// The entry point exists and is callable; parameter names in order.
    EntryPoint { parameters: Vec<String> },
    /// The file loaded but defines no callable entry point.
    NoEntryPoint,
    /// Running the file's top-level code (or introspecting it) raised.
    LoadFailed(Diagnostics),
}

/// What calling an entry point produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    /// The entry point returned this value.
    Returned(Value),
    /// The file loaded but has no entry point attribute.
    NoEntryPoint,
    /// Loading the file or calling the entry point raised.
    Raised(Diagnostics),
}

/// Loads program files in isolation and calls into them.
pub trait ProgramLoader: Send + Sync {
    /// Load `unit` and report whether `entry_point` exists and what it accepts.
    fn inspect(&self, unit: &ProgramUnit, entry_point: &str) -> Result<Inspection>;

    /// Load `unit` fresh and call `entry_point` with `arguments` bound by name.
    fn invoke(
        &self,
        unit: &ProgramUnit,
        entry_point: &str,
        arguments: &Map<String, Value>,
    ) -> Result<Invocation>;
}
