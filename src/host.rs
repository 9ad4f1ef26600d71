//! Program host facade.
//!
//! Bundles a discoverer and an executor built from one configuration. This is
//! the surface external callers use: list the programs in a directory, then
//! run one of them with a parameter mapping.

use crate::config::Config;
use crate::discovery::{Discoverer, PathFilter};
use crate::error::{HostError, Result};
use crate::execution::Executor;
use crate::loader::{ProgramLoader, PythonLoader};
use crate::program::{ExecutionOutcome, ProgramDescriptor};
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::Arc;

#[derive(Clone)]
pub struct ProgramHost {
    discoverer: Discoverer,
    executor: Executor,
}

impl ProgramHost {
    /// Host backed by the configured Python interpreter.
    pub fn new(config: &Config) -> Result<Self> {
        let loader: Arc<dyn ProgramLoader> = Arc::new(PythonLoader::from_config(config)?);
        Ok(Self::with_loader(loader, PathFilter::from_config(config)?))
    }

    pub fn with_loader(loader: Arc<dyn ProgramLoader>, filter: PathFilter) -> Self {
        Self {
            discoverer: Discoverer::new(loader.clone(), filter),
            executor: Executor::new(loader),
        }
    }

    /// List the programs under `directory`, in filesystem walk order.
    pub fn list_programs(&self, directory: &Path) -> Vec<ProgramDescriptor> {
        self.discoverer.discover(directory)
    }

    /// Describe a single file, or `None` when it is not a program.
    pub fn inspect(&self, path: &Path) -> Option<ProgramDescriptor> {
        self.discoverer.inspect(path)
    }

    /// Run the program at `location`.
    pub fn run_program(&self, location: &Path, parameters: &Map<String, Value>) -> ExecutionOutcome {
        self.executor.execute(location, parameters)
    }

    /// Run a previously discovered program.
    pub fn run(&self, program: &ProgramDescriptor, parameters: &Map<String, Value>) -> ExecutionOutcome {
        self.executor.execute(&program.location, parameters)
    }

    /// Find the single program called `name` under `directory`.
    ///
    /// Names are display labels, so a name shared by several files is an
    /// error listing every match rather than an arbitrary pick.
    pub fn find_program(&self, directory: &Path, name: &str) -> Result<ProgramDescriptor> {
        let mut matches: Vec<ProgramDescriptor> = self
            .list_programs(directory)
            .into_iter()
            .filter(|p| p.name == name)
            .collect();

        match matches.len() {
            0 => Err(HostError::UserError(format!(
                "no program named '{}' found in '{}'",
                name,
                directory.display()
            ))),
            1 => Ok(matches.remove(0)),
            _ => {
                matches.sort_by(|a, b| a.location.cmp(&b.location));
                let listing = matches
                    .iter()
                    .map(|p| format!("  {}", p.location.display()))
                    .collect::<Vec<_>>()
                    .join("\n");
                Err(HostError::UserError(format!(
                    "program name '{}' is ambiguous in '{}'; matches:\n{}\n\
                     Fix: pass the program's path instead of its name.",
                    name,
                    directory.display(),
                    listing
                )))
            }
        }
    }
}
