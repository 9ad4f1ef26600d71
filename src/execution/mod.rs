//! Program execution.
//!
//! Loads a program fresh from its location, calls its `execute` entry point
//! with the supplied parameters bound by name, and reports the result as an
//! [`ExecutionOutcome`]. Every failure, whether raised by the program or by
//! the host while driving the interpreter, is returned as a `Failure`
//! outcome; nothing escapes as an error or panic.
//!
//! Parameters are passed through untouched: a missing or unexpected
//! parameter surfaces as the binding error the call itself raises.


use crate::config::Config;
use crate::error::{HostError, Result};
use crate::loader::{Invocation, ProgramLoader, ProgramUnit, PythonLoader};
use crate::program::{Diagnostics, ENTRY_POINT, ExecutionOutcome};
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Runs programs by location.
#[derive(Clone)]
pub struct Executor {
    loader: Arc<dyn ProgramLoader>,
}

impl Executor {
    pub fn new(loader: Arc<dyn ProgramLoader>) -> Self {
        Self { loader }
    }

    /// Executor backed by the configured Python interpreter.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(Arc::new(PythonLoader::from_config(config)?)))
    }

    /// Run the program at `location` with `parameters` as named arguments.
    pub fn execute(&self, location: &Path, parameters: &Map<String, Value>) -> ExecutionOutcome {
        info!(program = %location.display(), "executing program");

        let outcome = match self.invoke(location, parameters) {
            Ok(Invocation::Returned(value)) => ExecutionOutcome::success(value),
            Ok(Invocation::NoEntryPoint) => ExecutionOutcome::missing_entry_point(),
            Ok(Invocation::Raised(diagnostics)) => ExecutionOutcome::failure(diagnostics),
            Err(e) => ExecutionOutcome::failure(host_failure(location, &e)),
        };

        match outcome.diagnostics() {
            None => debug!(program = %location.display(), "program succeeded"),
            Some(diagnostics) => warn!(
                program = %location.display(),
                error = %diagnostics.message,
                "program failed"
            ),
        }
        outcome
    }

    fn invoke(&self, location: &Path, parameters: &Map<String, Value>) -> Result<Invocation> {
        if !location.is_file() {
            return Err(HostError::UserError(format!(
                "program file not found: {}",
                location.display()
            )));
        }
        let unit = ProgramUnit::resolve(location)?;
        self.loader.invoke(&unit, ENTRY_POINT, parameters)
    }
}

/// Diagnostics for a failure of the host rather than of the program.
fn host_failure(location: &Path, error: &HostError) -> Diagnostics {
    let message = match error {
        HostError::UserError(message) => message.clone(),
        HostError::Timeout(limit) => format!(
            "program '{}' timed out after {:?} and was stopped",
            location.display(),
            limit
        ),
        other => other.to_string(),
    };
    Diagnostics::message(message)
}
