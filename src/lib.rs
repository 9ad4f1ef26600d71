//! proghost: discover Python programs in a directory and run them.
//!
//! A *program* is a `.py` file defining a module-level callable named
//! `execute`. The host offers two operations:
//!
//! - [`Discoverer::discover`] walks a directory and returns a
//!   [`ProgramDescriptor`] (name, location, parameter names) per program;
//! - [`Executor::execute`] loads one program fresh and calls its entry point
//!   with a parameter mapping, returning an [`ExecutionOutcome`].
//!
//! Both run every load in its own interpreter process, so programs never
//! share module state or search paths, and both convert every program fault
//! into data instead of an error.
//!
//! ```no_run
//! use proghost::{Config, ProgramHost};
//! use serde_json::{Map, json};
//! use std::path::Path;
//!
//! let host = ProgramHost::new(&Config::default())?;
//! for program in host.list_programs(Path::new("programs")) {
//!     println!("{} {:?}", program.name, program.parameters);
//! }
//!
//! let mut parameters = Map::new();
//! parameters.insert("a".to_string(), json!(2));
//! parameters.insert("b".to_string(), json!(3));
//! let outcome = host.run_program(Path::new("programs/add.py"), &parameters);
//! assert!(outcome.succeeded());
//! # Ok::<(), proghost::error::HostError>(())
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod execution;
pub mod exit_codes;
pub mod host;
pub mod loader;
pub mod program;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use discovery::Discoverer;
pub use execution::Executor;
pub use host::ProgramHost;
pub use program::{Diagnostics, ExecutionOutcome, ProgramDescriptor};
