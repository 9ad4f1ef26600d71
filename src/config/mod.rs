//! Configuration model for proghost.
//!
//! This module defines the Config struct that represents an optional
//! `proghost.yaml` file. It supports forward-compatible YAML parsing (unknown
//! fields are ignored), sensible defaults for every field, an environment
//! override for the interpreter, and validation of config values.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::Config;
pub use operations::INTERPRETER_ENV;
