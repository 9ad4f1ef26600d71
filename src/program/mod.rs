//! Program data model.
//!
//! A *program* is a Python source file exposing a module-level callable named
//! `execute`. Discovery produces a [`ProgramDescriptor`] per program; running a
//! program produces an [`ExecutionOutcome`].

mod descriptor;
mod outcome;

pub use descriptor::ProgramDescriptor;
pub(crate) use descriptor::display_name;
pub use outcome::{Diagnostics, ExecutionOutcome, MISSING_ENTRY_POINT_MESSAGE};

/// Name of the callable every program must define.
pub const ENTRY_POINT: &str = "execute";

/// File extension (without the dot) of program sources.
pub const SOURCE_EXTENSION: &str = "py";
