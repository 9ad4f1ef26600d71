//! CLI argument parsing for proghost.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// proghost: discover Python programs in a directory and run them.
///
/// A program is a `.py` file defining a module-level `execute` function.
/// Each program is loaded in its own interpreter process.
#[derive(Parser, Debug)]
#[command(name = "proghost")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// YAML configuration file.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Available commands for proghost.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the programs in a directory.
    ///
    /// Walks the directory, skipping dependency and metadata trees, and
    /// prints every file that defines a callable `execute`.
    List(ListArgs),

    /// Describe a single program file.
    Inspect(InspectArgs),

    /// Run a program with named parameters.
    ///
    /// Prints the outcome as JSON. Exits with 2 when the program fails.
    Run(RunArgs),

    /// Check that the configured interpreter starts.
    Check,
}

/// Arguments for the `list` command.
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Directory to scan.
    pub directory: PathBuf,

    /// Print the catalog as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `inspect` command.
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Program file to inspect.
    pub file: PathBuf,

    /// Print the descriptor as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Program path, or program name when `--dir` is given.
    pub program: String,

    /// Look the program up by name in this directory.
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Parameter as KEY=VALUE. VALUE is parsed as JSON when it is valid JSON,
    /// otherwise passed as a string. Repeatable.
    #[arg(short = 'p', long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Parameters as a JSON object. `--param` entries override its keys.
    #[arg(long = "params", value_name = "JSON")]
    pub params_json: Option<String>,

    /// Seconds before the program is stopped (overrides the config).
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}
