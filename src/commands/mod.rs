//! Command implementations for proghost.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Each command returns the process exit code on success.

mod check;
mod inspect;
mod list;
mod run;

use crate::cli::{Cli, Command};
use proghost::config::Config;
use proghost::error::Result;

/// Dispatch a command to its implementation.
///
/// Resolves the configuration once (file, then environment overrides) and
/// routes the command to its handler.
pub fn dispatch(cli: Cli) -> Result<i32> {
    let config = Config::resolve(cli.config.as_deref())?;

    match cli.command {
        Command::List(args) => list::cmd_list(&config, args),
        Command::Inspect(args) => inspect::cmd_inspect(&config, args),
        Command::Run(args) => run::cmd_run(config, args),
        Command::Check => check::cmd_check(&config),
    }
}

/// Pretty JSON for command output.
fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| {
        proghost::error::HostError::ProtocolError(format!("failed to render JSON output: {}", e))
    })
}
