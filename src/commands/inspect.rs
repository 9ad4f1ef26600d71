//! Implementation of the `proghost inspect` command.

use super::list::signature;
use super::to_pretty_json;
use crate::cli::InspectArgs;
use proghost::config::Config;
use proghost::error::{HostError, Result};
use proghost::exit_codes;
use proghost::ProgramHost;

/// Execute the `proghost inspect` command.
pub fn cmd_inspect(config: &Config, args: InspectArgs) -> Result<i32> {
    if !args.file.is_file() {
        return Err(HostError::UserError(format!(
            "program file not found: {}",
            args.file.display()
        )));
    }

    let host = ProgramHost::new(config)?;
    let program = host.inspect(&args.file).ok_or_else(|| {
        HostError::UserError(format!(
            "'{}' is not a program: it failed to load or defines no callable execute().\n\
             Run with -v to see why.",
            args.file.display()
        ))
    })?;

    if args.json {
        println!("{}", to_pretty_json(&program)?);
    } else {
        println!("{}", signature(&program));
        println!("   Path: {}", program.location.display());
    }
    Ok(exit_codes::SUCCESS)
}
