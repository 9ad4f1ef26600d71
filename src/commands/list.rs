//! Implementation of the `proghost list` command.

use super::to_pretty_json;
use crate::cli::ListArgs;
use proghost::config::Config;
use proghost::error::{HostError, Result};
use proghost::exit_codes;
use proghost::{ProgramDescriptor, ProgramHost};

/// Execute the `proghost list` command.
///
/// Programs are printed sorted by location so repeated runs are comparable.
pub fn cmd_list(config: &Config, args: ListArgs) -> Result<i32> {
    if !args.directory.is_dir() {
        return Err(HostError::UserError(format!(
            "'{}' does not exist or is not a directory",
            args.directory.display()
        )));
    }

    let host = ProgramHost::new(config)?;
    let mut programs = host.list_programs(&args.directory);
    programs.sort_by(|a, b| a.location.cmp(&b.location));

    if args.json {
        println!("{}", to_pretty_json(&programs)?);
        return Ok(exit_codes::SUCCESS);
    }

    if programs.is_empty() {
        println!("No programs found in '{}'.", args.directory.display());
        return Ok(exit_codes::SUCCESS);
    }

    println!("Programs ({}):", programs.len());
    println!();
    for program in &programs {
        println!("  {}", signature(program));
        println!("     Path: {}", program.location.display());
    }
    Ok(exit_codes::SUCCESS)
}

/// `name(a, b)` rendering of a descriptor.
pub(super) fn signature(program: &ProgramDescriptor) -> String {
    format!("{}({})", program.name, program.parameters.join(", "))
}
