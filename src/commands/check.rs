//! Implementation of the `proghost check` command.

use proghost::config::Config;
use proghost::error::Result;
use proghost::exit_codes;
use proghost::loader::PythonLoader;

/// Execute the `proghost check` command.
///
/// Starts the configured interpreter once, reports its version, and prints
/// the effective configuration.
pub fn cmd_check(config: &Config) -> Result<i32> {
    let loader = PythonLoader::from_config(config)?;
    let version = loader.probe()?;

    println!("Interpreter: {}", config.interpreter);
    println!("Version:     {}", version);
    println!();
    println!("Effective configuration:");
    print!("{}", config.to_yaml()?);
    Ok(exit_codes::SUCCESS)
}
