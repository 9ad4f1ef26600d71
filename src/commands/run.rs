//! Implementation of the `proghost run` command.

use super::to_pretty_json;
use crate::cli::RunArgs;
use proghost::config::Config;
use proghost::error::{HostError, Result};
use proghost::exit_codes;
use proghost::ProgramHost;
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Execute the `proghost run` command.
///
/// 1. Applies a `--timeout` override to the configuration
/// 2. Builds the parameter mapping from `--params` and `--param`
/// 3. Resolves the program by path, or by name under `--dir`
/// 4. Runs it and prints the outcome as JSON
pub fn cmd_run(mut config: Config, args: RunArgs) -> Result<i32> {
    if let Some(timeout) = args.timeout {
        config.execute_timeout_secs = timeout;
        config.validate()?;
    }

    let parameters = build_parameters(args.params_json.as_deref(), &args.params)?;
    let host = ProgramHost::new(&config)?;

    let location = match &args.dir {
        Some(dir) => host.find_program(dir, &args.program)?.location,
        None => {
            let path = PathBuf::from(&args.program);
            if !path.is_file() {
                return Err(HostError::UserError(format!(
                    "program file not found: {}\n\
                     Fix: pass a path to a .py file, or a program name with --dir.",
                    path.display()
                )));
            }
            path
        }
    };

    let outcome = host.run_program(&location, &parameters);
    println!("{}", to_pretty_json(&outcome)?);

    Ok(if outcome.succeeded() {
        exit_codes::SUCCESS
    } else {
        exit_codes::PROGRAM_FAILURE
    })
}

/// Merge a JSON object and `KEY=VALUE` pairs into one parameter mapping.
fn build_parameters(json: Option<&str>, pairs: &[String]) -> Result<Map<String, Value>> {
    let mut parameters = match json {
        Some(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                return Err(HostError::UserError(
                    "--params must be a JSON object".to_string(),
                ));
            }
            Err(e) => {
                return Err(HostError::UserError(format!(
                    "--params is not valid JSON: {}",
                    e
                )));
            }
        },
        None => Map::new(),
    };

    for pair in pairs {
        let (key, value) = parse_param(pair)?;
        parameters.insert(key, value);
    }
    Ok(parameters)
}

/// Parse `KEY=VALUE`; VALUE is JSON when it parses as JSON, else a string.
fn parse_param(pair: &str) -> Result<(String, Value)> {
    let (key, raw) = pair.split_once('=').ok_or_else(|| {
        HostError::UserError(format!(
            "invalid parameter '{}': expected KEY=VALUE",
            pair
        ))
    })?;

    let key = key.trim();
    if key.is_empty() {
        return Err(HostError::UserError(format!(
            "invalid parameter '{}': KEY must not be empty",
            pair
        )));
    }

    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}
