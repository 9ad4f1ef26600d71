//! Python interpreter loader.
//!
//! Every inspection and invocation starts a fresh interpreter running the
//! embedded bootstrap script. The process boundary gives each load its own
//! module namespace and its own module search path, so concurrent calls never
//! observe each other's state.

use super::process::{ProcessOutput, run_with_timeout};
use super::protocol::{Operation, Request, Response};
use super::{Inspection, Invocation, ProgramLoader, ProgramUnit};
use crate::config::Config;
use crate::error::{HostError, Result};
use serde_json::{Map, Value};
use std::process::Command;
use std::time::Duration;
use tracing::debug;

const BOOTSTRAP: &str = include_str!("bootstrap.py");

/// Lines of interpreter stderr kept in error messages.
const STDERR_TAIL_LINES: usize = 20;

/// Loads programs by running them in a Python interpreter subprocess.
#[derive(Debug, Clone)]
pub struct PythonLoader {
    command: Vec<String>,
    inspect_timeout: Duration,
    execute_timeout: Duration,
}

impl PythonLoader {
    /// Create a loader for the given interpreter command line.
    ///
    /// `command` is the interpreter program followed by any leading arguments
    /// (e.g. `["uv", "run", "python"]`).
    pub fn new(command: Vec<String>) -> Result<Self> {
        if command.is_empty() {
            return Err(HostError::ConfigError(
                "interpreter must not be empty".to_string(),
            ));
        }
        let defaults = Config::default();
        Ok(Self {
            command,
            inspect_timeout: defaults.inspect_timeout(),
            execute_timeout: defaults.execute_timeout(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.interpreter_command()?)?
            .with_timeouts(config.inspect_timeout(), config.execute_timeout()))
    }

    pub fn with_timeouts(mut self, inspect: Duration, execute: Duration) -> Self {
        self.inspect_timeout = inspect;
        self.execute_timeout = execute;
        self
    }

    /// Check that the interpreter starts, returning its version string.
    pub fn probe(&self) -> Result<String> {
        let mut command = Command::new(&self.command[0]);
        command
            .args(&self.command[1..])
            .arg("-c")
            .arg("import sys; sys.stdout.write(sys.version.split()[0])");

        let output = run_with_timeout(command, Vec::new(), self.inspect_timeout)?;
        if output.exit_code != Some(0) {
            return Err(HostError::InterpreterError(format!(
                "interpreter '{}' failed its startup check ({}){}",
                self.command.join(" "),
                describe_exit(output.exit_code),
                stderr_tail(&output.stderr)
            )));
        }
        Ok(output.stdout.trim().to_string())
    }

    fn exchange(
        &self,
        op: Operation,
        unit: &ProgramUnit,
        entry_point: &str,
        arguments: &Map<String, Value>,
        timeout: Duration,
    ) -> Result<Response> {
        let result_file = tempfile::Builder::new()
            .prefix("proghost-")
            .suffix(".json")
            .tempfile()
            .map_err(|e| {
                HostError::InterpreterError(format!("failed to create response file: {}", e))
            })?;

        let request = Request {
            op,
            path: unit.path(),
            module: unit.module_name(),
            search_dir: unit.search_dir(),
            entry_point,
            arguments,
            result_path: result_file.path(),
        };
        let input = request.to_bytes()?;

        let mut command = Command::new(&self.command[0]);
        command
            .args(&self.command[1..])
            .arg("-u")
            .arg("-c")
            .arg(BOOTSTRAP)
            .env("PYTHONDONTWRITEBYTECODE", "1")
            .env("PYTHONIOENCODING", "utf-8");

        let output = run_with_timeout(command, input, timeout)?;
        log_program_output(unit, &output);

        let text = std::fs::read_to_string(result_file.path()).map_err(|e| {
            HostError::InterpreterError(format!("failed to read response file: {}", e))
        })?;

        if text.trim().is_empty() {
            return Err(HostError::InterpreterError(format!(
                "interpreter exited ({}) without reporting a result for '{}'{}",
                describe_exit(output.exit_code),
                unit.path().display(),
                stderr_tail(&output.stderr)
            )));
        }

        Response::parse(&text)
    }
}

impl ProgramLoader for PythonLoader {
    fn inspect(&self, unit: &ProgramUnit, entry_point: &str) -> Result<Inspection> {
        self.exchange(
            Operation::Inspect,
            unit,
            entry_point,
            &Map::new(),
            self.inspect_timeout,
        )?
        .into_inspection()
    }

    fn invoke(
        &self,
        unit: &ProgramUnit,
        entry_point: &str,
        arguments: &Map<String, Value>,
    ) -> Result<Invocation> {
        self.exchange(
            Operation::Invoke,
            unit,
            entry_point,
            arguments,
            self.execute_timeout,
        )?
        .into_invocation()
    }
}

fn log_program_output(unit: &ProgramUnit, output: &ProcessOutput) {
    debug!(
        program = %unit.path().display(),
        exit_code = ?output.exit_code,
        elapsed_ms = output.duration.as_millis() as u64,
        "interpreter finished"
    );
    if !output.stdout.is_empty() {
        debug!(program = %unit.path().display(), stdout = %output.stdout.trim_end(), "program output");
    }
    if !output.stderr.is_empty() {
        debug!(program = %unit.path().display(), stderr = %output.stderr.trim_end(), "program error output");
    }
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "killed by signal".to_string(),
    }
}

fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.trim_end().lines().collect();
    if lines.is_empty() {
        return String::new();
    }
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    format!("\nstderr:\n{}", lines[start..].join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{python_loader, require_python, write_program};
    use serde_json::json;
    use tempfile::TempDir;

    fn unit(path: &std::path::Path) -> ProgramUnit {
        ProgramUnit::resolve(path).unwrap()
    }

    #[test]
    fn probe_reports_python_version() {
        require_python!();
        let version = python_loader().probe().unwrap();
        assert!(version.starts_with('3'), "unexpected version {}", version);
    }

    #[test]
    #[cfg(unix)]
    fn probe_of_failing_interpreter_is_error() {
        let loader = PythonLoader::new(vec!["false".to_string()]).unwrap();
        let err = loader.probe().unwrap_err();
        assert!(matches!(err, HostError::InterpreterError(_)));
    }

    #[test]
    fn empty_command_is_rejected() {
        assert!(PythonLoader::new(Vec::new()).is_err());
    }

    #[test]
    fn stderr_tail_keeps_last_lines() {
        let stderr: String = (0..30).map(|i| format!("line {}\n", i)).collect();
        let tail = stderr_tail(&stderr);
        assert!(tail.starts_with("\nstderr:\n"));
        assert!(tail.contains("line 29"));
        assert!(tail.contains("line 10"));
        assert!(!tail.contains("line 9\n"));
        assert_eq!(stderr_tail(""), "");
    }

    #[test]
    fn inspect_reports_parameters_in_order() {
        require_python!();
        let temp_dir = TempDir::new().unwrap();
        let path = write_program(
            temp_dir.path(),
            "ordered.py",
            "def execute(zeta, alpha, *rest, mode='fast', **extra):\n    return None\n",
        );

        let inspection = python_loader().inspect(&unit(&path), "execute").unwrap();
        assert_eq!(
            inspection,
            Inspection::EntryPoint {
                parameters: vec![
                    "zeta".into(),
                    "alpha".into(),
                    "rest".into(),
                    "mode".into(),
                    "extra".into()
                ]
            }
        );
    }

    #[test]
    fn inspect_non_callable_entry_point() {
        require_python!();
        let temp_dir = TempDir::new().unwrap();
        let path = write_program(temp_dir.path(), "constant.py", "execute = 42\n");

        let inspection = python_loader().inspect(&unit(&path), "execute").unwrap();
        assert_eq!(inspection, Inspection::NoEntryPoint);
    }

    #[test]
    fn inspect_syntax_error_is_load_failure() {
        require_python!();
        let temp_dir = TempDir::new().unwrap();
        let path = write_program(temp_dir.path(), "broken.py", "def execute(:\n");

        match python_loader().inspect(&unit(&path), "execute").unwrap() {
            Inspection::LoadFailed(d) => assert_eq!(d.error_type.as_deref(), Some("SyntaxError")),
            other => panic!("unexpected inspection: {:?}", other),
        }
    }

    #[test]
    fn program_output_does_not_corrupt_response() {
        require_python!();
        let temp_dir = TempDir::new().unwrap();
        let path = write_program(
            temp_dir.path(),
            "noisy.py",
            "import sys\nprint('{\"status\": \"no_entry_point\"}')\n\
             def execute():\n    print('working')\n    sys.stderr.write('warn\\n')\n    return [1, 2]\n",
        );

        let invocation = python_loader()
            .invoke(&unit(&path), "execute", &Map::new())
            .unwrap();
        assert_eq!(invocation, Invocation::Returned(json!([1, 2])));
    }

    #[test]
    fn hard_exit_is_interpreter_error() {
        require_python!();
        let temp_dir = TempDir::new().unwrap();
        let path = write_program(
            temp_dir.path(),
            "abort.py",
            "import os\ndef execute():\n    os._exit(7)\n",
        );

        let err = python_loader()
            .invoke(&unit(&path), "execute", &Map::new())
            .unwrap_err();
        assert!(matches!(err, HostError::InterpreterError(_)));
        assert!(err.to_string().contains("exit code 7"));
    }

    #[test]
    fn slow_top_level_code_times_out() {
        require_python!();
        let temp_dir = TempDir::new().unwrap();
        let path = write_program(
            temp_dir.path(),
            "sleepy.py",
            "import time\ntime.sleep(30)\ndef execute():\n    return 1\n",
        );

        let loader = python_loader().with_timeouts(Duration::from_secs(1), Duration::from_secs(1));
        let err = loader.inspect(&unit(&path), "execute").unwrap_err();
        assert!(matches!(err, HostError::Timeout(_)));
    }

    #[test]
    fn missing_interpreter_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_program(temp_dir.path(), "any.py", "def execute():\n    return 1\n");

        let loader = PythonLoader::new(vec!["no-such-python-proghost".to_string()]).unwrap();
        let err = loader.inspect(&unit(&path), "execute").unwrap_err();
        assert!(matches!(err, HostError::InterpreterError(_)));
    }
}
