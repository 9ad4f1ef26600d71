//! Interpreter subprocess execution.
//!
//! Runs one interpreter process with a request on stdin, output captured to
//! anonymous temporary files, and a hard time limit.

use crate::error::{HostError, Result};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Captured result of one interpreter process.
#[derive(Debug, Clone)]
pub(super) struct ProcessOutput {
    /// Exit code of the process (None if killed by a signal).
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub duration: Duration,
}

/// Spawn `command`, feed `input` to its stdin, and wait at most `timeout`.
///
/// Stdout and stderr go to temporary files rather than pipes so a chatty
/// process can never block on a full pipe while we poll it.
pub(super) fn run_with_timeout(
    mut command: Command,
    input: Vec<u8>,
    timeout: Duration,
) -> Result<ProcessOutput> {
    let program = command.get_program().to_string_lossy().into_owned();

    let mut stdout_file = capture_file()?;
    let mut stderr_file = capture_file()?;

    command
        .stdin(Stdio::piped())
        .stdout(Stdio::from(clone_handle(&stdout_file)?))
        .stderr(Stdio::from(clone_handle(&stderr_file)?));

    let start_time = Instant::now();
    let mut child = command.spawn().map_err(|e| {
        HostError::InterpreterError(format!(
            "failed to start interpreter '{}': {}\n\
             Fix: install Python or point `interpreter` (or PROGHOST_INTERPRETER) at one.",
            program, e
        ))
    })?;

    // Written from a thread: a process that never reads its stdin must still
    // be subject to the timeout below.
    if let Some(mut stdin) = child.stdin.take() {
        std::thread::spawn(move || {
            if let Err(e) = stdin.write_all(&input) {
                debug!(error = %e, "interpreter closed stdin before reading the request");
            }
        });
    }

    let exit_code = match wait_with_timeout(&mut child, timeout)? {
        Some(code) => code,
        None => {
            warn!(program = %program, timeout_secs = timeout.as_secs(), "killed interpreter after timeout");
            return Err(HostError::Timeout(timeout));
        }
    };

    Ok(ProcessOutput {
        exit_code,
        stdout: read_back(&mut stdout_file)?,
        stderr: read_back(&mut stderr_file)?,
        duration: start_time.elapsed(),
    })
}

/// Wait for a child process with timeout.
///
/// Returns `Some(exit_code)` when the process exited and `None` when it was
/// killed for running too long.
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<Option<Option<i32>>> {
    let start = Instant::now();
    let poll_interval = Duration::from_millis(10);

    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                return Ok(Some(status.code()));
            }
            Ok(None) => {
                if start.elapsed() >= timeout {
                    kill_process(child);
                    return Ok(None);
                }
                std::thread::sleep(poll_interval);
            }
            Err(e) => {
                kill_process(child);
                return Err(HostError::InterpreterError(format!(
                    "failed to check interpreter status: {}",
                    e
                )));
            }
        }
    }
}

/// Kill a process and wait for it to terminate.
fn kill_process(child: &mut Child) {
    // On Unix this is SIGKILL; on Windows it is TerminateProcess.
    let _ = child.kill();
    let _ = child.wait();
}

fn capture_file() -> Result<File> {
    tempfile::tempfile().map_err(|e| {
        HostError::InterpreterError(format!("failed to create output capture file: {}", e))
    })
}

fn clone_handle(file: &File) -> Result<File> {
    file.try_clone().map_err(|e| {
        HostError::InterpreterError(format!("failed to duplicate output capture file: {}", e))
    })
}

fn read_back(file: &mut File) -> Result<String> {
    let mut bytes = Vec::new();
    file.seek(SeekFrom::Start(0))
        .and_then(|_| file.read_to_end(&mut bytes))
        .map_err(|e| {
            HostError::InterpreterError(format!("failed to read captured output: {}", e))
        })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn captures_stdout_and_exit_code() {
        let mut command = Command::new("sh");
        command.arg("-c").arg("cat; echo err >&2; exit 3");
        let output = run_with_timeout(command, b"hello".to_vec(), Duration::from_secs(10)).unwrap();

        assert_eq!(output.exit_code, Some(3));
        assert_eq!(output.stdout, "hello");
        assert_eq!(output.stderr.trim(), "err");
    }

    #[test]
    fn large_output_does_not_block() {
        let mut command = Command::new("sh");
        command.arg("-c").arg("head -c 1000000 /dev/zero | tr '\\0' x");
        let output = run_with_timeout(command, Vec::new(), Duration::from_secs(20)).unwrap();

        assert_eq!(output.exit_code, Some(0));
        assert_eq!(output.stdout.len(), 1_000_000);
    }

    #[test]
    fn slow_process_is_killed() {
        let mut command = Command::new("sleep");
        command.arg("10");
        let start = Instant::now();
        let err = run_with_timeout(command, Vec::new(), Duration::from_millis(200)).unwrap_err();

        assert!(matches!(err, HostError::Timeout(_)));
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn missing_program_is_interpreter_error() {
        let command = Command::new("definitely-not-an-interpreter-proghost");
        let err = run_with_timeout(command, Vec::new(), Duration::from_secs(1)).unwrap_err();

        assert!(matches!(err, HostError::InterpreterError(_)));
        assert!(err.to_string().contains("failed to start interpreter"));
    }
}
