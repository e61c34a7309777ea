// src/system/executor.rs

use std::path::Path;
use std::process::{Command as StdCommand, Stdio};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Command could not be parsed: {0}")]
    CommandParse(String),
    #[error("Command '{0}' could not be executed: {1}")]
    CommandFailed(String, std::io::Error),
    #[error("Command '{0}' exited with a non-zero error code.")]
    NonZeroExitStatus(String),
    #[error("Command '{command}' produced output that was not valid UTF-8")]
    InvalidUtf8Output {
        command: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// Assembles a command line out of program-and-argument parts, quoting each
/// part so paths with spaces survive the round trip through `run_command`.
pub fn join_command<'a>(parts: impl IntoIterator<Item = &'a str>) -> Result<String, ExecutionError> {
    shlex::try_join(parts)
        .map_err(|_| ExecutionError::CommandParse("embedded NUL in command arguments".to_string()))
}

/// Executes a command line, inheriting the caller's stdio, and blocks until
/// it finishes. A hang in the child hangs the invocation; there are no
/// timeout or cancellation semantics.
pub fn run_command(command_line: &str, cwd: &Path) -> Result<(), ExecutionError> {
    let Some((program, args)) = split_command(command_line)? else {
        return Ok(());
    };

    let status = StdCommand::new(&program)
        .args(&args)
        .current_dir(dunce::simplified(cwd))
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| ExecutionError::CommandFailed(command_line.to_string(), e))?;

    if !status.success() {
        return Err(ExecutionError::NonZeroExitStatus(command_line.to_string()));
    }
    Ok(())
}

/// Executes a command line and captures its standard output. Stderr is
/// discarded: this is meant for short probe commands (`git rev-parse`,
/// interpreter version checks) whose failure is an expected signal, not
/// something to shout about on the user's terminal.
pub fn run_and_capture(command_line: &str, cwd: &Path) -> Result<String, ExecutionError> {
    let Some((program, args)) = split_command(command_line)? else {
        return Ok(String::new());
    };

    let output = StdCommand::new(&program)
        .args(&args)
        .current_dir(dunce::simplified(cwd))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output()
        .map_err(|e| ExecutionError::CommandFailed(command_line.to_string(), e))?;

    if !output.status.success() {
        return Err(ExecutionError::NonZeroExitStatus(command_line.to_string()));
    }

    String::from_utf8(output.stdout).map_err(|e| ExecutionError::InvalidUtf8Output {
        command: command_line.to_string(),
        source: e,
    })
}

fn split_command(command_line: &str) -> Result<Option<(String, Vec<String>)>, ExecutionError> {
    let trimmed = command_line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let mut parts = shlex::split(trimmed)
        .ok_or_else(|| ExecutionError::CommandParse(trimmed.to_string()))?
        .into_iter();
    match parts.next() {
        Some(program) => Ok(Some((program, parts.collect()))),
        None => Ok(None),
    }
}
