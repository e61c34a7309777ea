// src/system/python.rs

use crate::models::Interpreter;
use crate::system::executor::{self, ExecutionError};
use crate::system::shell;
use lazy_static::lazy_static;
use regex::Regex;
use std::path::{Path, PathBuf};
use thiserror::Error;

lazy_static! {
    static ref VERSION_RE: Regex = Regex::new(r"(\d+)\.(\d+)").expect("version pattern is valid");
}

#[derive(Error, Debug)]
pub enum InterpreterError {
    #[error("No usable interpreter found on PATH (tried: {0}). Pass --python explicitly.")]
    NotFound(String),
    #[error("Could not parse an interpreter version out of '{0}'.")]
    UnparsableVersion(String),
    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

/// Resolves the interpreter the environment is built around: the explicit
/// override when given, otherwise the first conventional name found on
/// `PATH`. The interpreter is probed for its `major.minor` version tag.
pub fn discover(explicit: Option<&Path>) -> Result<Interpreter, InterpreterError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => default_interpreter()?,
    };
    let version_tag = probe_version(&path)?;
    log::debug!(
        "using interpreter {} (version {})",
        path.display(),
        version_tag
    );
    Ok(Interpreter { path, version_tag })
}

fn default_interpreter() -> Result<PathBuf, InterpreterError> {
    let candidates: &[&str] = if cfg!(target_os = "windows") {
        &["python", "py"]
    } else {
        &["python3", "python"]
    };
    candidates
        .iter()
        .find_map(|name| shell::find_in_path(name))
        .ok_or_else(|| InterpreterError::NotFound(candidates.join(", ")))
}

/// Asks the interpreter for its version and reduces it to `major.minor`.
fn probe_version(python: &Path) -> Result<String, InterpreterError> {
    let command = executor::join_command([python.to_string_lossy().as_ref(), "--version"])?;
    let output = executor::run_and_capture(&command, Path::new("."))?;
    extract_version_tag(&output)
        .ok_or_else(|| InterpreterError::UnparsableVersion(output.trim().to_string()))
}

fn extract_version_tag(output: &str) -> Option<String> {
    let captures = VERSION_RE.captures(output)?;
    let major = captures.get(1)?.as_str();
    let minor = captures.get(2)?.as_str();
    Some(format!("{major}.{minor}"))
}
