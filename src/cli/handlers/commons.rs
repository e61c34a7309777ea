// src/cli/handlers/commons.rs

// Shared resolution helpers used by every handler: logging setup, project
// root detection, interpreter discovery, and plugin configuration.

use anyhow::{Context, Result, anyhow};
use log::LevelFilter;
use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::args::CommonArgs;
use crate::core::config_loader;
use crate::core::paths::FenceLayout;
use crate::models::{Interpreter, PluginDescriptor};
use crate::system::{executor, python};

/// Everything a lifecycle handler needs to know about its target.
///
/// Built once per invocation and never mutated; the interpreter is only
/// present when deriving the environment directory required probing it.
#[derive(Debug)]
pub struct ProjectContext {
    pub layout: FenceLayout,
    pub project_dir: PathBuf,
    pub venv_dir: PathBuf,
    pub interpreter: Option<Interpreter>,
}

/// Configures the process-wide logger from the verbosity flags.
///
/// `[LEVEL] message` lines on stderr; `RUST_LOG` still wins when set, and a
/// second call (tests run handlers back to back) is a no-op.
pub fn init_logging(common: &CommonArgs) {
    let level = if common.quiet {
        LevelFilter::Off
    } else if common.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()));
    builder.parse_default_env();
    let _ = builder.try_init();
}

/// Resolves the fence home for this invocation.
pub fn resolve_layout(common: &CommonArgs) -> Result<FenceLayout> {
    Ok(FenceLayout::new(expand_path_option(&common.fence_root)?)?)
}

/// Resolves the project directory and the environment directory fenced to
/// it. When the caller already holds an interpreter it is reused; otherwise
/// one is probed only if the environment directory must be derived (an
/// explicit `--virtualenv-dir` needs no interpreter at all).
pub fn resolve_project(
    common: &CommonArgs,
    interpreter: Option<Interpreter>,
) -> Result<ProjectContext> {
    let layout = resolve_layout(common)?;
    let project_dir = resolve_project_dir(common)?;

    let mut interpreter = interpreter;
    let venv_dir = match expand_path_option(&common.virtualenv_dir)? {
        Some(dir) => absolutize(dir)?,
        None => {
            if interpreter.is_none() {
                interpreter = Some(resolve_interpreter(common)?);
            }
            let version_tag = interpreter
                .as_ref()
                .map(|i| i.version_tag.as_str())
                .unwrap_or_default();
            layout.venv_dir_for(&project_dir, version_tag)?
        }
    };
    log::debug!(
        "project {} is fenced to {}",
        project_dir.display(),
        venv_dir.display()
    );

    Ok(ProjectContext {
        layout,
        project_dir,
        venv_dir,
        interpreter,
    })
}

/// Discovers the interpreter, honoring a `--python` override.
pub fn resolve_interpreter(common: &CommonArgs) -> Result<Interpreter> {
    let explicit = expand_path_option(&common.python)?;
    Ok(python::discover(explicit.as_deref())?)
}

/// Builds the effective plugin set for this invocation.
pub fn resolve_plugins(
    common: &CommonArgs,
    layout: &FenceLayout,
) -> Result<Vec<PluginDescriptor>> {
    let (config_path, explicit) = match expand_path_option(&common.config)? {
        Some(path) => (path, true),
        None => (layout.config_file(), false),
    };
    let selection = (!common.plugins.is_empty()).then_some(common.plugins.as_slice());
    Ok(config_loader::resolve_plugins(&config_path, explicit, selection)?)
}

/// The project root: `--dir` (expanded) or the current directory, replaced
/// by the git top-level when the directory is inside a repository and
/// `--plain` was not given. A failing git probe is an expected signal.
fn resolve_project_dir(common: &CommonArgs) -> Result<PathBuf> {
    let mut dir = match expand_path_option(&common.dir)? {
        Some(dir) => absolutize(dir)?,
        None => env::current_dir().context("could not determine the current directory")?,
    };

    if !common.plain {
        match git_toplevel(&dir) {
            Some(toplevel) => {
                log::debug!(
                    "using git top-level {} as the project root",
                    toplevel.display()
                );
                dir = toplevel;
            }
            None => {
                log::debug!(
                    "tried to handle {} as a git repository but it isn't one",
                    dir.display()
                );
            }
        }
    }
    Ok(dir)
}

/// Asks git for the repository top-level containing `dir`. Any failure
/// (no git, not a repository, missing directory) is a `None`, never an error.
pub fn git_toplevel(dir: &Path) -> Option<PathBuf> {
    let output = executor::run_and_capture("git rev-parse --show-toplevel", dir).ok()?;
    let toplevel = output.trim();
    if toplevel.is_empty() {
        None
    } else {
        Some(PathBuf::from(toplevel))
    }
}

fn absolutize(path: PathBuf) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path);
    }
    let cwd = env::current_dir().context("could not determine the current directory")?;
    Ok(cwd.join(path))
}

fn expand_path_option(value: &Option<String>) -> Result<Option<PathBuf>> {
    value
        .as_deref()
        .map(|raw| {
            shellexpand::full(raw)
                .map(|expanded| PathBuf::from(expanded.into_owned()))
                .map_err(|e| anyhow!("could not expand path '{raw}': {e}"))
        })
        .transpose()
}
