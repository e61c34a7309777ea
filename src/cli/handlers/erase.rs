// src/cli/handlers/erase.rs

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::fs;

use crate::cli::args::CommonArgs;
use crate::cli::handlers::commons;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Erases the fenced environment.")]
struct EraseArgs {
    #[command(flatten)]
    common: CommonArgs,
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let args = EraseArgs::try_parse_from(&args)?;
    commons::init_logging(&args.common);

    let context = commons::resolve_project(&args.common, None)?;
    if !context.venv_dir.exists() {
        return Err(anyhow!("virtual environment does not exist, quitting"));
    }

    fs::remove_dir_all(&context.venv_dir)
        .with_context(|| format!("could not remove '{}'", context.venv_dir.display()))?;
    log::info!("environment erased successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_with_venv(
        project: &std::path::Path,
        fence_home: &std::path::Path,
        venv: &std::path::Path,
    ) -> Vec<String> {
        vec![
            "--plain".to_string(),
            "--quiet".to_string(),
            "--dir".to_string(),
            project.display().to_string(),
            "--fence-root".to_string(),
            fence_home.display().to_string(),
            "--virtualenv-dir".to_string(),
            venv.display().to_string(),
        ]
    }

    #[test]
    fn erasing_a_missing_environment_fails_without_panicking() {
        let tmp = tempfile::tempdir().unwrap();
        let project = tmp.path().join("app");
        fs::create_dir(&project).unwrap();

        let result = handle(args_with_venv(
            &project,
            &tmp.path().join("fence-home"),
            &tmp.path().join("no-such-venv"),
        ));
        assert!(result.unwrap_err().to_string().contains("does not exist"));
    }

    #[test]
    fn erasing_removes_the_environment_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let project = tmp.path().join("app");
        fs::create_dir(&project).unwrap();
        let venv = tmp.path().join("venv");
        fs::create_dir_all(venv.join("bin")).unwrap();
        fs::write(venv.join("bin").join("activate"), "# stub\n").unwrap();

        handle(args_with_venv(
            &project,
            &tmp.path().join("fence-home"),
            &venv,
        ))
        .unwrap();
        assert!(!venv.exists());
    }
}
