// src/cli/handlers/create.rs

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::fs;

use crate::cli::args::CommonArgs;
use crate::cli::handlers::commons;
use crate::constants::VIRTUALENV_BIN;
use crate::core::plugins;
use crate::models::EnvContext;
use crate::system::executor;

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Creates the fenced environment and applies the enabled plugins."
)]
struct CreateArgs {
    #[command(flatten)]
    common: CommonArgs,
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let args = CreateArgs::try_parse_from(&args)?;
    commons::init_logging(&args.common);

    let context = commons::resolve_project(&args.common, None)?;

    // Configuration errors are fatal before anything touches the disk.
    let descriptors = commons::resolve_plugins(&args.common, &context.layout)?;

    if context.venv_dir.exists() {
        return Err(anyhow!("virtual environment already exists, quitting"));
    }
    if !context.project_dir.exists() {
        return Err(anyhow!(
            "{} does not exist, quitting",
            context.project_dir.display()
        ));
    }

    let interpreter = match context.interpreter {
        Some(interpreter) => interpreter,
        None => commons::resolve_interpreter(&args.common)?,
    };

    if let Some(parent) = context.venv_dir.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("could not create '{}'", parent.display()))?;
    }

    log::info!("creating virtual environment {}", context.venv_dir.display());
    let command = executor::join_command([
        VIRTUALENV_BIN,
        "-p",
        interpreter.path.to_string_lossy().as_ref(),
        context.venv_dir.to_string_lossy().as_ref(),
    ])?;
    let output = executor::run_and_capture(&command, &context.project_dir)
        .context("environment creation failed")?;
    log::debug!("{}", "=".repeat(40));
    log::debug!("{output}");
    log::debug!("{}", "=".repeat(40));

    let env = EnvContext {
        project_dir: context.project_dir,
        venv_dir: context.venv_dir,
        interpreter,
    };
    plugins::apply_enabled(&env, &descriptors)?;

    log::info!("environment created successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args(project: &std::path::Path, fence_home: &std::path::Path) -> Vec<String> {
        vec![
            "--plain".to_string(),
            "--quiet".to_string(),
            "--dir".to_string(),
            project.display().to_string(),
            "--fence-root".to_string(),
            fence_home.display().to_string(),
        ]
    }

    #[test]
    fn existing_environment_is_a_precondition_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let project = tmp.path().join("app");
        fs::create_dir(&project).unwrap();
        let venv = tmp.path().join("venv");
        fs::create_dir(&venv).unwrap();

        let mut args = base_args(&project, &tmp.path().join("fence-home"));
        args.push("--virtualenv-dir".to_string());
        args.push(venv.display().to_string());

        let result = handle(args);
        assert!(result.unwrap_err().to_string().contains("already exists"));
        // The pre-existing directory is left alone.
        assert!(venv.exists());
    }

    #[test]
    fn missing_project_directory_is_a_precondition_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let project = tmp.path().join("not-created");

        let mut args = base_args(&project, &tmp.path().join("fence-home"));
        args.push("--virtualenv-dir".to_string());
        args.push(tmp.path().join("venv").display().to_string());

        let result = handle(args);
        assert!(result.unwrap_err().to_string().contains("does not exist"));
        assert!(!tmp.path().join("venv").exists());
    }

    #[test]
    fn configuration_errors_abort_before_any_preconditions() {
        let tmp = tempfile::tempdir().unwrap();
        let project = tmp.path().join("app");
        fs::create_dir(&project).unwrap();
        let conf = tmp.path().join("fence.conf");
        fs::write(&conf, "[no-such-plugin]\nenabled = yes\n").unwrap();

        let mut args = base_args(&project, &tmp.path().join("fence-home"));
        args.push("--config".to_string());
        args.push(conf.display().to_string());
        args.push("--virtualenv-dir".to_string());
        args.push(tmp.path().join("venv").display().to_string());

        let result = handle(args);
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("not a recognized plugin")
        );
    }
}
