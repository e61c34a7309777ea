// src/cli/handlers/update.rs

use anyhow::{Result, anyhow};
use clap::Parser;

use crate::cli::args::CommonArgs;
use crate::cli::handlers::commons;
use crate::core::plugins;
use crate::models::EnvContext;

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Re-applies the enabled plugins to an existing fenced environment."
)]
struct UpdateArgs {
    #[command(flatten)]
    common: CommonArgs,
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let args = UpdateArgs::try_parse_from(&args)?;
    commons::init_logging(&args.common);

    let context = commons::resolve_project(&args.common, None)?;
    if !context.venv_dir.exists() {
        return Err(anyhow!(
            "virtual environment does not exist, create it with 'fence create'"
        ));
    }

    let descriptors = commons::resolve_plugins(&args.common, &context.layout)?;
    let interpreter = match context.interpreter {
        Some(interpreter) => interpreter,
        None => commons::resolve_interpreter(&args.common)?,
    };

    let env = EnvContext {
        project_dir: context.project_dir,
        venv_dir: context.venv_dir,
        interpreter,
    };
    plugins::apply_enabled(&env, &descriptors)?;

    log::info!("environment updated successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_environment_is_a_precondition_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let project = tmp.path().join("app");
        fs::create_dir(&project).unwrap();

        let args = vec![
            "--plain".to_string(),
            "--quiet".to_string(),
            "--dir".to_string(),
            project.display().to_string(),
            "--fence-root".to_string(),
            tmp.path().join("fence-home").display().to_string(),
            "--virtualenv-dir".to_string(),
            tmp.path().join("no-such-venv").display().to_string(),
        ];

        let result = handle(args);
        assert!(result.unwrap_err().to_string().contains("does not exist"));
    }
}
