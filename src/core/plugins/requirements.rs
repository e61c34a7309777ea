// src/core/plugins/requirements.rs

use crate::constants::REQUIREMENTS_FILENAME;
use crate::models::{EnvContext, PluginDescriptor};
use crate::system::executor;
use anyhow::{Context, Result};

/// Installs the project's requirements manifest into the environment, if the
/// project has one. A missing manifest is not an error.
pub fn apply(context: &EnvContext, _descriptor: &PluginDescriptor) -> Result<()> {
    let manifest = context.project_dir.join(REQUIREMENTS_FILENAME);
    if !manifest.exists() {
        log::debug!(
            "no {} in {}, nothing to install",
            REQUIREMENTS_FILENAME,
            context.project_dir.display()
        );
        return Ok(());
    }

    log::info!("loading requirements from {}", manifest.display());
    let pip = context.scripts_dir().join(pip_executable());
    let command = executor::join_command([
        pip.to_string_lossy().as_ref(),
        "install",
        "-r",
        manifest.to_string_lossy().as_ref(),
    ])?;
    let output = executor::run_and_capture(&command, &context.project_dir)
        .context("installing requirements failed")?;

    log::debug!("{}", "=".repeat(40));
    log::debug!("{output}");
    log::debug!("{}", "=".repeat(40));
    log::info!("finished installing requirements");
    Ok(())
}

fn pip_executable() -> &'static str {
    if cfg!(target_os = "windows") {
        "pip.exe"
    } else {
        "pip"
    }
}
