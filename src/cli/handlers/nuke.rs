// src/cli/handlers/nuke.rs

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use dialoguer::{Confirm, theme::ColorfulTheme};
use std::fs;

use crate::cli::args::CommonArgs;
use crate::cli::handlers::commons;
use crate::core::paths::FenceLayout;

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Removes ALL fenced environments. Asks for confirmation first."
)]
struct NukeArgs {
    /// Skip the confirmation prompt.
    #[arg(long)]
    yes: bool,

    #[command(flatten)]
    common: CommonArgs,
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let args = NukeArgs::try_parse_from(&args)?;
    commons::init_logging(&args.common);

    let layout = commons::resolve_layout(&args.common)?;

    if !args.yes {
        println!(
            "{}",
            format!(
                "This removes every fenced environment under '{}'.",
                layout.venv_root().display()
            )
            .red()
            .bold()
        );
        if !Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Are you sure?")
            .default(false)
            .interact()?
        {
            println!("Operation cancelled.");
            return Ok(());
        }
    }

    nuke_environments(&layout)?;
    log::info!("all fenced environments removed");
    Ok(())
}

/// Deletes the whole environments root. A root that never existed is a
/// success, not a failure: there is simply nothing to remove.
fn nuke_environments(layout: &FenceLayout) -> Result<()> {
    let venv_root = layout.venv_root();
    if !venv_root.exists() {
        log::debug!("{} does not exist, nothing to remove", venv_root.display());
        return Ok(());
    }
    fs::remove_dir_all(&venv_root)
        .with_context(|| format!("could not remove '{}'", venv_root.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nuking_removes_every_environment() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = FenceLayout::new(Some(tmp.path().join("fence-home"))).unwrap();
        fs::create_dir_all(layout.venv_root().join("app.p.u.h-3.12")).unwrap();
        fs::create_dir_all(layout.venv_root().join("other.s.b-3.11")).unwrap();

        nuke_environments(&layout).unwrap();
        assert!(!layout.venv_root().exists());
        // The fence home itself survives.
        assert!(layout.root().exists());
    }

    #[test]
    fn nuking_an_empty_home_is_a_no_op() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = FenceLayout::new(Some(tmp.path().join("fence-home"))).unwrap();
        nuke_environments(&layout).unwrap();
    }

    #[test]
    fn confirmation_is_skipped_with_yes() {
        let tmp = tempfile::tempdir().unwrap();
        let home = tmp.path().join("fence-home");
        let layout = FenceLayout::new(Some(home.clone())).unwrap();
        fs::create_dir_all(layout.venv_root().join("app.p.u.h-3.12")).unwrap();

        handle(vec![
            "--yes".to_string(),
            "--quiet".to_string(),
            "--fence-root".to_string(),
            home.display().to_string(),
        ])
        .unwrap();
        assert!(!layout.venv_root().exists());
    }
}
