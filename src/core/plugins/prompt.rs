// src/core/plugins/prompt.rs
//
// Renames the label the activation scripts splice into the shell prompt.
// The stock scripts derive it from the environment directory's basename,
// which for a fenced environment is the unwieldy full key; the project name
// plus interpreter version reads better.

use crate::models::{EnvContext, PluginDescriptor};
use anyhow::{Context, Result};
use std::fs;

/// One literal substitution inside a generated activation script.
struct Substitution {
    script: &'static str,
    needle: String,
    replacement: String,
}

/// Rewrites the prompt-label expression in every activation script present
/// under the environment's scripts directory. Scripts the environment tool
/// did not generate are skipped.
pub fn apply(context: &EnvContext, _descriptor: &PluginDescriptor) -> Result<()> {
    let scripts_dir = context.scripts_dir();
    for substitution in substitutions(context) {
        let path = scripts_dir.join(substitution.script);
        if !path.exists() {
            log::debug!("activation script {} not present, skipping", path.display());
            continue;
        }

        let text = fs::read_to_string(&path)
            .with_context(|| format!("could not read '{}'", path.display()))?;
        if text.contains(&substitution.needle) {
            fs::write(
                &path,
                text.replace(&substitution.needle, &substitution.replacement),
            )
            .with_context(|| format!("could not rewrite '{}'", path.display()))?;
            log::debug!("renamed prompt label in {}", path.display());
        }
    }
    Ok(())
}

/// The per-shell label expressions the environment tool writes, and what to
/// replace them with. The needles are literal text, shell-variant dependent.
fn substitutions(context: &EnvContext) -> Vec<Substitution> {
    let label = context.prompt_label();
    if cfg!(target_os = "windows") {
        let venv_name = context
            .venv_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        vec![
            Substitution {
                script: "activate.bat",
                needle: format!("({venv_name})"),
                replacement: format!("({label})"),
            },
            Substitution {
                script: "activate.ps1",
                needle: "$(split-path $env:VIRTUAL_ENV -leaf)".to_string(),
                replacement: label,
            },
        ]
    } else {
        vec![
            Substitution {
                script: "activate",
                needle: r#"(`basename \"$VIRTUAL_ENV\"`)"#.to_string(),
                replacement: label.clone(),
            },
            Substitution {
                script: "activate.csh",
                needle: r#"`basename "$VIRTUAL_ENV"`"#.to_string(),
                replacement: label.clone(),
            },
            Substitution {
                script: "activate.fish",
                needle: r#"(basename "$VIRTUAL_ENV")"#.to_string(),
                replacement: label,
            },
        ]
    }
}
