// src/core/plugins/sublime.rs
//
// Points the SublimeLinter configuration of a project at the fenced
// environment, so the editor lints against the packages actually installed
// there. The project file is a foreign document: everything we do not own in
// it must survive the rewrite.

use crate::core::merge;
use crate::models::{EnvContext, PluginDescriptor};
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const PROJECT_FILE_SUFFIX: &str = ".sublime-project";

/// Name of the optional setting overriding project-file discovery.
const PROJECT_FILE_SETTING: &str = "project_file";

/// Patches the first `*.sublime-project` file found in the project directory.
/// Projects without one are left alone.
pub fn apply(context: &EnvContext, descriptor: &PluginDescriptor) -> Result<()> {
    let Some(config_path) = locate_project_file(context, descriptor)? else {
        log::debug!(
            "no {PROJECT_FILE_SUFFIX} file in {}, nothing to configure",
            context.project_dir.display()
        );
        return Ok(());
    };

    log::debug!("configuring sublime linter in {}", config_path.display());
    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("could not read '{}'", config_path.display()))?;
    let mut document: Value = serde_json::from_str(&content)
        .with_context(|| format!("'{}' is not valid JSON", config_path.display()))?;

    let fragment = json!({
        "SublimeLinter": {
            "paths": {
                platform_key(): [context.scripts_dir().to_string_lossy()]
            },
            "python_paths": {
                platform_key(): site_packages_dirs(&context.venv_dir)
            }
        }
    });
    merge::merge_value(&mut document, &fragment)
        .with_context(|| format!("'{}' is not a JSON mapping", config_path.display()))?;

    fs::write(&config_path, render_sorted(&document)?)
        .with_context(|| format!("could not rewrite '{}'", config_path.display()))?;
    log::info!("successfully configured sublime linter");
    Ok(())
}

fn locate_project_file(
    context: &EnvContext,
    descriptor: &PluginDescriptor,
) -> Result<Option<PathBuf>> {
    if let Some(name) = descriptor.setting(PROJECT_FILE_SETTING) {
        let path = context.project_dir.join(name);
        return Ok(path.exists().then_some(path));
    }

    for entry in fs::read_dir(&context.project_dir).with_context(|| {
        format!("could not list project directory '{}'", context.project_dir.display())
    })? {
        let entry = entry?;
        if entry.file_name().to_string_lossy().ends_with(PROJECT_FILE_SUFFIX) {
            return Ok(Some(entry.path()));
        }
    }
    Ok(None)
}

/// The platform key SublimeLinter expects its path dictionaries under.
fn platform_key() -> &'static str {
    if cfg!(target_os = "windows") {
        "windows"
    } else if cfg!(target_os = "macos") {
        "osx"
    } else {
        "linux"
    }
}

/// Every `site-packages` directory inside the environment tree.
fn site_packages_dirs(venv_dir: &Path) -> Vec<String> {
    WalkDir::new(venv_dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_dir() && entry.file_name() == "site-packages")
        .map(|entry| entry.path().display().to_string())
        .collect()
}

/// Serializes with sorted keys (the default `serde_json` map is ordered) and
/// fixed 4-space indentation, so successive rewrites produce minimal diffs.
fn render_sorted(document: &Value) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    document.serialize(&mut serializer)?;
    buffer.push(b'\n');
    Ok(buffer)
}
