// src/models.rs

use serde_json::{Map, Value};
use std::path::PathBuf;

use crate::constants::VERSION_SEPARATOR;

/// A resolved interpreter: the executable the environment is built around,
/// plus its `major.minor` version tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpreter {
    /// Path (or bare PATH-resolvable name) of the interpreter executable.
    pub path: PathBuf,
    /// The `major.minor` version string, e.g. `3.12`.
    pub version_tag: String,
}

/// Everything a plugin needs to know about the environment it is patching.
///
/// Built once per `create`/`update` invocation and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct EnvContext {
    /// Absolute path of the project the environment is fenced to.
    pub project_dir: PathBuf,
    /// Absolute path of the virtual environment directory.
    pub venv_dir: PathBuf,
    /// The interpreter the environment was (or will be) built around.
    pub interpreter: Interpreter,
}

impl EnvContext {
    /// The label displayed by patched activation scripts:
    /// `<project-basename>-<major.minor>`.
    pub fn prompt_label(&self) -> String {
        let name = self
            .project_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!(
            "{}{}{}",
            name, VERSION_SEPARATOR, self.interpreter.version_tag
        )
    }

    /// The directory holding the environment's executables and activation
    /// scripts (`bin/` on Unix, `Scripts/` on Windows).
    pub fn scripts_dir(&self) -> PathBuf {
        self.venv_dir.join(crate::system::shell::scripts_subdir())
    }
}

/// The effective configuration of a single plugin for this invocation.
///
/// Assembled fresh each run from {built-in default} <- {config file section}
/// <- {command-line override}, command line winning.
#[derive(Debug, Clone)]
pub struct PluginDescriptor {
    /// Registered plugin name.
    pub name: &'static str,
    /// Whether the plugin runs this invocation.
    pub enabled: bool,
    /// Remaining plugin-specific settings, merged with the same precedence.
    pub settings: Map<String, Value>,
}

impl PluginDescriptor {
    /// Looks up a scalar string setting.
    pub fn setting(&self, key: &str) -> Option<&str> {
        self.settings.get(key).and_then(Value::as_str)
    }
}
