// src/core/config_loader.rs
//
// Loads the per-user `fence.conf` and folds it, together with any
// command-line selection, into one effective descriptor per plugin.

use crate::core::merge::{self, MergeError};
use crate::core::plugins;
use crate::models::PluginDescriptor;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read configuration file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Configuration file '{0}' does not exist.")]
    MissingExplicitFile(String),
    #[error("Malformed configuration at {path}:{line}: '{text}'")]
    Malformed {
        path: String,
        line: usize,
        text: String,
    },
    #[error("'{0}' is not a recognized plugin name.")]
    UnknownPlugin(String),
    #[error("Invalid boolean token '{token}' for plugin '{plugin}'.")]
    InvalidBoolToken { plugin: String, token: String },
    #[error(transparent)]
    Merge(#[from] MergeError),
}

/// Parses the accepted boolean-like tokens, case-insensitively.
///
/// Truthy: `true`, `t`, `yes`, `y`, `1`. Falsy: `false`, `f`, `no`, `n`,
/// `0`. Anything else, including the empty string, is rejected.
pub fn parse_bool_token(token: &str) -> Option<bool> {
    match token.to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" => Some(true),
        "false" | "f" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

/// Builds the effective per-plugin configuration for this invocation.
///
/// Precedence, weakest first: built-in defaults (every plugin enabled), the
/// configuration file section named after the plugin, and finally the
/// command-line selection (`--plugins`), which enables exactly the named
/// plugins and disables the rest. Each layer is folded in with the recursive
/// merge so file sections can add arbitrary scalar settings without
/// disturbing the defaults they do not name.
///
/// `explicit` marks a user-supplied `--config` path: its absence is fatal,
/// while a missing default file simply means defaults apply.
pub fn resolve_plugins(
    config_path: &Path,
    explicit: bool,
    cli_selection: Option<&[String]>,
) -> Result<Vec<PluginDescriptor>, ConfigError> {
    let sections = read_config_file(config_path, explicit)?;

    for name in sections.keys() {
        if plugins::find_plugin(name).is_none() {
            return Err(ConfigError::UnknownPlugin(name.clone()));
        }
    }
    if let Some(selection) = cli_selection {
        for name in selection {
            if plugins::find_plugin(name).is_none() {
                return Err(ConfigError::UnknownPlugin(name.clone()));
            }
        }
    }

    let mut descriptors = Vec::new();
    for definition in plugins::PLUGIN_REGISTRY {
        let mut effective = json!({ "enabled": true });

        if let Some(entries) = sections.get(definition.name) {
            let overlay: Map<String, Value> = entries
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect();
            merge::merge_value(&mut effective, &Value::Object(overlay))?;
        }

        if let Some(selection) = cli_selection {
            let selected = selection.iter().any(|n| n == definition.name);
            merge::merge_value(&mut effective, &json!({ "enabled": selected }))?;
        }

        let mut settings = effective
            .as_object()
            .cloned()
            .unwrap_or_default();
        let enabled = match settings.remove("enabled") {
            Some(Value::Bool(flag)) => flag,
            Some(Value::String(token)) => parse_bool_token(&token).ok_or_else(|| {
                ConfigError::InvalidBoolToken {
                    plugin: definition.name.to_string(),
                    token,
                }
            })?,
            Some(other) => {
                return Err(ConfigError::InvalidBoolToken {
                    plugin: definition.name.to_string(),
                    token: other.to_string(),
                });
            }
            None => true,
        };

        descriptors.push(PluginDescriptor {
            name: definition.name,
            enabled,
            settings,
        });
    }

    Ok(descriptors)
}

/// Reads the INI-style configuration file into `{section -> {key -> value}}`.
///
/// The dialect is deliberately small: `[section]` headers, `key = value`
/// pairs, `#`/`;` full-line comments. The accepted boolean tokens
/// (`yes`, `no`, ...) rule out reusing a stricter format parser here.
fn read_config_file(
    path: &Path,
    explicit: bool,
) -> Result<BTreeMap<String, BTreeMap<String, String>>, ConfigError> {
    if !path.exists() {
        if explicit {
            return Err(ConfigError::MissingExplicitFile(path.display().to_string()));
        }
        log::debug!("no configuration file at {}, using defaults", path.display());
        return Ok(BTreeMap::new());
    }

    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    let mut sections: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
    let mut current: Option<String> = None;

    for (index, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            let name = header.trim().to_string();
            sections.entry(name.clone()).or_default();
            current = Some(name);
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(ConfigError::Malformed {
                path: path.display().to_string(),
                line: index + 1,
                text: raw_line.to_string(),
            });
        };
        let Some(section) = &current else {
            return Err(ConfigError::Malformed {
                path: path.display().to_string(),
                line: index + 1,
                text: raw_line.to_string(),
            });
        };
        sections
            .entry(section.clone())
            .or_default()
            .insert(key.trim().to_string(), value.trim().to_string());
    }

    Ok(sections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_conf(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fence.conf");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (dir, path)
    }

    fn descriptor<'a>(descriptors: &'a [PluginDescriptor], name: &str) -> &'a PluginDescriptor {
        descriptors.iter().find(|d| d.name == name).unwrap()
    }

    #[test]
    fn bool_tokens_parse_case_insensitively() {
        for token in ["true", "t", "YES", "y", "1", "TrUe"] {
            assert_eq!(parse_bool_token(token), Some(true), "token {token}");
        }
        for token in ["false", "F", "no", "N", "0", "fAlSe"] {
            assert_eq!(parse_bool_token(token), Some(false), "token {token}");
        }
        for token in ["", "2", "01", "maybe", "yess", "-1"] {
            assert_eq!(parse_bool_token(token), None, "token {token}");
        }
    }

    #[test]
    fn missing_default_file_enables_everything() {
        let dir = tempfile::tempdir().unwrap();
        let descriptors =
            resolve_plugins(&dir.path().join("fence.conf"), false, None).unwrap();
        assert_eq!(descriptors.len(), plugins::PLUGIN_REGISTRY.len());
        assert!(descriptors.iter().all(|d| d.enabled));
    }

    #[test]
    fn missing_explicit_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let result = resolve_plugins(&dir.path().join("elsewhere.conf"), true, None);
        assert!(matches!(result, Err(ConfigError::MissingExplicitFile(_))));
    }

    #[test]
    fn file_section_disables_a_single_plugin() {
        let (_dir, path) = write_conf("[requirements]\nenabled = false\n");
        let descriptors = resolve_plugins(&path, false, None).unwrap();
        assert!(!descriptor(&descriptors, "requirements").enabled);
        assert!(descriptor(&descriptors, "sublime").enabled);
        assert!(descriptor(&descriptors, "prompt").enabled);
    }

    #[test]
    fn word_tokens_and_comments_are_accepted() {
        let (_dir, path) = write_conf(
            "# disable the linter patch\n[sublime]\nenabled = No\n; and keep prompt on\n[prompt]\nenabled = Y\n",
        );
        let descriptors = resolve_plugins(&path, false, None).unwrap();
        assert!(!descriptor(&descriptors, "sublime").enabled);
        assert!(descriptor(&descriptors, "prompt").enabled);
    }

    #[test]
    fn command_line_selection_wins_over_file() {
        let (_dir, path) = write_conf("[requirements]\nenabled = no\n");
        let selection = vec!["requirements".to_string()];
        let descriptors = resolve_plugins(&path, false, Some(&selection)).unwrap();
        assert!(descriptor(&descriptors, "requirements").enabled);
        assert!(!descriptor(&descriptors, "sublime").enabled);
        assert!(!descriptor(&descriptors, "prompt").enabled);
    }

    #[test]
    fn unknown_section_is_fatal() {
        let (_dir, path) = write_conf("[telemetry]\nenabled = yes\n");
        let result = resolve_plugins(&path, false, None);
        assert!(matches!(result, Err(ConfigError::UnknownPlugin(name)) if name == "telemetry"));
    }

    #[test]
    fn unknown_command_line_plugin_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let selection = vec!["requirments".to_string()];
        let result = resolve_plugins(&dir.path().join("fence.conf"), false, Some(&selection));
        assert!(matches!(result, Err(ConfigError::UnknownPlugin(_))));
    }

    #[test]
    fn invalid_bool_token_is_fatal() {
        let (_dir, path) = write_conf("[prompt]\nenabled = maybe\n");
        let result = resolve_plugins(&path, false, None);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidBoolToken { plugin, token })
                if plugin == "prompt" && token == "maybe"
        ));
    }

    #[test]
    fn malformed_line_is_fatal() {
        let (_dir, path) = write_conf("[prompt]\nenabled\n");
        assert!(matches!(
            resolve_plugins(&path, false, None),
            Err(ConfigError::Malformed { line: 2, .. })
        ));
    }

    #[test]
    fn extra_section_keys_become_plugin_settings() {
        let (_dir, path) = write_conf("[sublime]\nenabled = yes\nproject_file = custom.sublime-project\n");
        let descriptors = resolve_plugins(&path, false, None).unwrap();
        let sublime = descriptor(&descriptors, "sublime");
        assert_eq!(sublime.setting("project_file"), Some("custom.sublime-project"));
    }
}
