// src/core/plugins/mod.rs
//
// Post-creation steps applied to a fenced environment. The registry is the
// single source of truth: a plugin exists if and only if it has an entry
// here, and registry order is application order.

use crate::models::{EnvContext, PluginDescriptor};
use anyhow::Result;

pub mod prompt;
pub mod requirements;
pub mod sublime;

/// A named post-creation step with a uniform "apply configuration" handler.
pub struct PluginDefinition {
    pub name: &'static str,
    pub apply: fn(&EnvContext, &PluginDescriptor) -> Result<()>,
}

/// Every plugin this build knows about, in application order.
pub static PLUGIN_REGISTRY: &[PluginDefinition] = &[
    PluginDefinition {
        name: "requirements",
        apply: requirements::apply,
    },
    PluginDefinition {
        name: "sublime",
        apply: sublime::apply,
    },
    PluginDefinition {
        name: "prompt",
        apply: prompt::apply,
    },
];

/// Finds a plugin definition by its registered name.
pub fn find_plugin(name: &str) -> Option<&'static PluginDefinition> {
    PLUGIN_REGISTRY.iter().find(|plugin| plugin.name == name)
}

/// Applies every enabled plugin to the environment, in registry order.
/// The first failing plugin aborts the run.
pub fn apply_enabled(context: &EnvContext, descriptors: &[PluginDescriptor]) -> Result<()> {
    for definition in PLUGIN_REGISTRY {
        let Some(descriptor) = descriptors.iter().find(|d| d.name == definition.name) else {
            continue;
        };
        if !descriptor.enabled {
            log::debug!("plugin '{}' is disabled, skipping", definition.name);
            continue;
        }
        log::debug!("applying plugin '{}'", definition.name);
        (definition.apply)(context, descriptor)?;
    }
    Ok(())
}
