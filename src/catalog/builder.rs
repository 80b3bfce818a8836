//! Catalog assembly from the host's plugin and handler registries
//!
//! The builder is a pure function of `(plugins, handlers, config)`: nothing
//! is cached between calls and the registries are only read.

use std::collections::{HashMap, HashSet};

use super::display_name::resolve_display_names;
use super::permission::{PermissionTier, classify, is_visible};
use super::{Catalog, CommandEntry};
use crate::Error;
use crate::config::CatalogConfig;
use crate::host::{HandlerDescriptor, PluginDescriptor, PluginRegistry};

/// Plugins that never appear in the catalog: the host core, the help plugin
/// itself and the reminder companion
pub const EXCLUDED_PLUGINS: [&str; 3] = ["astrbot", "astrbot_plugin_help", "astrbot-reminder"];

/// Internal name of the host's builtin commands plugin
pub const BUILTIN_PLUGIN: &str = "builtin_commands";

/// `(command, description, permission)` identity of an entry within one group
type DedupeKey = (String, String, PermissionTier);

/// Result of a catalog build, keeping apart the reasons a catalog may be empty
#[derive(Debug)]
pub enum BuildOutcome {
    /// Catalog assembled from at least one activated plugin
    Built(Catalog),
    /// The host reported no activated plugins
    NoActivePlugins,
    /// The host plugin registry could not be queried
    RegistryUnavailable(Error),
}

impl BuildOutcome {
    /// Catalog for this outcome, empty unless the build ran
    #[must_use]
    pub fn into_catalog(self) -> Catalog {
        match self {
            Self::Built(catalog) => catalog,
            Self::NoActivePlugins | Self::RegistryUnavailable(_) => Catalog::new(),
        }
    }

    /// Whether the plugin registry failed
    #[must_use]
    pub const fn is_registry_failure(&self) -> bool {
        matches!(self, Self::RegistryUnavailable(_))
    }
}

/// Builds the command catalog for one help request
pub struct CatalogBuilder<'a, R: PluginRegistry + ?Sized> {
    registry: &'a R,
    handlers: &'a [HandlerDescriptor],
    config: &'a CatalogConfig,
}

impl<'a, R: PluginRegistry + ?Sized> CatalogBuilder<'a, R> {
    /// Create a builder over the host's registries
    #[must_use]
    pub const fn new(
        registry: &'a R,
        handlers: &'a [HandlerDescriptor],
        config: &'a CatalogConfig,
    ) -> Self {
        Self {
            registry,
            handlers,
            config,
        }
    }

    /// Build the catalog, degrading to an empty one on any host failure
    #[must_use]
    pub fn build(&self) -> Catalog {
        self.build_outcome().into_catalog()
    }

    /// Build the catalog and report why it may be empty
    #[must_use]
    pub fn build_outcome(&self) -> BuildOutcome {
        let plugins = match self.registry.all_plugins() {
            Ok(plugins) => plugins,
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch plugin list");
                return BuildOutcome::RegistryUnavailable(e);
            }
        };

        let active: Vec<PluginDescriptor> = plugins.into_iter().filter(|p| p.activated).collect();
        tracing::debug!(count = active.len(), "found activated plugins");

        if active.is_empty() {
            tracing::warn!("no activated plugins found");
            return BuildOutcome::NoActivePlugins;
        }

        let overrides = resolve_display_names(&self.config.plugin_display_names);

        let mut catalog = Catalog::new();
        let mut seen: HashMap<String, HashSet<DedupeKey>> = HashMap::new();
        let mut owners: HashMap<String, String> = HashMap::new();

        for plugin in &active {
            let display_name = display_name_for(plugin, &overrides);

            if EXCLUDED_PLUGINS.contains(&plugin.name.as_str()) {
                continue;
            }

            if plugin.name == BUILTIN_PLUGIN && !self.config.show_builtin_cmds {
                tracing::debug!(plugin = %plugin.name, "builtin commands hidden by config");
                continue;
            }

            let Some(module_path) = validated_module_path(plugin) else {
                tracing::warn!(
                    plugin = %plugin.name,
                    module_path = ?plugin.module_path,
                    "plugin metadata invalid or incomplete, skipping"
                );
                continue;
            };

            // Groups are keyed by display name, so distinct plugins can share one
            let owner = owners
                .entry(display_name.clone())
                .or_insert_with(|| plugin.name.clone());
            if *owner != plugin.name {
                tracing::debug!(
                    display_name = %display_name,
                    first = %owner,
                    plugin = %plugin.name,
                    "plugins share a display name, merging groups"
                );
            }

            let group_seen = seen.entry(display_name.clone()).or_default();
            self.collect_commands(module_path, &display_name, group_seen, &mut catalog);
        }

        tracing::debug!(
            groups = catalog.len(),
            commands = catalog.command_count(),
            "built command catalog"
        );

        BuildOutcome::Built(catalog)
    }

    /// Append every visible, not yet seen command registered under `module_path`
    fn collect_commands(
        &self,
        module_path: &str,
        display_name: &str,
        seen: &mut HashSet<DedupeKey>,
        catalog: &mut Catalog,
    ) {
        for handler in self.handlers.iter().filter(|h| h.module_path == module_path) {
            let Some(command) = handler.command_name().filter(|c| !c.is_empty()) else {
                continue;
            };

            let permission = classify(&handler.filters);
            if !is_visible(permission, self.config.show_all_cmds) {
                continue;
            }

            let desc = handler.description_text();
            if !seen.insert((command.to_string(), desc.to_string(), permission)) {
                tracing::trace!(
                    display_name,
                    command,
                    handler = %handler.handler_name,
                    "duplicate command skipped"
                );
                continue;
            }

            catalog.push(
                display_name,
                CommandEntry {
                    command: command.to_string(),
                    desc: desc.to_string(),
                    permission,
                },
            );
        }
    }
}

/// Native display name, then configured override, then internal name
fn display_name_for(plugin: &PluginDescriptor, overrides: &HashMap<String, String>) -> String {
    plugin
        .native_display_name()
        .or_else(|| {
            overrides
                .get(&plugin.name)
                .map(String::as_str)
                .filter(|name| !name.is_empty())
        })
        .unwrap_or(plugin.name.as_str())
        .to_string()
}

/// Module path of a plugin fit for handler matching
fn validated_module_path(plugin: &PluginDescriptor) -> Option<&str> {
    if plugin.name.is_empty() || plugin.instance.is_none() {
        return None;
    }
    plugin.module_path()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::host::{FilterEntry, Plugin};

    struct StubPlugin;

    impl Plugin for StubPlugin {
        fn name(&self) -> &str {
            "stub"
        }

        fn version(&self) -> &str {
            "0.1.0"
        }
    }

    fn plugin(name: &str) -> PluginDescriptor {
        PluginDescriptor {
            name: name.to_string(),
            display_name: None,
            module_path: Some(format!("plugins.{name}.main")),
            activated: true,
            instance: Some(Arc::new(StubPlugin)),
        }
    }

    #[test]
    fn display_name_priority() {
        let overrides = resolve_display_names(&json!(["foo:Foo Tools"]));

        let mut p = plugin("foo");
        assert_eq!(display_name_for(&p, &overrides), "Foo Tools");

        p.display_name = Some("  Native Foo ".to_string());
        assert_eq!(display_name_for(&p, &overrides), "Native Foo");

        let bar = plugin("bar");
        assert_eq!(display_name_for(&bar, &overrides), "bar");
    }

    #[test]
    fn validation_requires_instance_and_path() {
        assert_eq!(validated_module_path(&plugin("ok")), Some("plugins.ok.main"));

        let mut no_instance = plugin("a");
        no_instance.instance = None;
        assert_eq!(validated_module_path(&no_instance), None);

        let mut no_path = plugin("b");
        no_path.module_path = None;
        assert_eq!(validated_module_path(&no_path), None);

        let mut no_name = plugin("c");
        no_name.name = String::new();
        assert_eq!(validated_module_path(&no_name), None);
    }

    #[test]
    fn empty_first_command_skips_handler() {
        let plugins = vec![plugin("p")];
        let handlers = vec![HandlerDescriptor {
            handler_name: "h".to_string(),
            module_path: "plugins.p.main".to_string(),
            description: None,
            filters: vec![
                FilterEntry::Command {
                    command_name: String::new(),
                },
                FilterEntry::Command {
                    command_name: "later".to_string(),
                },
            ],
        }];
        let config = CatalogConfig::default();

        let catalog = CatalogBuilder::new(&plugins, &handlers, &config).build();
        assert!(catalog.is_empty());
    }

    #[test]
    fn outcome_distinguishes_empty_reasons() {
        let config = CatalogConfig::default();
        let mut inactive = plugin("p");
        inactive.activated = false;
        let plugins = vec![inactive];

        let outcome = CatalogBuilder::new(&plugins, &[], &config).build_outcome();
        assert!(matches!(outcome, BuildOutcome::NoActivePlugins));
        assert!(!outcome.is_registry_failure());
        assert!(outcome.into_catalog().is_empty());
    }
}
