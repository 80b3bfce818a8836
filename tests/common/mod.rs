//! Shared test fixtures

#![allow(dead_code)]

use std::sync::Arc;

use plugin_help::{
    Error, FilterEntry, HandlerDescriptor, PermissionType, Plugin, PluginDescriptor,
    PluginRegistry, Result,
};

/// Minimal loaded plugin instance
pub struct TestPlugin {
    name: String,
}

impl Plugin for TestPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        "1.0.0"
    }
}

/// Registry whose plugin listing always fails
pub struct FailingRegistry;

impl PluginRegistry for FailingRegistry {
    fn all_plugins(&self) -> Result<Vec<PluginDescriptor>> {
        Err(Error::Registry("host unavailable".to_string()))
    }
}

/// Module path used for a plugin's handlers
#[must_use]
pub fn module_path(name: &str) -> String {
    format!("data.plugins.{name}.main")
}

/// Activated, loaded plugin with a module path derived from its name
#[must_use]
pub fn plugin(name: &str) -> PluginDescriptor {
    PluginDescriptor {
        name: name.to_string(),
        display_name: None,
        module_path: Some(module_path(name)),
        activated: true,
        instance: Some(Arc::new(TestPlugin {
            name: name.to_string(),
        })),
    }
}

/// Handler for `plugin` invoked by `command_name`
#[must_use]
pub fn command(plugin: &str, command_name: &str, desc: &str) -> HandlerDescriptor {
    HandlerDescriptor {
        handler_name: command_name.to_string(),
        module_path: module_path(plugin),
        description: Some(desc.to_string()),
        filters: vec![FilterEntry::Command {
            command_name: command_name.to_string(),
        }],
    }
}

/// Handler for `plugin` invoked by `command_name`, restricted to `permission_type`
#[must_use]
pub fn restricted(
    plugin: &str,
    command_name: &str,
    desc: &str,
    permission_type: PermissionType,
) -> HandlerDescriptor {
    let mut handler = command(plugin, command_name, desc);
    handler
        .filters
        .insert(0, FilterEntry::Permission { permission_type });
    handler
}
