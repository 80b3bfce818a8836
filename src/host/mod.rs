//! Host-side view of plugins and command handlers
//!
//! The host application owns the plugin registry and the global handler
//! registry. This module describes the read-only shape the catalog builder
//! consumes from them. Nothing here is mutated by the help plugin.

pub mod snapshot;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::Result;

pub use snapshot::{HostSnapshot, PluginRecord};

/// Base capability every loaded plugin instance exposes to the host
pub trait Plugin: Send + Sync {
    /// Internal plugin name, unique within one host
    fn name(&self) -> &str;

    /// Version string (semver recommended)
    fn version(&self) -> &str;
}

/// Access level attached to a handler by a permission filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionType {
    /// Bot administrators only
    Admin,
    /// Any other role; unknown tier names land here
    #[serde(other)]
    Member,
}

/// One filter in a handler's trigger chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterEntry {
    /// Triggered by a single command word
    Command {
        /// Command word without prefix
        command_name: String,
    },
    /// Entry point of a command group
    CommandGroup {
        /// Group word without prefix
        group_name: String,
    },
    /// Restricts who may invoke the handler
    Permission {
        /// Required access level
        permission_type: PermissionType,
    },
    /// Any filter kind the catalog does not care about (regex, platform, ...)
    #[serde(other)]
    Other,
}

/// A registered event handler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerDescriptor {
    /// Handler function name, used only for diagnostics
    #[serde(default)]
    pub handler_name: String,
    /// Module path of the plugin that registered the handler
    pub module_path: String,
    /// Free-text description shown to users
    #[serde(default)]
    pub description: Option<String>,
    /// Filters in registration order
    #[serde(default)]
    pub filters: Vec<FilterEntry>,
}

impl HandlerDescriptor {
    /// Command or group word that invokes this handler
    ///
    /// The first command or command group filter in chain order wins.
    #[must_use]
    pub fn command_name(&self) -> Option<&str> {
        self.filters.iter().find_map(|filter| match filter {
            FilterEntry::Command { command_name } => Some(command_name.as_str()),
            FilterEntry::CommandGroup { group_name } => Some(group_name.as_str()),
            FilterEntry::Permission { .. } | FilterEntry::Other => None,
        })
    }

    /// Description with surrounding whitespace removed, empty when absent
    #[must_use]
    pub fn description_text(&self) -> &str {
        self.description.as_deref().map_or("", str::trim)
    }
}

/// Metadata the host keeps for one plugin
#[derive(Clone, Default)]
pub struct PluginDescriptor {
    /// Internal plugin name
    pub name: String,
    /// Display name declared by the plugin itself
    pub display_name: Option<String>,
    /// Module path handlers are registered under
    pub module_path: Option<String>,
    /// Whether the plugin is currently activated
    pub activated: bool,
    /// Loaded plugin instance, `None` if the host has no conforming object
    pub instance: Option<Arc<dyn Plugin>>,
}

impl PluginDescriptor {
    /// Native display name with surrounding whitespace removed, if non-empty
    #[must_use]
    pub fn native_display_name(&self) -> Option<&str> {
        self.display_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Module path, if non-empty
    #[must_use]
    pub fn module_path(&self) -> Option<&str> {
        self.module_path.as_deref().filter(|path| !path.is_empty())
    }
}

impl std::fmt::Debug for PluginDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginDescriptor")
            .field("name", &self.name)
            .field("display_name", &self.display_name)
            .field("module_path", &self.module_path)
            .field("activated", &self.activated)
            .field("instance", &self.instance.as_ref().map(|p| p.name()))
            .finish()
    }
}

/// Source of plugin metadata owned by the host
pub trait PluginRegistry {
    /// Fetch every plugin the host knows about, activated or not
    ///
    /// # Errors
    ///
    /// Returns error if the host cannot enumerate its plugins
    fn all_plugins(&self) -> Result<Vec<PluginDescriptor>>;
}

impl PluginRegistry for [PluginDescriptor] {
    fn all_plugins(&self) -> Result<Vec<PluginDescriptor>> {
        Ok(self.to_vec())
    }
}

impl PluginRegistry for Vec<PluginDescriptor> {
    fn all_plugins(&self) -> Result<Vec<PluginDescriptor>> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler(filters: Vec<FilterEntry>) -> HandlerDescriptor {
        HandlerDescriptor {
            handler_name: "h".to_string(),
            module_path: "plugins.test.main".to_string(),
            description: None,
            filters,
        }
    }

    #[test]
    fn first_command_filter_wins() {
        let h = handler(vec![
            FilterEntry::Permission {
                permission_type: PermissionType::Admin,
            },
            FilterEntry::CommandGroup {
                group_name: "todo".to_string(),
            },
            FilterEntry::Command {
                command_name: "add".to_string(),
            },
        ]);
        assert_eq!(h.command_name(), Some("todo"));
    }

    #[test]
    fn no_command_filter() {
        let h = handler(vec![FilterEntry::Other]);
        assert_eq!(h.command_name(), None);
    }

    #[test]
    fn description_is_trimmed() {
        let mut h = handler(Vec::new());
        assert_eq!(h.description_text(), "");
        h.description = Some("  show weather \n".to_string());
        assert_eq!(h.description_text(), "show weather");
    }

    #[test]
    fn deserialize_filters() {
        let json = r#"[
            {"type": "command", "command_name": "today"},
            {"type": "command_group", "group_name": "todo"},
            {"type": "permission", "permission_type": "admin"},
            {"type": "regex", "pattern": "^hi$"}
        ]"#;

        let filters: Vec<FilterEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(filters.len(), 4);
        assert_eq!(
            filters[2],
            FilterEntry::Permission {
                permission_type: PermissionType::Admin
            }
        );
        assert_eq!(filters[3], FilterEntry::Other);
    }

    #[test]
    fn unknown_permission_tier_is_member() {
        let filter: FilterEntry =
            serde_json::from_str(r#"{"type": "permission", "permission_type": "owner"}"#).unwrap();
        assert_eq!(
            filter,
            FilterEntry::Permission {
                permission_type: PermissionType::Member
            }
        );
    }

    #[test]
    fn blank_native_display_name_is_ignored() {
        let plugin = PluginDescriptor {
            name: "weather".to_string(),
            display_name: Some("   ".to_string()),
            module_path: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(plugin.native_display_name(), None);
        assert_eq!(plugin.module_path(), None);
    }
}
