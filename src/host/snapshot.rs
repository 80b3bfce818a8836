//! JSON snapshot of a host's plugin and handler registries
//!
//! Lets the catalog be built outside a running host, e.g. from the CLI or in
//! tests. The file has two arrays, `plugins` and `handlers`.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{HandlerDescriptor, Plugin, PluginDescriptor, PluginRegistry};
use crate::Result;

/// Plugin entry as it appears in a snapshot file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginRecord {
    /// Internal plugin name
    #[serde(default)]
    pub name: String,
    /// Display name declared by the plugin
    #[serde(default)]
    pub display_name: Option<String>,
    /// Module path handlers are registered under
    #[serde(default)]
    pub module_path: Option<String>,
    /// Whether the plugin is activated
    #[serde(default)]
    pub activated: bool,
    /// Whether the host had a loaded instance for the plugin
    #[serde(default = "default_true")]
    pub loaded: bool,
    /// Plugin version
    #[serde(default)]
    pub version: String,
}

fn default_true() -> bool {
    true
}

/// Stand-in instance for a plugin that was loaded when the snapshot was taken
#[derive(Debug)]
struct SnapshotPlugin {
    name: String,
    version: String,
}

impl Plugin for SnapshotPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        &self.version
    }
}

impl From<PluginRecord> for PluginDescriptor {
    fn from(record: PluginRecord) -> Self {
        let instance = record.loaded.then(|| {
            Arc::new(SnapshotPlugin {
                name: record.name.clone(),
                version: record.version,
            }) as Arc<dyn Plugin>
        });

        Self {
            name: record.name,
            display_name: record.display_name,
            module_path: record.module_path,
            activated: record.activated,
            instance,
        }
    }
}

/// Captured state of a host's registries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostSnapshot {
    /// Every plugin known to the host
    #[serde(default)]
    pub plugins: Vec<PluginRecord>,
    /// Global handler registry in registration order
    #[serde(default)]
    pub handlers: Vec<HandlerDescriptor>,
}

impl HostSnapshot {
    /// Load a snapshot from a JSON file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or is not a valid snapshot
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let snapshot: Self = serde_json::from_str(&content)?;

        tracing::debug!(
            path = %path.display(),
            plugins = snapshot.plugins.len(),
            handlers = snapshot.handlers.len(),
            "loaded host snapshot"
        );

        Ok(snapshot)
    }

    /// Handler registry captured in the snapshot
    #[must_use]
    pub fn handlers(&self) -> &[HandlerDescriptor] {
        &self.handlers
    }
}

impl PluginRegistry for HostSnapshot {
    fn all_plugins(&self) -> Result<Vec<PluginDescriptor>> {
        Ok(self
            .plugins
            .iter()
            .cloned()
            .map(PluginDescriptor::from)
            .collect())
    }
}
