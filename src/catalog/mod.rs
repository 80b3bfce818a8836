//! Command catalog shown by the help command
//!
//! The catalog groups every visible command of every eligible plugin under
//! the plugin's display name. Groups keep the order in which plugins were
//! returned by the host, and commands keep handler registration order.

pub mod builder;
pub mod display_name;
pub mod permission;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use builder::{BUILTIN_PLUGIN, BuildOutcome, CatalogBuilder, EXCLUDED_PLUGINS};
pub use display_name::resolve_display_names;
pub use permission::{PermissionTier, classify, is_visible};

/// A single command as listed in the help image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEntry {
    /// Command or command group word
    pub command: String,
    /// Trimmed handler description, may be empty
    pub desc: String,
    /// Who may invoke the command
    pub permission: PermissionTier,
}

/// Commands grouped by plugin display name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    groups: IndexMap<String, Vec<CommandEntry>>,
}

impl Catalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands listed under a display name
    #[must_use]
    pub fn get(&self, display_name: &str) -> Option<&[CommandEntry]> {
        self.groups.get(display_name).map(Vec::as_slice)
    }

    /// Iterate groups in insertion order
    pub fn groups(&self) -> impl Iterator<Item = (&str, &[CommandEntry])> {
        self.groups
            .iter()
            .map(|(name, entries)| (name.as_str(), entries.as_slice()))
    }

    /// Display names in insertion order
    pub fn display_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Total number of commands across all groups
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Number of groups
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the catalog has no groups
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Append an entry to a group, creating the group on first use
    pub(crate) fn push(&mut self, display_name: &str, entry: CommandEntry) {
        self.groups
            .entry(display_name.to_string())
            .or_default()
            .push(entry);
    }
}
