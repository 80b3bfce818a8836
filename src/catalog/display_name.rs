//! Display name overrides from `plugin_display_names`

use std::collections::HashMap;

use serde_json::Value;

/// Parse `plugin:alias` entries into an override map
///
/// Anything other than a list yields an empty map. Entries that are not
/// strings, lack a `:`, or have an empty side after trimming are skipped.
/// Later entries overwrite earlier ones for the same plugin.
#[must_use]
pub fn resolve_display_names(configured: &Value) -> HashMap<String, String> {
    let Some(entries) = configured.as_array() else {
        return HashMap::new();
    };

    entries
        .iter()
        .filter_map(Value::as_str)
        .filter_map(parse_entry)
        .collect()
}

fn parse_entry(raw: &str) -> Option<(String, String)> {
    let (plugin, alias) = raw.split_once(':')?;
    let (plugin, alias) = (plugin.trim(), alias.trim());

    if plugin.is_empty() || alias.is_empty() {
        return None;
    }

    Some((plugin.to_string(), alias.to_string()))
}
