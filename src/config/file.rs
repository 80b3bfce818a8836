//! TOML configuration file loading
//!
//! Supports `~/.config/plugin-help/config.toml` as a persistent config source.
//! All fields are optional; the file is a partial overlay on top of defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::Result;

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
pub struct HelpConfigFile {
    /// Show admin-only commands
    pub show_all_cmds: Option<bool>,

    /// Show the builtin commands group
    pub show_builtin_cmds: Option<bool>,

    /// `plugin:alias` display name overrides, kept raw so bad shapes fail soft
    pub plugin_display_names: Option<serde_json::Value>,

    /// Help image settings
    #[serde(default)]
    pub render: RenderFileConfig,
}

/// Help image configuration
#[derive(Debug, Default, Deserialize)]
pub struct RenderFileConfig {
    /// Title drawn at the top of the image
    pub title: Option<String>,

    /// Image width in pixels
    pub width: Option<u32>,

    /// Draw a permission badge next to each command
    pub show_permission: Option<bool>,
}

/// Load the TOML config file from the standard path
///
/// Returns `HelpConfigFile::default()` if the file doesn't exist or can't be parsed.
pub fn load_config_file() -> HelpConfigFile {
    let Some(path) = config_file_path() else {
        return HelpConfigFile::default();
    };

    if !path.exists() {
        return HelpConfigFile::default();
    }

    match read_config_file(&path) {
        Ok(config) => {
            tracing::info!(path = %path.display(), "loaded config file");
            config
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to load config file, using defaults"
            );
            HelpConfigFile::default()
        }
    }
}

/// Read and parse a config file at an explicit path
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid TOML
pub fn read_config_file(path: &Path) -> Result<HelpConfigFile> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Return the config file path: `~/.config/plugin-help/config.toml`
#[must_use]
pub fn config_file_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.config_dir().join("plugin-help").join("config.toml"))
}
