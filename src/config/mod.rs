//! Configuration management for the help plugin

pub mod file;

use std::path::Path;

use serde_json::Value;

use crate::Result;
use file::HelpConfigFile;

/// Help plugin configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Catalog visibility settings
    pub catalog: CatalogConfig,

    /// Help image settings
    pub render: RenderConfig,
}

/// Settings that decide which commands make it into the catalog
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// List admin-only commands too
    pub show_all_cmds: bool,

    /// List the builtin commands group
    pub show_builtin_cmds: bool,

    /// Raw `plugin:alias` override list
    pub plugin_display_names: Value,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            show_all_cmds: false,
            show_builtin_cmds: true,
            plugin_display_names: Value::Array(Vec::new()),
        }
    }
}

/// Help image settings
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Title drawn at the top of the image
    pub title: String,

    /// Image width in pixels
    pub width: u32,

    /// Draw a permission badge next to each command
    pub show_permission: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            title: "Command Help".to_string(),
            width: 800,
            show_permission: true,
        }
    }
}

/// Smallest width the image layout can work with
const MIN_WIDTH: u32 = 320;

impl Config {
    /// Load configuration from the standard config file and environment
    #[must_use]
    pub fn load() -> Self {
        let fc = file::load_config_file();
        Self::resolve(fc, |key| std::env::var(key).ok())
    }

    /// Load configuration from an explicit config file and environment
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed
    pub fn load_from(path: &Path) -> Result<Self> {
        let fc = file::read_config_file(path)?;
        tracing::info!(path = %path.display(), "loaded config file");
        Ok(Self::resolve(fc, |key| std::env::var(key).ok()))
    }

    /// Merge a parsed config file with environment overrides (env > toml > default)
    #[must_use]
    pub fn resolve(fc: HelpConfigFile, env: impl Fn(&str) -> Option<String>) -> Self {
        let catalog_default = CatalogConfig::default();
        let render_default = RenderConfig::default();

        let catalog = CatalogConfig {
            show_all_cmds: env("PLUGIN_HELP_SHOW_ALL_CMDS")
                .map(|v| parse_flag(&v))
                .or(fc.show_all_cmds)
                .unwrap_or(catalog_default.show_all_cmds),
            show_builtin_cmds: env("PLUGIN_HELP_SHOW_BUILTIN_CMDS")
                .map(|v| parse_flag(&v))
                .or(fc.show_builtin_cmds)
                .unwrap_or(catalog_default.show_builtin_cmds),
            plugin_display_names: env("PLUGIN_HELP_DISPLAY_NAMES")
                .map(|s| {
                    Value::Array(
                        s.split(',')
                            .map(str::trim)
                            .filter(|entry| !entry.is_empty())
                            .map(|entry| Value::String(entry.to_string()))
                            .collect(),
                    )
                })
                .or(fc.plugin_display_names)
                .unwrap_or(catalog_default.plugin_display_names),
        };

        let width = fc.render.width.unwrap_or(render_default.width);
        if width < MIN_WIDTH {
            tracing::warn!(width, min = MIN_WIDTH, "render width too small, clamping");
        }

        let render = RenderConfig {
            title: env("PLUGIN_HELP_TITLE")
                .or(fc.render.title)
                .unwrap_or(render_default.title),
            width: width.max(MIN_WIDTH),
            show_permission: fc
                .render
                .show_permission
                .unwrap_or(render_default.show_permission),
        };

        Self { catalog, render }
    }
}

fn parse_flag(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
