//! The `helps` chat command
//!
//! Builds the catalog for the current host state and replies with either a
//! plain-text notice or a single rendered help image.

use std::sync::Arc;

use crate::catalog::{Catalog, CatalogBuilder};
use crate::config::Config;
use crate::host::{HandlerDescriptor, PluginRegistry};
use crate::message::Attachment;
use crate::render::{HelpRenderer, SvgRenderer};
use crate::{Error, Result};

/// Primary trigger word
pub const HELP_COMMAND: &str = "helps";

/// Alternative trigger words
pub const HELP_ALIASES: [&str; 5] = ["帮助", "菜单", "功能", "幫助", "菜單"];

/// Reply sent when no plugin exposes a visible command
pub const NO_COMMANDS_REPLY: &str = "No plugins or commands found";

/// Reply to a help request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpReply {
    /// Plain-text message
    Text(String),
    /// Rendered help image
    Image(Attachment),
}

/// Help command bound to a configuration and a renderer
#[derive(Clone)]
pub struct HelpCommand {
    config: Arc<Config>,
    renderer: Arc<dyn HelpRenderer>,
}

impl HelpCommand {
    /// Create a help command with a custom renderer
    #[must_use]
    pub fn new(config: Config, renderer: Arc<dyn HelpRenderer>) -> Self {
        Self {
            config: Arc::new(config),
            renderer,
        }
    }

    /// Create a help command that renders SVG images
    #[must_use]
    pub fn with_svg_renderer(config: Config) -> Self {
        let renderer = Arc::new(SvgRenderer::new(config.render.clone()));
        Self::new(config, renderer)
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether a message invokes the help command
    ///
    /// Looks at the first word only; a single leading `/` is ignored.
    #[must_use]
    pub fn matches(text: &str) -> bool {
        let Some(word) = text.split_whitespace().next() else {
            return false;
        };
        let word = word.strip_prefix('/').unwrap_or(word);

        word == HELP_COMMAND || HELP_ALIASES.contains(&word)
    }

    /// Build the catalog for the current host state
    #[must_use]
    pub fn catalog<R: PluginRegistry + ?Sized>(
        &self,
        registry: &R,
        handlers: &[HandlerDescriptor],
    ) -> Catalog {
        CatalogBuilder::new(registry, handlers, &self.config.catalog).build()
    }

    /// Handle a help request
    ///
    /// # Errors
    ///
    /// Returns the renderer's error unchanged if the image cannot be produced
    pub async fn respond<R: PluginRegistry + ?Sized>(
        &self,
        registry: &R,
        handlers: &[HandlerDescriptor],
    ) -> Result<HelpReply> {
        let catalog = self.catalog(registry, handlers);
        if catalog.is_empty() {
            return Ok(HelpReply::Text(NO_COMMANDS_REPLY.to_string()));
        }

        let renderer = Arc::clone(&self.renderer);
        let image = tokio::task::spawn_blocking(move || renderer.render(&catalog))
            .await
            .map_err(|e| Error::Render(format!("render task failed: {e}")))??;

        let filename = image.filename();
        Ok(HelpReply::Image(Attachment::from_data(
            image.data,
            image.mime_type,
            Some(filename),
        )))
    }
}

impl std::fmt::Debug for HelpCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HelpCommand")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
