//! Plugin Help - command catalog and help image for bot plugin hosts
//!
//! This library provides the pieces behind a `helps` chat command:
//! - Discovery of the commands exposed by every activated plugin
//! - Permission classification and visibility policy
//! - Display name overrides and per-group deduplication
//! - Rendering the catalog into a single help image
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                  Host application                 │
//! │   Plugin registry   │   Handler registry          │
//! └──────────┬──────────────────────┬────────────────┘
//!            │                      │
//! ┌──────────▼──────────────────────▼────────────────┐
//! │                  CatalogBuilder                   │
//! │  Display names │ Permissions │ Visibility │ Dedup │
//! └──────────────────────┬───────────────────────────┘
//!                        │ Catalog
//! ┌──────────────────────▼───────────────────────────┐
//! │                   HelpRenderer                    │
//! └──────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod command;
pub mod config;
pub mod error;
pub mod host;
pub mod message;
pub mod render;

pub use catalog::{BuildOutcome, Catalog, CatalogBuilder, CommandEntry, PermissionTier};
pub use command::{HelpCommand, HelpReply};
pub use config::{CatalogConfig, Config, RenderConfig};
pub use error::{Error, Result};
pub use host::{
    FilterEntry, HandlerDescriptor, HostSnapshot, PermissionType, Plugin, PluginDescriptor,
    PluginRegistry,
};
pub use message::{Attachment, AttachmentKind};
pub use render::{HelpRenderer, RenderedImage, SvgRenderer};
