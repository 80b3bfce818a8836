//! Help image rendering
//!
//! The catalog is handed to a [`HelpRenderer`] which turns it into image
//! bytes. Rendering errors are returned as-is to the caller.

mod svg;

pub use svg::SvgRenderer;

use crate::Result;
use crate::catalog::Catalog;

/// Encoded help image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    /// Encoded image bytes
    pub data: Vec<u8>,

    /// MIME type of `data`
    pub mime_type: String,
}

impl RenderedImage {
    /// File extension matching the MIME type
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/svg+xml" => "svg",
            "image/png" => "png",
            "image/jpeg" => "jpg",
            _ => "bin",
        }
    }

    /// Suggested filename for attachments
    #[must_use]
    pub fn filename(&self) -> String {
        format!("help.{}", self.extension())
    }
}

/// Turns a command catalog into a single image
pub trait HelpRenderer: Send + Sync {
    /// Render the catalog
    ///
    /// # Errors
    ///
    /// Returns error if the image cannot be produced
    fn render(&self, catalog: &Catalog) -> Result<RenderedImage>;
}
