//! Outgoing message attachments

/// Type of attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    /// Image file (PNG, SVG, etc.)
    Image,
    /// Generic file
    File,
}

impl AttachmentKind {
    /// Determine attachment kind from MIME type
    #[must_use]
    pub fn from_mime(mime_type: &str) -> Self {
        if mime_type.to_lowercase().starts_with("image/") {
            Self::Image
        } else {
            Self::File
        }
    }
}

/// A binary attachment on a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Type of attachment
    pub kind: AttachmentKind,

    /// Raw attachment data
    pub data: Vec<u8>,

    /// MIME type
    pub mime_type: String,

    /// Suggested filename
    pub filename: Option<String>,
}

impl Attachment {
    /// Create an attachment from inline data
    #[must_use]
    pub fn from_data(data: Vec<u8>, mime_type: String, filename: Option<String>) -> Self {
        Self {
            kind: AttachmentKind::from_mime(&mime_type),
            data,
            mime_type,
            filename,
        }
    }
}
