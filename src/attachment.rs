//! Mail attachment model.

use std::io::Read;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// How the recipient's mail client should present an attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Disposition {
    /// A regular downloadable attachment.
    Attachment,
    /// Displayed inside the message body, referenced by content id.
    Inline,
}

/// A single mail attachment.
///
/// The stored `content` is always valid base64. Construct from an existing
/// base64 string with [`Attachment::new`] (validated), from raw bytes with
/// [`Attachment::from_bytes`], or by draining a reader with
/// [`Attachment::from_reader`]. Once constructed the content cannot change;
/// build a new attachment to replace it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    content: String,
    /// File name shown to the recipient.
    pub filename: String,
    /// MIME type, e.g. `text/plain` or `image/png`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disposition: Option<Disposition>,
    /// Content id referenced from HTML bodies for inline attachments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_id: Option<String>,
}

impl Attachment {
    /// Creates an attachment from content that is already base64-encoded.
    ///
    /// The content is checked by decoding and re-encoding it; anything that
    /// does not round-trip exactly is rejected with
    /// [`Error::AttachmentContent`].
    pub fn new(content: impl Into<String>, filename: impl Into<String>) -> Result<Self> {
        let content = content.into();
        if !is_base64(&content) {
            return Err(Error::AttachmentContent);
        }

        Ok(Self {
            content,
            filename: filename.into(),
            mime_type: None,
            disposition: None,
            content_id: None,
        })
    }

    /// Creates an attachment by base64-encoding raw bytes.
    pub fn from_bytes(bytes: impl AsRef<[u8]>, filename: impl Into<String>) -> Self {
        Self {
            content: STANDARD.encode(bytes),
            filename: filename.into(),
            mime_type: None,
            disposition: None,
            content_id: None,
        }
    }

    /// Creates an attachment by reading a stream to exhaustion and
    /// base64-encoding everything read. The encoded form never contains
    /// embedded newlines.
    pub fn from_reader(mut reader: impl Read, filename: impl Into<String>) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(Self::from_bytes(bytes, filename))
    }

    /// Sets the MIME type.
    pub fn mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Sets the disposition.
    pub fn disposition(mut self, disposition: Disposition) -> Self {
        self.disposition = Some(disposition);
        self
    }

    /// Sets the content id.
    pub fn content_id(mut self, content_id: impl Into<String>) -> Self {
        self.content_id = Some(content_id.into());
        self
    }

    /// The base64-encoded content.
    pub fn content(&self) -> &str {
        &self.content
    }
}

fn is_base64(content: &str) -> bool {
    STANDARD
        .decode(content)
        .is_ok_and(|bytes| STANDARD.encode(bytes) == content)
}
