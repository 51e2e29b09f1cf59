//! Mail message model.
//!
//! [`Mail`] is the payload for [`Client::send`](crate::Client::send). All
//! fields are optional at the type level; the server enforces which
//! combinations are acceptable (subject + text/html body, or a template
//! referenced by UUID). Serialization produces the sparse wire object the
//! API expects: unset optional fields are omitted entirely.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Attachment, Result};

/// An email address with an optional display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
}

impl Address {
    /// An address without a display name.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
        }
    }

    /// An address with a display name.
    pub fn with_name(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: Some(name.into()),
        }
    }
}

/// An email message.
///
/// Build with the chained setters and hand the result to
/// [`Client::send`](crate::Client::send):
///
/// ```
/// use mailtrap::{Address, Mail};
///
/// let mail = Mail::from_content(Address::new("sender@example.com"), "Hello")
///     .to(Address::new("recipient@example.com"))
///     .text("Congrats for sending a test email!");
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct Mail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    pub to: Vec<Address>,
    pub cc: Vec<Address>,
    pub bcc: Vec<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub attachments: Vec<Attachment>,
    pub headers: BTreeMap<String, String>,
    pub custom_variables: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_uuid: Option<String>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub template_variables: Map<String, Value>,
}

impl Mail {
    /// An empty message; fill it in with the chained setters.
    pub fn new() -> Self {
        Self::default()
    }

    /// A message with literal content: sender plus subject, body set via
    /// [`Mail::text`] / [`Mail::html`].
    pub fn from_content(from: Address, subject: impl Into<String>) -> Self {
        Self::new().from(from).subject(subject)
    }

    /// A message rendered server-side from a stored template.
    pub fn from_template(from: Address, template_uuid: impl Into<String>) -> Self {
        Self::new().from(from).template_uuid(template_uuid)
    }

    /// Sets the sender.
    pub fn from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    /// Adds a primary recipient.
    pub fn to(mut self, address: Address) -> Self {
        self.to.push(address);
        self
    }

    /// Adds a CC recipient.
    pub fn cc(mut self, address: Address) -> Self {
        self.cc.push(address);
        self
    }

    /// Adds a BCC recipient.
    pub fn bcc(mut self, address: Address) -> Self {
        self.bcc.push(address);
        self
    }

    /// Sets the reply-to address.
    pub fn reply_to(mut self, address: Address) -> Self {
        self.reply_to = Some(address);
        self
    }

    /// Sets the subject line.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Sets the plain text body.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the HTML body.
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    /// Sets the category used for sending statistics.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Adds a custom message header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Adds a custom variable, visible in webhooks but not sent with the
    /// message.
    pub fn custom_variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.custom_variables.insert(name.into(), value.into());
        self
    }

    /// Sets the UUID of a server-stored template.
    pub fn template_uuid(mut self, template_uuid: impl Into<String>) -> Self {
        self.template_uuid = Some(template_uuid.into());
        self
    }

    /// Adds a variable substituted into the template.
    pub fn template_variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.template_variables.insert(name.into(), value.into());
        self
    }

    /// Appends an already-constructed attachment.
    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Replaces the attachment list.
    pub fn attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }

    /// Constructs an attachment from base64 content and appends it,
    /// returning a reference to the created attachment. Fails fast on
    /// content that is not valid base64.
    pub fn add_attachment(
        &mut self,
        content: impl Into<String>,
        filename: impl Into<String>,
    ) -> Result<&Attachment> {
        let attachment = Attachment::new(content, filename)?;
        self.attachments.push(attachment);
        let index = self.attachments.len() - 1;
        Ok(&self.attachments[index])
    }
}
