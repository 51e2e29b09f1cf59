//! Batch sending: shared base merged with per-recipient requests.
//!
//! A batch submits one [`BatchBase`] of shared defaults plus up to 500
//! per-recipient override fragments in a single call. The server merges each
//! fragment over the base, so the fragments usually carry only `to`/`cc`/
//! `bcc` and variable overrides. Partial failure is data, not an error:
//! inspect [`BatchResponseEntry::success`] per recipient.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::client::BULK_SENDING_API_HOST;
use crate::{Address, Attachment, Client, Error, Mail, Result, validate};

/// Hard cap on requests per batch call, enforced before the request is made.
pub const MAX_BATCH_REQUESTS: usize = 500;

/// Shared defaults applied to every message in a batch.
///
/// The same shape as [`Mail`] minus the per-recipient fields: recipients
/// exist only on the individual requests. The sender address is required and
/// validated at construction.
#[derive(Debug, Clone, Serialize)]
pub struct BatchBase {
    pub from: Address,
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

impl BatchBase {
    /// Creates a base with the given sender. Fails when the sender email is
    /// not a valid address.
    pub fn new(from: Address) -> Result<Self> {
        validate::assert_email(&from.email, "from[:email]")?;

        Ok(Self {
            from,
            reply_to: None,
            subject: None,
            text: None,
            html: None,
            category: None,
            attachments: Vec::new(),
            headers: BTreeMap::new(),
            custom_variables: Map::new(),
            template_uuid: None,
            template_variables: Map::new(),
        })
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

    /// Adds a custom variable.
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

    /// Appends an attachment.
    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}

/// Anything usable as a batch base: a [`BatchBase`], a [`Mail`] (recipients
/// dropped), or a raw JSON object.
///
/// Resolved into a plain JSON map once at the start of
/// [`BatchSender::send_emails`]; nothing downstream branches on the original
/// form again.
#[derive(Debug, Clone)]
pub enum BaseInput {
    Base(BatchBase),
    Mail(Mail),
    Json(Value),
}

impl From<BatchBase> for BaseInput {
    fn from(base: BatchBase) -> Self {
        Self::Base(base)
    }
}

impl From<Mail> for BaseInput {
    fn from(mail: Mail) -> Self {
        Self::Mail(mail)
    }
}

impl From<Value> for BaseInput {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<Map<String, Value>> for BaseInput {
    fn from(map: Map<String, Value>) -> Self {
        Self::Json(Value::Object(map))
    }
}

impl BaseInput {
    fn resolve(self) -> Result<Map<String, Value>> {
        let value = match self {
            Self::Base(base) => serde_json::to_value(&base)?,
            Self::Mail(mail) => serde_json::to_value(&mail)?,
            Self::Json(value) => value,
        };

        match value {
            Value::Object(mut map) => {
                // Recipients are per-request only.
                for field in ["to", "cc", "bcc"] {
                    map.remove(field);
                }
                Ok(map)
            }
            _ => Err(Error::InvalidArgument(
                "expected a serializable base object".into(),
            )),
        }
    }
}

/// One entry of a batch response, in the same position as its request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BatchResponseEntry {
    #[serde(default)]
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub errors: Option<Vec<String>>,
}

/// The decoded batch response: one entry per request, request order
/// preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BatchResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub responses: Vec<BatchResponseEntry>,
}

/// Sends batches of emails through a bulk-configured [`Client`].
#[derive(Debug)]
pub struct BatchSender<'a> {
    client: &'a Client,
}

impl<'a> BatchSender<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Validates and submits one batch.
    ///
    /// The base is resolved to a plain map and must carry a `from` object
    /// with a valid `email`; requests must be a non-empty list of at most
    /// [`MAX_BATCH_REQUESTS`] entries, and every recipient listed under
    /// `to`/`cc`/`bcc` must have a valid `email`. All validation failures
    /// and a client not configured for bulk sending surface as
    /// [`Error::InvalidArgument`] before any request is made.
    ///
    /// A response without a `responses` array is a contract violation and
    /// raises [`Error::InvalidApiResponse`]; failed entries inside
    /// `responses` are returned as data.
    pub fn send_emails(
        &self,
        base: impl Into<BaseInput>,
        requests: Vec<Value>,
    ) -> Result<BatchResponse> {
        let base = base.into().resolve()?;
        validate_base(&base)?;
        validate_requests(&requests)?;

        if !self.client.bulk() {
            return Err(Error::InvalidArgument(format!(
                "batch sending requires a client configured for the bulk API host ({BULK_SENDING_API_HOST})"
            )));
        }

        let payload = json!({ "base": base, "requests": requests });
        let response = self.client.batch_send(&payload)?;

        let has_responses_array = response
            .get("responses")
            .is_some_and(|responses| responses.is_array());
        if !has_responses_array {
            return Err(Error::InvalidApiResponse(vec![
                "unexpected batch response format".into(),
            ]));
        }

        Ok(serde_json::from_value(response)?)
    }
}

fn validate_base(base: &Map<String, Value>) -> Result<()> {
    let from_email_valid = base
        .get("from")
        .and_then(Value::as_object)
        .and_then(|from| from.get("email"))
        .and_then(Value::as_str)
        .is_some_and(validate::valid_email);

    if from_email_valid {
        Ok(())
    } else {
        Err(Error::InvalidArgument(
            "base from[:email] must be a valid email".into(),
        ))
    }
}

fn validate_requests(requests: &[Value]) -> Result<()> {
    if requests.is_empty() {
        return Err(Error::InvalidArgument(
            "requests must be a non-empty list".into(),
        ));
    }
    if requests.len() > MAX_BATCH_REQUESTS {
        return Err(Error::InvalidArgument(format!(
            "too many messages in batch: max {MAX_BATCH_REQUESTS} allowed"
        )));
    }

    for (index, request) in requests.iter().enumerate() {
        for field in ["to", "cc", "bcc"] {
            // Anything that is not a list under a recipient key is left for
            // the server to judge.
            let Some(Value::Array(recipients)) = request.get(field) else {
                continue;
            };

            for recipient in recipients {
                if recipient.is_null() {
                    continue;
                }
                let email_valid = recipient
                    .get("email")
                    .and_then(Value::as_str)
                    .is_some_and(validate::valid_email);
                if !email_valid {
                    return Err(Error::InvalidArgument(format!(
                        "Invalid {field}[:email] in request #{}",
                        index + 1
                    )));
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_requires_valid_from() {
        let err = BatchBase::new(Address::new("bad")).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(ref msg) if msg == "Invalid from[:email]"));
    }

    #[test]
    fn base_serializes_without_recipient_fields() {
        let base = BatchBase::new(Address::new("from@example.com"))
            .unwrap()
            .subject("Test")
            .text("Hello!")
            .html("<h1>Hello</h1>");
        let json = serde_json::to_value(&base).unwrap();
        let object = json.as_object().unwrap();

        assert!(object.contains_key("from"));
        assert!(object.contains_key("subject"));
        assert!(!object.contains_key("to"));
        assert!(!object.contains_key("cc"));
        assert!(!object.contains_key("bcc"));
    }

    #[test]
    fn mail_base_input_drops_recipients() {
        let mail = Mail::from_content(Address::new("from@example.com"), "Hi")
            .to(Address::new("to@example.com"))
            .cc(Address::new("cc@example.com"));
        let resolved = BaseInput::from(mail).resolve().unwrap();

        assert!(resolved.contains_key("from"));
        assert!(!resolved.contains_key("to"));
        assert!(!resolved.contains_key("cc"));
    }

    #[test]
    fn non_object_base_is_rejected() {
        let err = BaseInput::from(json!("not an object")).resolve().unwrap_err();
        assert!(
            matches!(err, Error::InvalidArgument(ref msg) if msg == "expected a serializable base object")
        );
    }

    #[test]
    fn missing_from_fails_base_validation() {
        let base = json!({ "subject": "Hi" });
        let err = validate_base(base.as_object().unwrap()).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn empty_requests_are_rejected() {
        let err = validate_requests(&[]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(ref msg) if msg.contains("non-empty")));
    }

    #[test]
    fn over_cap_requests_are_rejected() {
        let requests: Vec<Value> = (0..=MAX_BATCH_REQUESTS)
            .map(|_| json!({ "to": [{ "email": "u@example.com" }] }))
            .collect();
        assert_eq!(requests.len(), 501);

        let err = validate_requests(&requests).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(ref msg) if msg.contains("500")));
    }

    #[test]
    fn exactly_cap_requests_pass_validation() {
        let requests: Vec<Value> = (0..MAX_BATCH_REQUESTS)
            .map(|_| json!({ "to": [{ "email": "u@example.com" }] }))
            .collect();
        assert!(validate_requests(&requests).is_ok());
    }

    #[test]
    fn invalid_recipient_names_field_and_one_based_index() {
        let requests = vec![
            json!({ "to": [{ "email": "ok@example.com" }] }),
            json!({ "cc": [{ "email": "bad" }] }),
        ];
        let err = validate_requests(&requests).unwrap_err();
        assert!(
            matches!(err, Error::InvalidArgument(ref msg) if msg == "Invalid cc[:email] in request #2")
        );
    }

    #[test]
    fn non_array_recipient_values_are_skipped() {
        let requests = vec![json!({ "to": { "email": "scalar@example.com" } })];
        assert!(validate_requests(&requests).is_ok());
    }

    #[test]
    fn null_entries_in_recipient_lists_are_skipped() {
        let requests = vec![json!({ "to": [null, { "email": "ok@example.com" }] })];
        assert!(validate_requests(&requests).is_ok());
    }
}
