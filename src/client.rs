//! Mailtrap HTTP client implementation.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::batch::{BaseInput, BatchResponse, BatchSender};
use crate::{Error, Mail, Result};

/// Host for transactional sending (the default).
pub const SENDING_API_HOST: &str = "send.api.mailtrap.io";
/// Host for bulk sending.
pub const BULK_SENDING_API_HOST: &str = "bulk.api.mailtrap.io";
/// Host for sandbox (testing) sending; requires an inbox id.
pub const SANDBOX_API_HOST: &str = "sandbox.api.mailtrap.io";
/// Host for the management resources (contacts, templates, suppressions,
/// projects), independent of the sending mode.
pub const GENERAL_API_HOST: &str = "mailtrap.io";

const API_PORT: u16 = 443;
const USER_AGENT_VALUE: &str = concat!(
    "mailtrap-rust/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/railsware/mailtrap-rust)"
);

/// Response to a successful send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendResponse {
    pub success: bool,
    /// One id per accepted message. The bulk and sandbox streams may omit
    /// this.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message_ids: Option<Vec<String>>,
}

/// Synchronous client for the Mailtrap API.
///
/// Every operation performs one blocking HTTPS request and returns (or
/// fails) before handing control back; there is no retry logic anywhere.
/// The underlying connection is reused for the lifetime of the instance.
/// Construct one `Client` per thread, or synchronize access externally.
///
/// Use [`Client::new`] with an API key for defaults or [`Client::builder`]
/// for bulk/sandbox modes and host overrides.
#[derive(Debug)]
pub struct Client {
    http: reqwest::blocking::Client,
    auth_header: HeaderValue,
    api_host: String,
    api_port: u16,
    general_api_host: String,
    bulk: bool,
    sandbox: bool,
    inbox_id: Option<u64>,
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a transactional-sending client with default settings.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new().api_key(api_key).build()
    }

    /// Create a client with the API key taken from the `MAILTRAP_API_KEY`
    /// environment variable.
    ///
    /// This is the only place the client reads the environment; the
    /// builder itself takes explicit parameters.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("MAILTRAP_API_KEY")
            .map_err(|_| Error::InvalidArgument("MAILTRAP_API_KEY is not set".into()))?;
        ClientBuilder::new().api_key(api_key).build()
    }

    /// The host used for send and batch calls.
    pub fn api_host(&self) -> &str {
        &self.api_host
    }

    /// The port used for send and batch calls.
    pub fn api_port(&self) -> u16 {
        self.api_port
    }

    /// Whether this client sends through the bulk stream.
    pub fn bulk(&self) -> bool {
        self.bulk
    }

    /// Whether this client sends into a sandbox inbox.
    pub fn sandbox(&self) -> bool {
        self.sandbox
    }

    /// The sandbox inbox id, when configured.
    pub fn inbox_id(&self) -> Option<u64> {
        self.inbox_id
    }

    /// Send a single email.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailtrap::{Address, Client, Mail};
    /// # fn main() -> Result<(), mailtrap::Error> {
    /// let client = Client::new("api-key")?;
    /// let mail = Mail::from_content(Address::new("sender@example.com"), "Hello")
    ///     .to(Address::new("recipient@example.com"))
    ///     .text("Hello from Mailtrap!");
    /// let response = client.send(&mail)?;
    /// println!("{:?}", response.message_ids);
    /// # Ok(())
    /// # }
    /// ```
    pub fn send(&self, mail: &Mail) -> Result<SendResponse> {
        let url = format!("{}{}", self.send_base_url(), self.send_path());
        let body = serde_json::to_value(mail)?;
        let response = self
            .execute(Method::POST, &url, Some(&body), &[])?
            .ok_or_else(|| Error::InvalidApiResponse(vec!["empty send response body".into()]))?;

        Ok(serde_json::from_value(response)?)
    }

    /// Validate and send a batch of emails: shared `base` fields merged
    /// server-side with one request fragment per recipient.
    ///
    /// Requires a client built with `bulk(true)`. Equivalent to
    /// [`BatchSender::send_emails`].
    pub fn send_batch(
        &self,
        base: impl Into<BaseInput>,
        requests: Vec<Value>,
    ) -> Result<BatchResponse> {
        BatchSender::new(self).send_emails(base, requests)
    }

    /// Raw call to the batch endpoint on the configured sending host.
    ///
    /// No payload validation is applied; prefer [`Client::send_batch`].
    /// An empty response body decodes to `Value::Null`.
    pub fn batch_send(&self, payload: &Value) -> Result<Value> {
        let url = format!("{}{}", self.send_base_url(), self.batch_path());
        Ok(self
            .execute(Method::POST, &url, Some(payload), &[])?
            .unwrap_or(Value::Null))
    }

    /// GET a management resource. `None` on an empty (204) response.
    pub fn get(&self, path: &str) -> Result<Option<Value>> {
        self.general_request(Method::GET, path, None, &[])
    }

    /// GET a management resource with query parameters.
    pub fn get_with_params(&self, path: &str, params: &[(&str, &str)]) -> Result<Option<Value>> {
        self.general_request(Method::GET, path, None, params)
    }

    /// POST to a management resource.
    pub fn post(&self, path: &str, body: &Value) -> Result<Option<Value>> {
        self.general_request(Method::POST, path, Some(body), &[])
    }

    /// PATCH a management resource.
    pub fn patch(&self, path: &str, body: &Value) -> Result<Option<Value>> {
        self.general_request(Method::PATCH, path, Some(body), &[])
    }

    /// DELETE a management resource.
    pub fn delete(&self, path: &str) -> Result<Option<Value>> {
        self.general_request(Method::DELETE, path, None, &[])
    }

    /// Management calls always target the general API host, regardless of
    /// which sending host the client was configured with.
    fn general_request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        query: &[(&str, &str)],
    ) -> Result<Option<Value>> {
        let url = format!("{}{}", base_url(&self.general_api_host, API_PORT), path);
        self.execute(method, &url, body, query)
    }

    fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        query: &[(&str, &str)],
    ) -> Result<Option<Value>> {
        debug!(%method, url, "mailtrap api request");

        let mut request = self.http.request(method, url).headers(self.headers());
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        Self::handle_response(request.send()?)
    }

    /// The single point where HTTP statuses become typed results.
    fn handle_response(response: reqwest::blocking::Response) -> Result<Option<Value>> {
        let status = response.status();
        let body = response.text()?;

        if status.is_success() {
            if status == StatusCode::NO_CONTENT || body.is_empty() {
                return Ok(None);
            }
            return Ok(Some(serde_json::from_str(&body)?));
        }

        warn!(status = status.as_u16(), body = %body, "mailtrap api request failed");
        Err(classify_status(status, &body))
    }

    fn send_path(&self) -> String {
        match (self.sandbox, self.inbox_id) {
            (true, Some(inbox_id)) => format!("/api/send/{inbox_id}"),
            _ => "/api/send".to_string(),
        }
    }

    fn batch_path(&self) -> String {
        match (self.sandbox, self.inbox_id) {
            (true, Some(inbox_id)) => format!("/api/batch/{inbox_id}"),
            _ => "/api/batch".to_string(),
        }
    }

    fn send_base_url(&self) -> String {
        base_url(&self.api_host, self.api_port)
    }

    /// Headers attached to every request.
    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.auth_header.clone());
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers
    }
}

/// A host override containing `://` is taken verbatim (useful for pointing
/// tests at a local server); a bare hostname becomes an HTTPS origin.
fn base_url(host: &str, port: u16) -> String {
    if host.contains("://") {
        host.trim_end_matches('/').to_string()
    } else if port == 443 {
        format!("https://{host}")
    } else {
        format!("https://{host}:{port}")
    }
}

fn classify_status(status: StatusCode, body: &str) -> Error {
    match status.as_u16() {
        400 => Error::Api(error_messages(body, "bad request")),
        401 => Error::Authorization(error_messages(body, "unauthorized")),
        403 => Error::Rejection(error_messages(body, "rejected")),
        413 => Error::MailSize(vec!["message too large".into()]),
        429 => Error::RateLimit(vec!["too many requests".into()]),
        code if (400..500).contains(&code) => {
            let mut messages = vec!["client error".to_string()];
            if !body.is_empty() {
                messages.push(body.to_string());
            }
            Error::Api(messages)
        }
        code if (500..600).contains(&code) => Error::Api(vec!["server error".into()]),
        code => Error::Api(vec![format!("unexpected status code={code}")]),
    }
}

/// Pulls messages out of an error body: an `errors` array or string, an
/// `error` string, the raw body, or the given fallback, in that order.
fn error_messages(body: &str, fallback: &str) -> Vec<String> {
    if body.is_empty() {
        return vec![fallback.to_string()];
    }

    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return vec![body.to_string()];
    };

    match value.get("errors") {
        Some(Value::Array(items)) => {
            return items
                .iter()
                .map(|item| match item {
                    Value::String(message) => message.clone(),
                    other => other.to_string(),
                })
                .collect();
        }
        Some(Value::String(message)) => return vec![message.clone()],
        _ => {}
    }

    if let Some(Value::String(message)) = value.get("error") {
        return vec![message.clone()];
    }

    vec![fallback.to_string()]
}

/// Builder for configuring a Mailtrap client.
///
/// Start with [`Client::builder`]. The sending host is derived from the
/// `bulk`/`sandbox` flags unless `api_host` overrides it.
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    api_key: Option<String>,
    api_host: Option<String>,
    api_port: Option<u16>,
    general_api_host: Option<String>,
    bulk: bool,
    sandbox: bool,
    inbox_id: Option<u64>,
}

impl ClientBuilder {
    /// Create a new builder with default settings: transactional sending
    /// host, port 443.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API key (required).
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the sending host chosen by the `bulk`/`sandbox` flags.
    pub fn api_host(mut self, api_host: impl Into<String>) -> Self {
        self.api_host = Some(api_host.into());
        self
    }

    /// Override the sending port (default: 443).
    pub fn api_port(mut self, api_port: u16) -> Self {
        self.api_port = Some(api_port);
        self
    }

    /// Override the management host (default: `mailtrap.io`).
    pub fn general_api_host(mut self, general_api_host: impl Into<String>) -> Self {
        self.general_api_host = Some(general_api_host.into());
        self
    }

    /// Send through the bulk stream. Mutually exclusive with `sandbox`.
    pub fn bulk(mut self, bulk: bool) -> Self {
        self.bulk = bulk;
        self
    }

    /// Send into a sandbox inbox instead of delivering. Requires
    /// [`ClientBuilder::inbox_id`].
    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// The sandbox inbox to send into.
    pub fn inbox_id(mut self, inbox_id: u64) -> Self {
        self.inbox_id = Some(inbox_id);
        self
    }

    /// Build the client, validating the configuration.
    ///
    /// Fails with [`Error::InvalidArgument`] when the API key is missing,
    /// when both `bulk` and `sandbox` are set, or when `sandbox` is set
    /// without an `inbox_id`.
    pub fn build(self) -> Result<Client> {
        let api_key = self
            .api_key
            .filter(|api_key| !api_key.is_empty())
            .ok_or_else(|| Error::InvalidArgument("api_key is required".into()))?;

        if self.bulk && self.sandbox {
            return Err(Error::InvalidArgument(
                "bulk mode is not applicable for sandbox API".into(),
            ));
        }
        if self.sandbox && self.inbox_id.is_none() {
            return Err(Error::InvalidArgument(
                "inbox_id is required for sandbox API".into(),
            ));
        }

        let auth_header = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| Error::InvalidArgument("api_key contains invalid characters".into()))?;

        let api_host = self
            .api_host
            .unwrap_or_else(|| select_api_host(self.bulk, self.sandbox).to_string());

        Ok(Client {
            http: reqwest::blocking::Client::builder().build()?,
            auth_header,
            api_host,
            api_port: self.api_port.unwrap_or(API_PORT),
            general_api_host: self
                .general_api_host
                .unwrap_or_else(|| GENERAL_API_HOST.to_string()),
            bulk: self.bulk,
            sandbox: self.sandbox,
            inbox_id: self.inbox_id,
        })
    }
}

fn select_api_host(bulk: bool, sandbox: bool) -> &'static str {
    if sandbox {
        SANDBOX_API_HOST
    } else if bulk {
        BULK_SENDING_API_HOST
    } else {
        SENDING_API_HOST
    }
}
