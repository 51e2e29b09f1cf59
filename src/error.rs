//! Error types for the Mailtrap client.

use std::io;

/// Errors returned by Mailtrap operations.
///
/// Every error produced from an HTTP response carries the server's error
/// messages as a list; [`Error::messages`] exposes that list uniformly and
/// the `Display` output is the comma-joined form. Validation errors
/// ([`Error::InvalidArgument`], [`Error::AttachmentContent`]) are raised
/// before any network call is made.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Structurally invalid input: a malformed email address, an oversized
    /// batch, conflicting client flags, and so on. Signals a programming
    /// error on the caller's side; never worth retrying.
    #[error("{0}")]
    InvalidArgument(String),

    /// Attachment content was given as a string that is not valid base64.
    #[error("attachment content must be valid base64")]
    AttachmentContent,

    /// The server rejected the API key (HTTP 401).
    #[error("{}", .0.join(", "))]
    Authorization(Vec<String>),

    /// The server refused to process the request (HTTP 403), for example a
    /// banned account or an unverified sending domain.
    #[error("{}", .0.join(", "))]
    Rejection(Vec<String>),

    /// The message payload is too large (HTTP 413).
    #[error("{}", .0.join(", "))]
    MailSize(Vec<String>),

    /// Too many requests (HTTP 429). The client never retries on its own;
    /// back off and retry at the call site if appropriate.
    #[error("{}", .0.join(", "))]
    RateLimit(Vec<String>),

    /// Any other client or server error status, including unexpected ones
    /// such as redirects.
    #[error("{}", .0.join(", "))]
    Api(Vec<String>),

    /// The response body does not match the shape the endpoint contract
    /// promises (for batch sending, a missing `responses` array).
    #[error("{}", .0.join(", "))]
    InvalidApiResponse(Vec<String>),

    /// The HTTP request itself failed (connection, TLS, timeout).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// A response body could not be decoded as JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Reading attachment content from a stream failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// The individual error messages.
    ///
    /// HTTP-classified variants return the server-provided list; all other
    /// variants return their display form as a single-element list.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Authorization(messages)
            | Self::Rejection(messages)
            | Self::MailSize(messages)
            | Self::RateLimit(messages)
            | Self::Api(messages)
            | Self::InvalidApiResponse(messages) => messages.clone(),
            other => vec![other.to_string()],
        }
    }
}
