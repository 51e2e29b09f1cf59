//! # Mailtrap Client
//! Synchronous Rust client for the [Mailtrap](https://mailtrap.io) email delivery platform, covering transactional and bulk sending, sandbox testing, and the account management resources (contacts, templates, suppressions, projects) through [`Client`] and [`ClientBuilder`].
//!
//! ## Audience and uses
//! For Rust applications that deliver email through Mailtrap instead of running their own SMTP infrastructure: build a [`Mail`] (literal content or a stored template referenced by UUID), send it with [`Client::send`], or fan one [`BatchBase`] out to up to 500 recipients per call with [`BatchSender`]. The `api` module wraps the account-scoped management resources.
//!
//! ## Runtime requirements
//! Blocking-only; every call performs one synchronous HTTPS request via `reqwest` and returns before yielding control. Do not call from inside an async runtime — spawn onto a blocking-capable thread instead. A `Client` holds one connection pool; construct one per thread or synchronize access externally.
//!
//! ## Out of scope
//! No retry or backoff (a [`Error::RateLimit`] is surfaced, not retried), no persistence, no background delivery queue. Rate limiting, suppression handling, and template rendering are all server-side concerns.
//!
//! ## Errors
//! Invalid input fails fast as [`Error::InvalidArgument`] or [`Error::AttachmentContent`] before any network call. HTTP failures are classified once at the response boundary into [`Error::Authorization`], [`Error::Rejection`], [`Error::MailSize`], [`Error::RateLimit`], or the generic [`Error::Api`]; all carry the server's error messages as a list. The crate-wide [`Result`] alias wraps these errors.
//!
//! ## Example
//! ```no_run
//! use mailtrap::{Address, Client, Mail};
//!
//! fn main() -> Result<(), mailtrap::Error> {
//!     let client = Client::from_env()?;
//!     let mail = Mail::from_content(
//!         Address::with_name("sender@example.com", "Mailtrap Test"),
//!         "You are awesome!",
//!     )
//!     .to(Address::new("recipient@example.com"))
//!     .text("Congrats for sending a test email with Mailtrap!")
//!     .category("Integration Test");
//!
//!     let response = client.send(&mail)?;
//!     println!("Sent: {:?}", response.message_ids);
//!     Ok(())
//! }
//! ```

pub mod api;
mod attachment;
mod batch;
mod client;
mod error;
mod mail;
pub mod validate;

pub use attachment::{Attachment, Disposition};
pub use batch::{
    BaseInput, BatchBase, BatchResponse, BatchResponseEntry, BatchSender, MAX_BATCH_REQUESTS,
};
pub use client::{
    BULK_SENDING_API_HOST, Client, ClientBuilder, GENERAL_API_HOST, SANDBOX_API_HOST,
    SENDING_API_HOST, SendResponse,
};
pub use error::Error;
pub use mail::{Address, Mail};

/// Result type alias for Mailtrap operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
