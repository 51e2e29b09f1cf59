//! Email address validation.
//!
//! Deliberately loose: an address is accepted when it contains an `@`.
//! Full RFC validation is the server's job, and rejecting more here would
//! only desynchronize the client from whatever the API accepts.

use crate::{Error, Result};

/// Returns `true` when `email` looks like an email address.
pub fn valid_email(email: &str) -> bool {
    email.contains('@')
}

/// Validates `email`, naming `field` in the error on failure.
pub fn assert_email(email: &str, field: &str) -> Result<()> {
    if valid_email(email) {
        Ok(())
    } else {
        Err(Error::InvalidArgument(format!("Invalid {field}")))
    }
}
