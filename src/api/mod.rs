//! Account-scoped management resources: contacts, contact lists and fields,
//! bulk contact imports, email templates, suppressions, and projects.
//!
//! These are thin proxies over the generic verbs of
//! [`Client`](crate::Client): each wrapper holds a borrowed client plus an
//! account id, builds `/api/accounts/{account_id}/...` paths, and maps the
//! decoded JSON into its own typed records. Error classification is entirely
//! the client's.

pub mod contact_fields;
pub mod contact_imports;
pub mod contact_lists;
pub mod contacts;
pub mod projects;
pub mod suppressions;
pub mod templates;

use serde_json::Value;

use crate::{Error, Result};

/// Reads the default account id from the `MAILTRAP_ACCOUNT_ID` environment
/// variable. Like [`Client::from_env`](crate::Client::from_env), this is a
/// boundary helper; the wrappers themselves take the id explicitly.
pub fn account_id_from_env() -> Result<u64> {
    let raw = std::env::var("MAILTRAP_ACCOUNT_ID")
        .map_err(|_| Error::InvalidArgument("MAILTRAP_ACCOUNT_ID is not set".into()))?;
    raw.parse()
        .map_err(|_| Error::InvalidArgument("MAILTRAP_ACCOUNT_ID must be an integer".into()))
}

/// Resource endpoints answer 2xx with a body; an empty response here breaks
/// the endpoint contract.
fn expect_body(value: Option<Value>) -> Result<Value> {
    value.ok_or_else(|| Error::InvalidApiResponse(vec!["empty response body".into()]))
}
