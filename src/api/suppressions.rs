//! Suppressions resource.
//!
//! Suppressions are created server-side (bounces, complaints, manual
//! blocks); the API only lists and deletes them.

use serde::{Deserialize, Serialize};

use super::expect_body;
use crate::{Client, Result};

/// A record preventing future sends to an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suppression {
    /// Suppression UUID.
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub sending_stream: Option<String>,
    #[serde(default)]
    pub domain_name: Option<String>,
    #[serde(default)]
    pub message_bounce_category: Option<String>,
    #[serde(default)]
    pub message_category: Option<String>,
    #[serde(default)]
    pub message_client_ip: Option<String>,
    #[serde(default)]
    pub message_created_at: Option<String>,
    #[serde(default)]
    pub message_esp_response: Option<String>,
    #[serde(default)]
    pub message_esp_server_type: Option<String>,
    #[serde(default)]
    pub message_outgoing_ip: Option<String>,
    #[serde(default)]
    pub message_recipient_mx_name: Option<String>,
    #[serde(default)]
    pub message_sender_email: Option<String>,
    #[serde(default)]
    pub message_subject: Option<String>,
}

/// Suppressions API for one account.
#[derive(Debug)]
pub struct SuppressionsApi<'a> {
    client: &'a Client,
    account_id: u64,
}

impl<'a> SuppressionsApi<'a> {
    pub fn new(client: &'a Client, account_id: u64) -> Self {
        Self { client, account_id }
    }

    /// Lists suppressions, optionally filtered to one email address.
    pub fn list(&self, email: Option<&str>) -> Result<Vec<Suppression>> {
        let response = match email {
            Some(email) => self
                .client
                .get_with_params(&self.base_path(), &[("email", email)])?,
            None => self.client.get(&self.base_path())?,
        };
        let value = expect_body(response)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Deletes a suppression, re-enabling delivery to its address.
    pub fn delete(&self, suppression_id: &str) -> Result<()> {
        self.client
            .delete(&format!("{}/{suppression_id}", self.base_path()))?;
        Ok(())
    }

    fn base_path(&self) -> String {
        format!("/api/accounts/{}/suppressions", self.account_id)
    }
}
