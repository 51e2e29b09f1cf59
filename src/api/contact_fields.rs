//! Contact fields resource.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::expect_body;
use crate::{Client, Result};

/// A custom contact field definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactField {
    pub id: i64,
    pub name: String,
    /// One of `text`, `integer`, `float`, `boolean`, `date`.
    pub data_type: String,
    /// Placeholder substituted with the contact's value in campaigns.
    pub merge_tag: String,
}

/// Fields accepted when creating a contact field. The data type cannot be
/// changed later.
#[derive(Debug, Clone, Serialize)]
pub struct ContactFieldRequest {
    pub name: String,
    pub data_type: String,
    pub merge_tag: String,
}

/// Fields accepted when updating a contact field.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContactFieldUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_tag: Option<String>,
}

/// Contact fields API for one account.
#[derive(Debug)]
pub struct ContactFieldsApi<'a> {
    client: &'a Client,
    account_id: u64,
}

impl<'a> ContactFieldsApi<'a> {
    pub fn new(client: &'a Client, account_id: u64) -> Self {
        Self { client, account_id }
    }

    /// Lists all contact fields.
    pub fn list(&self) -> Result<Vec<ContactField>> {
        let value = expect_body(self.client.get(&self.base_path())?)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Retrieves one contact field.
    pub fn get(&self, field_id: i64) -> Result<ContactField> {
        let value = expect_body(self.client.get(&self.entity_path(field_id))?)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Creates a contact field.
    pub fn create(&self, field: &ContactFieldRequest) -> Result<ContactField> {
        let value = expect_body(self.client.post(&self.base_path(), &json!(field))?)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Updates a contact field's name or merge tag.
    pub fn update(&self, field_id: i64, update: &ContactFieldUpdate) -> Result<ContactField> {
        let value = expect_body(self.client.patch(&self.entity_path(field_id), &json!(update))?)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Deletes a contact field.
    pub fn delete(&self, field_id: i64) -> Result<()> {
        self.client.delete(&self.entity_path(field_id))?;
        Ok(())
    }

    fn base_path(&self) -> String {
        format!("/api/accounts/{}/contacts/fields", self.account_id)
    }

    fn entity_path(&self, field_id: i64) -> String {
        format!("{}/{field_id}", self.base_path())
    }
}
