//! Contact lists resource.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::expect_body;
use crate::{Client, Result};

/// A named contact list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactList {
    pub id: i64,
    pub name: String,
}

/// Contact lists API for one account.
#[derive(Debug)]
pub struct ContactListsApi<'a> {
    client: &'a Client,
    account_id: u64,
}

impl<'a> ContactListsApi<'a> {
    pub fn new(client: &'a Client, account_id: u64) -> Self {
        Self { client, account_id }
    }

    /// Lists all contact lists.
    pub fn list(&self) -> Result<Vec<ContactList>> {
        let value = expect_body(self.client.get(&self.base_path())?)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Retrieves one contact list.
    pub fn get(&self, list_id: i64) -> Result<ContactList> {
        let value = expect_body(self.client.get(&self.entity_path(list_id))?)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Creates a contact list.
    pub fn create(&self, name: &str) -> Result<ContactList> {
        let value = expect_body(self.client.post(&self.base_path(), &json!({ "name": name }))?)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Renames a contact list.
    pub fn update(&self, list_id: i64, name: &str) -> Result<ContactList> {
        let value = expect_body(
            self.client
                .patch(&self.entity_path(list_id), &json!({ "name": name }))?,
        )?;
        Ok(serde_json::from_value(value)?)
    }

    /// Deletes a contact list.
    pub fn delete(&self, list_id: i64) -> Result<()> {
        self.client.delete(&self.entity_path(list_id))?;
        Ok(())
    }

    fn base_path(&self) -> String {
        format!("/api/accounts/{}/contacts/lists", self.account_id)
    }

    fn entity_path(&self, list_id: i64) -> String {
        format!("{}/{list_id}", self.base_path())
    }
}
