//! Bulk contact imports.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::expect_body;
use crate::{Client, Result};

/// The state of a contact import job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactImport {
    pub id: i64,
    /// One of `created`, `started`, `finished`, `failed`.
    pub status: String,
    #[serde(default)]
    pub created_contacts_count: Option<i64>,
    #[serde(default)]
    pub updated_contacts_count: Option<i64>,
    #[serde(default)]
    pub contacts_over_limit_count: Option<i64>,
}

/// One contact entry of an import request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImportContact {
    pub email: String,
    /// Field values keyed by merge tag.
    pub fields: Map<String, Value>,
    pub list_ids_included: Vec<i64>,
    pub list_ids_excluded: Vec<i64>,
}

/// Chaining builder for an import: collects contacts keyed by email,
/// merging repeated mentions of the same address. Insertion order is kept.
///
/// ```
/// use mailtrap::api::contact_imports::ImportRequest;
///
/// let request = ImportRequest::new()
///     .upsert("user@example.com")
///     .add_to_lists("user@example.com", &[1, 2])
///     .remove_from_lists("other@example.com", &[3]);
/// assert_eq!(request.contacts().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportRequest {
    contacts: Vec<ImportContact>,
}

impl ImportRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates or updates the contact for `email`.
    pub fn upsert(mut self, email: impl Into<String>) -> Self {
        self.entry(&email.into());
        self
    }

    /// Creates or updates the contact for `email`, merging `fields` over any
    /// already collected for it.
    pub fn upsert_with_fields(mut self, email: impl Into<String>, fields: Map<String, Value>) -> Self {
        let entry = self.entry(&email.into());
        entry.fields.extend(fields);
        self
    }

    /// Adds the contact to the given lists.
    pub fn add_to_lists(mut self, email: impl Into<String>, list_ids: &[i64]) -> Self {
        let entry = self.entry(&email.into());
        for &list_id in list_ids {
            if !entry.list_ids_included.contains(&list_id) {
                entry.list_ids_included.push(list_id);
            }
        }
        self
    }

    /// Removes the contact from the given lists.
    pub fn remove_from_lists(mut self, email: impl Into<String>, list_ids: &[i64]) -> Self {
        let entry = self.entry(&email.into());
        for &list_id in list_ids {
            if !entry.list_ids_excluded.contains(&list_id) {
                entry.list_ids_excluded.push(list_id);
            }
        }
        self
    }

    /// The collected contacts, in first-mention order.
    pub fn contacts(&self) -> &[ImportContact] {
        &self.contacts
    }

    fn entry(&mut self, email: &str) -> &mut ImportContact {
        let position = match self.contacts.iter().position(|contact| contact.email == email) {
            Some(position) => position,
            None => {
                self.contacts.push(ImportContact {
                    email: email.to_string(),
                    ..ImportContact::default()
                });
                self.contacts.len() - 1
            }
        };
        &mut self.contacts[position]
    }
}

/// Contact imports API for one account.
#[derive(Debug)]
pub struct ContactImportsApi<'a> {
    client: &'a Client,
    account_id: u64,
}

impl<'a> ContactImportsApi<'a> {
    pub fn new(client: &'a Client, account_id: u64) -> Self {
        Self { client, account_id }
    }

    /// Retrieves an import job to check its progress.
    pub fn get(&self, import_id: i64) -> Result<ContactImport> {
        let value = expect_body(
            self.client
                .get(&format!("{}/{import_id}", self.base_path()))?,
        )?;
        Ok(serde_json::from_value(value)?)
    }

    /// Starts an import of the given contacts.
    pub fn create(&self, contacts: &[ImportContact]) -> Result<ContactImport> {
        let value = expect_body(
            self.client
                .post(&self.base_path(), &json!({ "contacts": contacts }))?,
        )?;
        Ok(serde_json::from_value(value)?)
    }

    fn base_path(&self) -> String {
        format!("/api/accounts/{}/contacts/imports", self.account_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_repeated_mentions_of_one_email() {
        let mut fields = Map::new();
        fields.insert("first_name".into(), "Jon".into());

        let request = ImportRequest::new()
            .upsert_with_fields("user@example.com", fields)
            .add_to_lists("user@example.com", &[1, 2])
            .add_to_lists("user@example.com", &[2, 3]);

        let contacts = request.contacts();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].fields["first_name"], "Jon");
        assert_eq!(contacts[0].list_ids_included, [1, 2, 3]);
    }

    #[test]
    fn keeps_first_mention_order() {
        let request = ImportRequest::new()
            .upsert("b@example.com")
            .remove_from_lists("a@example.com", &[7])
            .upsert("b@example.com");

        let emails: Vec<&str> = request
            .contacts()
            .iter()
            .map(|contact| contact.email.as_str())
            .collect();
        assert_eq!(emails, ["b@example.com", "a@example.com"]);
        assert_eq!(request.contacts()[1].list_ids_excluded, [7]);
    }
}
