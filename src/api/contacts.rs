//! Contacts resource.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::expect_body;
use crate::{Client, Result};

/// A contact record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Contact {
    /// Contact UUID.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Field values keyed by merge tag.
    #[serde(default)]
    pub fields: Map<String, Value>,
    #[serde(default)]
    pub list_ids: Vec<i64>,
    /// `subscribed` or `unsubscribed`.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub updated_at: Option<i64>,
    /// `created` or `updated`, reported by mutation endpoints.
    #[serde(default)]
    pub action: Option<String>,
}

impl Contact {
    /// Whether the last mutation created the contact rather than updating
    /// an existing one. Endpoints that only ever create omit `action`.
    pub fn newly_created(&self) -> bool {
        self.action.as_deref().is_none_or(|action| action == "created")
    }
}

/// Fields accepted when creating or upserting a contact.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContactRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub fields: Map<String, Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub list_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unsubscribed: Option<bool>,
}

impl ContactRequest {
    /// A request carrying just an email address.
    pub fn email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }

    /// Sets a field value by merge tag.
    pub fn field(mut self, merge_tag: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(merge_tag.into(), value.into());
        self
    }

    /// Adds a list membership.
    pub fn list_id(mut self, list_id: i64) -> Self {
        self.list_ids.push(list_id);
        self
    }

    /// Marks the contact unsubscribed (upsert only).
    pub fn unsubscribed(mut self, unsubscribed: bool) -> Self {
        self.unsubscribed = Some(unsubscribed);
        self
    }
}

/// Contacts API for one account.
#[derive(Debug)]
pub struct ContactsApi<'a> {
    client: &'a Client,
    account_id: u64,
}

impl<'a> ContactsApi<'a> {
    pub fn new(client: &'a Client, account_id: u64) -> Self {
        Self { client, account_id }
    }

    /// Retrieves a contact by UUID or email address.
    pub fn get(&self, contact_id: &str) -> Result<Contact> {
        let value = expect_body(self.client.get(&self.entity_path(contact_id))?)?;
        decode_contact(value)
    }

    /// Creates a new contact.
    pub fn create(&self, contact: &ContactRequest) -> Result<Contact> {
        let value = expect_body(
            self.client
                .post(&self.base_path(), &json!({ "contact": contact }))?,
        )?;
        decode_contact(value)
    }

    /// Updates a contact by UUID or email address, creating it when absent.
    pub fn upsert(&self, contact_id: &str, contact: &ContactRequest) -> Result<Contact> {
        let value = expect_body(
            self.client
                .patch(&self.entity_path(contact_id), &json!({ "contact": contact }))?,
        )?;
        decode_contact(value)
    }

    /// Deletes a contact.
    pub fn delete(&self, contact_id: &str) -> Result<()> {
        self.client.delete(&self.entity_path(contact_id))?;
        Ok(())
    }

    /// Adds the contact to the given lists, keeping existing memberships.
    pub fn add_to_lists(&self, contact_id: &str, list_ids: &[i64]) -> Result<Contact> {
        self.update_lists(contact_id, json!({ "list_ids_included": list_ids }))
    }

    /// Removes the contact from the given lists.
    pub fn remove_from_lists(&self, contact_id: &str, list_ids: &[i64]) -> Result<Contact> {
        self.update_lists(contact_id, json!({ "list_ids_excluded": list_ids }))
    }

    fn update_lists(&self, contact_id: &str, options: Value) -> Result<Contact> {
        let value = expect_body(
            self.client
                .patch(&self.entity_path(contact_id), &json!({ "contact": options }))?,
        )?;
        decode_contact(value)
    }

    fn base_path(&self) -> String {
        format!("/api/accounts/{}/contacts", self.account_id)
    }

    fn entity_path(&self, contact_id: &str) -> String {
        format!("{}/{contact_id}", self.base_path())
    }
}

/// Mutation endpoints wrap the record as `{ data: {...}, action: ... }`;
/// plain reads return the record directly. Accept both.
fn decode_contact(value: Value) -> Result<Contact> {
    let (data, action) = match value {
        Value::Object(mut object) if object.contains_key("data") => {
            let action = object
                .remove("action")
                .and_then(|action| action.as_str().map(str::to_string));
            let data = object.remove("data").unwrap_or(Value::Null);
            (data, action)
        }
        other => (other, None),
    };

    let mut contact: Contact = serde_json::from_value(data)?;
    if contact.action.is_none() {
        contact.action = action;
    }
    Ok(contact)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_wrapped_mutation_responses() {
        let contact = decode_contact(json!({
            "data": { "id": "uuid-1", "email": "user@example.com", "list_ids": [1, 2] },
            "action": "updated"
        }))
        .unwrap();
        assert_eq!(contact.email.as_deref(), Some("user@example.com"));
        assert_eq!(contact.list_ids, [1, 2]);
        assert_eq!(contact.action.as_deref(), Some("updated"));
        assert!(!contact.newly_created());
    }

    #[test]
    fn decodes_plain_read_responses() {
        let contact =
            decode_contact(json!({ "id": "uuid-1", "email": "user@example.com" })).unwrap();
        assert_eq!(contact.id.as_deref(), Some("uuid-1"));
        assert!(contact.newly_created());
    }

    #[test]
    fn request_serializes_sparsely() {
        let request = ContactRequest::email("user@example.com").list_id(5);
        let json = serde_json::to_value(&request).unwrap();
        let keys: Vec<&str> = json
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["email", "list_ids"]);
    }
}
