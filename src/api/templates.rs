//! Email templates resource.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::expect_body;
use crate::{Client, Result};

/// A server-stored email template, referenced from sends by `uuid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailTemplate {
    pub id: i64,
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub body_html: Option<String>,
    #[serde(default)]
    pub body_text: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Fields accepted when creating a template.
#[derive(Debug, Clone, Serialize)]
pub struct EmailTemplateRequest {
    pub name: String,
    pub subject: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_text: Option<String>,
}

/// Fields accepted when updating a template; unset fields are left alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmailTemplateUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_text: Option<String>,
}

/// Email templates API for one account.
#[derive(Debug)]
pub struct EmailTemplatesApi<'a> {
    client: &'a Client,
    account_id: u64,
}

impl<'a> EmailTemplatesApi<'a> {
    pub fn new(client: &'a Client, account_id: u64) -> Self {
        Self { client, account_id }
    }

    /// Lists all templates.
    pub fn list(&self) -> Result<Vec<EmailTemplate>> {
        let value = expect_body(self.client.get(&self.base_path())?)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Retrieves one template.
    pub fn get(&self, template_id: i64) -> Result<EmailTemplate> {
        let value = expect_body(self.client.get(&self.entity_path(template_id))?)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Creates a template.
    pub fn create(&self, template: &EmailTemplateRequest) -> Result<EmailTemplate> {
        let value = expect_body(
            self.client
                .post(&self.base_path(), &json!({ "email_template": template }))?,
        )?;
        Ok(serde_json::from_value(value)?)
    }

    /// Updates a template.
    pub fn update(&self, template_id: i64, update: &EmailTemplateUpdate) -> Result<EmailTemplate> {
        let value = expect_body(
            self.client
                .patch(&self.entity_path(template_id), &json!({ "email_template": update }))?,
        )?;
        Ok(serde_json::from_value(value)?)
    }

    /// Deletes a template.
    pub fn delete(&self, template_id: i64) -> Result<()> {
        self.client.delete(&self.entity_path(template_id))?;
        Ok(())
    }

    fn base_path(&self) -> String {
        format!("/api/accounts/{}/email_templates", self.account_id)
    }

    fn entity_path(&self, template_id: i64) -> String {
        format!("{}/{template_id}", self.base_path())
    }
}
