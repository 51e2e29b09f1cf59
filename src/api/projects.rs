//! Sandbox projects resource.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::expect_body;
use crate::{Client, Result};

/// A sandbox project grouping inboxes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    /// Admin and viewer share links.
    #[serde(default)]
    pub share_links: Option<Value>,
    #[serde(default)]
    pub inboxes: Option<Value>,
    #[serde(default)]
    pub permissions: Option<Value>,
}

/// Projects API for one account.
#[derive(Debug)]
pub struct ProjectsApi<'a> {
    client: &'a Client,
    account_id: u64,
}

impl<'a> ProjectsApi<'a> {
    pub fn new(client: &'a Client, account_id: u64) -> Self {
        Self { client, account_id }
    }

    /// Lists all projects.
    pub fn list(&self) -> Result<Vec<Project>> {
        let value = expect_body(self.client.get(&self.base_path())?)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Retrieves one project.
    pub fn get(&self, project_id: i64) -> Result<Project> {
        let value = expect_body(self.client.get(&self.entity_path(project_id))?)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Creates a project.
    pub fn create(&self, name: &str) -> Result<Project> {
        let value = expect_body(
            self.client
                .post(&self.base_path(), &json!({ "project": { "name": name } }))?,
        )?;
        Ok(serde_json::from_value(value)?)
    }

    /// Renames a project.
    pub fn update(&self, project_id: i64, name: &str) -> Result<Project> {
        let value = expect_body(
            self.client
                .patch(&self.entity_path(project_id), &json!({ "project": { "name": name } }))?,
        )?;
        Ok(serde_json::from_value(value)?)
    }

    /// Deletes a project and all inboxes inside it.
    pub fn delete(&self, project_id: i64) -> Result<()> {
        self.client.delete(&self.entity_path(project_id))?;
        Ok(())
    }

    fn base_path(&self) -> String {
        format!("/api/accounts/{}/projects", self.account_id)
    }

    fn entity_path(&self, project_id: i64) -> String {
        format!("{}/{project_id}", self.base_path())
    }
}
