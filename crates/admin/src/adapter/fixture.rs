//! Fixture files seeding the in-memory adapters
//!
//! ```json
//! {
//!   "organizations": [{ "id": "acme", "roles": ["admin", "editor"] }],
//!   "users": [{ "id": "u1", "displayName": "Ada", "orgs": ["acme"], ... }],
//!   "endUsers": { "acme": { "eu-1": { "variables": { "color": "blue" } } } },
//!   "deniedEndUsers": { "acme": ["eu-2"] }
//! }
//! ```

use serde::Deserialize;
use serde_json::Value;
use shared::{Organization, Result, User};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;
use variables::DocPath;

use super::in_memory::{InMemoryDocumentStore, InMemoryUserStore};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    #[serde(default)]
    pub organizations: Vec<Organization>,

    #[serde(default)]
    pub users: Vec<User>,

    /// org id -> end-user id -> end-user document
    #[serde(default)]
    pub end_users: BTreeMap<String, BTreeMap<String, Value>>,

    /// org id -> end-user ids whose documents fail with a permission fault
    #[serde(default)]
    pub denied_end_users: BTreeMap<String, Vec<String>>,
}

impl Fixture {
    /// Load and validate a fixture file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let fixture: Self = serde_json::from_str(content)?;
        for org in &fixture.organizations {
            org.validate()?;
        }
        for user in &fixture.users {
            user.validate()?;
        }
        Ok(fixture)
    }

    pub fn organization(&self, org_id: &str) -> Option<&Organization> {
        self.organizations.iter().find(|o| o.id == org_id)
    }

    /// Seed fresh in-memory stores with the fixture contents
    pub fn seed(&self) -> Result<(InMemoryDocumentStore, InMemoryUserStore)> {
        let documents = InMemoryDocumentStore::new();
        for (org_id, end_users) in &self.end_users {
            for (end_user_id, document) in end_users {
                let path = DocPath::end_user(org_id, end_user_id)?;
                documents.put(&path, document.clone())?;
            }
        }
        for (org_id, end_user_ids) in &self.denied_end_users {
            for end_user_id in end_user_ids {
                documents.deny(&DocPath::end_user(org_id, end_user_id)?)?;
            }
        }

        let users = InMemoryUserStore::new();
        for user in &self.users {
            users.insert(user.clone())?;
        }

        debug!(
            organizations = self.organizations.len(),
            users = self.users.len(),
            "Seeded in-memory stores from fixture"
        );
        Ok((documents, users))
    }
}
