//! In-Memory Adapter Implementations
//!
//! Simple in-memory implementations of the collaborator traits.
//! Useful for testing, fixtures and local development.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use directory::RosterSource;
use serde_json::Value;
use tracing::debug;
use shared::{RemoteCallError, StoreError, User};
use variables::{DocPath, DocumentStore};

use crate::collaborators::{PasswordResetter, UserCreator, UserUpdater};
use crate::payload::CreateUserPayload;

fn read_lock_error() -> StoreError {
    StoreError::Unavailable("Failed to acquire read lock".to_string())
}

fn write_lock_error() -> StoreError {
    StoreError::Unavailable("Failed to acquire write lock".to_string())
}

/// In-memory document store keyed by document path.
///
/// Thread-safe implementation using RwLock.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    documents: Arc<RwLock<HashMap<String, Value>>>,
    denied: Arc<RwLock<HashSet<String>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or replace a document
    pub fn put(&self, path: &DocPath, document: Value) -> Result<(), StoreError> {
        let mut documents = self.documents.write().map_err(|_| write_lock_error())?;
        documents.insert(path.to_string(), document);
        Ok(())
    }

    /// Make reads of `path` fail with a permission fault
    pub fn deny(&self, path: &DocPath) -> Result<(), StoreError> {
        let mut denied = self.denied.write().map_err(|_| write_lock_error())?;
        denied.insert(path.to_string());
        Ok(())
    }

}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get_document(&self, path: &DocPath) -> Result<Option<Value>, StoreError> {
        let key = path.to_string();
        {
            let denied = self.denied.read().map_err(|_| read_lock_error())?;
            if denied.contains(&key) {
                return Err(StoreError::PermissionDenied { path: key });
            }
        }
        let documents = self.documents.read().map_err(|_| read_lock_error())?;
        Ok(documents.get(&key).cloned())
    }
}

/// In-memory user accounts, standing in for the user collection and the
/// remote account functions
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<BTreeMap<String, User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user
    pub fn insert(&self, user: User) -> Result<(), StoreError> {
        let mut users = self.users.write().map_err(|_| write_lock_error())?;
        users.insert(user.id.clone(), user);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().map_err(|_| read_lock_error())?;
        Ok(users.get(id).cloned())
    }

}

#[async_trait]
impl RosterSource for InMemoryUserStore {
    async fn load_roster(&self, org_id: &str) -> Result<Vec<User>, StoreError> {
        let users = self.users.read().map_err(|_| read_lock_error())?;
        Ok(users
            .values()
            .filter(|u| u.is_member_of(org_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl UserUpdater for InMemoryUserStore {
    async fn update_user(&self, user: User) -> Result<(), StoreError> {
        self.insert(user)
    }
}

#[async_trait]
impl UserCreator for InMemoryUserStore {
    async fn create_user(&self, payload: CreateUserPayload) -> Result<String, RemoteCallError> {
        let reject = |message: String| RemoteCallError::new("createNewUser", message);

        let mut users = self.users.write().map_err(|_| reject("user store unavailable".to_string()))?;
        if !payload.email.is_empty() && users.values().any(|u| u.email == payload.email) {
            return Err(reject(format!("email '{}' is already registered", payload.email)));
        }

        // Fixtures may already hold `user-{n}` ids; never reuse one.
        let id = (users.len() + 1..)
            .map(|n| format!("user-{}", n))
            .find(|candidate| !users.contains_key(candidate))
            .ok_or_else(|| reject("no free user id".to_string()))?;
        let mut roles = BTreeMap::new();
        roles.insert(payload.roles.org_id.clone(), payload.roles.org_roles.clone());

        users.insert(
            id.clone(),
            User {
                id: id.clone(),
                display_name: payload.display_name,
                orgs: payload.orgs,
                active_org: payload.active_org,
                roles,
                profile: payload.profile,
                email: payload.email,
                photo_url: None,
            },
        );
        Ok(id)
    }
}

#[async_trait]
impl PasswordResetter for InMemoryUserStore {
    async fn reset_password(&self, email: &str) -> Result<(), RemoteCallError> {
        let reject = |message: &str| RemoteCallError::new("resetPassword", message);

        let users = self.users.read().map_err(|_| reject("user store unavailable"))?;
        if !users.values().any(|u| u.email == email) {
            return Err(reject("no account for this email"));
        }

        debug!(email, "Password reset email queued");
        Ok(())
    }
}
