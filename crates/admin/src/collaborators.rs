//! Remote collaborators of the user administration flow

use crate::payload::CreateUserPayload;
use async_trait::async_trait;
use shared::{RemoteCallError, StoreError, User};

/// Remote function that creates an account and its organization membership
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserCreator: Send + Sync {
    /// Create the account and return the id the backend assigned to it
    async fn create_user(&self, payload: CreateUserPayload) -> Result<String, RemoteCallError>;
}

/// Persists changes to an existing user document
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserUpdater: Send + Sync {
    async fn update_user(&self, user: User) -> Result<(), StoreError>;
}

/// Sends a password reset email through the authentication provider
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordResetter: Send + Sync {
    async fn reset_password(&self, email: &str) -> Result<(), RemoteCallError>;
}
