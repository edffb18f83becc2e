//! Error types for CLM

use thiserror::Error;

/// Error raised when an organization's role vocabulary is invalid
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrganizationError {
    #[error("Role '{role}' of organization '{org_id}' collides with a reserved flag")]
    ReservedRoleName { org_id: String, role: String },

    #[error("Role '{role}' is defined more than once in organization '{org_id}'")]
    DuplicateRole { org_id: String, role: String },

    #[error("Organization '{org_id}' defines an empty role name")]
    EmptyRoleName { org_id: String },
}

/// Error raised when a user carries roles for an organization it is not a member of
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("User '{user_id}' has roles for organization '{org_id}' but is not a member of it")]
pub struct RoleMembershipError {
    pub user_id: String,
    pub org_id: String,
}

/// Faults reported by the document store collaborator.
///
/// "Does not exist" is never a `StoreError`; stores report absence as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Permission denied reading '{path}'")]
    PermissionDenied { path: String },

    #[error("Document store unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed document at '{path}': {reason}")]
    Malformed { path: String, reason: String },

    #[error("Invalid document path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },
}

/// Error thrown when a remote function call is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Remote call '{function}' rejected: {message}")]
pub struct RemoteCallError {
    pub function: String,
    pub message: String,
}

impl RemoteCallError {
    pub fn new(function: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            message: message.into(),
        }
    }
}

/// General CLM error type
#[derive(Debug, Error)]
pub enum ClmError {
    #[error(transparent)]
    Organization(#[from] OrganizationError),

    #[error(transparent)]
    RoleMembership(#[from] RoleMembershipError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    RemoteCall(#[from] RemoteCallError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClmError>;
