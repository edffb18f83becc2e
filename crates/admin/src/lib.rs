//! # CLM Admin
//!
//! Integration layer: the user administration flow over the role
//! assignment engine, plus in-memory adapters for the collaborator ports.

pub mod adapter;
pub mod collaborators;
pub mod payload;
mod user_admin;

pub use collaborators::{PasswordResetter, UserCreator, UserUpdater};
pub use payload::{CreateUserPayload, CreateUserRoles, UserForm};
pub use user_admin::UserAdminService;

// Re-export dependencies
pub use directory::{DirectoryError, Roster, RosterSource, UserDirectory};
pub use rbac::{compute_roles, has_role, AccessController, AssignmentMode, RoleAssignmentEngine};
pub use variables::{DocPath, DocumentStore, VariableStore};
