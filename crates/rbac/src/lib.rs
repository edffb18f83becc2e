//! # CLM RBAC
//!
//! Role-Based Access Control for CLM organizations.
//!
//! ## Components
//!
//! - `RoleAssignmentEngine` - Role map computation for create/edit flows
//! - `AccessController` - Role membership checks

pub mod access_controller;
pub mod role_assignment;

pub use access_controller::{granted_roles, has_role, AccessController};
pub use role_assignment::{compute_roles, AssignmentMode, RoleAssignmentEngine};
