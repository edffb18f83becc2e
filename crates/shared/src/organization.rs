//! Organization (tenant) types

use crate::error::OrganizationError;
use crate::role_map::is_reserved_flag;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Tenant owning a role vocabulary and a user roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// Unique organization identifier
    pub id: String,

    /// Role names defined by this organization, in display order
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Organization {
    /// Create an organization, rejecting role names that would collide with
    /// reserved flags or with each other
    pub fn new(id: impl Into<String>, roles: Vec<String>) -> Result<Self, OrganizationError> {
        let org = Self {
            id: id.into(),
            roles,
        };
        org.validate()?;
        Ok(org)
    }

    /// Validate the role vocabulary
    pub fn validate(&self) -> Result<(), OrganizationError> {
        let mut seen = HashSet::new();
        for role in &self.roles {
            if role.trim().is_empty() {
                return Err(OrganizationError::EmptyRoleName {
                    org_id: self.id.clone(),
                });
            }
            if is_reserved_flag(role) {
                return Err(OrganizationError::ReservedRoleName {
                    org_id: self.id.clone(),
                    role: role.clone(),
                });
            }
            if !seen.insert(role.as_str()) {
                return Err(OrganizationError::DuplicateRole {
                    org_id: self.id.clone(),
                    role: role.clone(),
                });
            }
        }
        Ok(())
    }
}
