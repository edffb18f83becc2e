//! User account types

use crate::error::RoleMembershipError;
use crate::role_map::RoleMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Contact details of a user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub email: String,
}

/// Administrative user account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,

    #[serde(default)]
    pub display_name: String,

    /// Organizations the user belongs to
    #[serde(default)]
    pub orgs: Vec<String>,

    #[serde(default)]
    pub active_org: String,

    /// Organization id -> role map for that organization
    #[serde(default)]
    pub roles: BTreeMap<String, RoleMap>,

    #[serde(default)]
    pub profile: Profile,

    #[serde(default)]
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl User {
    /// Create a user with minimal configuration
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            ..Default::default()
        }
    }

    /// Builder: add organization membership and make it active if none is
    pub fn with_org(mut self, org_id: impl Into<String>) -> Self {
        let org_id = org_id.into();
        if self.active_org.is_empty() {
            self.active_org = org_id.clone();
        }
        if !self.orgs.contains(&org_id) {
            self.orgs.push(org_id);
        }
        self
    }

    /// Builder: set the role map for an organization
    pub fn with_roles(mut self, org_id: impl Into<String>, roles: RoleMap) -> Self {
        self.roles.insert(org_id.into(), roles);
        self
    }

    /// Builder: set email on both the account and the profile
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        let email = email.into();
        self.profile.email = email.clone();
        self.email = email;
        self
    }

    /// Check whether the user belongs to an organization
    pub fn is_member_of(&self, org_id: &str) -> bool {
        self.orgs.iter().any(|o| o == org_id)
    }

    /// Role map for an organization
    pub fn roles_for(&self, org_id: &str) -> Option<&RoleMap> {
        self.roles.get(org_id)
    }

    /// Every organization with a role map must be one of the user's orgs
    pub fn validate(&self) -> Result<(), RoleMembershipError> {
        match self.roles.keys().find(|org_id| !self.is_member_of(org_id)) {
            Some(org_id) => Err(RoleMembershipError {
                user_id: self.id.clone(),
                org_id: org_id.clone(),
            }),
            None => Ok(()),
        }
    }
}
