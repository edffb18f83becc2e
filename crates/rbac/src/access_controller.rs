//! AccessController - role membership checks

use shared::RoleMap;

/// Check whether `role` is among the granted roles
pub fn has_role<S: AsRef<str>>(role: &str, granted: &[S]) -> bool {
    granted.iter().any(|g| g.as_ref() == role)
}

/// Organization roles granted (`true`) in a role map, sorted.
/// Reserved flags are never listed.
pub fn granted_roles(roles: &RoleMap) -> Vec<String> {
    roles.granted()
}

/// Access checks against a fixed list of granted roles
#[derive(Debug, Clone, Default)]
pub struct AccessController {
    granted: Vec<String>,
}

impl AccessController {
    pub fn new(granted: Vec<String>) -> Self {
        Self { granted }
    }

    /// Build from the granted roles of a role map
    pub fn from_role_map(roles: &RoleMap) -> Self {
        Self::new(granted_roles(roles))
    }

    pub fn has_role(&self, role: &str) -> bool {
        has_role(role, &self.granted)
    }

    pub fn granted(&self) -> &[String] {
        &self.granted
    }
}
