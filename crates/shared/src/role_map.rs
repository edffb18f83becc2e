//! RoleMap - per-organization permission map

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reserved flag: whether the user may currently sign in to the organization
pub const ACCESS_FLAG: &str = "access";

/// Reserved flag: whether the user is the organization's primary owner
pub const PRINCIPAL_FLAG: &str = "principal";

/// All reserved flag names
pub const RESERVED_FLAGS: [&str; 2] = [ACCESS_FLAG, PRINCIPAL_FLAG];

/// Check whether a name is one of the reserved flags
pub fn is_reserved_flag(name: &str) -> bool {
    RESERVED_FLAGS.contains(&name)
}

/// Per-organization role membership.
///
/// On the wire this is a flat object (`{"admin": true, "access": false}`).
/// In memory the two reserved flags are kept apart from organization roles so
/// that a role edit can never clobber them by accident.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMap {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    principal: Option<bool>,

    #[serde(flatten)]
    roles: BTreeMap<String, bool>,
}

impl RoleMap {
    /// Create an empty role map
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set a role or reserved flag
    pub fn with(mut self, name: impl Into<String>, value: bool) -> Self {
        self.set(name, value);
        self
    }

    /// Set a role or reserved flag
    pub fn set(&mut self, name: impl Into<String>, value: bool) {
        let name = name.into();
        match name.as_str() {
            ACCESS_FLAG => self.access = Some(value),
            PRINCIPAL_FLAG => self.principal = Some(value),
            _ => {
                self.roles.insert(name, value);
            }
        }
    }

    /// Look up a role or reserved flag
    pub fn get(&self, name: &str) -> Option<bool> {
        match name {
            ACCESS_FLAG => self.access,
            PRINCIPAL_FLAG => self.principal,
            _ => self.roles.get(name).copied(),
        }
    }

    /// Whether the key is present at all (true or false)
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn access(&self) -> Option<bool> {
        self.access
    }

    pub fn principal(&self) -> Option<bool> {
        self.principal
    }

    /// Whether either reserved flag is present
    pub fn has_reserved_flags(&self) -> bool {
        self.access.is_some() || self.principal.is_some()
    }

    /// Organization roles set to `true`, sorted
    pub fn granted(&self) -> Vec<String> {
        self.roles
            .iter()
            .filter(|(_, granted)| **granted)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Iterate organization roles (reserved flags excluded)
    pub fn roles(&self) -> impl Iterator<Item = (&str, bool)> {
        self.roles.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Total number of keys, reserved flags included
    pub fn len(&self) -> usize {
        self.roles.len() + usize::from(self.access.is_some()) + usize::from(self.principal.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Overlay `other` onto this map.
    ///
    /// Every key present in `other` overwrites the same key here; keys absent
    /// from `other` (including reserved flags) are kept.
    pub fn merge_from(&mut self, other: &RoleMap) {
        for (name, value) in &other.roles {
            self.roles.insert(name.clone(), *value);
        }
        if let Some(access) = other.access {
            self.access = Some(access);
        }
        if let Some(principal) = other.principal {
            self.principal = Some(principal);
        }
    }

    /// Return a new map with `other` overlaid, leaving `self` untouched
    pub fn merged(&self, other: &RoleMap) -> RoleMap {
        let mut merged = self.clone();
        merged.merge_from(other);
        merged
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for RoleMap {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        let mut map = RoleMap::new();
        for (name, value) in iter {
            map.set(name, value);
        }
        map
    }
}
