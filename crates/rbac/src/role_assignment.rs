//! RoleAssignmentEngine - derives a user's per-organization RoleMap

use shared::{RoleMap, ACCESS_FLAG, PRINCIPAL_FLAG};
use std::collections::HashSet;
use tracing::debug;

/// Whether a role map is computed for a new user or for an edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentMode {
    /// New user: reserved flags are initialized to `false`
    Creating,
    /// Existing user: reserved flags are left to the map being merged into
    Editing,
}

impl AssignmentMode {
    pub fn from_editing(editing_user: bool) -> Self {
        if editing_user {
            AssignmentMode::Editing
        } else {
            AssignmentMode::Creating
        }
    }

    pub fn is_editing(self) -> bool {
        self == AssignmentMode::Editing
    }
}

/// Stateless role map computation.
///
/// Only names from the organization's vocabulary ever appear in the output;
/// selected names outside it are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleAssignmentEngine;

impl RoleAssignmentEngine {
    pub fn new() -> Self {
        Self
    }

    /// Compute the complete role map for one organization
    pub fn compute_roles<S>(&self, org_roles: &[S], selected: &HashSet<String>, mode: AssignmentMode) -> RoleMap
    where
        S: AsRef<str>,
    {
        compute_roles(org_roles, selected, mode.is_editing())
    }
}

/// Compute a role map from the organization vocabulary and the selected names.
///
/// Every name of `org_roles` maps to whether it was selected. When
/// `editing_user` is false, `access` and `principal` are added as `false`;
/// when it is true the result holds organization roles only.
pub fn compute_roles<S>(org_roles: &[S], selected: &HashSet<String>, editing_user: bool) -> RoleMap
where
    S: AsRef<str>,
{
    let mut roles = RoleMap::new();

    for org_role in org_roles {
        let org_role = org_role.as_ref();
        roles.set(org_role, selected.contains(org_role));
    }

    if !editing_user {
        roles.set(ACCESS_FLAG, false);
        roles.set(PRINCIPAL_FLAG, false);
    }

    let dropped: Vec<&str> = selected
        .iter()
        .map(String::as_str)
        .filter(|name| !org_roles.iter().any(|r| r.as_ref() == *name))
        .collect();
    if !dropped.is_empty() {
        debug!(?dropped, "Ignoring selected roles unknown to the organization");
    }

    roles
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn set(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_new_user_scenario() {
        let roles = compute_roles(&["admin", "editor"], &set(&["editor"]), false);

        assert_eq!(
            serde_json::to_value(&roles).unwrap(),
            json!({"admin": false, "editor": true, "access": false, "principal": false})
        );
    }

    #[test]
    fn test_editing_user_scenario_drops_unknown_roles() {
        let roles = compute_roles(&["admin", "editor"], &set(&["admin", "editor", "ghost"]), true);

        assert_eq!(
            serde_json::to_value(&roles).unwrap(),
            json!({"admin": true, "editor": true})
        );
        assert!(!roles.contains("ghost"));
    }

    #[test]
    fn test_every_org_role_reflects_selection() {
        let org_roles = ["admin", "editor", "viewer", "billing"];
        let selected = set(&["viewer", "admin"]);
        let roles = compute_roles(&org_roles, &selected, true);

        for r in org_roles {
            assert_eq!(roles.get(r), Some(selected.contains(r)), "role {}", r);
        }
    }

    #[test]
    fn test_editing_never_adds_reserved_flags() {
        let roles = compute_roles(&["admin"], &set(&["access", "principal", "admin"]), true);

        assert!(!roles.has_reserved_flags());
        assert_eq!(roles.len(), 1);
    }

    #[test]
    fn test_creating_forces_reserved_flags_false() {
        let roles = compute_roles(&["admin"], &set(&["access", "principal"]), false);

        assert_eq!(roles.access(), Some(false));
        assert_eq!(roles.principal(), Some(false));
        assert_eq!(roles.get("admin"), Some(false));
    }

    #[test]
    fn test_empty_vocabulary() {
        let empty: [&str; 0] = [];

        assert!(compute_roles(&empty, &set(&["admin"]), true).is_empty());

        let created = compute_roles(&empty, &set(&["admin"]), false);
        assert_eq!(
            serde_json::to_value(&created).unwrap(),
            json!({"access": false, "principal": false})
        );
    }

    #[test]
    fn test_compute_is_deterministic() {
        let org_roles = vec!["admin".to_string(), "editor".to_string()];
        let selected = set(&["editor", "ghost"]);

        let first = compute_roles(&org_roles, &selected, false);
        let second = compute_roles(&org_roles, &selected, false);
        assert_eq!(first, second);
    }

    #[test]
    fn test_engine_modes() {
        let engine = RoleAssignmentEngine::new();
        let selected = set(&["admin"]);

        let created = engine.compute_roles(&["admin"], &selected, AssignmentMode::Creating);
        assert!(created.has_reserved_flags());

        let edited = engine.compute_roles(&["admin"], &selected, AssignmentMode::from_editing(true));
        assert!(!edited.has_reserved_flags());
        assert_eq!(edited.get("admin"), Some(true));
    }
}
