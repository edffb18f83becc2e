//! Roster - immutable snapshot of an organization's users

use chrono::{DateTime, Utc};
use shared::User;
use std::collections::HashSet;

use crate::error::DirectoryError;

/// Users of one organization as loaded at `loaded_at`.
///
/// A roster is never mutated after construction; refreshing the directory
/// produces a new one.
#[derive(Debug, Clone)]
pub struct Roster {
    org_id: Option<String>,
    users: Vec<User>,
    loaded_at: Option<DateTime<Utc>>,
    generation: u64,
}

impl Roster {
    /// Roster of a directory that has not loaded anything yet
    pub fn empty() -> Self {
        Self {
            org_id: None,
            users: Vec::new(),
            loaded_at: None,
            generation: 0,
        }
    }

    pub fn new(org_id: impl Into<String>, users: Vec<User>) -> Self {
        Self {
            org_id: Some(org_id.into()),
            users,
            loaded_at: Some(Utc::now()),
            generation: 0,
        }
    }

    pub(crate) fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub fn org_id(&self) -> Option<&str> {
        self.org_id.as_deref()
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Users whose id is in `ids`, in roster order
    pub fn filter_by_ids<S: AsRef<str>>(&self, ids: &[S]) -> Vec<&User> {
        let wanted: HashSet<&str> = ids.iter().map(|id| id.as_ref()).collect();
        self.users
            .iter()
            .filter(|u| wanted.contains(u.id.as_str()))
            .collect()
    }

    /// Display names of the users whose id is in `ids`, in roster order
    pub fn display_names_of<S: AsRef<str>>(&self, ids: &[S]) -> Vec<String> {
        self.filter_by_ids(ids)
            .into_iter()
            .map(|u| u.display_name.clone())
            .collect()
    }

    /// Look up a user by id
    pub fn find_by_id(&self, id: &str) -> Result<&User, DirectoryError> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .ok_or_else(|| DirectoryError::UserNotFound {
                user_id: id.to_string(),
                org_id: self.org_id.clone(),
            })
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::empty()
    }
}
