//! Document Store - the port to the hierarchical document database
//!
//! ```text
//! orgs/{orgId}/end-users/{endUserId}   ->  { "variables": { .. }, .. }
//! ```

use async_trait::async_trait;
use serde_json::Value;
use shared::StoreError;
use std::fmt;

/// Hierarchical document path (`collection/doc/collection/doc`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocPath {
    segments: Vec<String>,
}

impl DocPath {
    /// Build a path from segments, rejecting empty segments and embedded `/`
    pub fn new<I, S>(segments: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        let path = Self { segments };

        if path.segments.is_empty() || path.segments.len() % 2 != 0 {
            return Err(StoreError::InvalidPath {
                path: path.to_string(),
                reason: "a document path needs collection/id pairs".to_string(),
            });
        }
        if let Some(bad) = path.segments.iter().find(|s| s.is_empty() || s.contains('/')) {
            return Err(StoreError::InvalidPath {
                path: path.to_string(),
                reason: format!("segment '{}' is empty or contains '/'", bad),
            });
        }
        Ok(path)
    }

    /// Path of an end-user document: `orgs/{org_id}/end-users/{end_user_id}`
    pub fn end_user(org_id: &str, end_user_id: &str) -> Result<Self, StoreError> {
        Self::new(["orgs", org_id, "end-users", end_user_id])
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

/// Document store trait
///
/// Absence is `Ok(None)`; `Err` is reserved for store faults.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch the document at `path`
    async fn get_document(&self, path: &DocPath) -> Result<Option<Value>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_user_path() {
        let path = DocPath::end_user("acme", "eu-42").unwrap();

        assert_eq!(path.to_string(), "orgs/acme/end-users/eu-42");
    }

    #[test]
    fn test_rejects_empty_segment() {
        let result = DocPath::end_user("", "eu-42");
        assert!(matches!(result, Err(StoreError::InvalidPath { .. })));
    }

    #[test]
    fn test_rejects_slash_in_id() {
        let result = DocPath::end_user("acme", "eu/42");
        assert!(matches!(result, Err(StoreError::InvalidPath { .. })));
    }

    #[test]
    fn test_rejects_collection_path() {
        let result = DocPath::new(["orgs", "acme", "end-users"]);
        assert!(matches!(result, Err(StoreError::InvalidPath { .. })));
    }
}
