//! Directory errors

use shared::StoreError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    #[error("User '{user_id}' not found in roster of {}", .org_id.as_deref().unwrap_or("<no organization>"))]
    UserNotFound {
        user_id: String,
        org_id: Option<String>,
    },

    #[error("Failed to load roster: {0}")]
    Source(#[from] StoreError),
}
