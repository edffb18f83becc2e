//! UserDirectory - refresh-and-swap holder of the current roster

use async_trait::async_trait;
use shared::{StoreError, User};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};

use crate::error::DirectoryError;
use crate::roster::Roster;

/// Source of organization rosters
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RosterSource: Send + Sync {
    /// Load every user belonging to `org_id`
    async fn load_roster(&self, org_id: &str) -> Result<Vec<User>, StoreError>;
}

/// Holds the most recently loaded roster of one organization.
///
/// Readers call [`UserDirectory::snapshot`] and keep the returned `Arc` for
/// the whole operation. [`UserDirectory::refresh`] loads without holding the
/// lock and swaps the pointer once the load completes, so reads never block
/// on a refresh and never see a partial roster.
pub struct UserDirectory {
    source: Arc<dyn RosterSource>,
    current: RwLock<Arc<Roster>>,
    next_generation: AtomicU64,
}

impl UserDirectory {
    pub fn new(source: Arc<dyn RosterSource>) -> Self {
        Self {
            source,
            current: RwLock::new(Arc::new(Roster::empty())),
            next_generation: AtomicU64::new(1),
        }
    }

    /// Current roster snapshot
    pub fn snapshot(&self) -> Arc<Roster> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Reload the roster for `org_id` and swap it in.
    ///
    /// When refreshes overlap, the one requested last wins even if an older
    /// one finishes after it. On failure the previous snapshot stays.
    pub async fn refresh(&self, org_id: &str) -> Result<Arc<Roster>, DirectoryError> {
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst);
        debug!(org_id, generation, "Refreshing roster");

        let users = self.source.load_roster(org_id).await.map_err(|e| {
            warn!(org_id, error = %e, "Roster refresh failed; keeping previous snapshot");
            DirectoryError::from(e)
        })?;

        let roster = Arc::new(Roster::new(org_id, users).with_generation(generation));
        Ok(self.install(roster))
    }

    /// Swap in `roster` unless a newer refresh already landed; returns the
    /// snapshot that is current afterwards
    fn install(&self, roster: Arc<Roster>) -> Arc<Roster> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);

        if roster.generation() < current.generation() {
            debug!(
                stale = roster.generation(),
                current = current.generation(),
                "Discarding stale roster"
            );
            return current.clone();
        }

        info!(
            org_id = roster.org_id().unwrap_or_default(),
            users = roster.len(),
            "Roster swapped"
        );
        *current = roster.clone();
        roster
    }

    /// Organization of the current snapshot
    pub fn org_id(&self) -> Option<String> {
        self.snapshot().org_id().map(str::to_string)
    }

    pub fn filter_by_ids<S: AsRef<str>>(&self, ids: &[S]) -> Vec<User> {
        self.snapshot()
            .filter_by_ids(ids)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn display_names_of<S: AsRef<str>>(&self, ids: &[S]) -> Vec<String> {
        self.snapshot().display_names_of(ids)
    }

    pub fn find_by_id(&self, id: &str) -> Result<User, DirectoryError> {
        self.snapshot().find_by_id(id).cloned()
    }
}
