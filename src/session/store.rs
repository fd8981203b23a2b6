//! Session Store
//!
//! Owns the current [`Session`] snapshot. All writers go through
//! [`SessionStore::replace`].

use std::sync::Arc;

use super::snapshot::{PersistedState, Session, SessionUpdate};
use super::storage::StateStorage;
use super::StoreResult;

/// Storage key of the persisted `{account, token}` record
pub const STORAGE_KEY: &str = "savedState";

pub struct SessionStore<S: StateStorage> {
    current: Arc<Session>,
    storage: S,
    key: String,
}

impl<S: StateStorage> SessionStore<S> {
    /// Empty session over `storage`, using [`STORAGE_KEY`]
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            current: Arc::new(Session::default()),
            storage,
            key: key.into(),
        }
    }

    /// Latest committed snapshot
    pub fn current(&self) -> Arc<Session> {
        Arc::clone(&self.current)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Merge `update` over the current snapshot and persist the result.
    ///
    /// The new snapshot becomes visible only after the write succeeded; on
    /// error the previous snapshot stays current.
    pub fn replace(&mut self, update: SessionUpdate) -> StoreResult<()> {
        let next = self.current.merged(update);
        let record = serde_json::to_string(&next.to_persisted())?;
        self.storage.set(&self.key, &record)?;

        tracing::debug!(
            authenticated = next.is_authenticated(),
            user = next.account().map(|a| a.user.as_str()).unwrap_or("-"),
            "Session replaced"
        );
        self.current = Arc::new(next);
        Ok(())
    }

    /// Load the persisted record, if any, with exactly one `replace`.
    ///
    /// Returns whether a record was restored. An unreadable record is
    /// treated as absent.
    pub fn restore(&mut self) -> StoreResult<bool> {
        let Some(raw) = self.storage.get(&self.key)? else {
            tracing::debug!("No persisted session");
            return Ok(false);
        };

        let state: PersistedState = match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring corrupt persisted session");
                return Ok(false);
            }
        };

        self.replace(
            SessionUpdate::new()
                .account(state.account)
                .token(state.token),
        )?;
        tracing::info!(
            authenticated = self.current.is_authenticated(),
            "Session restored"
        );
        Ok(true)
    }
}
