//! Immutable session snapshot

use serde::{Deserialize, Serialize};

use crate::model::Account;

/// Current authenticated user's cached account plus auth token.
///
/// Fields are private: a snapshot can only be read. A new one is produced
/// by merging a [`SessionUpdate`] inside the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    account: Option<Account>,
    token: Option<String>,
}

impl Session {
    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Both account and token are held
    pub fn is_authenticated(&self) -> bool {
        self.account.is_some() && self.token.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.account.is_none() && self.token.is_none()
    }

    pub(crate) fn merged(&self, update: SessionUpdate) -> Session {
        Session {
            account: update.account.unwrap_or_else(|| self.account.clone()),
            token: update.token.unwrap_or_else(|| self.token.clone()),
        }
    }

    pub(crate) fn to_persisted(&self) -> PersistedState {
        PersistedState {
            account: self.account.clone(),
            token: self.token.clone(),
        }
    }
}

/// Partial update: each field is either left alone or replaced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionUpdate {
    account: Option<Option<Account>>,
    token: Option<Option<String>>,
}

impl SessionUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset both fields (logout)
    pub fn cleared() -> Self {
        Self {
            account: Some(None),
            token: Some(None),
        }
    }

    pub fn account(mut self, account: Option<Account>) -> Self {
        self.account = Some(account);
        self
    }

    pub fn token(mut self, token: Option<String>) -> Self {
        self.token = Some(token);
        self
    }
}

/// The record written under the storage key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub account: Option<Account>,
    #[serde(default)]
    pub token: Option<String>,
}
