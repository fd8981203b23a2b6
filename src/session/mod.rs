//! Session State
//!
//! The single process-wide authenticated session and its durable copy.
//!
//! ## Architecture
//!
//! - **Session**: immutable snapshot (account + token), replaced wholesale
//! - **SessionStore**: sole owner of the current snapshot; `replace` is the
//!   only mutation and persists before committing
//! - **StateStorage**: key/value durable storage (files, or memory for tests)

mod error;
mod snapshot;
mod storage;
mod store;

pub use error::{StoreError, StoreResult};
pub use snapshot::{PersistedState, Session, SessionUpdate};
pub use storage::{FileStorage, MemoryStorage, StateStorage};
pub use store::{SessionStore, STORAGE_KEY};
