//! Application error types
//!
//! Account Service failures are surfaced in the UI and never reach this
//! type; only local failures propagate.

use thiserror::Error;

use crate::remote::RemoteError;
use crate::session::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    /// Session could not be persisted or restored
    #[error("Session storage error: {0}")]
    Store(#[from] StoreError),

    /// HTTP client could not be constructed
    #[error("Client setup error: {0}")]
    Setup(#[from] RemoteError),
}

/// Result type for controller flows
pub type AppResult<T> = Result<T, AppError>;
