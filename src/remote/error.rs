//! Remote call error types

use thiserror::Error;

/// Failure of a single Account Service call.
///
/// Callers only ever look at [`RemoteError::message`]; the variant is kept
/// for logging.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RemoteError {
    /// Network failure, timeout, or a body that is not the expected JSON
    #[error("{0}")]
    Transport(String),

    /// `{error}` payload returned by the Account Service
    #[error("{0}")]
    Application(String),
}

impl RemoteError {
    /// Message shown to the user
    pub fn message(&self) -> &str {
        match self {
            RemoteError::Transport(msg) | RemoteError::Application(msg) => msg,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RemoteError::Transport(_) => "transport",
            RemoteError::Application(_) => "application",
        }
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RemoteError::Transport("Request timeout".to_string())
        } else {
            RemoteError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_is_variant_agnostic() {
        let transport = RemoteError::Transport("connection refused".to_string());
        let app = RemoteError::Application("User not found".to_string());

        assert_eq!(transport.message(), "connection refused");
        assert_eq!(app.message(), "User not found");
        assert_eq!(app.to_string(), "User not found");
        assert_eq!(transport.kind(), "transport");
    }
}
