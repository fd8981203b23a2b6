//! Account Service Client
//!
//! Outbound calls to the remote Account Service.
//!
//! ## Architecture
//!
//! - **RemoteClient**: builds requests, attaches auth, decodes JSON
//! - **Transport**: the network seam (`HttpTransport` in production)
//!
//! Every failure comes back as a [`RemoteError`] value; nothing here panics
//! or retries.

mod client;
mod error;
mod transport;

pub use client::{ApiRequest, LoginResponse, RemoteClient};
pub use error::RemoteError;
pub use transport::{HttpRequest, HttpTransport, Method, Transport};

#[cfg(test)]
pub(crate) use transport::fake;
