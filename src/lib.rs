//! # Bankline
//!
//! Personal banking client engine: a path router, a durable authenticated
//! session, and optimistic transaction updates against a remote Account
//! Service.
//!
//! ## Modules
//!
//! - [`remote`]: Account Service client and transport seam
//! - [`session`]: immutable session snapshots and their persistence
//! - [`router`]: static route registry and navigation history
//! - [`view`]: view templates and the mount surface
//! - [`app`]: application context, bootstrap and view controllers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bankline::{Config, Credentials};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!
//!     // Restores the saved session and renders the first route
//!     let mut app = bankline::app::connect(&config).await?;
//!
//!     app.login(Credentials::new("alice", "secret")).await?;
//!     println!("{}", app.surface());
//!
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod config;
pub mod model;
pub mod remote;
pub mod router;
pub mod session;
pub mod view;

pub use app::{App, AppError, AppResult};

pub use config::{generate_default_config, ApiConfig, Config, ConfigError, LoggingConfig, StorageConfig};

pub use model::{Account, Credentials, Registration, Transaction, TransactionDraft, TransactionId};

pub use remote::{HttpTransport, RemoteClient, RemoteError, Transport};

pub use router::{PopDirection, RouteDescriptor, Router, DEFAULT_ROUTE, LOGIN_ROUTE};

pub use session::{FileStorage, MemoryStorage, Session, SessionStore, SessionUpdate, StateStorage, StoreError};

pub use view::{Surface, View, ViewId};
