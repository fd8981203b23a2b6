//! Startup sequence and external history moves

use super::{App, AppResult};
use crate::config::Config;
use crate::remote::{HttpTransport, RemoteClient, Transport};
use crate::router::{History, MemoryHistory, PopDirection, Router};
use crate::session::{FileStorage, MemoryStorage, SessionStore, StateStorage};

impl<T, S, H> App<T, S, H>
where
    T: Transport,
    S: StateStorage,
    H: History,
{
    /// Restore the persisted session, then render the current path
    pub async fn bootstrap(
        remote: RemoteClient<T>,
        store: SessionStore<S>,
        router: Router<H>,
    ) -> AppResult<Self> {
        let mut app = Self::new(remote, store, router);

        let restored = app.store.restore()?;
        tracing::info!(
            restored,
            api = app.remote.base_url(),
            path = app.router.current_path(),
            "Bootstrapping client"
        );

        app.update_route().await?;
        Ok(app)
    }

    /// Back/forward navigation: move within history and render without
    /// pushing a new entry
    pub async fn pop_state(&mut self, direction: PopDirection) -> AppResult<()> {
        if !self.router.pop(direction) {
            tracing::debug!(?direction, "No history entry");
            return Ok(());
        }
        self.update_route().await
    }
}

/// Client over HTTP with the session persisted under the configured state dir
pub async fn connect(config: &Config) -> AppResult<App<HttpTransport, FileStorage, MemoryHistory>> {
    let storage = FileStorage::new(&config.storage.state_dir);
    tracing::debug!(dir = ?storage.dir(), "Using file state storage");
    connect_with(config, storage).await
}

/// Client over HTTP whose session lives only for this process
pub async fn connect_ephemeral(
    config: &Config,
) -> AppResult<App<HttpTransport, MemoryStorage, MemoryHistory>> {
    connect_with(config, MemoryStorage::new()).await
}

async fn connect_with<S: StateStorage>(
    config: &Config,
    storage: S,
) -> AppResult<App<HttpTransport, S, MemoryHistory>> {
    let transport = HttpTransport::new(config.api.request_timeout_ms)?;
    let remote = RemoteClient::new(transport, &config.api.base_url);
    let store = SessionStore::with_key(storage, config.storage.storage_key.clone());

    App::bootstrap(remote, store, Router::default()).await
}
