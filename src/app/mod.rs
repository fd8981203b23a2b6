//! Application Context
//!
//! [`App`] owns the remote client, the session store, the router and the
//! mount surface. View controllers are async methods on it; each flow runs
//! to completion before the next one starts, so the session is never
//! read-then-written by two flows at once.
//!
//! ## Controllers
//!
//! - `auth`: login, registration (with implicit login), logout
//! - `dashboard`: refresh and dashboard rendering
//! - `transaction`: add-transaction dialog and optimistic merge

mod auth;
mod bootstrap;
mod dashboard;
mod error;
mod transaction;

pub use bootstrap::{connect, connect_ephemeral};
pub use error::{AppError, AppResult};

use std::sync::Arc;

use crate::model::TransactionDraft;
use crate::remote::{HttpTransport, RemoteClient, Transport};
use crate::router::{History, MemoryHistory, MountHook, RenderOutcome, Router, LOGIN_ROUTE};
use crate::session::{FileStorage, Session, SessionStore, SessionUpdate, StateStorage};
use crate::view::{Content, Surface};

pub struct App<T = HttpTransport, S = FileStorage, H = MemoryHistory>
where
    T: Transport,
    S: StateStorage,
    H: History,
{
    remote: RemoteClient<T>,
    store: SessionStore<S>,
    router: Router<H>,
    surface: Surface,
}

impl<T, S, H> App<T, S, H>
where
    T: Transport,
    S: StateStorage,
    H: History,
{
    /// Wire the components together without restoring or rendering.
    /// See [`App::bootstrap`] for the startup sequence.
    pub fn new(remote: RemoteClient<T>, store: SessionStore<S>, router: Router<H>) -> Self {
        Self {
            remote,
            store,
            router,
            surface: Surface::new(),
        }
    }

    pub fn session(&self) -> Arc<Session> {
        self.store.current()
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn current_path(&self) -> &str {
        self.router.current_path()
    }

    pub fn router(&self) -> &Router<H> {
        &self.router
    }

    /// The add-transaction form, for the UI layer to fill in
    pub fn transaction_draft_mut(&mut self) -> &mut TransactionDraft {
        self.surface.draft_mut()
    }

    /// Push `path` into history and render it
    pub async fn navigate(&mut self, path: &str) -> AppResult<()> {
        self.router.push(path);
        self.update_route().await
    }

    /// Render the current path and run its mount hook.
    ///
    /// Redirects and forced logouts are followed here, so the hook never
    /// re-enters navigation.
    pub(crate) async fn update_route(&mut self) -> AppResult<()> {
        loop {
            match self.router.render(&mut self.surface) {
                RenderOutcome::Redirect(target) => self.router.push(target),
                RenderOutcome::Mounted(route) => match route.on_mount {
                    None => return Ok(()),
                    Some(MountHook::Refresh) => {
                        if self.update_account_data().await? && self.update_dashboard() {
                            return Ok(());
                        }
                        self.end_session()?;
                        self.router.push(LOGIN_ROUTE);
                    }
                },
            }
        }
    }

    /// Reset the session to empty without navigating
    pub(crate) fn end_session(&mut self) -> AppResult<()> {
        tracing::info!("Session ended");
        self.store.replace(SessionUpdate::cleared())?;
        Ok(())
    }

    /// Show `message` in the inline error slot and halt the flow
    pub(crate) fn show_error(&mut self, slot: &str, message: &str) -> AppResult<()> {
        tracing::warn!(slot, message, "Flow halted");
        self.surface
            .update_element(slot, Content::Text(message.to_string()));
        Ok(())
    }
}
