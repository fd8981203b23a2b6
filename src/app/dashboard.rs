//! Dashboard controller

use super::{App, AppResult};
use crate::remote::Transport;
use crate::router::History;
use crate::session::{SessionUpdate, StateStorage};
use crate::view::{slot, Content, TransactionRow};

impl<T, S, H> App<T, S, H>
where
    T: Transport,
    S: StateStorage,
    H: History,
{
    /// Re-fetch the account and redraw the dashboard.
    ///
    /// Missing credentials or any fetch error invalidate the session and
    /// navigate to the login route.
    pub async fn refresh(&mut self) -> AppResult<()> {
        if !self.update_account_data().await? || !self.update_dashboard() {
            return self.logout().await;
        }
        Ok(())
    }

    /// Fetch and commit the account. `Ok(false)` means the session is invalid.
    pub(crate) async fn update_account_data(&mut self) -> AppResult<bool> {
        let session = self.store.current();
        let (Some(account), Some(token)) = (session.account(), session.token()) else {
            tracing::info!("Refresh without credentials");
            return Ok(false);
        };

        match self.remote.fetch_account(&account.user, Some(token)).await {
            Ok(fresh) => {
                tracing::debug!(user = %fresh.user, transactions = fresh.transactions.len(), "Account refreshed");
                self.store.replace(SessionUpdate::new().account(Some(fresh)))?;
                Ok(true)
            }
            Err(e) => {
                tracing::warn!(user = %account.user, error = %e, kind = e.kind(), "Account fetch rejected, invalidating session");
                Ok(false)
            }
        }
    }

    /// Fill the dashboard slots from the cached account.
    /// Returns false if there is no account to show.
    pub(crate) fn update_dashboard(&mut self) -> bool {
        let session = self.store.current();
        let Some(account) = session.account() else {
            return false;
        };

        let rows = account
            .transactions
            .iter()
            .map(TransactionRow::render)
            .collect();

        self.surface
            .update_element(slot::DESCRIPTION, Content::Text(account.description.clone()));
        self.surface
            .update_element(slot::BALANCE, Content::Text(format!("{:.2}", account.balance)));
        self.surface
            .update_element(slot::CURRENCY, Content::Text(account.currency.clone()));
        self.surface
            .update_element(slot::TRANSACTIONS, Content::Rows(rows));
        true
    }
}
