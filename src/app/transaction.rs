//! Add-transaction controller
//!
//! A confirmed transaction is merged into the cached account from the
//! server's reply; the account is not re-fetched.

use super::{App, AppResult};
use crate::remote::Transport;
use crate::router::History;
use crate::session::{SessionUpdate, StateStorage};
use crate::view::slot;

impl<T, S, H> App<T, S, H>
where
    T: Transport,
    S: StateStorage,
    H: History,
{
    /// Open the dialog with a blank form dated today
    pub fn add_transaction_dialog(&mut self) {
        self.surface.open_dialog();
    }

    pub fn cancel_transaction(&mut self) {
        self.surface.close_dialog();
    }

    /// Close the dialog, post the form, and merge the booked transaction
    pub async fn confirm_transaction(&mut self) -> AppResult<()> {
        let draft = self.surface.close_dialog();

        let session = self.store.current();
        let (Some(account), Some(token)) = (session.account(), session.token()) else {
            tracing::info!("Transaction confirmed without a signed-in session");
            return self.logout().await;
        };

        let booked = match self
            .remote
            .post_transaction(&account.user, &draft, Some(token))
            .await
        {
            Ok(transaction) => transaction,
            Err(e) => return self.show_error(slot::TRANSACTION_ERROR, e.message()),
        };

        // Merge over whatever is current once the reply is in.
        let current = self.store.current();
        let (Some(account), Some(_)) = (current.account(), current.token()) else {
            return self.logout().await;
        };
        tracing::info!(
            user = %account.user,
            id = %booked.id,
            amount = booked.amount,
            "Transaction booked"
        );
        let updated = account.with_transaction(booked);
        self.store.replace(SessionUpdate::new().account(Some(updated)))?;

        if !self.update_dashboard() {
            return self.logout().await;
        }
        Ok(())
    }
}
