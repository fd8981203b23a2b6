//! Login, registration and logout controllers

use super::{App, AppResult};
use crate::model::{Credentials, Registration};
use crate::remote::Transport;
use crate::router::{History, DEFAULT_ROUTE, LOGIN_ROUTE};
use crate::session::{SessionUpdate, StateStorage};
use crate::view::slot;

impl<T, S, H> App<T, S, H>
where
    T: Transport,
    S: StateStorage,
    H: History,
{
    /// Authenticate, then load the account and open the dashboard.
    ///
    /// The token is committed before the account fetch; a failed fetch
    /// leaves it in place.
    pub async fn login(&mut self, credentials: Credentials) -> AppResult<()> {
        tracing::info!(user = %credentials.user, "Login");

        let token = match self.remote.authenticate(&credentials).await {
            Ok(response) => match response.token() {
                Some(token) => token.to_string(),
                None => return self.show_error(slot::LOGIN_ERROR, "Login failed"),
            },
            Err(e) => return self.show_error(slot::LOGIN_ERROR, e.message()),
        };

        self.store
            .replace(SessionUpdate::new().token(Some(token.clone())))?;

        let account = match self.remote.fetch_account(&credentials.user, Some(&token)).await {
            Ok(account) => account,
            Err(e) => return self.show_error(slot::LOGIN_ERROR, e.message()),
        };

        self.store
            .replace(SessionUpdate::new().account(Some(account)))?;
        self.navigate(DEFAULT_ROUTE).await
    }

    /// Create the account, log in with the same credentials, then open the
    /// dashboard. Nothing is committed unless both steps succeed.
    pub async fn register(&mut self, registration: Registration) -> AppResult<()> {
        tracing::info!(user = %registration.user, "Register");

        let session = self.store.current();
        let account = match self.remote.register(&registration, session.token()).await {
            Ok(account) => account,
            Err(e) => return self.show_error(slot::REGISTER_ERROR, e.message()),
        };

        let token = match self.remote.authenticate(&registration.credentials()).await {
            Ok(response) => match response.token() {
                Some(token) => token.to_string(),
                None => return self.show_error(slot::REGISTER_ERROR, "Auto login failed"),
            },
            Err(e) => return self.show_error(slot::REGISTER_ERROR, e.message()),
        };

        self.store.replace(
            SessionUpdate::new()
                .token(Some(token))
                .account(Some(account)),
        )?;
        self.navigate(DEFAULT_ROUTE).await
    }

    /// Reset the session and show the login route
    pub async fn logout(&mut self) -> AppResult<()> {
        self.end_session()?;
        self.navigate(LOGIN_ROUTE).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use crate::model::{Credentials, Registration};
    use crate::remote::Method;
    use crate::router::{DEFAULT_ROUTE, LOGIN_ROUTE};
    use crate::view::slot;
    use serde_json::json;

    async fn on_login_page(app: &mut TestApp) {
        app.navigate(LOGIN_ROUTE).await.unwrap();
    }

    #[tokio::test]
    async fn test_login_commits_session_and_opens_dashboard() {
        let (mut app, transport, _storage) = app();
        on_login_page(&mut app).await;
        transport
            .reply(Method::Post, "/auth/login", json!({"token": "tok-9", "user": "alice"}))
            .reply(Method::Get, "/accounts/alice", account_json("alice", 99.0));

        app.login(Credentials::new("alice", "pw")).await.unwrap();

        let session = app.session();
        assert_eq!(session.token(), Some("tok-9"));
        assert_eq!(session.account().unwrap().user, "alice");
        assert_eq!(app.current_path(), DEFAULT_ROUTE);
        assert_eq!(app.surface().title(), "My Account");
        assert_eq!(app.surface().text(slot::BALANCE), Some("99.00"));

        let fetch = transport
            .requests()
            .into_iter()
            .find(|r| r.method == Method::Get)
            .unwrap();
        assert_eq!(fetch.header("Authorization"), Some("Bearer tok-9"));
    }

    #[tokio::test]
    async fn test_login_error_leaves_session_unchanged() {
        let (mut app, transport, _storage) = app();
        on_login_page(&mut app).await;
        transport.reply(Method::Post, "/auth/login", json!({"error": "Invalid password"}));

        app.login(Credentials::new("alice", "wrong")).await.unwrap();

        assert!(app.session().is_empty());
        assert_eq!(app.current_path(), LOGIN_ROUTE);
        assert_eq!(app.surface().text(slot::LOGIN_ERROR), Some("Invalid password"));
    }

    #[tokio::test]
    async fn test_login_without_token_reports_failure() {
        let (mut app, transport, _storage) = app();
        on_login_page(&mut app).await;
        transport.reply(Method::Post, "/auth/login", json!({"user": "alice"}));

        app.login(Credentials::new("alice", "pw")).await.unwrap();

        assert!(app.session().is_empty());
        assert_eq!(app.surface().text(slot::LOGIN_ERROR), Some("Login failed"));
    }

    #[tokio::test]
    async fn test_login_fetch_error_keeps_token() {
        let (mut app, transport, _storage) = app();
        on_login_page(&mut app).await;
        transport
            .reply(Method::Post, "/auth/login", json!({"token": "tok"}))
            .reply(Method::Get, "/accounts/alice", json!({"error": "User not found"}));

        app.login(Credentials::new("alice", "pw")).await.unwrap();

        let session = app.session();
        assert_eq!(session.token(), Some("tok"));
        assert!(session.account().is_none());
        assert_eq!(app.current_path(), LOGIN_ROUTE);
        assert_eq!(app.surface().text(slot::LOGIN_ERROR), Some("User not found"));
    }

    #[tokio::test]
    async fn test_register_then_auto_login() {
        let (mut app, transport, _storage) = app();
        on_login_page(&mut app).await;
        transport
            .reply(Method::Post, "/auth/register", account_json("bob", 20.0))
            .reply(Method::Post, "/auth/login", json!({"token": "tok-b"}))
            .reply(Method::Get, "/accounts/bob", account_json("bob", 20.0));

        let registration = Registration::new("bob", "pw", "EUR").balance(20.0);
        app.register(registration).await.unwrap();

        let session = app.session();
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("tok-b"));
        assert_eq!(app.current_path(), DEFAULT_ROUTE);

        let login = transport
            .requests()
            .into_iter()
            .find(|r| r.url.ends_with("/auth/login"))
            .unwrap();
        let body: serde_json::Value = serde_json::from_str(login.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"user": "bob", "password": "pw"}));
    }

    #[tokio::test]
    async fn test_register_error_is_shown() {
        let (mut app, transport, _storage) = app();
        on_login_page(&mut app).await;
        transport.reply(Method::Post, "/auth/register", json!({"error": "User already exists"}));

        app.register(Registration::new("bob", "pw", "EUR")).await.unwrap();

        assert!(app.session().is_empty());
        assert_eq!(app.surface().text(slot::REGISTER_ERROR), Some("User already exists"));
        assert_eq!(transport.count(Method::Post, "/auth/login"), 0);
    }

    #[tokio::test]
    async fn test_auto_login_failure_uses_register_slot() {
        let (mut app, transport, _storage) = app();
        on_login_page(&mut app).await;
        transport
            .reply(Method::Post, "/auth/register", account_json("bob", 0.0))
            .reply(Method::Post, "/auth/login", json!({"error": "invalid credentials"}));

        app.register(Registration::new("bob", "pw", "EUR")).await.unwrap();

        assert!(app.session().is_empty());
        assert_eq!(app.surface().text(slot::REGISTER_ERROR), Some("invalid credentials"));
        assert_eq!(app.surface().text(slot::LOGIN_ERROR), None);
        assert_eq!(app.current_path(), LOGIN_ROUTE);
    }

    #[tokio::test]
    async fn test_auto_login_without_token() {
        let (mut app, transport, _storage) = app();
        on_login_page(&mut app).await;
        transport
            .reply(Method::Post, "/auth/register", account_json("bob", 0.0))
            .reply(Method::Post, "/auth/login", json!({}));

        app.register(Registration::new("bob", "pw", "EUR")).await.unwrap();

        assert!(app.session().is_empty());
        assert_eq!(app.surface().text(slot::REGISTER_ERROR), Some("Auto login failed"));
    }

    #[tokio::test]
    async fn test_logout_clears_and_navigates() {
        let (mut app, _transport, _storage) = app();
        sign_in(&mut app, "alice", 5.0);

        app.logout().await.unwrap();

        assert!(app.session().is_empty());
        assert_eq!(app.current_path(), LOGIN_ROUTE);
        assert_eq!(app.surface().title(), "Login");
    }
}
