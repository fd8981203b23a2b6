//! End-to-end flows against a stub Account Service over real HTTP.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use bankline::view::slot;
use bankline::{Config, Credentials, Registration, DEFAULT_ROUTE, LOGIN_ROUTE};
use serde_json::{json, Value};
use tempfile::tempdir;

#[derive(Default)]
struct Bank {
    accounts: HashMap<String, Value>,
    passwords: HashMap<String, String>,
    next_id: i64,
    /// Bumped to invalidate every issued token
    epoch: u32,
}

type Shared = Arc<Mutex<Bank>>;

fn token_for(user: &str, epoch: u32) -> String {
    format!("tok-{}-{}", user, epoch)
}

fn authorized(bank: &Bank, headers: &HeaderMap, user: &str) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", token_for(user, bank.epoch)))
        .unwrap_or(false)
}

async fn register(State(bank): State<Shared>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let mut bank = bank.lock().unwrap();
    let user = body["user"].as_str().unwrap_or_default().to_string();
    if user.is_empty() || bank.accounts.contains_key(&user) {
        return (StatusCode::CONFLICT, Json(json!({"error": "User already exists"})));
    }

    let account = json!({
        "user": user,
        "currency": body["currency"],
        "description": body.get("description").cloned().unwrap_or(json!("")),
        "balance": body.get("balance").and_then(Value::as_f64).unwrap_or(0.0),
        "transactions": []
    });
    bank.passwords
        .insert(user.clone(), body["password"].as_str().unwrap_or_default().to_string());
    bank.accounts.insert(user, account.clone());
    (StatusCode::CREATED, Json(account))
}

async fn login(State(bank): State<Shared>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let bank = bank.lock().unwrap();
    let user = body["user"].as_str().unwrap_or_default();
    match bank.passwords.get(user) {
        Some(password) if Some(password.as_str()) == body["password"].as_str() => (
            StatusCode::OK,
            Json(json!({"token": token_for(user, bank.epoch), "user": user})),
        ),
        _ => (StatusCode::UNAUTHORIZED, Json(json!({"error": "Invalid credentials"}))),
    }
}

async fn get_account(
    State(bank): State<Shared>,
    Path(user): Path<String>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    let bank = bank.lock().unwrap();
    if !authorized(&bank, &headers, &user) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "Token required"})));
    }
    match bank.accounts.get(&user) {
        Some(account) => (StatusCode::OK, Json(account.clone())),
        None => (StatusCode::NOT_FOUND, Json(json!({"error": "User does not exist"}))),
    }
}

async fn add_transaction(
    State(bank): State<Shared>,
    Path(user): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut bank = bank.lock().unwrap();
    if !authorized(&bank, &headers, &user) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "Token required"})));
    }

    let amount = match body["amount"].as_str().and_then(|a| a.parse::<f64>().ok()) {
        Some(amount) => amount,
        None => return (StatusCode::BAD_REQUEST, Json(json!({"error": "Amount must be a number"}))),
    };

    bank.next_id += 1;
    let transaction = json!({
        "id": bank.next_id,
        "date": body["date"],
        "object": body["object"],
        "amount": amount
    });

    let Some(account) = bank.accounts.get_mut(&user) else {
        return (StatusCode::NOT_FOUND, Json(json!({"error": "User does not exist"})));
    };
    let balance = account["balance"].as_f64().unwrap_or(0.0) + amount;
    account["balance"] = json!(balance);
    account["transactions"].as_array_mut().unwrap().push(transaction.clone());

    (StatusCode::CREATED, Json(transaction))
}

async fn spawn_bank() -> (SocketAddr, Shared) {
    let bank = Shared::default();
    let router = Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/accounts/:user", get(get_account))
        .route("/api/accounts/:user/transactions", post(add_transaction))
        .with_state(bank.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (addr, bank)
}

fn config(addr: SocketAddr, state_dir: &std::path::Path) -> Config {
    let mut config = Config::default();
    config.api.base_url = format!("http://{}/api", addr);
    config.api.request_timeout_ms = 5_000;
    config.storage.state_dir = state_dir.to_string_lossy().to_string();
    config
}

#[tokio::test]
async fn test_register_transact_and_restart() {
    let (addr, bank) = spawn_bank().await;
    let dir = tempdir().unwrap();
    let config = config(addr, dir.path());

    let mut app = bankline::app::connect(&config).await.unwrap();
    assert_eq!(app.current_path(), LOGIN_ROUTE);

    let registration = Registration::new("alice", "pw", "EUR")
        .balance(100.0)
        .description("Everyday");
    app.register(registration).await.unwrap();
    assert_eq!(app.current_path(), DEFAULT_ROUTE);
    assert_eq!(app.surface().text(slot::BALANCE), Some("100.00"));

    app.add_transaction_dialog();
    {
        let draft = app.transaction_draft_mut();
        draft.date = "2024-01-01".to_string();
        draft.object = "Coffee".to_string();
        draft.amount = "-4.50".to_string();
    }
    app.confirm_transaction().await.unwrap();

    assert_eq!(app.session().account().unwrap().balance, 95.5);
    assert_eq!(app.surface().rows(slot::TRANSACTIONS).len(), 1);
    assert_eq!(bank.lock().unwrap().accounts["alice"]["balance"], json!(95.5));
    let before = app.session();
    drop(app);

    let restarted = bankline::app::connect(&config).await.unwrap();
    assert_eq!(restarted.current_path(), DEFAULT_ROUTE);
    assert_eq!(*restarted.session(), *before);
    assert_eq!(restarted.surface().text(slot::BALANCE), Some("95.50"));
}

#[tokio::test]
async fn test_bad_amount_is_surfaced() {
    let (addr, _bank) = spawn_bank().await;
    let dir = tempdir().unwrap();
    let mut app = bankline::app::connect(&config(addr, dir.path())).await.unwrap();

    app.register(Registration::new("bob", "pw", "USD")).await.unwrap();
    app.add_transaction_dialog();
    app.transaction_draft_mut().amount = "lots".to_string();
    app.confirm_transaction().await.unwrap();

    assert_eq!(
        app.surface().text(slot::TRANSACTION_ERROR),
        Some("Amount must be a number")
    );
    assert!(app.session().account().unwrap().transactions.is_empty());
}

#[tokio::test]
async fn test_wrong_password_shows_login_error() {
    let (addr, _bank) = spawn_bank().await;
    let dir = tempdir().unwrap();
    let config = config(addr, dir.path());

    let mut app = bankline::app::connect(&config).await.unwrap();
    app.register(Registration::new("carol", "right", "EUR")).await.unwrap();
    app.logout().await.unwrap();

    app.login(Credentials::new("carol", "wrong")).await.unwrap();

    assert!(app.session().is_empty());
    assert_eq!(app.surface().text(slot::LOGIN_ERROR), Some("Invalid credentials"));

    app.login(Credentials::new("carol", "right")).await.unwrap();
    assert!(app.session().is_authenticated());
    assert_eq!(app.surface().title(), "My Account");
}

#[tokio::test]
async fn test_revoked_token_forces_logout_on_restart() {
    let (addr, bank) = spawn_bank().await;
    let dir = tempdir().unwrap();
    let config = config(addr, dir.path());

    let mut app = bankline::app::connect(&config).await.unwrap();
    app.register(Registration::new("dave", "pw", "EUR")).await.unwrap();
    drop(app);

    bank.lock().unwrap().epoch += 1;

    let restarted = bankline::app::connect(&config).await.unwrap();
    assert!(restarted.session().is_empty());
    assert_eq!(restarted.current_path(), LOGIN_ROUTE);
}

#[tokio::test]
async fn test_unreachable_service_is_reported_inline() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let dir = tempdir().unwrap();
    let mut app = bankline::app::connect(&config(addr, dir.path())).await.unwrap();

    app.login(Credentials::new("erin", "pw")).await.unwrap();

    assert!(app.session().is_empty());
    let message = app.surface().text(slot::LOGIN_ERROR).unwrap();
    assert!(!message.is_empty());
    assert_eq!(app.current_path(), LOGIN_ROUTE);
}
