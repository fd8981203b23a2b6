//! Domain Model
//!
//! Account and transaction types exchanged with the Account Service,
//! plus the form payloads the client submits.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Account snapshot as returned by the Account Service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub user: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub currency: String,
    /// Server-assigned insertion order
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Account {
    /// Produce a new account with `transaction` appended and its amount
    /// applied to the balance. The receiver is left untouched.
    pub fn with_transaction(&self, transaction: Transaction) -> Account {
        let mut transactions = Vec::with_capacity(self.transactions.len() + 1);
        transactions.extend(self.transactions.iter().cloned());
        let balance = self.balance + transaction.amount;
        transactions.push(transaction);

        Account {
            user: self.user.clone(),
            description: self.description.clone(),
            balance,
            currency: self.currency.clone(),
            transactions,
        }
    }
}

/// A booked transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub date: String,
    pub object: String,
    pub amount: f64,
}

/// Server-assigned transaction identifier.
///
/// The Account Service is free to hand out numeric or string ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransactionId {
    Number(i64),
    Text(String),
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionId::Number(n) => write!(f, "{}", n),
            TransactionId::Text(s) => f.write_str(s),
        }
    }
}

/// Login form payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }
}

/// Registration form payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    pub user: String,
    pub password: String,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<f64>,
}

impl Registration {
    pub fn new(
        user: impl Into<String>,
        password: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
            currency: currency.into(),
            description: None,
            balance: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn balance(mut self, balance: f64) -> Self {
        self.balance = Some(balance);
        self
    }

    /// Credentials used for the implicit login after registration
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.user.clone(), self.password.clone())
    }
}

/// Contents of the add-transaction form.
///
/// Fields are sent as typed by the user; the Account Service owns parsing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransactionDraft {
    pub date: String,
    pub object: String,
    pub amount: String,
}

impl TransactionDraft {
    /// Blank form with today's date pre-filled
    pub fn today() -> Self {
        Self {
            date: chrono::Local::now().date_naive().format("%Y-%m-%d").to_string(),
            ..Default::default()
        }
    }
}
