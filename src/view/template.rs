//! View templates
//!
//! A template is instantiated into a fresh [`View`]: a set of named slots
//! that controllers fill with content.

use std::collections::BTreeMap;

use crate::model::Transaction;

/// Slot names shared by templates and controllers
pub mod slot {
    pub const LOGIN_ERROR: &str = "loginError";
    pub const REGISTER_ERROR: &str = "registerError";
    pub const DESCRIPTION: &str = "description";
    pub const BALANCE: &str = "balance";
    pub const CURRENCY: &str = "currency";
    pub const TRANSACTIONS: &str = "transactions";
    pub const TRANSACTION_ERROR: &str = "transactionError";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    Login,
    Dashboard,
}

impl ViewId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewId::Login => "login",
            ViewId::Dashboard => "dashboard",
        }
    }

    fn slots(&self) -> &'static [&'static str] {
        match self {
            ViewId::Login => &[slot::LOGIN_ERROR, slot::REGISTER_ERROR],
            ViewId::Dashboard => &[
                slot::DESCRIPTION,
                slot::BALANCE,
                slot::CURRENCY,
                slot::TRANSACTIONS,
                slot::TRANSACTION_ERROR,
            ],
        }
    }
}

/// What a slot currently shows
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Content {
    #[default]
    Empty,
    Text(String),
    Rows(Vec<TransactionRow>),
}

/// One rendered line of the transaction table
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    pub date: String,
    pub object: String,
    pub amount: String,
}

impl TransactionRow {
    pub fn render(transaction: &Transaction) -> Self {
        Self {
            date: transaction.date.clone(),
            object: transaction.object.clone(),
            amount: format!("{:.2}", transaction.amount),
        }
    }
}

/// A materialized view tree
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    id: ViewId,
    slots: BTreeMap<&'static str, Content>,
}

impl View {
    /// Fresh copy of the template for `id`, every slot empty
    pub fn instantiate(id: ViewId) -> Self {
        Self {
            id,
            slots: id.slots().iter().map(|name| (*name, Content::Empty)).collect(),
        }
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn slot(&self, name: &str) -> Option<&Content> {
        self.slots.get(name)
    }

    /// Text content of a slot, if it holds text
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.slots.get(name)? {
            Content::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Replace a slot's content. Returns false if the template has no such slot.
    pub fn fill(&mut self, name: &str, content: Content) -> bool {
        match self.slots.get_mut(name) {
            Some(current) => {
                *current = content;
                true
            }
            None => false,
        }
    }

    pub fn slots(&self) -> impl Iterator<Item = (&'static str, &Content)> {
        self.slots.iter().map(|(name, content)| (*name, content))
    }
}
