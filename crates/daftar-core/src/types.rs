//! Basic types for the core ledger module

use serde::{Deserialize, Serialize};

/// Transaction direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming into the account
    Income,
    /// Money leaving the account
    Expense,
}

impl TransactionType {
    /// Whether a signed amount goes this way; zero goes neither way
    pub fn matches(&self, signed_amount: i64) -> bool {
        match self {
            TransactionType::Income => signed_amount > 0,
            TransactionType::Expense => signed_amount < 0,
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Income => write!(f, "income"),
            TransactionType::Expense => write!(f, "expense"),
        }
    }
}

/// Check direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckDirection {
    /// A check written to us
    Received,
    /// A check we wrote
    Paid,
}

impl std::fmt::Display for CheckDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckDirection::Received => write!(f, "received"),
            CheckDirection::Paid => write!(f, "paid"),
        }
    }
}

/// Check status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// Not yet cleared
    Pending,
    /// Cleared
    Passed,
    /// Returned unpaid
    Bounced,
}

impl Default for CheckStatus {
    fn default() -> Self {
        CheckStatus::Pending
    }
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Pending => write!(f, "pending"),
            CheckStatus::Passed => write!(f, "passed"),
            CheckStatus::Bounced => write!(f, "bounced"),
        }
    }
}
