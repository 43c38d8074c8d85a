//! Report structures for API responses

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::models::{Account, Check, Transaction};
use super::types::{CheckDirection, CheckStatus, TransactionType};

/// Dashboard summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total_balance: i64,
    pub monthly_income: i64,
    pub monthly_expense: i64,
    pub pending_checks: usize,
    pub accounts_count: usize,
    /// e.g. "آبان ۱۴۰۳"
    pub current_month_jalali: String,
}

/// Income and expense of one Jalali month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTrendPoint {
    /// Month name in the display locale
    pub month_label: String,
    /// "YYYY/MM"
    pub period: String,
    pub income: i64,
    pub expense: i64,
}

/// Expense total of one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySlice {
    pub name: String,
    pub value: i64,
}

/// Dashboard chart data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trend {
    /// Oldest month first
    pub monthly_trend: Vec<MonthlyTrendPoint>,
    /// Largest total first
    pub category_distribution: Vec<CategorySlice>,
}

/// Account with its computed balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalanceView {
    #[serde(flatten)]
    pub account: Account,
    pub balance: i64,
}

/// Transaction as listed to users
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionView {
    pub id: String,
    pub account_id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: i64,
    pub category: Option<String>,
    pub description: Option<String>,
    /// "YYYY/MM/DD"
    pub date_jalali: String,
    pub account_name: String,
    pub bank_name: String,
}

impl TransactionView {
    pub fn new(transaction: Transaction, date_jalali: String, account: Option<&Account>) -> Self {
        let (account_name, bank_name) = account_names(account);
        Self {
            id: transaction.id,
            account_id: transaction.account_id,
            kind: transaction.kind,
            amount: transaction.amount,
            category: transaction.category,
            description: transaction.description,
            date_jalali,
            account_name,
            bank_name,
        }
    }
}

/// Check as listed to users
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckView {
    pub id: String,
    pub account_id: String,
    pub amount: i64,
    /// "YYYY/MM/DD"
    pub due_date_jalali: String,
    #[serde(rename = "type")]
    pub direction: CheckDirection,
    pub status: CheckStatus,
    pub description: Option<String>,
    pub account_name: String,
    pub bank_name: String,
}

impl CheckView {
    pub fn new(check: Check, due_date_jalali: String, account: Option<&Account>) -> Self {
        let (account_name, bank_name) = account_names(account);
        Self {
            id: check.id,
            account_id: check.account_id,
            amount: check.amount,
            due_date_jalali,
            direction: check.direction,
            status: check.status,
            description: check.description,
            account_name,
            bank_name,
        }
    }
}

const UNKNOWN_NAME: &str = "نامشخص";

fn account_names(account: Option<&Account>) -> (String, String) {
    match account {
        Some(account) => (account.account_name.clone(), account.bank_name.clone()),
        None => (UNKNOWN_NAME.to_string(), UNKNOWN_NAME.to_string()),
    }
}

/// Largest `top` categories, value descending then name ascending.
/// The rest are dropped, not merged.
pub fn rank_categories(totals: HashMap<String, i64>, top: usize) -> Vec<CategorySlice> {
    let mut slices: Vec<CategorySlice> = totals
        .into_iter()
        .map(|(name, value)| CategorySlice { name, value })
        .collect();
    slices.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
    slices.truncate(top);
    slices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_categories_truncates_without_merging() {
        let totals: HashMap<String, i64> = (1..=10).map(|i| (format!("c{:02}", i), i * 100)).collect();
        let ranked = rank_categories(totals, 8);
        assert_eq!(ranked.len(), 8);
        assert_eq!(ranked[0], CategorySlice { name: "c10".to_string(), value: 1000 });
        assert_eq!(ranked[7].value, 300);
        assert!(ranked.iter().all(|s| s.name != "c01" && s.name != "c02"));
    }

    #[test]
    fn test_rank_categories_ties_by_name() {
        let totals: HashMap<String, i64> = [("ب", 50), ("الف", 50), ("پ", 70)]
            .into_iter()
            .map(|(n, v)| (n.to_string(), v))
            .collect();
        let names: Vec<String> = rank_categories(totals, 8).into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["پ", "الف", "ب"]);
    }

    #[test]
    fn test_views_fall_back_when_account_missing() {
        let check = Check {
            id: "chk-1".to_string(),
            account_id: "gone".to_string(),
            amount: 10,
            due_date: chrono::Utc::now(),
            direction: CheckDirection::Received,
            status: CheckStatus::Pending,
            description: None,
        };
        let view = CheckView::new(check, "1403/09/01".to_string(), None);
        assert_eq!(view.account_name, "نامشخص");
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["type"], "received");
        assert_eq!(json["due_date_jalali"], "1403/09/01");
    }
}
