//! Core data models for the ledger

use chrono::{DateTime, Utc};
use daftar_calendar::jalali_to_instant;
use serde::{Deserialize, Serialize};

use super::error::{CoreError, CoreResult};
use super::types::{CheckDirection, CheckStatus, TransactionType};

/// Categories offered to users out of the box
pub const DEFAULT_CATEGORIES: [&str; 12] = [
    "خوراک",
    "حمل‌ونقل",
    "اجاره",
    "قبوض",
    "پوشاک",
    "سلامت",
    "تفریح",
    "آموزش",
    "حقوق",
    "فروش",
    "هدیه",
    "سایر",
];

fn default_color() -> String {
    "#0F766E".to_string()
}

/// Bank account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique account identifier
    pub id: String,
    /// Bank name (e.g., "ملت")
    pub bank_name: String,
    /// User-facing account name
    pub account_name: String,
    /// Card or account number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    /// IBAN-style Sheba number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheba: Option<String>,
    /// Balance before any recorded transaction, in minor units
    #[serde(default)]
    pub initial_balance: i64,
    /// Display color
    #[serde(default = "default_color")]
    pub color: String,
}

/// A recorded transaction. `amount` is a magnitude; `kind` carries the sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub account_id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: i64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub date: DateTime<Utc>,
}

impl Transaction {
    /// Positive for income, negative for expense
    pub fn signed_amount(&self) -> i64 {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }

    /// Flatten into the shape the aggregator works on
    pub fn to_entry(&self) -> LedgerEntry {
        LedgerEntry {
            account_id: self.account_id.clone(),
            signed_amount: self.signed_amount(),
            date: self.date,
            category: self.category.clone(),
        }
    }
}

/// A signed movement of money, derived from a transaction per request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub account_id: String,
    /// Positive = income, negative = expense
    pub signed_amount: i64,
    pub date: DateTime<Utc>,
    pub category: Option<String>,
}

/// A post-dated check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    pub id: String,
    pub account_id: String,
    pub amount: i64,
    pub due_date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub direction: CheckDirection,
    #[serde(default)]
    pub status: CheckStatus,
    #[serde(default)]
    pub description: Option<String>,
}

// ==================== Drafts ====================
//
// Drafts are records as written by a user or a ledger file: dates are Jalali
// strings and ids are optional.

/// Account before it is stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountDraft {
    #[serde(default)]
    pub id: Option<String>,
    pub bank_name: String,
    pub account_name: String,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub sheba: Option<String>,
    #[serde(default)]
    pub initial_balance: i64,
    #[serde(default = "default_color")]
    pub color: String,
}

impl AccountDraft {
    pub fn into_account(self, id: String) -> Account {
        Account {
            id,
            bank_name: self.bank_name,
            account_name: self.account_name,
            account_number: self.account_number,
            sheba: self.sheba,
            initial_balance: self.initial_balance,
            color: self.color,
        }
    }
}

/// Transaction before it is stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionDraft {
    #[serde(default)]
    pub id: Option<String>,
    pub account_id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: i64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// "YYYY/MM/DD"
    pub date_jalali: String,
}

impl TransactionDraft {
    pub fn into_transaction(self, id: String) -> CoreResult<Transaction> {
        ensure_magnitude(self.amount)?;
        Ok(Transaction {
            id,
            date: jalali_to_instant(&self.date_jalali)?,
            account_id: self.account_id,
            kind: self.kind,
            amount: self.amount,
            category: self.category,
            description: self.description,
        })
    }
}

/// Check before it is stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckDraft {
    #[serde(default)]
    pub id: Option<String>,
    pub account_id: String,
    pub amount: i64,
    /// "YYYY/MM/DD"
    pub due_date_jalali: String,
    #[serde(rename = "type")]
    pub direction: CheckDirection,
    #[serde(default)]
    pub status: CheckStatus,
    #[serde(default)]
    pub description: Option<String>,
}

impl CheckDraft {
    pub fn into_check(self, id: String) -> CoreResult<Check> {
        ensure_magnitude(self.amount)?;
        Ok(Check {
            id,
            due_date: jalali_to_instant(&self.due_date_jalali)?,
            account_id: self.account_id,
            amount: self.amount,
            direction: self.direction,
            status: self.status,
            description: self.description,
        })
    }
}

fn ensure_magnitude(amount: i64) -> CoreResult<()> {
    if amount < 0 {
        return Err(CoreError::InvalidRecord {
            message: format!("amount must not be negative, got {}", amount),
        });
    }
    Ok(())
}

// ==================== Partial Updates ====================

/// Partial account update; the initial balance is fixed once created
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountUpdate {
    pub bank_name: Option<String>,
    pub account_name: Option<String>,
    pub account_number: Option<String>,
    pub sheba: Option<String>,
    pub color: Option<String>,
}

impl AccountUpdate {
    pub fn apply(self, account: &mut Account) {
        if let Some(bank_name) = self.bank_name {
            account.bank_name = bank_name;
        }
        if let Some(account_name) = self.account_name {
            account.account_name = account_name;
        }
        if self.account_number.is_some() {
            account.account_number = self.account_number;
        }
        if self.sheba.is_some() {
            account.sheba = self.sheba;
        }
        if let Some(color) = self.color {
            account.color = color;
        }
    }
}

/// Partial transaction update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionUpdate {
    pub account_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<TransactionType>,
    pub amount: Option<i64>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date_jalali: Option<String>,
}

impl TransactionUpdate {
    /// Apply every present field, or none of them if any is invalid
    pub fn apply(self, transaction: &mut Transaction) -> CoreResult<()> {
        let date = self.date_jalali.as_deref().map(jalali_to_instant).transpose()?;
        if let Some(amount) = self.amount {
            ensure_magnitude(amount)?;
            transaction.amount = amount;
        }
        if let Some(date) = date {
            transaction.date = date;
        }
        if let Some(account_id) = self.account_id {
            transaction.account_id = account_id;
        }
        if let Some(kind) = self.kind {
            transaction.kind = kind;
        }
        if self.category.is_some() {
            transaction.category = self.category;
        }
        if self.description.is_some() {
            transaction.description = self.description;
        }
        Ok(())
    }
}

/// Partial check update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckUpdate {
    pub account_id: Option<String>,
    pub amount: Option<i64>,
    pub due_date_jalali: Option<String>,
    #[serde(rename = "type")]
    pub direction: Option<CheckDirection>,
    pub status: Option<CheckStatus>,
    pub description: Option<String>,
}

impl CheckUpdate {
    /// Apply every present field, or none of them if any is invalid
    pub fn apply(self, check: &mut Check) -> CoreResult<()> {
        let due_date = self.due_date_jalali.as_deref().map(jalali_to_instant).transpose()?;
        if let Some(amount) = self.amount {
            ensure_magnitude(amount)?;
            check.amount = amount;
        }
        if let Some(due_date) = due_date {
            check.due_date = due_date;
        }
        if let Some(account_id) = self.account_id {
            check.account_id = account_id;
        }
        if let Some(direction) = self.direction {
            check.direction = direction;
        }
        if let Some(status) = self.status {
            check.status = status;
        }
        if self.description.is_some() {
            check.description = self.description;
        }
        Ok(())
    }
}

// ==================== Filters ====================

/// Query filter for transaction listings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionFilter {
    pub account_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<TransactionType>,
    pub category: Option<String>,
}

impl TransactionFilter {
    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.account_id
            .as_ref()
            .map_or(true, |id| *id == transaction.account_id)
            && self.kind.map_or(true, |kind| kind == transaction.kind)
            && self
                .category
                .as_ref()
                .map_or(true, |category| transaction.category.as_ref() == Some(category))
    }
}

/// Query filter for check listings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckFilter {
    pub account_id: Option<String>,
    #[serde(rename = "type")]
    pub direction: Option<CheckDirection>,
    pub status: Option<CheckStatus>,
}

impl CheckFilter {
    /// Filter matching pending checks of every account
    pub fn pending() -> Self {
        Self {
            status: Some(CheckStatus::Pending),
            ..Self::default()
        }
    }

    pub fn matches(&self, check: &Check) -> bool {
        self.account_id.as_ref().map_or(true, |id| *id == check.account_id)
            && self.direction.map_or(true, |direction| direction == check.direction)
            && self.status.map_or(true, |status| status == check.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_transaction() -> Transaction {
        TransactionDraft {
            id: None,
            account_id: "acc-1".to_string(),
            kind: TransactionType::Expense,
            amount: 500_000,
            category: Some("خوراک".to_string()),
            description: None,
            date_jalali: "1403/08/16".to_string(),
        }
        .into_transaction("txn-1".to_string())
        .unwrap()
    }

    #[test]
    fn test_draft_converts_jalali_date() {
        let transaction = sample_transaction();
        assert_eq!(transaction.date, Utc.with_ymd_and_hms(2024, 11, 6, 0, 0, 0).unwrap());
        assert_eq!(transaction.signed_amount(), -500_000);

        let entry = transaction.to_entry();
        assert_eq!(entry.signed_amount, -500_000);
        assert!(TransactionType::Expense.matches(entry.signed_amount));
    }

    #[test]
    fn test_draft_rejects_bad_date_and_amount() {
        let draft = TransactionDraft {
            id: None,
            account_id: "acc-1".to_string(),
            kind: TransactionType::Income,
            amount: 10,
            category: None,
            description: None,
            date_jalali: "1404/12/30".to_string(),
        };
        let err = draft.clone().into_transaction("x".to_string()).unwrap_err();
        assert_eq!(err.code(), crate::error::ErrorCode::OutOfRange);

        let negative = TransactionDraft {
            amount: -10,
            date_jalali: "1403/01/01".to_string(),
            ..draft
        };
        let err = negative.into_transaction("x".to_string()).unwrap_err();
        assert_eq!(err.code(), crate::error::ErrorCode::InvalidRecord);
    }

    #[test]
    fn test_transaction_update_is_all_or_nothing() {
        let mut transaction = sample_transaction();
        let before = transaction.clone();

        let update = TransactionUpdate {
            amount: Some(1),
            date_jalali: Some("1403-08-20".to_string()),
            ..Default::default()
        };
        assert!(update.apply(&mut transaction).is_err());
        assert_eq!(transaction, before);

        let update = TransactionUpdate {
            kind: Some(TransactionType::Income),
            date_jalali: Some("1403/08/20".to_string()),
            ..Default::default()
        };
        update.apply(&mut transaction).unwrap();
        assert_eq!(transaction.signed_amount(), 500_000);
        assert_eq!(transaction.date, Utc.with_ymd_and_hms(2024, 11, 10, 0, 0, 0).unwrap());
        assert_eq!(transaction.category.as_deref(), Some("خوراک"));
    }

    #[test]
    fn test_account_update_keeps_missing_fields() {
        let mut account = AccountDraft {
            id: None,
            bank_name: "ملت".to_string(),
            account_name: "جاری".to_string(),
            account_number: Some("1234".to_string()),
            sheba: None,
            initial_balance: 5_000_000,
            color: default_color(),
        }
        .into_account("acc-1".to_string());

        AccountUpdate {
            account_name: Some("پس‌انداز".to_string()),
            ..Default::default()
        }
        .apply(&mut account);

        assert_eq!(account.account_name, "پس‌انداز");
        assert_eq!(account.bank_name, "ملت");
        assert_eq!(account.account_number.as_deref(), Some("1234"));
        assert_eq!(account.initial_balance, 5_000_000);
    }

    #[test]
    fn test_filters() {
        let transaction = sample_transaction();
        assert!(TransactionFilter::default().matches(&transaction));
        assert!(TransactionFilter {
            kind: Some(TransactionType::Expense),
            category: Some("خوراک".to_string()),
            ..Default::default()
        }
        .matches(&transaction));
        assert!(!TransactionFilter {
            account_id: Some("acc-2".to_string()),
            ..Default::default()
        }
        .matches(&transaction));

        let check = CheckDraft {
            id: None,
            account_id: "acc-1".to_string(),
            amount: 1_000,
            due_date_jalali: "1403/09/01".to_string(),
            direction: CheckDirection::Paid,
            status: CheckStatus::default(),
            description: None,
        }
        .into_check("chk-1".to_string())
        .unwrap();
        assert!(CheckFilter::pending().matches(&check));
        assert!(!CheckFilter {
            direction: Some(CheckDirection::Received),
            ..Default::default()
        }
        .matches(&check));
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_value(sample_transaction()).unwrap();
        assert_eq!(json["type"], "expense");
        let check: CheckDraft = serde_json::from_str(
            r#"{"account_id":"a","amount":5,"due_date_jalali":"1403/01/01","type":"received"}"#,
        )
        .unwrap();
        assert_eq!(check.status, CheckStatus::Pending);
    }
}
