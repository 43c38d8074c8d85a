//! Ledger aggregation and Jalali-calendar reporting
//!
//! Records come from a [`LedgerStore`]; [`LedgerAggregator`] derives
//! balances and windowed sums from them and [`ReportEngine`] assembles the
//! dashboard reports.

pub mod aggregator;
pub mod engine;
pub mod error;
pub mod models;
pub mod reports;
pub mod store;
pub mod time;
pub mod types;

pub use aggregator::{checked_add, LedgerAggregator};
pub use engine::{ReportEngine, ReportSettings};
pub use error::{CoreError, CoreResult, ErrorCode, ErrorDetails, ErrorSeverity};
pub use models::{
    Account, AccountDraft, AccountUpdate, Check, CheckDraft, CheckFilter, CheckUpdate, LedgerEntry,
    Transaction, TransactionDraft, TransactionFilter, TransactionUpdate, DEFAULT_CATEGORIES,
};
pub use reports::{
    AccountBalanceView, CategorySlice, CheckView, MonthlyTrendPoint, Stats, TransactionView, Trend,
};
pub use store::{InMemoryStore, LedgerFile, LedgerStore, StoreRef};
pub use time::{Clock, FixedClock, SystemClock};
pub use types::{CheckDirection, CheckStatus, TransactionType};
