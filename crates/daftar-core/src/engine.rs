//! Dashboard reports computed from store snapshots

use chrono::{DateTime, Utc};
use daftar_calendar::{instant_to_jalali_string, JalaliMonth, Locale};
use daftar_config::Config;
use std::collections::HashMap;

use super::aggregator::{checked_add, LedgerAggregator};
use super::error::{CoreError, CoreResult, DefaultErrorLogger, ErrorContext, ErrorLogger};
use super::models::{Account, Check, CheckFilter, LedgerEntry, TransactionFilter};
use super::reports::{
    rank_categories, AccountBalanceView, CheckView, MonthlyTrendPoint, Stats, TransactionView, Trend,
};
use super::store::StoreRef;
use super::types::{CheckStatus, TransactionType};

/// Report knobs taken from the `display` and `reports` config sections
#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub locale: Locale,
    pub trend_months: u32,
    pub top_categories: usize,
    pub other_category: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl ReportSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            locale: config.display.locale,
            trend_months: config.reports.trend_months,
            top_categories: config.reports.top_categories,
            other_category: config.reports.other_category.clone(),
        }
    }
}

/// Computes reports over a ledger store. Holds no state between calls.
pub struct ReportEngine {
    store: StoreRef,
    aggregator: LedgerAggregator,
    settings: ReportSettings,
}

impl ReportEngine {
    pub fn new(store: StoreRef, settings: ReportSettings) -> Self {
        Self {
            store,
            aggregator: LedgerAggregator::new(settings.other_category.clone()),
            settings,
        }
    }

    // ==================== Pure Reports ====================

    /// Dashboard summary as of `now`
    pub fn dashboard_stats_from(
        &self,
        accounts: &[Account],
        entries: &[LedgerEntry],
        checks: &[Check],
        now: DateTime<Utc>,
    ) -> CoreResult<Stats> {
        let total_balance = accounts.iter().try_fold(0i64, |total, account| {
            checked_add(total, self.aggregator.balance(account, entries)?, "total balance")
        })?;

        let month = JalaliMonth::containing(now)?;
        let window = month.bounds()?;

        Ok(Stats {
            total_balance,
            monthly_income: self.aggregator.window_sum(entries, &window, TransactionType::Income)?,
            monthly_expense: self.aggregator.window_sum(entries, &window, TransactionType::Expense)?,
            pending_checks: checks
                .iter()
                .filter(|check| check.status == CheckStatus::Pending)
                .count(),
            accounts_count: accounts.len(),
            current_month_jalali: month.label(self.settings.locale),
        })
    }

    /// Monthly trend ending at `now`'s month plus the all-time category split
    pub fn chart_data_from(&self, entries: &[LedgerEntry], now: DateTime<Utc>) -> CoreResult<Trend> {
        let current = JalaliMonth::containing(now)?;
        let months = self.settings.trend_months as i32;

        let mut monthly_trend = Vec::with_capacity(months as usize);
        for back in (0..months).rev() {
            let month = current.shift(-back)?;
            let window = month.bounds()?;
            monthly_trend.push(MonthlyTrendPoint {
                month_label: month.name(self.settings.locale).to_string(),
                period: month.to_string(),
                income: self.aggregator.window_sum(entries, &window, TransactionType::Income)?,
                expense: self.aggregator.window_sum(entries, &window, TransactionType::Expense)?,
            });
        }

        let category_distribution = rank_categories(
            self.aggregator.category_totals(entries)?,
            self.settings.top_categories,
        );

        Ok(Trend {
            monthly_trend,
            category_distribution,
        })
    }

    // ==================== Store-backed Reports ====================

    pub async fn dashboard_stats(&self, now: DateTime<Utc>) -> CoreResult<Stats> {
        let accounts = self.store.list_accounts().await?;
        let entries = self.store.list_all_entries().await?;
        let checks = self.store.list_checks(&CheckFilter::pending()).await?;
        log::debug!(
            "Dashboard stats over {} accounts, {} entries, {} pending checks",
            accounts.len(),
            entries.len(),
            checks.len()
        );
        self.dashboard_stats_from(&accounts, &entries, &checks, now)
            .map_err(|e| self.report(e, "dashboard_stats", Some(now)))
    }

    pub async fn chart_data(&self, now: DateTime<Utc>) -> CoreResult<Trend> {
        let entries = self.store.list_all_entries().await?;
        self.chart_data_from(&entries, now)
            .map_err(|e| self.report(e, "chart_data", Some(now)))
    }

    /// Every account with its current balance
    pub async fn account_balances(&self) -> CoreResult<Vec<AccountBalanceView>> {
        let accounts = self.store.list_accounts().await?;
        let entries = self.store.list_all_entries().await?;
        accounts
            .into_iter()
            .map(|account| -> CoreResult<AccountBalanceView> {
                Ok(AccountBalanceView {
                    balance: self.aggregator.balance(&account, &entries)?,
                    account,
                })
            })
            .collect::<CoreResult<Vec<_>>>()
            .map_err(|e| self.report(e, "account_balances", None))
    }

    /// One account with its current balance
    pub async fn account_balance(&self, account_id: &str) -> CoreResult<AccountBalanceView> {
        let account = self.store.get_account(account_id).await?;
        let entries = self.store.list_entries_for_account(account_id).await?;
        let balance = self
            .aggregator
            .balance(&account, &entries)
            .map_err(|e| self.report(e, "account_balance", None))?;
        Ok(AccountBalanceView { balance, account })
    }

    /// Transactions, newest first
    pub async fn transaction_list(&self, filter: &TransactionFilter) -> CoreResult<Vec<TransactionView>> {
        let accounts = self.accounts_by_id().await?;
        let mut transactions = self.store.list_transactions(filter).await?;
        transactions.sort_by(|a, b| b.date.cmp(&a.date));

        transactions
            .into_iter()
            .map(|transaction| -> CoreResult<TransactionView> {
                let date_jalali = instant_to_jalali_string(transaction.date)?;
                let account = accounts.get(&transaction.account_id);
                Ok(TransactionView::new(transaction, date_jalali, account))
            })
            .collect()
    }

    /// Checks, earliest due date first
    pub async fn check_list(&self, filter: &CheckFilter) -> CoreResult<Vec<CheckView>> {
        let accounts = self.accounts_by_id().await?;
        let mut checks = self.store.list_checks(filter).await?;
        checks.sort_by(|a, b| a.due_date.cmp(&b.due_date));

        checks
            .into_iter()
            .map(|check| -> CoreResult<CheckView> {
                let due_date_jalali = instant_to_jalali_string(check.due_date)?;
                let account = accounts.get(&check.account_id);
                Ok(CheckView::new(check, due_date_jalali, account))
            })
            .collect()
    }

    async fn accounts_by_id(&self) -> CoreResult<HashMap<String, Account>> {
        Ok(self
            .store
            .list_accounts()
            .await?
            .into_iter()
            .map(|account| (account.id.clone(), account))
            .collect())
    }

    fn report(&self, error: CoreError, operation: &str, now: Option<DateTime<Utc>>) -> CoreError {
        let mut context = ErrorContext::new(operation);
        if let Some(now) = now {
            context = context.with_data("now", serde_json::json!(now.to_rfc3339()));
        }
        DefaultErrorLogger.log_error(&error, &context);
        error
    }
}
