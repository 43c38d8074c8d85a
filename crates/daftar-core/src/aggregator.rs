//! Balance and windowed sums over ledger entries

use daftar_calendar::MonthWindow;
use std::collections::HashMap;

use super::error::{CoreError, CoreResult};
use super::models::{Account, LedgerEntry};
use super::store::LedgerStore;
use super::types::TransactionType;

/// Pure arithmetic over entry snapshots. Holds only the bucket name for
/// uncategorized expenses.
#[derive(Debug, Clone)]
pub struct LedgerAggregator {
    other_category: String,
}

impl Default for LedgerAggregator {
    fn default() -> Self {
        Self::new("سایر")
    }
}

impl LedgerAggregator {
    pub fn new(other_category: impl Into<String>) -> Self {
        Self {
            other_category: other_category.into(),
        }
    }

    pub fn other_category(&self) -> &str {
        &self.other_category
    }

    /// `initial_balance` plus every signed amount booked to the account
    pub fn balance(&self, account: &Account, entries: &[LedgerEntry]) -> CoreResult<i64> {
        entries
            .iter()
            .filter(|entry| entry.account_id == account.id)
            .try_fold(account.initial_balance, |total, entry| {
                checked_add(total, entry.signed_amount, &account.id)
            })
    }

    /// Unsigned total of entries in `[start, end)` going the given way
    pub fn window_sum(
        &self,
        entries: &[LedgerEntry],
        window: &MonthWindow,
        direction: TransactionType,
    ) -> CoreResult<i64> {
        entries
            .iter()
            .filter(|entry| window.contains(&entry.date) && direction.matches(entry.signed_amount))
            .try_fold(0i64, |total, entry| {
                checked_add(total, magnitude(entry.signed_amount)?, "monthly sum")
            })
    }

    /// Unsigned expense totals keyed by category
    pub fn category_totals(&self, entries: &[LedgerEntry]) -> CoreResult<HashMap<String, i64>> {
        let mut totals: HashMap<String, i64> = HashMap::new();
        for entry in entries {
            if !TransactionType::Expense.matches(entry.signed_amount) {
                continue;
            }
            let category = entry
                .category
                .clone()
                .unwrap_or_else(|| self.other_category.clone());
            let total = totals.entry(category).or_insert(0);
            *total = checked_add(*total, magnitude(entry.signed_amount)?, "category total")?;
        }
        Ok(totals)
    }

    /// Balance of one stored account
    pub async fn account_balance(&self, store: &dyn LedgerStore, account_id: &str) -> CoreResult<i64> {
        let account = store.get_account(account_id).await?;
        let entries = store.list_entries_for_account(account_id).await?;
        self.balance(&account, &entries)
    }
}

/// Sum two amounts, failing instead of wrapping
pub fn checked_add(total: i64, amount: i64, what: &str) -> CoreResult<i64> {
    total.checked_add(amount).ok_or_else(|| CoreError::AmountOverflow {
        context: what.to_string(),
    })
}

fn magnitude(signed_amount: i64) -> CoreResult<i64> {
    signed_amount.checked_abs().ok_or_else(|| CoreError::AmountOverflow {
        context: "amount".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use daftar_calendar::{jalali_to_instant, month_bounds, JalaliMonth};
    use proptest::prelude::*;

    fn account(initial_balance: i64) -> Account {
        Account {
            id: "acc-1".to_string(),
            bank_name: "ملت".to_string(),
            account_name: "جاری".to_string(),
            account_number: None,
            sheba: None,
            initial_balance,
            color: "#0F766E".to_string(),
        }
    }

    fn entry(signed_amount: i64, date: DateTime<Utc>, category: Option<&str>) -> LedgerEntry {
        LedgerEntry {
            account_id: "acc-1".to_string(),
            signed_amount,
            date,
            category: category.map(str::to_string),
        }
    }

    fn scenario() -> Vec<LedgerEntry> {
        vec![
            entry(2_000_000, jalali_to_instant("1403/08/15").unwrap(), Some("حقوق")),
            entry(-500_000, jalali_to_instant("1403/08/16").unwrap(), None),
        ]
    }

    #[test]
    fn test_balance_scenario() {
        let aggregator = LedgerAggregator::default();
        assert_eq!(aggregator.balance(&account(5_000_000), &scenario()).unwrap(), 6_500_000);
        assert_eq!(aggregator.balance(&account(5_000_000), &[]).unwrap(), 5_000_000);
    }

    #[test]
    fn test_balance_ignores_other_accounts() {
        let mut entries = scenario();
        entries.push(LedgerEntry {
            account_id: "acc-2".to_string(),
            ..entry(99, Utc::now(), None)
        });
        assert_eq!(LedgerAggregator::default().balance(&account(0), &entries).unwrap(), 1_500_000);
    }

    #[test]
    fn test_window_sum_scenario() {
        let aggregator = LedgerAggregator::default();
        let aban = month_bounds(1403, 8).unwrap();
        assert_eq!(aggregator.window_sum(&scenario(), &aban, TransactionType::Income).unwrap(), 2_000_000);
        assert_eq!(aggregator.window_sum(&scenario(), &aban, TransactionType::Expense).unwrap(), 500_000);

        let azar = month_bounds(1403, 9).unwrap();
        assert_eq!(aggregator.window_sum(&scenario(), &azar, TransactionType::Income).unwrap(), 0);
    }

    #[test]
    fn test_window_end_is_exclusive() {
        let aggregator = LedgerAggregator::default();
        let aban = month_bounds(1403, 8).unwrap();
        let entries = vec![
            entry(100, aban.start, None),
            entry(200, aban.end, None),
            entry(400, aban.end - chrono::Duration::seconds(1), None),
        ];
        assert_eq!(aggregator.window_sum(&entries, &aban, TransactionType::Income).unwrap(), 500);
    }

    #[test]
    fn test_category_totals_uses_other_bucket() {
        let aggregator = LedgerAggregator::default();
        let now = Utc::now();
        let entries = vec![
            entry(-300, now, Some("خوراک")),
            entry(-200, now, Some("خوراک")),
            entry(-50, now, None),
            entry(1_000, now, Some("حقوق")),
            entry(0, now, Some("قبوض")),
        ];
        let totals = aggregator.category_totals(&entries).unwrap();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals["خوراک"], 500);
        assert_eq!(totals["سایر"], 50);
    }

    #[test]
    fn test_custom_other_bucket() {
        let aggregator = LedgerAggregator::new("Other");
        let totals = aggregator.category_totals(&[entry(-5, Utc::now(), None)]).unwrap();
        assert_eq!(totals["Other"], 5);
        assert_eq!(aggregator.other_category(), "Other");
    }

    #[tokio::test]
    async fn test_account_balance_through_store() {
        use crate::store::{InMemoryStore, LedgerFile};

        let ledger = LedgerFile::parse(
            "accounts:\n  - {id: acc-1, bank_name: b, account_name: c, initial_balance: 5000000}\ntransactions:\n  - {account_id: acc-1, type: income, amount: 2000000, date_jalali: '1403/08/15'}\n  - {account_id: acc-1, type: expense, amount: 500000, date_jalali: '1403/08/16'}\n",
        )
        .unwrap();
        let store = InMemoryStore::from_ledger(ledger).await.unwrap();
        let aggregator = LedgerAggregator::default();

        assert_eq!(aggregator.account_balance(&store, "acc-1").await.unwrap(), 6_500_000);
        let err = aggregator.account_balance(&store, "acc-9").await.unwrap_err();
        assert!(matches!(err, crate::error::CoreError::UnknownAccount { .. }));
    }

    #[test]
    fn test_overflow_is_an_error() {
        let aggregator = LedgerAggregator::default();
        let now = Utc::now();
        let err = aggregator
            .balance(&account(i64::MAX), &[entry(1, now, None)])
            .unwrap_err();
        assert!(matches!(err, crate::error::CoreError::AmountOverflow { .. }));

        let aban = month_bounds(1403, 8).unwrap();
        let entries = vec![entry(i64::MAX, aban.start, None), entry(1, aban.start, None)];
        assert!(aggregator.window_sum(&entries, &aban, TransactionType::Income).is_err());

        let entries = vec![entry(-i64::MAX, now, None), entry(-1, now, None)];
        assert!(aggregator.category_totals(&entries).is_err());
        assert!(aggregator.balance(&account(0), &[entry(i64::MIN, now, None)]).is_ok());
        assert!(aggregator.category_totals(&[entry(i64::MIN, now, None)]).is_err());
    }

    fn entries_between(start: i64, end: i64) -> impl Strategy<Value = Vec<LedgerEntry>> {
        prop::collection::vec(
            (-1_000_000i64..1_000_000, start..end, prop::option::of("[a-c]")),
            0..60,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .map(|(amount, secs, category)| LedgerEntry {
                    account_id: "acc-1".to_string(),
                    signed_amount: amount,
                    date: Utc.timestamp_opt(secs, 0).unwrap(),
                    category,
                })
                .collect()
        })
    }

    fn arb_entries() -> impl Strategy<Value = Vec<LedgerEntry>> {
        // 1402/12 .. 1404/02, covering a year boundary
        let start = jalali_to_instant("1402/12/01").unwrap().timestamp();
        let end = jalali_to_instant("1404/02/31").unwrap().timestamp();
        entries_between(start, end)
    }

    /// Twelve consecutive month windows from a drawn start month, with entries
    /// falling up to a month outside either end
    fn arb_year_of_windows() -> impl Strategy<Value = (Vec<MonthWindow>, Vec<LedgerEntry>)> {
        (1300i32..1500, 1u32..=12).prop_flat_map(|(year, month)| {
            let first = JalaliMonth::new(year, month).unwrap();
            let windows: Vec<MonthWindow> = (0..12)
                .map(|i| first.shift(i).unwrap().bounds().unwrap())
                .collect();
            let margin = 31 * 86_400;
            let start = windows[0].start.timestamp() - margin;
            let end = windows[11].end.timestamp() + margin;
            (Just(windows), entries_between(start, end))
        })
    }

    proptest! {
        #[test]
        fn prop_balance_is_order_independent(
            (entries, shuffled) in arb_entries()
                .prop_flat_map(|entries| (Just(entries.clone()), Just(entries).prop_shuffle())),
            initial in -10_000_000i64..10_000_000,
        ) {
            let aggregator = LedgerAggregator::default();
            let account = account(initial);
            prop_assert_eq!(
                aggregator.balance(&account, &entries).unwrap(),
                aggregator.balance(&account, &shuffled).unwrap()
            );
        }

        #[test]
        fn prop_twelve_month_windows_partition_their_span((windows, entries) in arb_year_of_windows()) {
            let aggregator = LedgerAggregator::default();
            let span = windows[0].span(&windows[11]);

            for direction in [TransactionType::Income, TransactionType::Expense] {
                let mut parts = 0i64;
                for window in &windows {
                    parts += aggregator.window_sum(&entries, window, direction).unwrap();
                }
                prop_assert_eq!(parts, aggregator.window_sum(&entries, &span, direction).unwrap());
            }
        }
    }
}
