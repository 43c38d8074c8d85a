//! Ledger store contract and the in-memory implementation backed by a ledger file

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::error::{CoreError, CoreResult};
use super::models::{
    Account, AccountDraft, AccountUpdate, Check, CheckDraft, CheckFilter, CheckUpdate,
    LedgerEntry, Transaction, TransactionDraft, TransactionFilter, TransactionUpdate,
};

/// Store reference type
pub type StoreRef = Arc<dyn LedgerStore>;

/// Record retrieval contract consumed by the report engine.
///
/// Every call returns an owned snapshot; the caller never holds a lock.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn list_accounts(&self) -> CoreResult<Vec<Account>>;

    async fn get_account(&self, account_id: &str) -> CoreResult<Account> {
        self.list_accounts()
            .await?
            .into_iter()
            .find(|account| account.id == account_id)
            .ok_or_else(|| CoreError::UnknownAccount {
                id: account_id.to_string(),
            })
    }

    async fn list_entries_for_account(&self, account_id: &str) -> CoreResult<Vec<LedgerEntry>>;

    async fn list_all_entries(&self) -> CoreResult<Vec<LedgerEntry>>;

    async fn list_transactions(&self, filter: &TransactionFilter) -> CoreResult<Vec<Transaction>>;

    async fn list_checks(&self, filter: &CheckFilter) -> CoreResult<Vec<Check>>;
}

/// On-disk ledger layout (YAML or JSON)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerFile {
    #[serde(default)]
    pub accounts: Vec<AccountDraft>,
    #[serde(default)]
    pub transactions: Vec<TransactionDraft>,
    #[serde(default)]
    pub checks: Vec<CheckDraft>,
}

impl LedgerFile {
    /// Parse ledger text; JSON is a subset of YAML so both are accepted
    pub fn parse(content: &str) -> CoreResult<Self> {
        serde_yaml::from_str(content).map_err(|e| CoreError::ParseError {
            message: e.to_string(),
        })
    }
}

#[derive(Debug, Default)]
struct StoreData {
    accounts: Vec<Account>,
    transactions: Vec<Transaction>,
    checks: Vec<Check>,
}

impl StoreData {
    fn has_account(&self, account_id: &str) -> bool {
        self.accounts.iter().any(|account| account.id == account_id)
    }

    fn require_account(&self, account_id: &str) -> CoreResult<()> {
        if self.has_account(account_id) {
            Ok(())
        } else {
            Err(CoreError::UnknownAccount {
                id: account_id.to_string(),
            })
        }
    }

    fn id_taken(&self, id: &str) -> bool {
        self.has_account(id)
            || self.transactions.iter().any(|t| t.id == id)
            || self.checks.iter().any(|c| c.id == id)
    }
}

/// Ledger store held in memory, optionally seeded from a ledger file
#[derive(Debug, Default)]
pub struct InMemoryStore {
    data: RwLock<StoreData>,
    next_id: AtomicU64,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a ledger file from disk
    pub async fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        log::info!("Loading ledger file: {}", path.display());
        let content = tokio::fs::read_to_string(path).await?;
        let ledger = LedgerFile::parse(&content)?;
        let store = Self::from_ledger(ledger).await?;
        log::debug!("Ledger loaded from {}", path.display());
        Ok(store)
    }

    /// Build a store from parsed ledger records, in file order
    pub async fn from_ledger(ledger: LedgerFile) -> CoreResult<Self> {
        let store = Self::new();
        for account in ledger.accounts {
            store.insert_account(account).await?;
        }
        for transaction in ledger.transactions {
            store.insert_transaction(transaction).await?;
        }
        for check in ledger.checks {
            store.insert_check(check).await?;
        }

        let data = store.data.read().await;
        log::info!(
            "Ledger holds {} accounts, {} transactions, {} checks",
            data.accounts.len(),
            data.transactions.len(),
            data.checks.len()
        );
        drop(data);
        Ok(store)
    }

    fn assign_id(&self, data: &StoreData, requested: Option<String>, prefix: &str) -> CoreResult<String> {
        match requested {
            Some(id) if data.id_taken(&id) => Err(CoreError::InvalidRecord {
                message: format!("duplicate id: {}", id),
            }),
            Some(id) => Ok(id),
            None => loop {
                let n = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
                let id = format!("{}-{}", prefix, n);
                if !data.id_taken(&id) {
                    break Ok(id);
                }
            },
        }
    }

    pub async fn insert_account(&self, draft: AccountDraft) -> CoreResult<Account> {
        let mut data = self.data.write().await;
        let id = self.assign_id(&data, draft.id.clone(), "acc")?;
        let account = draft.into_account(id);
        data.accounts.push(account.clone());
        Ok(account)
    }

    pub async fn insert_transaction(&self, draft: TransactionDraft) -> CoreResult<Transaction> {
        let mut data = self.data.write().await;
        data.require_account(&draft.account_id)?;
        let id = self.assign_id(&data, draft.id.clone(), "txn")?;
        let transaction = draft.into_transaction(id)?;
        data.transactions.push(transaction.clone());
        Ok(transaction)
    }

    pub async fn insert_check(&self, draft: CheckDraft) -> CoreResult<Check> {
        let mut data = self.data.write().await;
        data.require_account(&draft.account_id)?;
        let id = self.assign_id(&data, draft.id.clone(), "chk")?;
        let check = draft.into_check(id)?;
        data.checks.push(check.clone());
        Ok(check)
    }

    pub async fn update_account(&self, account_id: &str, update: AccountUpdate) -> CoreResult<Account> {
        let mut data = self.data.write().await;
        let account = data
            .accounts
            .iter_mut()
            .find(|account| account.id == account_id)
            .ok_or_else(|| CoreError::UnknownAccount {
                id: account_id.to_string(),
            })?;
        update.apply(account);
        Ok(account.clone())
    }

    pub async fn update_transaction(
        &self,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> CoreResult<Transaction> {
        let mut data = self.data.write().await;
        if let Some(account_id) = &update.account_id {
            data.require_account(account_id)?;
        }
        let transaction = data
            .transactions
            .iter_mut()
            .find(|t| t.id == transaction_id)
            .ok_or_else(|| CoreError::TransactionNotFound {
                id: transaction_id.to_string(),
            })?;
        update.apply(transaction)?;
        Ok(transaction.clone())
    }

    pub async fn update_check(&self, check_id: &str, update: CheckUpdate) -> CoreResult<Check> {
        let mut data = self.data.write().await;
        if let Some(account_id) = &update.account_id {
            data.require_account(account_id)?;
        }
        let check = data
            .checks
            .iter_mut()
            .find(|c| c.id == check_id)
            .ok_or_else(|| CoreError::CheckNotFound {
                id: check_id.to_string(),
            })?;
        update.apply(check)?;
        Ok(check.clone())
    }

    /// Delete an account along with its transactions and checks
    pub async fn delete_account(&self, account_id: &str) -> CoreResult<()> {
        let mut data = self.data.write().await;
        data.require_account(account_id)?;
        data.accounts.retain(|account| account.id != account_id);
        let before = (data.transactions.len(), data.checks.len());
        data.transactions.retain(|t| t.account_id != account_id);
        data.checks.retain(|c| c.account_id != account_id);
        log::debug!(
            "Deleted account {} with {} transactions and {} checks",
            account_id,
            before.0 - data.transactions.len(),
            before.1 - data.checks.len()
        );
        Ok(())
    }

    pub async fn delete_transaction(&self, transaction_id: &str) -> CoreResult<()> {
        let mut data = self.data.write().await;
        let len = data.transactions.len();
        data.transactions.retain(|t| t.id != transaction_id);
        if data.transactions.len() == len {
            return Err(CoreError::TransactionNotFound {
                id: transaction_id.to_string(),
            });
        }
        Ok(())
    }

    pub async fn delete_check(&self, check_id: &str) -> CoreResult<()> {
        let mut data = self.data.write().await;
        let len = data.checks.len();
        data.checks.retain(|c| c.id != check_id);
        if data.checks.len() == len {
            return Err(CoreError::CheckNotFound {
                id: check_id.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl LedgerStore for InMemoryStore {
    async fn list_accounts(&self) -> CoreResult<Vec<Account>> {
        Ok(self.data.read().await.accounts.clone())
    }

    async fn list_entries_for_account(&self, account_id: &str) -> CoreResult<Vec<LedgerEntry>> {
        let data = self.data.read().await;
        data.require_account(account_id)?;
        Ok(data
            .transactions
            .iter()
            .filter(|t| t.account_id == account_id)
            .map(Transaction::to_entry)
            .collect())
    }

    async fn list_all_entries(&self) -> CoreResult<Vec<LedgerEntry>> {
        let data = self.data.read().await;
        Ok(data.transactions.iter().map(Transaction::to_entry).collect())
    }

    async fn list_transactions(&self, filter: &TransactionFilter) -> CoreResult<Vec<Transaction>> {
        let data = self.data.read().await;
        Ok(data
            .transactions
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect())
    }

    async fn list_checks(&self, filter: &CheckFilter) -> CoreResult<Vec<Check>> {
        let data = self.data.read().await;
        Ok(data.checks.iter().filter(|c| filter.matches(c)).cloned().collect())
    }
}
