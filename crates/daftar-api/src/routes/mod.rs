//! Route modules for the API server
//!
//! - accounts: account list and detail with balances
//! - ledger: transaction, check and category listings
//! - dashboard: summary stats and chart data
//!
//! Each module has a `mod.rs` with its exports and an `api.rs` with the
//! JSON handlers.

pub mod accounts;
pub mod dashboard;
pub mod ledger;
