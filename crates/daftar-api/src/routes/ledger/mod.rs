//! Ledger routes - transactions newest first, checks by due date, categories

pub mod api;

pub use api::{api_categories, api_checks, api_transactions};
