//! Account routes - account list and detail, each with its computed balance

pub mod api;

pub use api::{api_account_detail, api_accounts};
