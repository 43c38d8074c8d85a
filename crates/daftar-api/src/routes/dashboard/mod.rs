//! Dashboard routes

pub mod api;

pub use api::{api_chart_data, api_dashboard_stats};
