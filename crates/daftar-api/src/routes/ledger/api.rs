//! Transaction, check and category listings

use crate::error::ApiResult;
use crate::AppState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use daftar_core::{CheckFilter, CheckView, TransactionFilter, TransactionView, DEFAULT_CATEGORIES};

/// Transactions matching `account_id`, `type` and `category`
pub async fn api_transactions(
    State(state): State<AppState>,
    query: Result<Query<TransactionFilter>, QueryRejection>,
) -> ApiResult<Json<Vec<TransactionView>>> {
    let Query(filter) = query?;
    log::debug!("GET /api/transactions - filter: {:?}", filter);
    let transactions = state.engine.transaction_list(&filter).await?;
    Ok(Json(transactions))
}

/// Checks matching `account_id`, `type` and `status`
pub async fn api_checks(
    State(state): State<AppState>,
    query: Result<Query<CheckFilter>, QueryRejection>,
) -> ApiResult<Json<Vec<CheckView>>> {
    let Query(filter) = query?;
    log::debug!("GET /api/checks - filter: {:?}", filter);
    let checks = state.engine.check_list(&filter).await?;
    Ok(Json(checks))
}

pub async fn api_categories() -> Json<Vec<&'static str>> {
    Json(DEFAULT_CATEGORIES.to_vec())
}
