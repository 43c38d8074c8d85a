//! Accounts API endpoints

use crate::error::ApiResult;
use crate::AppState;
use axum::extract::{Path, State};
use axum::Json;
use daftar_core::AccountBalanceView;

pub async fn api_accounts(State(state): State<AppState>) -> ApiResult<Json<Vec<AccountBalanceView>>> {
    let accounts = state.engine.account_balances().await?;
    Ok(Json(accounts))
}

pub async fn api_account_detail(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> ApiResult<Json<AccountBalanceView>> {
    let account = state.engine.account_balance(&account_id).await?;
    Ok(Json(account))
}
