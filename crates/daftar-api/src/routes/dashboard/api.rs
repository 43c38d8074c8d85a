//! Dashboard API endpoints, evaluated at the state's clock

use crate::error::ApiResult;
use crate::AppState;
use axum::extract::State;
use axum::Json;
use daftar_core::{Stats, Trend};

pub async fn api_dashboard_stats(State(state): State<AppState>) -> ApiResult<Json<Stats>> {
    let stats = state.engine.dashboard_stats(state.clock.now()).await?;
    Ok(Json(stats))
}

/// Monthly income/expense trend and top expense categories
pub async fn api_chart_data(State(state): State<AppState>) -> ApiResult<Json<Trend>> {
    let trend = state.engine.chart_data(state.clock.now()).await?;
    Ok(Json(trend))
}
