use axum::{Json, extract::State};

use crate::services::metrics::record_rate_operation;
use crate::services::rates::RateSnapshot;
use crate::startup::AppState;
use marketplace_core::error::AppError;

#[tracing::instrument(skip(state))]
pub async fn get_rates(State(state): State<AppState>) -> Result<Json<RateSnapshot>, AppError> {
    let snapshot = state
        .rates
        .get()
        .await
        .map_err(|e| AppError::BadGateway(e.to_string()))?;

    record_rate_operation("get");
    Ok(Json(snapshot))
}

#[tracing::instrument(skip(state))]
pub async fn refresh_rates(State(state): State<AppState>) -> Result<Json<RateSnapshot>, AppError> {
    let snapshot = state
        .rates
        .refresh()
        .await
        .map_err(|e| AppError::BadGateway(e.to_string()))?;

    record_rate_operation("refresh");
    Ok(Json(snapshot))
}
