use axum::{Json, extract::State};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{ButtonState, RenewalStatus};
use crate::services::metrics::{record_renewal_operation, record_renewal_status};
use crate::services::renewal;
use crate::startup::AppState;
use marketplace_core::clock::Clock;
use marketplace_core::error::AppError;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RenewalReportRequest {
    #[validate(length(min = 1, message = "renewalDate cannot be empty"))]
    pub renewal_date: String,
    /// Clock override for testability; the service clock's calendar date
    /// when absent.
    pub current_date: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewalReportResponse {
    pub days_remaining: i64,
    pub status: RenewalStatus,
    pub button: ButtonState,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextRenewalDateResponse {
    pub next_renewal_date: NaiveDate,
}

/// Resolve the effective "today". A malformed override is a caller
/// programming error, not dirty record data, so it is rejected rather than
/// defaulted.
fn resolve_today(current_date: Option<&str>, clock: &dyn Clock) -> Result<NaiveDate, AppError> {
    match current_date {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
            AppError::BadRequest(anyhow::anyhow!("currentDate must be formatted as YYYY-MM-DD"))
        }),
        None => Ok(clock.today()),
    }
}

#[tracing::instrument(skip(state, request))]
pub async fn renewal_report(
    State(state): State<AppState>,
    Json(request): Json<RenewalReportRequest>,
) -> Result<Json<RenewalReportResponse>, AppError> {
    request.validate()?;

    let today = resolve_today(request.current_date.as_deref(), state.clock.as_ref())?;
    let days_remaining = renewal::days_remaining(&request.renewal_date, today);
    let status = renewal::status_for_days(days_remaining);
    let button = renewal::button_state_for_days(days_remaining, state.config.button_rule);

    record_renewal_operation("report");
    record_renewal_status(status.as_str());

    tracing::debug!(
        days_remaining = days_remaining,
        status = status.as_str(),
        "Renewal report computed"
    );

    Ok(Json(RenewalReportResponse {
        days_remaining,
        status,
        button,
    }))
}

#[tracing::instrument(skip(state, request))]
pub async fn next_renewal_date(
    State(state): State<AppState>,
    Json(request): Json<RenewalReportRequest>,
) -> Result<Json<NextRenewalDateResponse>, AppError> {
    request.validate()?;

    let today = resolve_today(request.current_date.as_deref(), state.clock.as_ref())?;
    let next = renewal::smart_renewal_date(&request.renewal_date, today);

    record_renewal_operation("next_date");

    Ok(Json(NextRenewalDateResponse {
        next_renewal_date: next,
    }))
}
