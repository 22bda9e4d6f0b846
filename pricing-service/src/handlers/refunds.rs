use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::services::metrics::record_refund_quote;
use crate::services::pricing;
use marketplace_core::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundQuoteRequest {
    pub requested_amount: Decimal,
    pub fee_percentage: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundQuoteResponse {
    pub requested_amount: Decimal,
    pub fee_percentage: Decimal,
    pub refund_fee: Decimal,
    pub net_refund: Decimal,
}

/// Quote the fee and net payout for a refund request. The engine's
/// arithmetic is unclamped, so the fee percentage is range-checked here:
/// admin entry outside 0-100 never reaches it.
#[tracing::instrument(skip(request))]
pub async fn refund_quote(
    Json(request): Json<RefundQuoteRequest>,
) -> Result<Json<RefundQuoteResponse>, AppError> {
    if request.requested_amount <= Decimal::ZERO {
        record_refund_quote("rejected");
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "requestedAmount must be positive"
        )));
    }
    if request.fee_percentage < Decimal::ZERO || request.fee_percentage > Decimal::ONE_HUNDRED {
        record_refund_quote("rejected");
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "feePercentage must be between 0 and 100"
        )));
    }

    let refund_fee = pricing::refund_fee(request.requested_amount, request.fee_percentage);
    let net_refund = pricing::net_refund(request.requested_amount, refund_fee);

    record_refund_quote("quoted");

    Ok(Json(RefundQuoteResponse {
        requested_amount: request.requested_amount,
        fee_percentage: request.fee_percentage,
        refund_fee,
        net_refund,
    }))
}
