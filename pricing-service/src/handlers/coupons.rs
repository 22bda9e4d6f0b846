use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::models::{Coupon, CouponQuote, CouponScope, CreateCoupon, DiscountType};
use crate::services::CouponStoreError;
use crate::services::metrics::{record_coupon_operation, record_coupon_validation};
use crate::services::pricing;
use crate::startup::AppState;
use marketplace_core::error::AppError;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCouponRequest {
    #[validate(length(min = 2, max = 32, message = "code must be 2-32 characters"))]
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub max_uses: Option<u32>,
    pub expiry_date: Option<NaiveDate>,
    #[serde(default = "default_active")]
    pub active: bool,
    pub min_order_value: Option<Decimal>,
    #[serde(default)]
    pub applicable_to: CouponScope,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ValidateCouponRequest {
    #[validate(length(min = 1, message = "code cannot be empty"))]
    pub code: String,
    pub order_total: Decimal,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ApplyCouponRequest {
    #[validate(length(min = 1, message = "code cannot be empty"))]
    pub code: String,
}

/// Admin creation. Range checks on the money fields are hand-rolled;
/// `validator` has no Decimal support.
#[tracing::instrument(skip(state, request), fields(code = %request.code))]
pub async fn create_coupon(
    State(state): State<AppState>,
    Json(request): Json<CreateCouponRequest>,
) -> Result<(StatusCode, Json<Coupon>), AppError> {
    request.validate()?;

    if request.discount_value < Decimal::ZERO {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "discountValue cannot be negative"
        )));
    }
    if request.discount_type == DiscountType::Percentage
        && request.discount_value > Decimal::ONE_HUNDRED
    {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "percentage discountValue cannot exceed 100"
        )));
    }
    if let Some(min) = request.min_order_value {
        if min < Decimal::ZERO {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "minOrderValue cannot be negative"
            )));
        }
    }
    if request.max_uses == Some(0) {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "maxUses must be at least 1"
        )));
    }

    let coupon = Coupon::new(
        CreateCoupon {
            code: request.code,
            discount_type: request.discount_type,
            discount_value: request.discount_value,
            max_uses: request.max_uses,
            expiry_date: request.expiry_date,
            active: request.active,
            min_order_value: request.min_order_value,
            applicable_to: request.applicable_to,
        },
        state.clock.now_utc(),
    );

    let coupon = state
        .store
        .insert(coupon)
        .map_err(|e| AppError::Conflict(anyhow::anyhow!(e)))?;

    record_coupon_operation("create");
    tracing::info!(code = %coupon.code, "Coupon created");

    Ok((StatusCode::CREATED, Json(coupon)))
}

pub async fn list_coupons(State(state): State<AppState>) -> Json<Vec<Coupon>> {
    record_coupon_operation("list");
    Json(state.store.list())
}

pub async fn get_coupon(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Coupon>, AppError> {
    record_coupon_operation("get");
    state
        .store
        .get(&code)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Coupon not found")))
}

/// Validate a coupon against an order total. Always 200: business-rule
/// failures are carried in the body and never mutate the coupon.
#[tracing::instrument(skip(state, request), fields(code = %request.code))]
pub async fn validate_coupon(
    State(state): State<AppState>,
    Json(request): Json<ValidateCouponRequest>,
) -> Result<Json<CouponQuote>, AppError> {
    request.validate()?;

    if request.order_total < Decimal::ZERO {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "orderTotal cannot be negative"
        )));
    }

    let today = state.clock.today();
    let coupon = state.store.get(&request.code);

    let quote = match pricing::evaluate(coupon.as_ref(), request.order_total, today) {
        Ok(discount) => {
            record_coupon_validation("valid");
            CouponQuote {
                valid: true,
                discount,
                discounted_total: pricing::discounted_total(request.order_total, discount),
                message: "Coupon applied successfully".to_string(),
                coupon,
            }
        }
        Err(rejection) => {
            record_coupon_validation(rejection.label());
            tracing::debug!(
                code = %request.code,
                outcome = rejection.label(),
                "Coupon validation refused"
            );
            CouponQuote {
                valid: false,
                discount: Decimal::ZERO,
                discounted_total: request.order_total,
                message: rejection.message(),
                coupon: None,
            }
        }
    };

    Ok(Json(quote))
}

/// Redeem a coupon for a completed order. Not idempotent: each call moves
/// `usedCount` by one.
#[tracing::instrument(skip(state, request), fields(code = %request.code))]
pub async fn apply_coupon(
    State(state): State<AppState>,
    Json(request): Json<ApplyCouponRequest>,
) -> Result<Json<Coupon>, AppError> {
    request.validate()?;

    let coupon = state
        .store
        .redeem(&request.code, state.clock.now_utc())
        .map_err(|e| match e {
            CouponStoreError::NotFound => AppError::NotFound(anyhow::anyhow!(e)),
            CouponStoreError::LimitReached | CouponStoreError::DuplicateCode => {
                AppError::Conflict(anyhow::anyhow!(e))
            }
        })?;

    record_coupon_operation("apply");
    tracing::info!(
        code = %coupon.code,
        used_count = coupon.used_count,
        "Coupon redeemed"
    );

    Ok(Json(coupon))
}
