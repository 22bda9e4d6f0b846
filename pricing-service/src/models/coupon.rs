//! Coupon model.
//!
//! Wire field names are camelCase: these shapes cross the boundary to a
//! JavaScript storefront and admin panel.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a coupon's `discountValue` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// `discountValue` percent of the order total.
    Percentage,
    /// `discountValue` currency units off.
    Fixed,
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountType::Percentage => "percentage",
            DiscountType::Fixed => "fixed",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "fixed" => DiscountType::Fixed,
            _ => DiscountType::Percentage,
        }
    }
}

/// What a coupon may be applied to. Carried as data for the order flow;
/// the validation chain does not gate on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CouponScope {
    #[default]
    All,
    Companies,
    Services,
}

impl CouponScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            CouponScope::All => "all",
            CouponScope::Companies => "companies",
            CouponScope::Services => "services",
        }
    }
}

/// A discount code. Codes are unique case-insensitively; `used_count`
/// moves only through the redeem operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub id: Uuid,
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub max_uses: Option<u32>,
    pub used_count: u32,
    pub expiry_date: Option<NaiveDate>,
    pub active: bool,
    pub min_order_value: Option<Decimal>,
    pub applicable_to: CouponScope,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
}

/// Input for creating a coupon.
#[derive(Debug, Clone)]
pub struct CreateCoupon {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub max_uses: Option<u32>,
    pub expiry_date: Option<NaiveDate>,
    pub active: bool,
    pub min_order_value: Option<Decimal>,
    pub applicable_to: CouponScope,
}

impl Coupon {
    pub fn new(input: CreateCoupon, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: input.code,
            discount_type: input.discount_type,
            discount_value: input.discount_value,
            max_uses: input.max_uses,
            used_count: 0,
            expiry_date: input.expiry_date,
            active: input.active,
            min_order_value: input.min_order_value,
            applicable_to: input.applicable_to,
            created_utc: now,
            updated_utc: now,
        }
    }
}

/// Result of validating a coupon against an order total. Business-rule
/// failures live in `valid`/`message`; they are never HTTP errors.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponQuote {
    pub valid: bool,
    pub discount: Decimal,
    pub discounted_total: Decimal,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon: Option<Coupon>,
}
