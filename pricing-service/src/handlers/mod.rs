//! HTTP handlers for pricing-service.

pub mod coupons;
pub mod rates;
pub mod refunds;

pub use coupons::{apply_coupon, create_coupon, get_coupon, list_coupons, validate_coupon};
pub use rates::{get_rates, refresh_rates};
pub use refunds::refund_quote;
