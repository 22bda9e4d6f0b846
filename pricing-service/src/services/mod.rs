pub mod coupon_store;
pub mod metrics;
pub mod pricing;
pub mod rates;

pub use coupon_store::{CouponStore, CouponStoreError};
pub use metrics::{get_metrics, init_metrics};
pub use rates::{CurrencyCache, HttpRateSource, RateSource, StaticRateSource};
