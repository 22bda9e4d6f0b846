pub mod coupon;

pub use coupon::{Coupon, CouponQuote, CouponScope, CreateCoupon, DiscountType};
