//! Discount and refund arithmetic.
//!
//! Pure functions over coupons, order totals and `today`; the handlers
//! obtain `today` from the injected clock. Validation is side-effect-free
//! and idempotent; the counter-moving redeem lives in the store.

use crate::models::{Coupon, DiscountType};
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Why a coupon was refused. Ordered checks: the first failure wins and
/// the rest are not evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CouponRejection {
    NotFound,
    Inactive,
    Expired,
    LimitReached,
    BelowMinimum(Decimal),
}

impl CouponRejection {
    /// User-facing message, shown verbatim by the storefront.
    pub fn message(&self) -> String {
        match self {
            CouponRejection::NotFound => "Coupon not found".to_string(),
            CouponRejection::Inactive => "This coupon is no longer active".to_string(),
            CouponRejection::Expired => "This coupon has expired".to_string(),
            CouponRejection::LimitReached => "Coupon usage limit reached".to_string(),
            CouponRejection::BelowMinimum(min) => {
                format!("Minimum order value of {} required", min)
            }
        }
    }

    /// Metrics label for the rejection.
    pub fn label(&self) -> &'static str {
        match self {
            CouponRejection::NotFound => "not_found",
            CouponRejection::Inactive => "inactive",
            CouponRejection::Expired => "expired",
            CouponRejection::LimitReached => "limit_reached",
            CouponRejection::BelowMinimum(_) => "below_minimum",
        }
    }
}

/// Run the validation chain for a coupon against an order total.
///
/// A coupon is honored through its expiry date: it expires the day after.
pub fn check_coupon(
    coupon: &Coupon,
    order_total: Decimal,
    today: NaiveDate,
) -> Result<(), CouponRejection> {
    if !coupon.active {
        return Err(CouponRejection::Inactive);
    }
    if let Some(expiry) = coupon.expiry_date {
        if today > expiry {
            return Err(CouponRejection::Expired);
        }
    }
    if let Some(max_uses) = coupon.max_uses {
        if coupon.used_count >= max_uses {
            return Err(CouponRejection::LimitReached);
        }
    }
    if let Some(min) = coupon.min_order_value {
        if order_total < min {
            return Err(CouponRejection::BelowMinimum(min));
        }
    }
    Ok(())
}

/// Discount amount for a coupon at an order total.
///
/// Percentage discounts round to whole currency units, midpoint away from
/// zero. Fixed discounts are taken as-is, not clamped to the total; the
/// subtraction in [`discounted_total`] is clamped instead.
pub fn discount_amount(coupon: &Coupon, order_total: Decimal) -> Decimal {
    match coupon.discount_type {
        DiscountType::Percentage => (order_total * coupon.discount_value
            / Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
        DiscountType::Fixed => coupon.discount_value,
    }
}

pub fn discounted_total(order_total: Decimal, discount: Decimal) -> Decimal {
    (order_total - discount).max(Decimal::ZERO)
}

/// Validate and price a looked-up coupon in one step. Returns the discount
/// amount on success.
pub fn evaluate(
    coupon: Option<&Coupon>,
    order_total: Decimal,
    today: NaiveDate,
) -> Result<Decimal, CouponRejection> {
    let coupon = coupon.ok_or(CouponRejection::NotFound)?;
    check_coupon(coupon, order_total, today)?;
    Ok(discount_amount(coupon, order_total))
}

/// Processing fee withheld from a refund.
pub fn refund_fee(amount: Decimal, fee_percentage: Decimal) -> Decimal {
    amount * fee_percentage / Decimal::ONE_HUNDRED
}

/// Amount paid out after the fee. Deliberately not clamped at zero; the
/// fee percentage is range-checked at the HTTP boundary instead.
pub fn net_refund(amount: Decimal, fee: Decimal) -> Decimal {
    amount - fee
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CouponScope, CreateCoupon};
    use chrono::{TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn coupon(discount_type: DiscountType, value: i64) -> Coupon {
        Coupon::new(
            CreateCoupon {
                code: "TEST".to_string(),
                discount_type,
                discount_value: Decimal::from(value),
                max_uses: None,
                expiry_date: None,
                active: true,
                min_order_value: None,
                applicable_to: CouponScope::All,
            },
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn percentage_discount_rounds_to_whole_units() {
        let ten_percent = coupon(DiscountType::Percentage, 10);
        assert_eq!(
            discount_amount(&ten_percent, Decimal::from(1000)),
            Decimal::from(100)
        );

        // 10% of 333 = 33.3 -> 33; 15% of 333 = 49.95 -> 50
        assert_eq!(
            discount_amount(&ten_percent, Decimal::from(333)),
            Decimal::from(33)
        );
        let fifteen_percent = coupon(DiscountType::Percentage, 15);
        assert_eq!(
            discount_amount(&fifteen_percent, Decimal::from(333)),
            Decimal::from(50)
        );
    }

    #[test]
    fn percentage_midpoints_round_away_from_zero() {
        // 5% of 50 = 2.5 -> 3
        let five_percent = coupon(DiscountType::Percentage, 5);
        assert_eq!(
            discount_amount(&five_percent, Decimal::from(50)),
            Decimal::from(3)
        );
    }

    #[test]
    fn fixed_discount_is_not_clamped_but_the_total_is() {
        let fixed = coupon(DiscountType::Fixed, 500);
        let discount = discount_amount(&fixed, Decimal::from(300));
        assert_eq!(discount, Decimal::from(500));
        assert_eq!(discounted_total(Decimal::from(300), discount), Decimal::ZERO);
    }

    #[test]
    fn inactive_wins_over_every_later_check() {
        let mut c = coupon(DiscountType::Percentage, 10);
        c.active = false;
        c.expiry_date = Some(date(2020, 1, 1));
        c.max_uses = Some(1);
        c.used_count = 1;

        let rejection = check_coupon(&c, Decimal::from(100), date(2026, 8, 1)).unwrap_err();
        assert_eq!(rejection, CouponRejection::Inactive);
    }

    #[test]
    fn a_coupon_is_honored_through_its_expiry_date() {
        let mut c = coupon(DiscountType::Percentage, 10);
        c.expiry_date = Some(date(2026, 8, 1));

        assert!(check_coupon(&c, Decimal::from(100), date(2026, 8, 1)).is_ok());
        assert_eq!(
            check_coupon(&c, Decimal::from(100), date(2026, 8, 2)).unwrap_err(),
            CouponRejection::Expired
        );
    }

    #[test]
    fn usage_limit_refuses_at_the_boundary() {
        let mut c = coupon(DiscountType::Percentage, 10);
        c.max_uses = Some(3);
        c.used_count = 2;
        assert!(check_coupon(&c, Decimal::from(100), date(2026, 8, 1)).is_ok());

        c.used_count = 3;
        assert_eq!(
            check_coupon(&c, Decimal::from(100), date(2026, 8, 1)).unwrap_err(),
            CouponRejection::LimitReached
        );
    }

    #[test]
    fn minimum_order_value_is_inclusive() {
        let mut c = coupon(DiscountType::Fixed, 50);
        c.min_order_value = Some(Decimal::from(500));

        assert!(check_coupon(&c, Decimal::from(500), date(2026, 8, 1)).is_ok());

        let rejection = check_coupon(&c, Decimal::from(400), date(2026, 8, 1)).unwrap_err();
        assert_eq!(rejection, CouponRejection::BelowMinimum(Decimal::from(500)));
        assert_eq!(rejection.message(), "Minimum order value of 500 required");
    }

    #[test]
    fn evaluate_reports_missing_coupons() {
        assert_eq!(
            evaluate(None, Decimal::from(100), date(2026, 8, 1)).unwrap_err(),
            CouponRejection::NotFound
        );
    }

    #[test]
    fn refund_fee_and_net_compose() {
        let fee = refund_fee(Decimal::from(1000), Decimal::from(3));
        assert_eq!(fee, Decimal::from(30));
        assert_eq!(net_refund(Decimal::from(1000), fee), Decimal::from(970));
    }

    #[test]
    fn net_refund_is_not_clamped_at_zero() {
        let fee = refund_fee(Decimal::from(100), Decimal::from(150));
        assert_eq!(net_refund(Decimal::from(100), fee), Decimal::from(-50));
    }
}
