//! In-process coupon store.
//!
//! Stands in behind the operations the persistence layer would expose.
//! Lookups are case-insensitive on the coupon code. `redeem` performs its
//! limit check and increment while holding the entry's lock, so concurrent
//! redemptions racing a `max_uses` boundary cannot overshoot it.

use crate::models::Coupon;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CouponStoreError {
    #[error("A coupon with this code already exists")]
    DuplicateCode,

    #[error("Coupon not found")]
    NotFound,

    #[error("Coupon usage limit reached")]
    LimitReached,
}

#[derive(Default)]
pub struct CouponStore {
    by_code: DashMap<String, Coupon>,
}

impl CouponStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(code: &str) -> String {
        code.trim().to_uppercase()
    }

    /// Insert a new coupon. The code is kept as entered; uniqueness is
    /// case-insensitive.
    pub fn insert(&self, coupon: Coupon) -> Result<Coupon, CouponStoreError> {
        match self.by_code.entry(Self::key(&coupon.code)) {
            Entry::Occupied(_) => Err(CouponStoreError::DuplicateCode),
            Entry::Vacant(vacant) => {
                vacant.insert(coupon.clone());
                Ok(coupon)
            }
        }
    }

    pub fn get(&self, code: &str) -> Option<Coupon> {
        self.by_code.get(&Self::key(code)).map(|c| c.clone())
    }

    pub fn list(&self) -> Vec<Coupon> {
        let mut coupons: Vec<Coupon> = self.by_code.iter().map(|c| c.clone()).collect();
        coupons.sort_by(|a, b| a.code.cmp(&b.code));
        coupons
    }

    /// Redeem a coupon: check the usage limit and increment `used_count`
    /// in one step under the entry lock. Not idempotent; the order flow
    /// calls this exactly once per completed order.
    pub fn redeem(&self, code: &str, now: DateTime<Utc>) -> Result<Coupon, CouponStoreError> {
        let mut entry = self
            .by_code
            .get_mut(&Self::key(code))
            .ok_or(CouponStoreError::NotFound)?;

        if let Some(max_uses) = entry.max_uses {
            if entry.used_count >= max_uses {
                return Err(CouponStoreError::LimitReached);
            }
        }

        entry.used_count += 1;
        entry.updated_utc = now;
        Ok(entry.clone())
    }
}
