//! pricing-service: coupon discounts, redemption accounting and refund
//! arithmetic behind a JSON API.
pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
