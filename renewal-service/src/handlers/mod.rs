//! HTTP handlers for renewal-service.

pub mod renewal;

pub use renewal::{next_renewal_date, renewal_report};
