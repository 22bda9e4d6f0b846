//! Metrics module for pricing-service.
//! Provides Prometheus metrics for coupon, refund and rate operations.

use prometheus::{Encoder, IntCounterVec, TextEncoder, opts, register_int_counter_vec};
use std::sync::OnceLock;

/// Coupon operations counter
pub static COUPON_OPERATIONS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Coupon validation outcomes counter
pub static COUPON_VALIDATIONS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Refund quote counter
pub static REFUND_QUOTES_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Rate operations counter
pub static RATE_OPERATIONS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize all metrics. Call once at startup.
pub fn init_metrics() {
    COUPON_OPERATIONS_TOTAL.get_or_init(|| {
        register_int_counter_vec!(
            opts!(
                "pricing_coupon_operations_total",
                "Total coupon operations by operation type"
            ),
            &["operation"]
        )
        .expect("Failed to register COUPON_OPERATIONS_TOTAL")
    });

    COUPON_VALIDATIONS_TOTAL.get_or_init(|| {
        register_int_counter_vec!(
            opts!(
                "pricing_coupon_validations_total",
                "Total coupon validations by outcome"
            ),
            &["outcome"]
        )
        .expect("Failed to register COUPON_VALIDATIONS_TOTAL")
    });

    REFUND_QUOTES_TOTAL.get_or_init(|| {
        register_int_counter_vec!(
            opts!("pricing_refund_quotes_total", "Total refund quotes"),
            &["outcome"]
        )
        .expect("Failed to register REFUND_QUOTES_TOTAL")
    });

    RATE_OPERATIONS_TOTAL.get_or_init(|| {
        register_int_counter_vec!(
            opts!(
                "pricing_rate_operations_total",
                "Total currency rate operations by operation type"
            ),
            &["operation"]
        )
        .expect("Failed to register RATE_OPERATIONS_TOTAL")
    });
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .expect("Failed to encode metrics");
    String::from_utf8(buffer).expect("Failed to convert metrics to string")
}

/// Record a coupon operation.
pub fn record_coupon_operation(operation: &str) {
    if let Some(counter) = COUPON_OPERATIONS_TOTAL.get() {
        counter.with_label_values(&[operation]).inc();
    }
}

/// Record a coupon validation outcome.
pub fn record_coupon_validation(outcome: &str) {
    if let Some(counter) = COUPON_VALIDATIONS_TOTAL.get() {
        counter.with_label_values(&[outcome]).inc();
    }
}

/// Record a refund quote.
pub fn record_refund_quote(outcome: &str) {
    if let Some(counter) = REFUND_QUOTES_TOTAL.get() {
        counter.with_label_values(&[outcome]).inc();
    }
}

/// Record a rate operation.
pub fn record_rate_operation(operation: &str) {
    if let Some(counter) = RATE_OPERATIONS_TOTAL.get() {
        counter.with_label_values(&[operation]).inc();
    }
}
