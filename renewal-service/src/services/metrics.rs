//! Metrics module for renewal-service.
//! Provides Prometheus metrics for renewal calculations.

use prometheus::{Encoder, IntCounterVec, TextEncoder, opts, register_int_counter_vec};
use std::sync::OnceLock;

/// Renewal operations counter
pub static RENEWAL_OPERATIONS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Computed status counter
pub static RENEWAL_STATUS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize all metrics. Call once at startup.
pub fn init_metrics() {
    RENEWAL_OPERATIONS_TOTAL.get_or_init(|| {
        register_int_counter_vec!(
            opts!(
                "renewal_operations_total",
                "Total renewal operations by operation type"
            ),
            &["operation"]
        )
        .expect("Failed to register RENEWAL_OPERATIONS_TOTAL")
    });

    RENEWAL_STATUS_TOTAL.get_or_init(|| {
        register_int_counter_vec!(
            opts!(
                "renewal_status_total",
                "Total computed renewal statuses by status"
            ),
            &["status"]
        )
        .expect("Failed to register RENEWAL_STATUS_TOTAL")
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

/// Record a renewal operation.
pub fn record_renewal_operation(operation: &str) {
    if let Some(counter) = RENEWAL_OPERATIONS_TOTAL.get() {
        counter.with_label_values(&[operation]).inc();
    }
}

/// Record a computed status.
pub fn record_renewal_status(status: &str) {
    if let Some(counter) = RENEWAL_STATUS_TOTAL.get() {
        counter.with_label_values(&[status]).inc();
    }
}
