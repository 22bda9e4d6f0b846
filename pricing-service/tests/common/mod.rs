//! Test helper module for pricing-service integration tests.

#![allow(dead_code)]

use marketplace_core::clock::{Clock, ManualClock};
use marketplace_core::config::Config as CoreConfig;
use pricing_service::config::{PricingConfig, RatesConfig};
use pricing_service::startup::Application;
use serde_json::json;
use std::sync::Arc;

/// Test application wrapper for integration tests. The manual clock is
/// pinned to 2026-08-01.
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub clock: Arc<ManualClock>,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn a new test application on a random port.
    pub async fn spawn() -> Self {
        let config = PricingConfig {
            common: CoreConfig { port: 0 }, // Random port
            service_name: "pricing-service-test".to_string(),
            log_level: "warn".to_string(),
            rates: RatesConfig {
                url: None, // static rate table
                ttl_seconds: 300,
            },
        };

        let clock = Arc::new(ManualClock::new(
            "2026-08-01T00:00:00Z".parse().expect("valid timestamp"),
        ));

        let app = Application::build(config, clock.clone() as Arc<dyn Clock>)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            clock,
            client,
        }
    }

    /// Create a coupon through the admin endpoint, panicking unless it
    /// lands with 201.
    pub async fn create_coupon(&self, body: serde_json::Value) -> serde_json::Value {
        let response = self
            .client
            .post(format!("{}/coupons", self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), 201, "coupon creation should succeed");
        response.json().await.expect("Failed to parse response")
    }

    /// Shorthand for a percentage coupon with no limits.
    pub async fn create_percentage_coupon(&self, code: &str, percent: u32) -> serde_json::Value {
        self.create_coupon(json!({
            "code": code,
            "discountType": "percentage",
            "discountValue": percent,
        }))
        .await
    }

    pub async fn validate(&self, code: &str, order_total: i64) -> serde_json::Value {
        let response = self
            .client
            .post(format!("{}/coupons/validate", self.address))
            .json(&json!({"code": code, "orderTotal": order_total}))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), 200, "validation is always 200");
        response.json().await.expect("Failed to parse response")
    }

    pub async fn apply(&self, code: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/coupons/apply", self.address))
            .json(&json!({"code": code}))
            .send()
            .await
            .expect("Failed to execute request")
    }
}
