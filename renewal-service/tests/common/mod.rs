//! Test helper module for renewal-service integration tests.

#![allow(dead_code)]

use marketplace_core::clock::{Clock, ManualClock};
use marketplace_core::config::Config as CoreConfig;
use renewal_service::config::RenewalConfig;
use renewal_service::models::ButtonRule;
use renewal_service::startup::Application;
use std::sync::Arc;

/// Test application wrapper for integration tests.
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub clock: Arc<ManualClock>,
}

impl TestApp {
    /// Spawn a new test application on a random port.
    pub async fn spawn() -> Self {
        Self::spawn_with_rule(ButtonRule::Legacy).await
    }

    /// Spawn with an explicit button rule.
    pub async fn spawn_with_rule(button_rule: ButtonRule) -> Self {
        let config = RenewalConfig {
            common: CoreConfig { port: 0 }, // Random port
            service_name: "renewal-service-test".to_string(),
            log_level: "warn".to_string(),
            button_rule,
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
        }
    }
}
