mod common;

use common::TestApp;
use renewal_service::models::ButtonRule;
use reqwest::Client;
use serde_json::json;

// =============================================================================
// Health & Metrics
// =============================================================================

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "renewal-service");
}

#[tokio::test]
async fn readiness_check_works() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
}

#[tokio::test]
async fn metrics_endpoint_exposes_operation_counters() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    client
        .post(format!("{}/renewals/report", app.address))
        .json(&json!({"renewalDate": "2026-09-30", "currentDate": "2026-08-01"}))
        .send()
        .await
        .expect("Failed to execute request");

    let body = client
        .get(format!("{}/metrics", app.address))
        .send()
        .await
        .expect("Failed to execute request")
        .text()
        .await
        .expect("Failed to read metrics body");

    assert!(body.contains("renewal_operations_total"));
}

// =============================================================================
// Renewal report
// =============================================================================

#[tokio::test]
async fn report_classifies_each_threshold() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    // currentDate 2026-08-01; renewal dates chosen to hit each band exactly
    let cases = [
        ("2026-08-16", 15, "active"),
        ("2026-08-15", 14, "renewal-required"),
        ("2026-08-01", 0, "renewal-required"),
        ("2026-07-31", -1, "expired"),
        ("2026-07-08", -24, "expired"),
        ("2026-07-07", -25, "cancelled"),
    ];

    for (renewal_date, expected_days, expected_status) in cases {
        let body: serde_json::Value = client
            .post(format!("{}/renewals/report", app.address))
            .json(&json!({"renewalDate": renewal_date, "currentDate": "2026-08-01"}))
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse response");

        assert_eq!(body["daysRemaining"], expected_days, "{}", renewal_date);
        assert_eq!(body["status"], expected_status, "{}", renewal_date);
    }
}

#[tokio::test]
async fn report_uses_the_service_clock_when_no_override_is_given() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    // Manual clock is pinned to 2026-08-01
    let body: serde_json::Value = client
        .post(format!("{}/renewals/report", app.address))
        .json(&json!({"renewalDate": "2026-08-31"}))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(body["daysRemaining"], 30);
    assert_eq!(body["status"], "active");
}

#[tokio::test]
async fn legacy_button_rule_matches_the_active_band_only() {
    let app = TestApp::spawn_with_rule(ButtonRule::Legacy).await;
    let client = Client::new();

    for (renewal_date, enabled) in [("2026-08-16", true), ("2026-08-15", false), ("2026-07-20", false)] {
        let body: serde_json::Value = client
            .post(format!("{}/renewals/report", app.address))
            .json(&json!({"renewalDate": renewal_date, "currentDate": "2026-08-01"}))
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse response");

        assert_eq!(body["button"]["isEnabled"], enabled, "{}", renewal_date);
        assert_eq!(body["button"]["isVisible"], enabled, "{}", renewal_date);
    }
}

#[tokio::test]
async fn windowed_button_rule_covers_the_whole_renewal_window() {
    let app = TestApp::spawn_with_rule(ButtonRule::Windowed).await;
    let client = Client::new();

    for (renewal_date, enabled) in [("2026-08-15", true), ("2026-07-08", true), ("2026-07-07", false)] {
        let body: serde_json::Value = client
            .post(format!("{}/renewals/report", app.address))
            .json(&json!({"renewalDate": renewal_date, "currentDate": "2026-08-01"}))
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse response");

        assert_eq!(body["button"]["isEnabled"], enabled, "{}", renewal_date);
    }
}

#[tokio::test]
async fn garbage_renewal_date_reports_due_today() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/renewals/report", app.address))
        .json(&json!({"renewalDate": "whenever", "currentDate": "2026-08-01"}))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["daysRemaining"], 0);
    assert_eq!(body["status"], "renewal-required");
}

#[tokio::test]
async fn malformed_current_date_is_rejected() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/renewals/report", app.address))
        .json(&json!({"renewalDate": "2026-09-01", "currentDate": "yesterday"}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 400);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"].as_str().unwrap().contains("currentDate"));
}

#[tokio::test]
async fn empty_renewal_date_fails_validation() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/renewals/report", app.address))
        .json(&json!({"renewalDate": ""}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 422);
}

// =============================================================================
// Next renewal date
// =============================================================================

#[tokio::test]
async fn next_date_preserves_the_anniversary() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let body: serde_json::Value = client
        .post(format!("{}/renewals/next-date", app.address))
        .json(&json!({"renewalDate": "2025-09-21", "currentDate": "2026-10-01"}))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(body["nextRenewalDate"], "2027-09-21");
}

#[tokio::test]
async fn next_date_is_stable_across_the_processing_month() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    for current_date in ["2026-09-01", "2026-10-01"] {
        let body: serde_json::Value = client
            .post(format!("{}/renewals/next-date", app.address))
            .json(&json!({"renewalDate": "2025-09-21", "currentDate": current_date}))
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse response");

        assert_eq!(body["nextRenewalDate"], "2027-09-21", "{}", current_date);
    }
}

#[tokio::test]
async fn next_date_falls_back_to_one_year_out_on_garbage_input() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let body: serde_json::Value = client
        .post(format!("{}/renewals/next-date", app.address))
        .json(&json!({"renewalDate": "???", "currentDate": "2026-08-01"}))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(body["nextRenewalDate"], "2027-08-01");
}
