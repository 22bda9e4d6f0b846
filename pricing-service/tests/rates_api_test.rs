mod common;

use common::TestApp;

#[tokio::test]
async fn rates_are_served_from_the_static_table() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(format!("{}/rates", app.address))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["rates"]["USD"].as_f64(), Some(1.0));
    assert!(body["fetchedAt"].is_string());
}

#[tokio::test]
async fn refresh_returns_a_fresh_snapshot() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .post(format!("{}/rates/refresh", app.address))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["rates"].as_object().is_some_and(|r| !r.is_empty()));
}
