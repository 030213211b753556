use axum::http::{HeaderName, HeaderValue, StatusCode};
use serde_json::{json, Value};
use taxon_owl::tests_cfg::StaticTaxonomy;

use crate::server_with;

#[tokio::test]
async fn home_reports_the_service_is_running() {
    let server = server_with(StaticTaxonomy::default());

    let response = server.get("/").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "TaxonOWLConverter API is running!");
}

#[tokio::test]
async fn ping_and_health_answer_ok() {
    let server = server_with(StaticTaxonomy::default());

    for uri in ["/_ping", "/_health"] {
        let response = server.get(uri).await;
        assert_eq!(response.status_code(), StatusCode::OK, "{uri}");
        assert_eq!(response.json::<Value>(), json!({ "ok": true }), "{uri}");
    }
}

#[tokio::test]
async fn cross_origin_requests_are_allowed() {
    let server = server_with(StaticTaxonomy::default());

    let response = server
        .get("/")
        .add_header(
            HeaderName::from_static("origin"),
            HeaderValue::from_static("https://example.org"),
        )
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response
        .headers()
        .contains_key("access-control-allow-origin"));
}
