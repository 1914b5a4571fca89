mod common;

use common::{app, app_with_config, s1, send};
use http::StatusCode;
use tracking_api::config::AppConfig;

#[tokio::test]
async fn healthcheck_is_outside_the_prefix() {
    let app = app().await;

    let (status, _) = send(&app, "GET", "/healthcheck", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", "/api/v1/healthcheck", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn routes_are_served_from_the_root_with_an_empty_prefix() {
    let cfg = AppConfig {
        api_prefix: String::new(),
        ..AppConfig::default()
    };

    let app = app_with_config(&cfg).await;

    let (status, _) = send(&app, "POST", "/add-user-data", Some(s1())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(&app, "GET", "/api/v1/get-user-data", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = app().await;

    let (status, doc) = send(&app, "GET", "/docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/v1/update-location"].is_object());
}
