use axum::{
    body::{to_bytes, Body},
    Router,
};
use http::{header, Request, StatusCode};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::Value;
use tower::ServiceExt;
use tracking_api::{config::AppConfig, server::controller};

/// The full api router backed by a migrated in memory sqlite database
pub async fn app() -> Router {
    app_with_config(&AppConfig::default()).await
}

pub async fn app_with_config(cfg: &AppConfig) -> Router {
    controller::new(memory_db().await, cfg)
}

/// The api router and a handle to its database, for rows the api cannot write
pub async fn app_and_db() -> (Router, DatabaseConnection) {
    let db = memory_db().await;

    (controller::new(db.clone(), &AppConfig::default()), db)
}

async fn memory_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(opt).await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    db
}

/// Sends a request to the router, returning the status and the JSON body
/// (`Value::Null` for empty bodies)
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);

    let body = match body {
        Some(json) => {
            req = req.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let res = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
    let status = res.status();

    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

pub fn s1() -> Value {
    serde_json::json!({
        "serial_no": "S1",
        "type_of_vehicle": "ambulance",
        "vehicle_number": "MH01AB1234",
        "source": { "lat": 19.02, "lng": 72.85 },
        "destination": { "lat": 19.03, "lng": 72.86 }
    })
}
