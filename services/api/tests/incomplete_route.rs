mod common;

use common::{app_and_db, send};
use entity::tracking_record;
use http::StatusCode;
use sea_orm::{ActiveModelTrait, Set};
use serde_json::json;
use shared::VehicleType;

/// a row without coordinates, as left by clients that never sent a route
async fn insert_without_route(db: &sea_orm::DatabaseConnection, serial_no: &str) {
    tracking_record::ActiveModel {
        serial_no: Set(String::from(serial_no)),
        type_of_vehicle: Set(VehicleType::Firetruck),
        vehicle_number: Set(String::from("MH05EF0001")),
        message: Set(String::from("No message provided.")),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();
}

#[tokio::test]
async fn driver_fetch_of_incomplete_row_is_a_bad_request_not_a_missing_one() {
    let (app, db) = app_and_db().await;
    insert_without_route(&db, "S7").await;

    let (status, body) = send(&app, "GET", "/api/v1/get-driver-message/S7", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(
        body["message"],
        json!("Source or destination data is incomplete.")
    );
}

#[tokio::test]
async fn incomplete_row_has_null_points_on_the_live_map() {
    let (app, db) = app_and_db().await;
    insert_without_route(&db, "S7").await;

    let (status, body) = send(&app, "GET", "/api/v1/get-live-location/S7", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!({ "source": null, "destination": null })
    );

    let (_, all) = send(&app, "GET", "/api/v1/get-live-location", None).await;

    assert_eq!(all["data"][0]["serial_no"], json!("S7"));
    assert_eq!(all["data"][0]["source"], json!(null));

    let (_, list) = send(&app, "GET", "/api/v1/get-user-data", None).await;

    assert_eq!(list["data"][0]["source"], json!("N/A"));
    assert_eq!(list["data"][0]["destination"], json!("N/A"));
}

#[tokio::test]
async fn location_update_completes_the_row() {
    let (app, db) = app_and_db().await;
    insert_without_route(&db, "S7").await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/update-location",
        Some(json!({
            "serial_no": "S7",
            "source": { "lat": 1.0, "lng": 2.0 },
            "destination": { "lat": 3.0, "lng": 4.0 }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", "/api/v1/get-driver-message/S7", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["destination"], json!({ "lat": 3.0, "lng": 4.0 }));
}
