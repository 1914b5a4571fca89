use crate::{
    modules::{
        common::{
            extractors::{DbConnection, ValidatedJson},
            responses::{not_found, DataResponse, ErrorResponse},
        },
        tracking_record::{
            dto::{
                DisplayRecordDto, GeoPoint, LocationDto, LocationUpdate, RecordLocationDto,
                SetLocationDto, SetMessageDto, TrackingRecordDto,
            },
            repository::{self, LocationRow, RecordPatch},
        },
    },
    server::controller::AppState,
};
use axum::{
    extract::Path,
    routing::{get, post},
    Router,
};
use http::StatusCode;
use tracing::info;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/get-user-data", get(list_records))
        .route("/add-police-message", post(set_message))
        .route("/update-location", post(set_location))
        //
        .route("/get-live-location", get(list_live_locations))
        .route("/get-live-location/", get(list_live_locations))
        .route("/get-live-location/:serial_no", get(get_live_location))
}

/// Lists every record in display form, newest first
#[utoipa::path(
    get,
    tag = "dispatcher",
    path = "/get-user-data",
    responses(
        (
            status = OK,
            description = "the records, as `data` of the response",
            body = [DisplayRecordDto],
        ),
    ),
)]
pub async fn list_records(
    DbConnection(db): DbConnection,
) -> Result<DataResponse<Vec<DisplayRecordDto>>, (StatusCode, ErrorResponse)> {
    let records = repository::list_all(&db)
        .await
        .map_err(|e| e.into_error_response("Failed to fetch tracking records."))?;

    Ok(DataResponse::new(
        "Records fetched successfully.",
        records.iter().map(DisplayRecordDto::from).collect(),
    ))
}

/// Sets the message shown to the driver of a record
#[utoipa::path(
    post,
    tag = "dispatcher",
    path = "/add-police-message",
    request_body = SetMessageDto,
    responses(
        (
            status = OK,
            description = "the updated record, as `data` of the response",
            body = TrackingRecordDto,
        ),
        (
            status = BAD_REQUEST,
            body = ErrorResponse,
        ),
        (
            status = NOT_FOUND,
            body = ErrorResponse,
        ),
    ),
)]
pub async fn set_message(
    DbConnection(db): DbConnection,
    ValidatedJson((serial_no, message)): ValidatedJson<SetMessageDto>,
) -> Result<DataResponse<TrackingRecordDto>, (StatusCode, ErrorResponse)> {
    let updated = repository::update_by_serial(&db, &serial_no, RecordPatch::Message(message))
        .await
        .map_err(|e| e.into_error_response("Failed to add message."))?
        .ok_or_else(|| not_found("Driver not found."))?;

    info!(serial_no = %updated.serial_no, "[DISPATCHER] message set");

    Ok(DataResponse::new(
        "Message added successfully.",
        TrackingRecordDto::from(updated),
    ))
}

/// Replaces the source and destination of a record
#[utoipa::path(
    post,
    tag = "dispatcher",
    path = "/update-location",
    request_body = SetLocationDto,
    responses(
        (
            status = OK,
            description = "the updated record, as `data` of the response",
            body = TrackingRecordDto,
        ),
        (
            status = BAD_REQUEST,
            body = ErrorResponse,
        ),
        (
            status = NOT_FOUND,
            body = ErrorResponse,
        ),
    ),
)]
pub async fn set_location(
    DbConnection(db): DbConnection,
    ValidatedJson(update): ValidatedJson<SetLocationDto>,
) -> Result<DataResponse<TrackingRecordDto>, (StatusCode, ErrorResponse)> {
    let LocationUpdate {
        serial_no,
        source,
        destination,
    } = update;

    let patch = RecordPatch::Route {
        source,
        destination,
    };

    let updated = repository::update_by_serial(&db, &serial_no, patch)
        .await
        .map_err(|e| e.into_error_response("Failed to update source or destination."))?
        .ok_or_else(|| not_found("Driver not found."))?;

    info!(serial_no = %updated.serial_no, "[DISPATCHER] route updated");

    Ok(DataResponse::new(
        "Source and destination updated successfully.",
        TrackingRecordDto::from(updated),
    ))
}

fn point(lat: Option<f64>, lng: Option<f64>) -> Option<GeoPoint> {
    Some(GeoPoint {
        lat: lat?,
        lng: lng?,
    })
}

impl From<LocationRow> for RecordLocationDto {
    fn from(row: LocationRow) -> Self {
        RecordLocationDto {
            source: point(row.source_lat, row.source_lng),
            destination: point(row.destination_lat, row.destination_lng),
            id: row.id,
            serial_no: row.serial_no,
        }
    }
}

/// Gets the route of every record, for the live map
#[utoipa::path(
    get,
    tag = "dispatcher",
    path = "/get-live-location",
    responses(
        (
            status = OK,
            description = "the routes, as `data` of the response",
            body = [RecordLocationDto],
        ),
    ),
)]
pub async fn list_live_locations(
    DbConnection(db): DbConnection,
) -> Result<DataResponse<Vec<RecordLocationDto>>, (StatusCode, ErrorResponse)> {
    let rows = repository::list_locations(&db)
        .await
        .map_err(|e| e.into_error_response("Failed to fetch live locations."))?;

    Ok(DataResponse::new(
        "Live locations fetched successfully.",
        rows.into_iter().map(RecordLocationDto::from).collect(),
    ))
}

/// Gets the route of a single record
#[utoipa::path(
    get,
    tag = "dispatcher",
    path = "/get-live-location/{serial_no}",
    params(
        ("serial_no" = String, Path, description = "serial number of the record"),
    ),
    responses(
        (
            status = OK,
            description = "the route, as `data` of the response",
            body = LocationDto,
        ),
        (
            status = NOT_FOUND,
            body = ErrorResponse,
        ),
    ),
)]
pub async fn get_live_location(
    DbConnection(db): DbConnection,
    Path(serial_no): Path<String>,
) -> Result<DataResponse<LocationDto>, (StatusCode, ErrorResponse)> {
    let serial_no = serial_no.trim();

    if serial_no.is_empty() {
        return Err(not_found("Driver not found."));
    }

    let record = repository::find_by_serial(&db, serial_no)
        .await
        .map_err(|e| e.into_error_response("Failed to fetch live locations."))?
        .ok_or_else(|| not_found("Driver not found."))?;

    Ok(DataResponse::new(
        "Live location fetched successfully.",
        LocationDto {
            source: point(record.source_lat, record.source_lng),
            destination: point(record.destination_lat, record.destination_lng),
        },
    ))
}
