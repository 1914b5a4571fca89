use crate::{
    modules::{
        common::{
            extractors::{DbConnection, ValidatedJson},
            responses::{bad_request, not_found, CreatedResponse, DataResponse, ErrorResponse},
        },
        tracking_record::{
            dto::{RegisterDriverDto, TrackingRecordDto},
            repository,
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
        .route("/add-user-data", post(register_driver))
        //
        .route("/get-driver-message", get(missing_serial_no))
        .route("/get-driver-message/", get(missing_serial_no))
        .route("/get-driver-message/:serial_no", get(get_driver_message))
}

/// Registers a vehicle and its route
#[utoipa::path(
    post,
    tag = "driver",
    path = "/add-user-data",
    request_body = RegisterDriverDto,
    responses(
        (
            status = CREATED,
            description = "id of the created record",
            body = CreatedResponse,
        ),
        (
            status = BAD_REQUEST,
            description = "per field validation errors",
            body = ErrorResponse,
        ),
        (
            status = CONFLICT,
            description = "serial number or vehicle number already registered",
            body = ErrorResponse,
        ),
    ),
)]
pub async fn register_driver(
    DbConnection(db): DbConnection,
    ValidatedJson(record): ValidatedJson<RegisterDriverDto>,
) -> Result<CreatedResponse, (StatusCode, ErrorResponse)> {
    let created = repository::create(&db, &record)
        .await
        .map_err(|e| e.into_error_response("Could not add driver data. Please try again later."))?;

    info!(
        id = created.id,
        serial_no = %created.serial_no,
        "[DRIVER] vehicle registered"
    );

    Ok(CreatedResponse::new(
        "Driver data successfully added.",
        created.id,
    ))
}

pub async fn missing_serial_no() -> (StatusCode, ErrorResponse) {
    bad_request("No serial number provided.")
}

/// Gets the record of a driver, including the last dispatcher message
///
/// polled by the driver client to pick up new messages
#[utoipa::path(
    get,
    tag = "driver",
    path = "/get-driver-message/{serial_no}",
    params(
        ("serial_no" = String, Path, description = "serial number the driver registered with"),
    ),
    responses(
        (
            status = OK,
            description = "the record, as `data` of the response",
            body = TrackingRecordDto,
        ),
        (
            status = BAD_REQUEST,
            description = "blank serial number or a record without a complete route",
            body = ErrorResponse,
        ),
        (
            status = NOT_FOUND,
            body = ErrorResponse,
        ),
    ),
)]
pub async fn get_driver_message(
    DbConnection(db): DbConnection,
    Path(serial_no): Path<String>,
) -> Result<DataResponse<TrackingRecordDto>, (StatusCode, ErrorResponse)> {
    let serial_no = serial_no.trim();

    if serial_no.is_empty() {
        return Err(missing_serial_no().await);
    }

    let record = repository::find_by_serial(&db, serial_no)
        .await
        .map_err(|e| e.into_error_response("Could not retrieve driver data. Please try again later."))?
        .ok_or_else(|| not_found("Driver with the specified serial number not found."))?;

    if !record.has_complete_route() {
        return Err(bad_request("Source or destination data is incomplete."));
    }

    Ok(DataResponse::new(
        "Driver data retrieved successfully.",
        TrackingRecordDto::from(record),
    ))
}
