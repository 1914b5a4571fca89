use crate::modules::common::responses::{internal_error_msg, ErrorResponse, FieldError};
use convert_case::{Case, Casing};
use http::StatusCode;
use sea_orm::{DbErr, SqlErr};
use std::fmt;
use tracing::error;

/// Columns of `tracking_record` guarded by a unique index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueColumn {
    SerialNo,
    VehicleNumber,
}

impl UniqueColumn {
    pub const fn as_str(self) -> &'static str {
        match self {
            UniqueColumn::SerialNo => "serial_no",
            UniqueColumn::VehicleNumber => "vehicle_number",
        }
    }

    fn conflict_message(self) -> &'static str {
        match self {
            UniqueColumn::SerialNo => "Driver with the specified serial number already exists.",
            UniqueColumn::VehicleNumber => {
                "Vehicle with the specified vehicle number already exists."
            }
        }
    }
}

/// Wrapper for seaorm errors and the store level rejections of the record store.
///
/// This is useful for wrapping database errors and safely returning them from
/// axum route handlers without worrying about leaking sensitive information,
/// as it implements `Into<(StatusCode, ErrorResponse)>`
#[derive(Debug)]
pub enum DbError {
    /// a write would break the unique index of a column
    UniqueViolation(UniqueColumn),

    /// a coordinate pair of the given field is outside the latitude / longitude ranges
    OutOfRange(&'static str),

    Other(DbErr),
}

impl fmt::Display for DbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DbError::UniqueViolation(col) => write!(f, "unique violation on {}", col.as_str()),
            DbError::OutOfRange(field) => write!(f, "{field} coordinates out of range"),
            DbError::Other(e) => write!(f, "{e}"),
        }
    }
}

impl From<DbErr> for DbError {
    fn from(err: DbErr) -> Self {
        if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
            if let Some(col) = get_column_from_unique_violation(&detail) {
                return DbError::UniqueViolation(col);
            }
        }

        DbError::Other(err)
    }
}

impl DbError {
    /// Converts the error to a response, using `internal_msg` as the message
    /// of unexpected failures. The underlying error is logged, never returned.
    pub fn into_error_response(self, internal_msg: &str) -> (StatusCode, ErrorResponse) {
        match self {
            DbError::UniqueViolation(col) => (
                StatusCode::CONFLICT,
                ErrorResponse::with_errors(
                    col.conflict_message(),
                    vec![FieldError::new(
                        col.as_str(),
                        format!("{}_IN_USE", col.as_str().to_case(Case::ScreamingSnake)),
                    )],
                ),
            ),

            DbError::OutOfRange(field) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::with_errors(
                    "Coordinates are out of range.",
                    vec![FieldError::new(
                        field,
                        "latitude must be within [-90, 90] and longitude within [-180, 180].",
                    )],
                ),
            ),

            DbError::Other(DbErr::RecordNotFound(_)) | DbError::Other(DbErr::RecordNotUpdated) => {
                (StatusCode::NOT_FOUND, ErrorResponse::from("Driver not found."))
            }

            DbError::Other(e) => {
                error!(error = %e, "[DB] unexpected database error");
                internal_error_msg(internal_msg)
            }
        }
    }
}

impl From<DbError> for (StatusCode, ErrorResponse) {
    fn from(err: DbError) -> Self {
        err.into_error_response("internal server error")
    }
}

/// Finds the column a unique violation refers to.
///
/// postgres reports the index name (`tracking_record_<column>_unique`) while
/// sqlite reports `tracking_record.<column>`, both contain the column name.
/// for the compound index the first column wins.
fn get_column_from_unique_violation(detail: &str) -> Option<UniqueColumn> {
    [UniqueColumn::SerialNo, UniqueColumn::VehicleNumber]
        .into_iter()
        .find(|col| detail.contains(col.as_str()))
}
