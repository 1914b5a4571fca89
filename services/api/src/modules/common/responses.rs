use axum::{
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use serde::Serialize;
use std::borrow::Cow;
use utoipa::ToSchema;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// A single rejected field of a request, `field` is a dotted path for
/// nested values such as `source.lat`
#[derive(Serialize, Clone, Debug, PartialEq, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Body of every failed API response: `{ success: false, message, errors }`
///
/// its meant to be sent as JSON so its `IntoResponse` implementation will set the
/// response body to JSON
#[derive(Serialize, Clone, Debug, ToSchema)]
pub struct ErrorResponse {
    success: bool,
    pub message: String,
    pub errors: Vec<FieldError>,
}

impl ErrorResponse {
    pub fn with_errors(message: impl Into<String>, errors: Vec<FieldError>) -> Self {
        ErrorResponse {
            success: false,
            message: message.into(),
            errors,
        }
    }

    /// the message for a request whose body failed validation
    pub fn validation_failed(errors: Vec<FieldError>) -> ErrorResponse {
        ErrorResponse::with_errors("Validation failed for the provided data.", errors)
    }
}

impl From<String> for ErrorResponse {
    fn from(v: String) -> Self {
        ErrorResponse::with_errors(v, vec![])
    }
}

impl From<&str> for ErrorResponse {
    fn from(v: &str) -> Self {
        ErrorResponse::from(String::from(v))
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Body of every successful API response carrying data: `{ success: true, message, data }`
#[derive(Serialize, Debug)]
pub struct DataResponse<T: Serialize> {
    success: bool,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        DataResponse {
            success: true,
            message: message.into(),
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for DataResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Body of a successful creation: `{ success: true, message, _id }`
#[derive(Serialize, Debug, ToSchema)]
pub struct CreatedResponse {
    success: bool,
    pub message: String,
    #[serde(rename = "_id")]
    pub id: i32,
}

impl CreatedResponse {
    pub fn new(message: impl Into<String>, id: i32) -> Self {
        CreatedResponse {
            success: true,
            message: message.into(),
            id,
        }
    }
}

impl IntoResponse for CreatedResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

pub fn internal_error_msg(msg: &str) -> (StatusCode, ErrorResponse) {
    (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::from(msg))
}

pub fn bad_request(msg: &str) -> (StatusCode, ErrorResponse) {
    (StatusCode::BAD_REQUEST, ErrorResponse::from(msg))
}

pub fn not_found(msg: &str) -> (StatusCode, ErrorResponse) {
    (StatusCode::NOT_FOUND, ErrorResponse::from(msg))
}

/// Flattens `validator` errors into one `FieldError` per violation, sorted by
/// field so responses are stable across runs.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = vec![];
    collect_field_errors(None, errors, &mut out);

    out.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
    out
}

fn collect_field_errors(parent: Option<&str>, errors: &ValidationErrors, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let path = match parent {
            Some(parent) => format!("{parent}.{field}"),
            None => field.to_string(),
        };

        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|e| FieldError::new(&path, describe(&path, e))));
            }
            ValidationErrorsKind::Struct(nested) => collect_field_errors(Some(&path), nested, out),
            ValidationErrorsKind::List(items) => {
                for (i, nested) in items {
                    collect_field_errors(Some(&format!("{path}[{i}]")), nested, out);
                }
            }
        }
    }
}

fn describe(field: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    match error.code.as_ref() {
        "required" => format!("{field} is required."),
        "blank" => format!("{field} must not be blank."),
        "type" => match error.params.get(&Cow::from("expected")).and_then(|e| e.as_str()) {
            Some(expected) => format!("{field} must be {expected}."),
            None => format!("{field} has the wrong type."),
        },
        "range" => match (
            error.params.get(&Cow::from("min")),
            error.params.get(&Cow::from("max")),
        ) {
            (Some(min), Some(max)) => format!("{field} must be between {min} and {max}."),
            _ => format!("{field} is out of range."),
        },
        code => format!("{field} is invalid ({code})."),
    }
}
