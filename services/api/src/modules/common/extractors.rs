use super::{
    responses::{ErrorResponse, FieldError},
    validators::{validate_body, RequestSchema},
};
use crate::server::controller::AppState;
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Request},
    Json,
};
use http::{request::Parts, StatusCode};
use sea_orm::DatabaseConnection;

/// Wrapper struct that extracts the request body as json like `axum::Json<serde_json::Value>`
/// and runs it through the `RequestSchema` T, if validation fails a bad request code and the
/// list of field errors is returned.
///
/// on success the normalized value of the schema is extracted, not the schema itself
pub struct ValidatedJson<T: RequestSchema>(pub T::Normalized);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: RequestSchema + Send,
    T::Normalized: Send,
    S: Send + Sync,
{
    type Rejection = (StatusCode, ErrorResponse);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = match Json::<serde_json::Value>::from_request(req, state).await {
            Ok(Json(body)) => body,
            Err(rejection) => return Err(json_rejection_to_error(rejection)),
        };

        match validate_body::<T>(body) {
            Ok(normalized) => Ok(ValidatedJson(normalized)),
            Err(errors) => Err((
                StatusCode::BAD_REQUEST,
                ErrorResponse::validation_failed(errors),
            )),
        }
    }
}

fn json_rejection_to_error(rejection: JsonRejection) -> (StatusCode, ErrorResponse) {
    let status = match &rejection {
        JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        _ => StatusCode::BAD_REQUEST,
    };

    (
        status,
        ErrorResponse::validation_failed(vec![FieldError::new("body", rejection.body_text())]),
    )
}

/// Helper to get a DB connection from the state
pub struct DbConnection(pub DatabaseConnection);

#[async_trait]
impl FromRequestParts<AppState> for DbConnection {
    type Rejection = (http::StatusCode, ErrorResponse);

    async fn from_request_parts(_: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(DbConnection(state.db.clone()))
    }
}
