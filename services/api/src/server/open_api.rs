use crate::modules::{common, dispatcher, driver, tracking_record};
use crate::server::controller;
use axum::Router;
use utoipa::openapi::{InfoBuilder, OpenApi as OpenApiDoc};
use utoipa::{openapi::OpenApiBuilder, OpenApi};
use utoipa_rapidoc::RapiDoc;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    components(schemas(
        shared::VehicleType,

        common::responses::FieldError,
        common::responses::ErrorResponse,
        common::responses::CreatedResponse,

        tracking_record::dto::GeoPoint,
        tracking_record::dto::RegisterDriverDto,
        tracking_record::dto::SetMessageDto,
        tracking_record::dto::SetLocationDto,
        tracking_record::dto::TrackingRecordDto,
        tracking_record::dto::DisplayRecordDto,
        tracking_record::dto::LocationDto,
        tracking_record::dto::RecordLocationDto,
    )),
    paths(
        controller::healthcheck,

        driver::routes::register_driver,
        driver::routes::get_driver_message,

        dispatcher::routes::list_records,
        dispatcher::routes::set_message,
        dispatcher::routes::set_location,
        dispatcher::routes::list_live_locations,
        dispatcher::routes::get_live_location,
    ),
    tags(
        (name = "driver", description = "vehicle registration and message polling"),
        (name = "dispatcher", description = "monitoring of every registered vehicle"),
    ),
)]
struct ApiDoc;

/// Moves every documented route but the healthcheck under `prefix`, since the
/// route groups are nested under it when the router is built
fn prefix_paths(doc: &mut OpenApiDoc, prefix: &str) {
    let paths = std::mem::take(&mut doc.paths.paths);

    doc.paths.paths = paths
        .into_iter()
        .map(|(path, item)| match path.as_str() {
            "/healthcheck" => (path, item),
            _ => (format!("{prefix}{path}"), item),
        })
        .collect();
}

/// The OpenAPI document of the service, with paths as they are served
pub fn api_doc(prefix: Option<&str>) -> OpenApiDoc {
    let builder: OpenApiBuilder = ApiDoc::openapi().into();

    let info = InfoBuilder::new()
        .title("Tracking API")
        .description(Some(
            "Vehicle registration, dispatcher messages and live route locations.",
        ))
        .version(env!("CARGO_PKG_VERSION"))
        .build();

    let mut doc = builder.info(info).build();

    if let Some(prefix) = prefix {
        prefix_paths(&mut doc, prefix);
    }

    doc
}

pub fn create_openapi_router(prefix: Option<&str>) -> Router<controller::AppState> {
    Router::new()
        .merge(SwaggerUi::new("/swagger").url("/docs/openapi.json", api_doc(prefix)))
        .merge(RapiDoc::new("/docs/openapi.json").path("/rapidoc"))
}
