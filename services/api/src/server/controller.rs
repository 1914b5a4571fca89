use super::open_api;
use crate::{
    config::AppConfig,
    modules::{dispatcher, driver},
};
use axum::{body::Body, routing::get, Router};
use http::{header, HeaderValue, Method, Request, StatusCode};
use sea_orm::DatabaseConnection;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

/// The main application state, this is cloned for every HTTP request
/// and thus its fields should contain types that are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

/// Creates the main axum router/controller to be served over http
pub fn new(db: DatabaseConnection, cfg: &AppConfig) -> Router {
    let state = AppState { db };

    // URL.to_string for some reason adds a trailing slash
    // we need to remove it to avoid cors errors
    let frontend_origin = cfg.frontend_url.as_str().trim_end_matches('/');

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_origin(
            frontend_origin
                .parse::<HeaderValue>()
                .expect("failed to parse CORS allowed origins"),
        )
        .allow_headers([header::ACCEPT, header::CONTENT_TYPE]);

    let tracing_layer = TraceLayer::new_for_http()
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!("request: {} {}", request.method(), request.uri().path())
        })
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let global_middlewares = ServiceBuilder::new().layer(tracing_layer).layer(cors);

    let api = Router::new()
        .merge(driver::routes::create_router())
        .merge(dispatcher::routes::create_router());

    let prefix = cfg.normalized_api_prefix();

    let router = match &prefix {
        Some(prefix) => Router::new().nest(prefix, api),
        None => api,
    };

    router
        .merge(open_api::create_openapi_router(prefix.as_deref()))
        .route("/healthcheck", get(healthcheck))
        .layer(global_middlewares)
        .with_state(state)
}

#[utoipa::path(
    get,
    tag = "meta",
    path = "/healthcheck",
    responses((status = OK)),
)]
pub async fn healthcheck() -> StatusCode {
    StatusCode::OK
}
