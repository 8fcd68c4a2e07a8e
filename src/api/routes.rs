use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::Level;

use super::handlers::{devices, health, report};
use crate::config::CorsConfig;
use crate::services::DeviceService;

pub fn create_router(service: DeviceService, cors: &CorsConfig) -> Router {
    let api_routes = Router::new()
        .route(
            "/api/v1/devices",
            get(devices::list_devices).post(devices::create_device),
        )
        .route(
            "/api/v1/devices/{id}",
            get(devices::get_device)
                .put(devices::replace_device)
                .delete(devices::delete_device),
        )
        .route("/api/v1/report", get(report::get_report));

    let public_routes = Router::new().route("/health", get(health::health_check));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .with_state(service)
        .layer(cors_layer(cors))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request| {
                    tracing::span!(
                        Level::INFO,
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                })
                .on_request(|_request: &Request, _span: &tracing::Span| {
                    tracing::event!(Level::DEBUG, "received request");
                })
                .on_response(
                    |response: &axum::response::Response,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        tracing::event!(
                            Level::INFO,
                            status = response.status().as_u16(),
                            latency = ?latency,
                            "request completed"
                        );
                    },
                ),
        )
}

fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    if cors.allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = cors
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}
