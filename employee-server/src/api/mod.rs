//! HTTP surface: routes and middleware stack

pub mod employees;
pub mod health;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue, Uri};
use shared::{AppError, ErrorCode};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::config::Config;
use crate::middleware;
use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request id generator (uuid v4)
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// All routes, no middleware, no state
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(employees::router())
        .merge(health::router())
        .fallback(route_not_found)
}

async fn route_not_found(uri: Uri) -> AppError {
    AppError::with_message(ErrorCode::NotFound, format!("No route for {}", uri.path()))
}

/// Fully configured application: routes, middleware and state
///
/// Used by the HTTP server and by in-process tests.
pub fn build_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    build_router()
        .layer(cors)
        // Request logging
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        // Request id: echoed on the response, generated when the client sent none
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    match config
        .cors_allowed_origin
        .as_deref()
        .and_then(|origin| HeaderValue::from_str(origin).ok())
    {
        Some(origin) => CorsLayer::new()
            .allow_origin(AllowOrigin::exact(origin))
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any),
        None => CorsLayer::permissive(),
    }
}
