use std::sync::Arc;
use std::time::Duration;

use auth::TokenService;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_admin::create_admin;
use super::handlers::delete_admin::delete_admin;
use super::handlers::get_admin::get_admin;
use super::handlers::login::login;
use super::handlers::me::me;
use super::handlers::ping::ping;
use super::handlers::refresh::refresh;
use super::middleware::authenticate as auth_middleware;
use crate::domain::admin::ports::AdminServicePort;

#[derive(Clone)]
pub struct AppState {
    pub admin_service: Arc<dyn AdminServicePort>,
    pub token_service: Arc<dyn TokenService>,
}

pub fn create_router(
    admin_service: Arc<dyn AdminServicePort>,
    token_service: Arc<dyn TokenService>,
) -> Router {
    let state = AppState {
        admin_service,
        token_service: Arc::clone(&token_service),
    };

    let public_routes = Router::new()
        .route("/api/v1/ping", get(ping))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/refresh", post(refresh));

    let protected_routes = Router::new()
        .route("/api/v1/auth/me", get(me))
        .route("/api/v1/admins", post(create_admin))
        .route("/api/v1/admins/:id", get(get_admin).delete(delete_admin))
        .route_layer(middleware::from_fn_with_state(
            token_service,
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
