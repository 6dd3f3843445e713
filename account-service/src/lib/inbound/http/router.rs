use std::sync::Arc;
use std::time::Duration;

use auth::TokenCodec;
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

use super::handlers::authenticate::authenticate;
use super::handlers::hello::hello;
use super::handlers::register::register;
use super::middleware::authenticate as authenticate_request;
use crate::domain::user::service::AuthenticationService;
use crate::user::ports::UserRepository;

pub struct AppState<R: UserRepository> {
    pub auth_service: Arc<AuthenticationService<R>>,
    pub token_codec: Arc<TokenCodec>,
}

impl<R: UserRepository> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            auth_service: Arc::clone(&self.auth_service),
            token_codec: Arc::clone(&self.token_codec),
        }
    }
}

pub fn create_router<R: UserRepository>(
    auth_service: Arc<AuthenticationService<R>>,
    token_codec: Arc<TokenCodec>,
) -> Router {
    let state = AppState {
        auth_service,
        token_codec,
    };

    // The request authenticator runs on every route; it attaches identity but
    // never rejects, matching the permissive authorization policy.
    let routes = Router::new()
        .route("/api/v1/auth/register", post(register::<R>))
        .route("/api/v1/auth/authenticate", post(authenticate::<R>))
        .route("/api/v1/demo/hello", get(hello))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            authenticate_request::<R>,
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
        .merge(routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
