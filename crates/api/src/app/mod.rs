//! HTTP application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: store wiring (in-memory or Postgres) + session codec
//! - `routes/`: HTTP routes + handlers (one file per portal area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: the error-to-redirect mapping

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use crate::config::Config;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(config: Config) -> Router {
    let services = Arc::new(services::build_services(&config).await);
    services.ensure_bootstrap_developer().await;

    let auth_state = middleware::AuthState {
        codec: services.codec.clone(),
    };

    // Protected routes: everything behind the session middleware.
    let protected = routes::router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::session_middleware,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/auth", routes::auth::public_router())
        .merge(protected)
        .layer(Extension(services))
}
