//! Front door: bot registration, logins and developer role switching.
//!
//! Registration and the two login forms are public; `switch_role` sits in
//! the protected router because it re-issues an existing session.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use chrono::Utc;

use staffhub_auth::{Principal, Role};
use staffhub_records::EmployeeRecord;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn public_router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/bootstrap", post(bootstrap_login))
}

/// Bot registration contract: create-or-lookup by messenger id.
///
/// No authorization decisions happen here; the bot is trusted to speak for
/// the messenger account it names.
pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RegisterRequest>,
) -> axum::response::Response {
    match services.employees.find_by_messenger(&body.messenger_id).await {
        Ok(Some(existing)) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "id": existing.id.to_string(),
                "created": false,
                "role": existing.role.as_str(),
            })),
        )
            .into_response(),
        Ok(None) => {
            let record = EmployeeRecord::from_messenger(
                body.messenger_id,
                body.username,
                body.first_name,
                body.last_name,
            );
            let id = record.id;
            let role = record.role;
            match services.employees.insert(record).await {
                Ok(()) => (
                    StatusCode::CREATED,
                    Json(serde_json::json!({
                        "id": id.to_string(),
                        "created": true,
                        "role": role.as_str(),
                    })),
                )
                    .into_response(),
                Err(e) => errors::store_error("/auth/register", e),
            }
        }
        Err(e) => errors::store_error("/auth/register", e),
    }
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    let record = match services.employees.find_by_messenger(&body.messenger_id).await {
        Ok(Some(record)) => record,
        Ok(None) => return errors::see_other("/register", "no account yet, please register"),
        Err(e) => return errors::store_error("/login", e),
    };

    if !record.is_active {
        return errors::see_other("/login", "this account has been deactivated");
    }

    let principal = Principal::direct(record.id, record.role, record.company.clone());
    session_response(&services, &principal)
}

/// Developer login for the account seeded from the environment.
///
/// A plain credential comparison against the configured pair; mismatches
/// and an unconfigured bootstrap answer identically.
pub async fn bootstrap_login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::BootstrapLoginRequest>,
) -> axum::response::Response {
    let Some(bootstrap) = &services.bootstrap else {
        return errors::see_other("/login", "invalid credentials");
    };
    if body.email != bootstrap.email || body.password != bootstrap.password {
        return errors::see_other("/login", "invalid credentials");
    }

    let record = match services.employees.find_by_email(&bootstrap.email).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            // Seeding normally happens at startup; recover if it did not.
            services.ensure_bootstrap_developer().await;
            match services.employees.find_by_email(&bootstrap.email).await {
                Ok(Some(record)) => record,
                Ok(None) => return errors::internal(),
                Err(e) => return errors::store_error("/login", e),
            }
        }
        Err(e) => return errors::store_error("/login", e),
    };

    let principal = Principal::direct(record.id, record.role, record.company.clone());
    session_response(&services, &principal)
}

/// Re-issue the session under a different active role.
///
/// Only sessions whose *original* role is developer may switch; the check
/// lives on [`Principal::switch_role`] so a developer who stepped down can
/// always step back up.
pub async fn switch_role(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<dto::SwitchRoleRequest>,
) -> axum::response::Response {
    let requested = match Role::parse(&body.role) {
        Ok(role) => role,
        Err(e) => return errors::auth_error(e),
    };

    match principal.switch_role(requested) {
        Ok(switched) => session_response(&services, &switched),
        Err(e) => errors::auth_error(e),
    }
}

/// Mint a token for the principal and answer with it (body + cookie).
fn session_response(services: &AppServices, principal: &Principal) -> axum::response::Response {
    let token = match services.codec.issue(principal, Utc::now()) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!(error = %e, "failed to sign session token");
            return errors::internal();
        }
    };

    (
        StatusCode::OK,
        [(
            header::SET_COOKIE,
            format!("session={token}; Path=/; HttpOnly"),
        )],
        Json(serde_json::json!({
            "token": token,
            "role": principal.role.as_str(),
            "level": principal.level(),
            "original_role": principal.original_role.as_str(),
        })),
    )
        .into_response()
}
