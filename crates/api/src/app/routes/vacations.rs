use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use staffhub_auth::{
    AccessMode, AuthError, Principal, ResourceClass, Role, require_min_level, scope_for,
};
use staffhub_core::{DomainError, VacationId};
use staffhub_records::{RequestStatus, Vacation};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one))
        .route("/:id/review", post(review))
}

pub async fn list(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
) -> axum::response::Response {
    let scope = match scope_for(&principal, ResourceClass::Vacations, AccessMode::Read) {
        Ok(scope) => scope,
        Err(e) => return errors::auth_error(e),
    };
    match services.vacations.list(&scope).await {
        Ok(items) => {
            let items: Vec<_> = items.iter().map(dto::vacation_to_json).collect();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::store_error("/vacations", e),
    }
}

pub async fn create(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<dto::CreateVacationRequest>,
) -> axum::response::Response {
    // Elevated accounts review vacations, they do not file them.
    if principal.level() >= Role::Admin.level() {
        return errors::auth_error(AuthError::denied(
            "portal administrators do not file vacation requests",
        ));
    }

    let vacation = match Vacation::new(principal.id, body.start_date, body.end_date, body.reason) {
        Ok(vacation) => vacation,
        Err(e) => return errors::see_other("/vacations", &e.to_string()),
    };

    let json = dto::vacation_to_json(&vacation);
    match services.vacations.insert(vacation).await {
        Ok(()) => (StatusCode::CREATED, Json(json)).into_response(),
        Err(e) => errors::store_error("/vacations", e),
    }
}

pub async fn get_one(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: VacationId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::see_other("/vacations", &e.to_string()),
    };
    let scope = match scope_for(&principal, ResourceClass::Vacations, AccessMode::Read) {
        Ok(scope) => scope,
        Err(e) => return errors::auth_error(e),
    };
    match services.vacations.get(&scope, &id).await {
        Ok(vacation) => (StatusCode::OK, Json(dto::vacation_to_json(&vacation))).into_response(),
        Err(e) => errors::store_error("/vacations", e),
    }
}

/// Admin review: set the status and leave a comment.
pub async fn review(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    Json(body): Json<dto::ReviewRequest>,
) -> axum::response::Response {
    if let Err(e) = require_min_level(&principal, Role::Admin) {
        return errors::auth_error(e);
    }
    let id: VacationId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::see_other("/vacations", &e.to_string()),
    };
    let status: RequestStatus = match body.status.parse() {
        Ok(status) => status,
        Err(e) => return errors::see_other("/vacations", &e.to_string()),
    };
    let scope = match scope_for(&principal, ResourceClass::Vacations, AccessMode::Write) {
        Ok(scope) => scope,
        Err(e) => return errors::auth_error(e),
    };

    let comment = body.admin_comment;
    let apply = |v: &mut Vacation| -> Result<(), DomainError> {
        v.status = status;
        v.admin_comment = comment.clone();
        Ok(())
    };
    match services.vacations.update_with(&scope, &id, &apply).await {
        Ok(updated) => (StatusCode::OK, Json(dto::vacation_to_json(&updated))).into_response(),
        Err(e) => errors::store_error("/vacations", e),
    }
}
