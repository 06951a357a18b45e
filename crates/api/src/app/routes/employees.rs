use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use staffhub_auth::Principal;
use staffhub_core::Company;
use staffhub_records::ProfileUpdate;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list))
        .route("/me", get(profile).post(update_profile))
        .route("/me/onboarding", post(complete_onboarding))
}

/// The team page: every authenticated principal sees the directory.
pub async fn list(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(_principal): Extension<Principal>,
) -> axum::response::Response {
    match services.employees.list().await {
        Ok(records) => {
            let items: Vec<_> = records.iter().map(dto::employee_to_json).collect();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::store_error("/employees", e),
    }
}

pub async fn profile(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
) -> axum::response::Response {
    match services.employees.find_by_id(principal.id).await {
        Ok(Some(record)) => {
            (StatusCode::OK, Json(dto::employee_to_json(&record))).into_response()
        }
        Ok(None) => errors::unavailable("/employees"),
        Err(e) => errors::store_error("/employees", e),
    }
}

/// Self-service profile update. The stored role is not reachable from
/// here; it only moves through the role assignment path.
pub async fn update_profile(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<dto::UpdateProfileRequest>,
) -> axum::response::Response {
    let update = ProfileUpdate {
        phone: body.phone,
        company: body.company.map(Company::new),
        position: body.position,
        department: body.department,
    };

    match services.employees.update_profile(principal.id, update).await {
        Ok(record) => (StatusCode::OK, Json(dto::employee_to_json(&record))).into_response(),
        Err(e) => errors::store_error("/employees", e),
    }
}

pub async fn complete_onboarding(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
) -> axum::response::Response {
    match services.employees.complete_onboarding(principal.id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::store_error("/employees", e),
    }
}
