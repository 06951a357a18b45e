use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use staffhub_auth::{Principal, Role};

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(Extension(principal): Extension<Principal>) -> impl IntoResponse {
    Json(serde_json::json!({
        "id": principal.id.to_string(),
        "role": principal.role.as_str(),
        "level": principal.level(),
        "original_role": principal.original_role.as_str(),
        "impersonating": principal.impersonating(),
        "company": principal.company.as_ref().map(|c| c.as_str()),
        "is_admin": principal.level() >= Role::Admin.level(),
    }))
}
