use std::sync::Arc;

use axum::{
    Json, Router, extract::Extension, http::StatusCode, response::IntoResponse, routing::get,
};

use staffhub_auth::{Principal, Role, Scope, require_min_level};
use staffhub_records::Broadcast;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/", get(list).post(send))
}

pub async fn list(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(_principal): Extension<Principal>,
) -> axum::response::Response {
    match services.broadcasts.list(&Scope::All).await {
        Ok(items) => {
            let items: Vec<_> = items.iter().map(dto::broadcast_to_json).collect();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::store_error("/broadcasts", e),
    }
}

pub async fn send(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<dto::CreateBroadcastRequest>,
) -> axum::response::Response {
    if let Err(e) = require_min_level(&principal, Role::Admin) {
        return errors::auth_error(e);
    }

    let broadcast = Broadcast::new(principal.id, body.title, body.message);
    let json = dto::broadcast_to_json(&broadcast);
    match services.broadcasts.insert(broadcast).await {
        Ok(()) => (StatusCode::CREATED, Json(json)).into_response(),
        Err(e) => errors::store_error("/broadcasts", e),
    }
}
