use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use staffhub_auth::{AccessMode, Principal, ResourceClass, Role, require_min_level, scope_for};
use staffhub_core::UserId;
use staffhub_records::Activity;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/", get(list).post(award))
}

pub async fn list(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
) -> axum::response::Response {
    let scope = match scope_for(&principal, ResourceClass::Activities, AccessMode::Read) {
        Ok(scope) => scope,
        Err(e) => return errors::auth_error(e),
    };
    match services.activities.list(&scope).await {
        Ok(items) => {
            let items: Vec<_> = items.iter().map(dto::activity_to_json).collect();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::store_error("/activities", e),
    }
}

/// Admin-gated: record an activity and credit the points to its owner.
///
/// The points credit runs first; it doubles as the existence check for the
/// target employee.
pub async fn award(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<dto::CreateActivityRequest>,
) -> axum::response::Response {
    if let Err(e) = require_min_level(&principal, Role::Admin) {
        return errors::auth_error(e);
    }

    let owner = match body.user_id.parse::<UserId>() {
        Ok(id) => id,
        Err(e) => return errors::see_other("/activities", &e.to_string()),
    };

    if let Err(e) = services.employees.credit_points(owner, body.points).await {
        return errors::store_error("/activities", e);
    }

    let activity = Activity::new(
        owner,
        body.kind,
        body.description.unwrap_or_default(),
        body.points,
    );
    let json = dto::activity_to_json(&activity);
    match services.activities.insert(activity).await {
        Ok(()) => (StatusCode::CREATED, Json(json)).into_response(),
        Err(e) => errors::store_error("/activities", e),
    }
}
