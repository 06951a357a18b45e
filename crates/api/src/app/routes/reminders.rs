use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use staffhub_auth::{
    AccessMode, Principal, ResourceClass, Role, require_owner_or_min_level, scope_for,
};
use staffhub_core::UserId;
use staffhub_records::Reminder;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/", get(list).post(create))
}

/// Scoped listing, soonest first.
pub async fn list(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
) -> axum::response::Response {
    let scope = match scope_for(&principal, ResourceClass::Reminders, AccessMode::Read) {
        Ok(scope) => scope,
        Err(e) => return errors::auth_error(e),
    };
    match services.reminders.list(&scope).await {
        Ok(mut items) => {
            items.sort_by_key(|r| r.remind_at);
            let items: Vec<_> = items.iter().map(dto::reminder_to_json).collect();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::store_error("/reminders", e),
    }
}

/// Anyone may remind themselves; reminding someone else is admin-gated.
pub async fn create(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<dto::CreateReminderRequest>,
) -> axum::response::Response {
    let owner = match &body.target {
        Some(raw) => match raw.parse::<UserId>() {
            Ok(id) => id,
            Err(e) => return errors::see_other("/reminders", &e.to_string()),
        },
        None => principal.id,
    };

    if let Err(e) = require_owner_or_min_level(&principal, owner, Role::Admin) {
        return errors::auth_error(e);
    }

    let mut reminder = Reminder::new(owner, body.title, body.remind_at);
    reminder.message = body.message;

    let json = dto::reminder_to_json(&reminder);
    match services.reminders.insert(reminder).await {
        Ok(()) => (StatusCode::CREATED, Json(json)).into_response(),
        Err(e) => errors::store_error("/reminders", e),
    }
}
