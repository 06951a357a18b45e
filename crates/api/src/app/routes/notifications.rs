use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use staffhub_auth::{AccessMode, Principal, ResourceClass, Role, require_min_level, scope_for};
use staffhub_core::{DomainError, NotificationId, UserId};
use staffhub_records::Notification;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id/read", post(mark_read))
}

pub async fn list(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
) -> axum::response::Response {
    let scope = match scope_for(&principal, ResourceClass::Notifications, AccessMode::Read) {
        Ok(scope) => scope,
        Err(e) => return errors::auth_error(e),
    };
    match services.notifications.list(&scope).await {
        Ok(items) => {
            let items: Vec<_> = items.iter().map(dto::notification_to_json).collect();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::store_error("/notifications", e),
    }
}

/// Admin-gated. A missing target fans the notification out to everyone.
pub async fn create(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<dto::CreateNotificationRequest>,
) -> axum::response::Response {
    if let Err(e) = require_min_level(&principal, Role::Admin) {
        return errors::auth_error(e);
    }

    let targets: Vec<UserId> = match &body.target {
        Some(raw) => match raw.parse::<UserId>() {
            Ok(id) => vec![id],
            Err(e) => return errors::see_other("/notifications", &e.to_string()),
        },
        None => match services.employees.list().await {
            Ok(all) => all.into_iter().map(|rec| rec.id).collect(),
            Err(e) => return errors::store_error("/notifications", e),
        },
    };

    let mut delivered = 0usize;
    for target in targets {
        let notification = Notification::new(target, body.title.clone(), body.message.clone());
        if let Err(e) = services.notifications.insert(notification).await {
            return errors::store_error("/notifications", e);
        }
        delivered += 1;
    }

    (
        StatusCode::CREATED,
        Json(serde_json::json!({ "delivered": delivered })),
    )
        .into_response()
}

pub async fn mark_read(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: NotificationId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::see_other("/notifications", &e.to_string()),
    };
    let scope = match scope_for(&principal, ResourceClass::Notifications, AccessMode::Write) {
        Ok(scope) => scope,
        Err(e) => return errors::auth_error(e),
    };

    let apply = |n: &mut Notification| -> Result<(), DomainError> {
        n.read = true;
        Ok(())
    };
    match services.notifications.update_with(&scope, &id, &apply).await {
        Ok(updated) => {
            (StatusCode::OK, Json(dto::notification_to_json(&updated))).into_response()
        }
        Err(e) => errors::store_error("/notifications", e),
    }
}
