//! Administration: the staff roster, role assignment and permission
//! inspection.
//!
//! Role assignment is deliberately not pre-gated here. The handler hands
//! the caller's principal to the store, which evaluates the assignment
//! policy against the target's current role inside its critical section
//! and reports a denial back as a redirect like any other.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::{Value, json};

use staffhub_auth::{
    AccessMode, Principal, ResourceClass, Role, Scope, require_min_level, scope_for,
};
use staffhub_core::UserId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/:id/role", post(assign_role))
        .route("/users/:id/permissions", get(permissions))
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
) -> axum::response::Response {
    if let Err(e) = require_min_level(&principal, Role::Admin) {
        return errors::auth_error(e);
    }
    match services.employees.list().await {
        Ok(records) => {
            let items: Vec<_> = records.iter().map(dto::employee_to_json).collect();
            (StatusCode::OK, Json(json!({ "items": items }))).into_response()
        }
        Err(e) => errors::store_error("/admin/users", e),
    }
}

pub async fn assign_role(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    Json(body): Json<dto::AssignRoleRequest>,
) -> axum::response::Response {
    let target: UserId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::see_other("/admin/users", &e.to_string()),
    };
    let requested = match Role::parse(&body.role) {
        Ok(role) => role,
        Err(e) => return errors::auth_error(e),
    };

    match services
        .employees
        .assign_role(&principal, target, requested)
        .await
    {
        Ok(record) => (StatusCode::OK, Json(dto::employee_to_json(&record))).into_response(),
        Err(e) => errors::store_error("/admin/users", e),
    }
}

/// Report the scopes a user's stored role would resolve to, per resource
/// class and access direction.
pub async fn permissions(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(e) = require_min_level(&principal, Role::Admin) {
        return errors::auth_error(e);
    }
    let target: UserId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::see_other("/admin/users", &e.to_string()),
    };
    let record = match services.employees.find_by_id(target).await {
        Ok(Some(record)) => record,
        Ok(None) => return errors::unavailable("/admin/users"),
        Err(e) => return errors::store_error("/admin/users", e),
    };

    let subject = Principal::direct(record.id, record.role, record.company.clone());
    let classes = [
        ResourceClass::Vacations,
        ResourceClass::WorkRequests,
        ResourceClass::Notifications,
        ResourceClass::Reminders,
        ResourceClass::Activities,
        ResourceClass::RequestTemplates,
        ResourceClass::RequestFiles,
    ];

    let mut scopes = serde_json::Map::new();
    for class in classes {
        let key = match serde_json::to_value(class) {
            Ok(Value::String(key)) => key,
            _ => continue,
        };
        scopes.insert(
            key,
            json!({
                "read": scope_to_json(scope_for(&subject, class, AccessMode::Read)),
                "write": scope_to_json(scope_for(&subject, class, AccessMode::Write)),
            }),
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "user": record.id.to_string(),
            "role": record.role.as_str(),
            "level": record.level(),
            "scopes": scopes,
        })),
    )
        .into_response()
}

fn scope_to_json(resolved: Result<Scope, staffhub_auth::AuthError>) -> Value {
    match resolved {
        Ok(Scope::All) => json!("all"),
        Ok(Scope::Owner(id)) => json!({ "owner": id.to_string() }),
        Ok(Scope::Company(company)) => {
            json!({ "company": company.map(|c| c.as_str().to_owned()) })
        }
        Err(e) => json!({ "denied": e.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use staffhub_core::Company;

    #[test]
    fn scope_json_shapes_cover_all_outcomes() {
        assert_eq!(scope_to_json(Ok(Scope::All)), json!("all"));

        let id = UserId::new();
        assert_eq!(
            scope_to_json(Ok(Scope::Owner(id))),
            json!({ "owner": id.to_string() })
        );
        assert_eq!(
            scope_to_json(Ok(Scope::Company(Some(Company::new("Acme"))))),
            json!({ "company": "Acme" })
        );
        assert_eq!(
            scope_to_json(Ok(Scope::Company(None))),
            json!({ "company": null })
        );

        let denied = scope_to_json(Err(staffhub_auth::AuthError::denied("no")));
        assert!(denied.get("denied").is_some());
    }
}
