//! Work requests plus the company-scoped templates and files behind them.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use chrono::Utc;

use staffhub_auth::{
    AccessMode, AuthError, Principal, ResourceClass, Role, Scope, require_min_level, scope_for,
};
use staffhub_core::{Company, DomainError, RequestFileId, TemplateId, WorkRequestId};
use staffhub_records::{RequestFile, RequestStatus, RequestTemplate, WorkRequest};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one))
        .route("/:id/review", post(review))
        .route("/templates", get(list_templates).post(create_template))
        .route("/templates/:id", delete(delete_template))
        .route("/templates/:id/files", get(list_template_files))
        .route("/files", get(list_files).post(attach_file))
        .route("/files/:id", delete(delete_file))
}

// -------------------------
// Work requests (owned)
// -------------------------

pub async fn list(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
) -> axum::response::Response {
    let scope = match scope_for(&principal, ResourceClass::WorkRequests, AccessMode::Read) {
        Ok(scope) => scope,
        Err(e) => return errors::auth_error(e),
    };
    match services.requests.list(&scope).await {
        Ok(items) => {
            let items: Vec<_> = items.iter().map(dto::work_request_to_json).collect();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::store_error("/requests", e),
    }
}

pub async fn create(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<dto::CreateWorkRequestRequest>,
) -> axum::response::Response {
    // Elevated accounts review requests, they do not file them.
    if principal.level() >= Role::Admin.level() {
        return errors::auth_error(AuthError::denied(
            "portal administrators do not file work requests",
        ));
    }

    let request = WorkRequest::new(principal.id, body.kind, body.title, body.description);
    let json = dto::work_request_to_json(&request);
    match services.requests.insert(request).await {
        Ok(()) => (StatusCode::CREATED, Json(json)).into_response(),
        Err(e) => errors::store_error("/requests", e),
    }
}

pub async fn get_one(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: WorkRequestId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::see_other("/requests", &e.to_string()),
    };
    let scope = match scope_for(&principal, ResourceClass::WorkRequests, AccessMode::Read) {
        Ok(scope) => scope,
        Err(e) => return errors::auth_error(e),
    };
    match services.requests.get(&scope, &id).await {
        Ok(request) => {
            (StatusCode::OK, Json(dto::work_request_to_json(&request))).into_response()
        }
        Err(e) => errors::store_error("/requests", e),
    }
}

pub async fn review(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    Json(body): Json<dto::ReviewRequest>,
) -> axum::response::Response {
    if let Err(e) = require_min_level(&principal, Role::Admin) {
        return errors::auth_error(e);
    }
    let id: WorkRequestId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::see_other("/requests", &e.to_string()),
    };
    let status: RequestStatus = match body.status.parse() {
        Ok(status) => status,
        Err(e) => return errors::see_other("/requests", &e.to_string()),
    };
    let scope = match scope_for(&principal, ResourceClass::WorkRequests, AccessMode::Write) {
        Ok(scope) => scope,
        Err(e) => return errors::auth_error(e),
    };

    let comment = body.admin_comment;
    let apply = |r: &mut WorkRequest| -> Result<(), DomainError> {
        r.status = status;
        r.admin_comment = comment.clone();
        r.updated_at = Utc::now();
        Ok(())
    };
    match services.requests.update_with(&scope, &id, &apply).await {
        Ok(updated) => {
            (StatusCode::OK, Json(dto::work_request_to_json(&updated))).into_response()
        }
        Err(e) => errors::store_error("/requests", e),
    }
}

// -------------------------
// Templates (company-scoped)
// -------------------------

/// Company tag for a new shared row: an unrestricted writer picks the tag
/// (including none for a globally visible row); everyone else writes into
/// their own company scope.
fn company_for_write(scope: &Scope, requested: Option<String>) -> Option<Company> {
    match scope {
        Scope::All => requested.map(Company::new),
        Scope::Company(own) => own.clone(),
        Scope::Owner(_) => None,
    }
}

pub async fn list_templates(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
) -> axum::response::Response {
    let scope = match scope_for(&principal, ResourceClass::RequestTemplates, AccessMode::Read) {
        Ok(scope) => scope,
        Err(e) => return errors::auth_error(e),
    };
    match services.templates.list(&scope).await {
        Ok(items) => {
            let items: Vec<_> = items.iter().map(dto::template_to_json).collect();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::store_error("/requests", e),
    }
}

pub async fn create_template(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<dto::CreateTemplateRequest>,
) -> axum::response::Response {
    let scope = match scope_for(&principal, ResourceClass::RequestTemplates, AccessMode::Write) {
        Ok(scope) => scope,
        Err(e) => return errors::auth_error(e),
    };

    let company = company_for_write(&scope, body.company);
    let mut template =
        RequestTemplate::new(principal.id, body.title, body.description, company);
    template.icon = body.icon;

    let json = dto::template_to_json(&template);
    match services.templates.insert(template).await {
        Ok(()) => (StatusCode::CREATED, Json(json)).into_response(),
        Err(e) => errors::store_error("/requests", e),
    }
}

pub async fn delete_template(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: TemplateId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::see_other("/requests", &e.to_string()),
    };
    let scope = match scope_for(&principal, ResourceClass::RequestTemplates, AccessMode::Write) {
        Ok(scope) => scope,
        Err(e) => return errors::auth_error(e),
    };
    match services.templates.delete(&scope, &id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::store_error("/requests", e),
    }
}

// -------------------------
// Files (company-scoped)
// -------------------------

pub async fn list_files(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
) -> axum::response::Response {
    let scope = match scope_for(&principal, ResourceClass::RequestFiles, AccessMode::Read) {
        Ok(scope) => scope,
        Err(e) => return errors::auth_error(e),
    };
    match services.files.list(&scope).await {
        Ok(items) => {
            let items: Vec<_> = items.iter().map(dto::file_to_json).collect();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::store_error("/requests", e),
    }
}

pub async fn list_template_files(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let template_id: TemplateId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::see_other("/requests", &e.to_string()),
    };
    let scope = match scope_for(&principal, ResourceClass::RequestFiles, AccessMode::Read) {
        Ok(scope) => scope,
        Err(e) => return errors::auth_error(e),
    };
    match services.files.list(&scope).await {
        Ok(items) => {
            let items: Vec<_> = items
                .iter()
                .filter(|f| f.template_id == Some(template_id))
                .map(dto::file_to_json)
                .collect();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::store_error("/requests", e),
    }
}

pub async fn attach_file(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<dto::CreateFileRequest>,
) -> axum::response::Response {
    let scope = match scope_for(&principal, ResourceClass::RequestFiles, AccessMode::Write) {
        Ok(scope) => scope,
        Err(e) => return errors::auth_error(e),
    };

    let template_id = match body.template_id {
        Some(raw) => match raw.parse::<TemplateId>() {
            Ok(id) => Some(id),
            Err(e) => return errors::see_other("/requests", &e.to_string()),
        },
        None => None,
    };

    let company = company_for_write(&scope, body.company);
    let mut file = RequestFile::new(principal.id, body.filename, body.url, company);
    file.template_id = template_id;
    file.original_name = body.original_name;
    file.file_type = body.file_type;

    let json = dto::file_to_json(&file);
    match services.files.insert(file).await {
        Ok(()) => (StatusCode::CREATED, Json(json)).into_response(),
        Err(e) => errors::store_error("/requests", e),
    }
}

pub async fn delete_file(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: RequestFileId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::see_other("/requests", &e.to_string()),
    };
    let scope = match scope_for(&principal, ResourceClass::RequestFiles, AccessMode::Write) {
        Ok(scope) => scope,
        Err(e) => return errors::auth_error(e),
    };
    match services.files.delete(&scope, &id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::store_error("/requests", e),
    }
}
