use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use staffhub_auth::{Principal, Role, Scope, require_min_level};
use staffhub_core::{DomainError, NewsId};
use staffhub_records::NewsItem;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(read).delete(remove))
}

pub async fn list(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(_principal): Extension<Principal>,
) -> axum::response::Response {
    match services.news.list(&Scope::All).await {
        Ok(items) => {
            let items: Vec<_> = items.iter().map(dto::news_to_json).collect();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::store_error("/news", e),
    }
}

/// Reading an item bumps its view counter.
pub async fn read(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(_principal): Extension<Principal>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: NewsId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::see_other("/news", &e.to_string()),
    };

    let apply = |n: &mut NewsItem| -> Result<(), DomainError> {
        n.views += 1;
        Ok(())
    };
    match services.news.update_with(&Scope::All, &id, &apply).await {
        Ok(item) => (StatusCode::OK, Json(dto::news_to_json(&item))).into_response(),
        Err(e) => errors::store_error("/news", e),
    }
}

pub async fn create(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<dto::CreateNewsRequest>,
) -> axum::response::Response {
    if let Err(e) = require_min_level(&principal, Role::Admin) {
        return errors::auth_error(e);
    }

    let author = match services.employees.find_by_id(principal.id).await {
        Ok(Some(record)) => record.display_name(),
        _ => principal.id.to_string(),
    };

    let mut item = NewsItem::new(author, body.title, body.content);
    item.category = body.category;

    let json = dto::news_to_json(&item);
    match services.news.insert(item).await {
        Ok(()) => (StatusCode::CREATED, Json(json)).into_response(),
        Err(e) => errors::store_error("/news", e),
    }
}

pub async fn remove(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(e) = require_min_level(&principal, Role::Admin) {
        return errors::auth_error(e);
    }
    let id: NewsId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::see_other("/news", &e.to_string()),
    };
    match services.news.delete(&Scope::All, &id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::store_error("/news", e),
    }
}
