use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use staffhub_auth::{Principal, Role, Scope, require_min_level};
use staffhub_core::{ArticleId, CategoryId, DomainError};
use staffhub_records::{KnowledgeArticle, KnowledgeCategory};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route("/articles", get(list_articles).post(create_article))
        .route("/articles/:id", get(read_article))
}

pub async fn list_categories(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(_principal): Extension<Principal>,
) -> axum::response::Response {
    match services.categories.list(&Scope::All).await {
        Ok(items) => {
            let items: Vec<_> = items.iter().map(dto::category_to_json).collect();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::store_error("/knowledge", e),
    }
}

pub async fn create_category(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<dto::CreateCategoryRequest>,
) -> axum::response::Response {
    if let Err(e) = require_min_level(&principal, Role::Admin) {
        return errors::auth_error(e);
    }

    let mut category = KnowledgeCategory::new(body.name);
    category.description = body.description;
    category.icon = body.icon;

    let json = dto::category_to_json(&category);
    match services.categories.insert(category).await {
        Ok(()) => (StatusCode::CREATED, Json(json)).into_response(),
        Err(e) => errors::store_error("/knowledge", e),
    }
}

pub async fn list_articles(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(_principal): Extension<Principal>,
) -> axum::response::Response {
    match services.articles.list(&Scope::All).await {
        Ok(items) => {
            let items: Vec<_> = items.iter().map(dto::article_to_json).collect();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::store_error("/knowledge", e),
    }
}

/// Articles must land in an existing category.
pub async fn create_article(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<dto::CreateArticleRequest>,
) -> axum::response::Response {
    if let Err(e) = require_min_level(&principal, Role::Admin) {
        return errors::auth_error(e);
    }
    let category_id: CategoryId = match body.category_id.parse() {
        Ok(id) => id,
        Err(e) => return errors::see_other("/knowledge", &e.to_string()),
    };
    if let Err(e) = services.categories.get(&Scope::All, &category_id).await {
        return errors::store_error("/knowledge", e);
    }

    let author = match services.employees.find_by_id(principal.id).await {
        Ok(Some(record)) => record.display_name(),
        _ => principal.id.to_string(),
    };

    let article = KnowledgeArticle::new(category_id, author, body.title, body.content);
    let json = dto::article_to_json(&article);
    match services.articles.insert(article).await {
        Ok(()) => (StatusCode::CREATED, Json(json)).into_response(),
        Err(e) => errors::store_error("/knowledge", e),
    }
}

/// Reading an article bumps its view counter.
pub async fn read_article(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(_principal): Extension<Principal>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ArticleId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::see_other("/knowledge", &e.to_string()),
    };

    let apply = |a: &mut KnowledgeArticle| -> Result<(), DomainError> {
        a.views += 1;
        Ok(())
    };
    match services.articles.update_with(&Scope::All, &id, &apply).await {
        Ok(article) => (StatusCode::OK, Json(dto::article_to_json(&article))).into_response(),
        Err(e) => errors::store_error("/knowledge", e),
    }
}
